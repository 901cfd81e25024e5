//! Movement domain: integration and queries shared between player states.

use bevy::prelude::*;

use crate::math::decay_toward_zero;
use crate::movement::components::{Ability, PlayerBody};
use crate::movement::context::{PhysicsQueries, Tick};
use crate::movement::resources::{MovementInput, MovementTuning};

/// How a jump request would be honoured this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpType {
    None,
    Normal,
    CoyoteTime,
    /// Jump out of a dash: less height, more horizontal speed
    BoostJump,
}

pub fn classify_jump(
    body: &PlayerBody,
    input: &MovementInput,
    physics: &dyn PhysicsQueries,
    tuning: &MovementTuning,
    dashing: bool,
) -> JumpType {
    if !input.jump_held {
        return JumpType::None;
    }

    let grounded = physics.is_on_floor() && body.jump_held_time <= tuning.early_jump_buffer;
    let coyote = !physics.is_on_floor()
        && !body.coyote_time_expired
        && body.jump_held_time < body.coyote_time_elapsed;

    if dashing && (grounded || coyote) {
        JumpType::BoostJump
    } else if coyote {
        JumpType::CoyoteTime
    } else if grounded {
        JumpType::Normal
    } else {
        JumpType::None
    }
}

/// Run, friction and gravity for states without forced motion.
pub fn generic_position_update(tick: &mut Tick) {
    let on_floor = tick.on_floor();
    let input_x = tick.input_x();
    let tuning = tick.tuning;
    let dt = tick.dt;
    let body = &mut *tick.body;

    if input_x != 0.0 {
        // Airborne horizontal speed is held; input only turns the body.
        let keep_momentum = !on_floor && body.velocity.x != 0.0;
        if !keep_momentum {
            body.velocity.x = input_x.signum() * body.run_speed;
        }
        body.face_toward_x(input_x);
    } else {
        let friction = if on_floor {
            tuning.ground_friction
        } else {
            tuning.air_friction
        };
        body.velocity.x = decay_toward_zero(body.velocity.x, friction, dt, tuning.stop_threshold);
    }

    if !on_floor {
        let scale = if body.velocity.y.abs() < tuning.apex_threshold {
            tuning.apex_gravity_scale
        } else {
            1.0
        };
        body.velocity.y -= body.gravity * scale * dt;
    }
}

/// Corner correction while rising into a ceiling edge. Returns true when the
/// body was nudged and `cached_velocity` restored.
pub fn ceiling_nudge(tick: &mut Tick, cached_velocity: Vec2) -> bool {
    if tick.on_floor() || !tick.physics.is_on_ceiling() || tick.body.velocity.y <= 0.0 {
        return false;
    }
    let Some(direction) = tick.physics.ceiling_sensors().nudge_direction() else {
        return false;
    };
    tick.body.position.x += direction * tick.tuning.ceiling_nudge_distance;
    tick.body.velocity = cached_velocity;
    true
}

pub fn wants_dash(tick: &Tick) -> bool {
    tick.input.dash_pressed && tick.body.can_dash()
}

pub fn wants_charge(tick: &Tick) -> bool {
    tick.input.crouch_pressed && tick.body.has(Ability::SuperJump)
}

pub fn wants_grapple(tick: &Tick) -> bool {
    tick.input.grapple_held && tick.body.has(Ability::Grapple) && tick.body.grapple_anchor.is_some()
}
