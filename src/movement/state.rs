//! Movement domain: the player state machine.
//!
//! Exactly one [`PlayerState`] is active. Each tick the active state integrates
//! the body and may return its successor; entry actions run when the successor
//! is built, so the new state is in force from the next tick on.

use std::fmt;

use bevy::prelude::*;

use crate::math::Angle;
use crate::movement::components::{Ability, AnimationState, Tint};
use crate::movement::context::Tick;
use crate::movement::grapple::GrappleState;
use crate::movement::locomotion::{
    JumpType, ceiling_nudge, classify_jump, generic_position_update, wants_charge, wants_dash,
    wants_grapple,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    Idle,
    Run,
    Jump(JumpState),
    Fall,
    Dash(DashState),
    Charge(ChargeState),
    SuperJump,
    Grapple(GrappleState),
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerState::Idle => "Idle",
            PlayerState::Run => "Run",
            PlayerState::Jump(_) => "Jump",
            PlayerState::Fall => "Fall",
            PlayerState::Dash(_) => "Dash",
            PlayerState::Charge(_) => "Charge",
            PlayerState::SuperJump => "SuperJump",
            PlayerState::Grapple(_) => "Grapple",
        };
        f.write_str(name)
    }
}

impl PlayerState {
    /// One tick of the active state. `None` keeps the current state.
    pub fn handle_input(&mut self, tick: &mut Tick) -> Option<PlayerState> {
        tick.sink.play_animation(self.animation());
        match self {
            PlayerState::Idle => grounded_update(tick, false),
            PlayerState::Run => grounded_update(tick, true),
            PlayerState::Jump(jump) => jump.handle_input(tick),
            PlayerState::Fall => fall_update(tick),
            PlayerState::Dash(dash) => dash.handle_input(tick),
            PlayerState::Charge(charge) => charge.handle_input(tick),
            PlayerState::SuperJump => super_jump_update(tick),
            PlayerState::Grapple(grapple) => grapple.handle_input(tick),
        }
    }

    pub fn animation(&self) -> AnimationState {
        match self {
            PlayerState::Idle | PlayerState::Charge(_) => AnimationState::Idle,
            PlayerState::Run => AnimationState::Run,
            PlayerState::Jump(_) | PlayerState::Dash(_) | PlayerState::SuperJump => {
                AnimationState::Jump
            }
            PlayerState::Fall | PlayerState::Grapple(_) => AnimationState::Fall,
        }
    }

    pub fn is_dash(&self) -> bool {
        matches!(self, PlayerState::Dash(_))
    }
}

/// Idle or Run once the body has settled on the floor.
fn landed_state(tick: &Tick) -> PlayerState {
    if tick.body.velocity.x == 0.0 && tick.input_x() == 0.0 {
        PlayerState::Idle
    } else {
        PlayerState::Run
    }
}

fn grounded_update(tick: &mut Tick, running: bool) -> Option<PlayerState> {
    generic_position_update(tick);

    if tick.on_floor() && wants_charge(tick) {
        return Some(ChargeState::enter(tick));
    }
    if wants_grapple(tick) {
        return GrappleState::enter(tick).map(PlayerState::Grapple);
    }
    if wants_dash(tick) {
        return Some(DashState::enter(tick));
    }
    let jump_type = classify_jump(tick.body, tick.input, tick.physics, tick.tuning, false);
    if jump_type != JumpType::None {
        return Some(JumpState::enter(tick, jump_type));
    }
    if !tick.on_floor() {
        return Some(PlayerState::Fall);
    }

    if running {
        (tick.body.velocity.x == 0.0 && tick.input_x() == 0.0).then_some(PlayerState::Idle)
    } else {
        (tick.input_x() != 0.0).then_some(PlayerState::Run)
    }
}

fn fall_update(tick: &mut Tick) -> Option<PlayerState> {
    generic_position_update(tick);

    if !tick.body.coyote_time_expired {
        tick.body.coyote_time_elapsed += tick.dt;
        if tick.body.coyote_time_elapsed > tick.tuning.coyote_time_buffer {
            tick.body.coyote_time_expired = true;
        }
    }

    if wants_grapple(tick) {
        return GrappleState::enter(tick).map(PlayerState::Grapple);
    }
    let jump_type = classify_jump(tick.body, tick.input, tick.physics, tick.tuning, false);
    if jump_type != JumpType::None {
        return Some(JumpState::enter(tick, jump_type));
    }
    if wants_dash(tick) {
        return Some(DashState::enter(tick));
    }
    if tick.on_floor() {
        return Some(landed_state(tick));
    }
    None
}

fn super_jump_update(tick: &mut Tick) -> Option<PlayerState> {
    tick.body.velocity = Vec2::new(0.0, tick.tuning.super_jump_speed);

    let next = if tick.input.crouch_pressed {
        Some(PlayerState::Idle)
    } else if wants_dash(tick) {
        Some(DashState::enter(tick))
    } else if tick.physics.is_on_ceiling() {
        tick.body.velocity.y = 0.0;
        Some(PlayerState::Fall)
    } else {
        None
    };
    if next.is_some() {
        tick.body.can_super_jump = false;
        tick.body.super_jump_charge = 0.0;
    }
    next
}

#[derive(Debug, Clone, PartialEq)]
pub struct JumpState {
    pub jump_type: JumpType,
    /// Velocity before the last integration, restored after a ceiling nudge
    pub nudge_velocity: Vec2,
}

impl JumpState {
    pub fn enter(tick: &mut Tick, jump_type: JumpType) -> PlayerState {
        let tuning = tick.tuning;
        let body = &mut *tick.body;
        let vertical_scale = match jump_type {
            JumpType::BoostJump => tuning.boost_jump_vertical_scale,
            _ => 1.0,
        };
        let mut jump_speed = body.jump_speed * vertical_scale;
        if jump_type == JumpType::CoyoteTime {
            jump_speed += body.coyote_time_elapsed * tuning.coyote_bonus_per_second;
        }
        body.velocity.y += jump_speed;
        if jump_type == JumpType::BoostJump {
            let sign = if body.velocity.x == 0.0 {
                body.facing.sign()
            } else {
                body.velocity.x.signum()
            };
            body.velocity.x = sign * body.run_speed * tuning.boost_jump_horizontal_scale;
        }

        body.coyote_time_elapsed = 0.0;
        body.coyote_time_expired = true;

        PlayerState::Jump(JumpState {
            jump_type,
            nudge_velocity: body.velocity,
        })
    }

    fn handle_input(&mut self, tick: &mut Tick) -> Option<PlayerState> {
        ceiling_nudge(tick, self.nudge_velocity);
        generic_position_update(tick);
        self.nudge_velocity = tick.body.velocity;

        if wants_grapple(tick) {
            return GrappleState::enter(tick).map(PlayerState::Grapple);
        }
        if wants_dash(tick) {
            return Some(DashState::enter(tick));
        }
        if tick.body.velocity.y < 0.0 {
            return Some(PlayerState::Fall);
        }
        if tick.on_floor() && tick.body.velocity.y <= 0.0 {
            return Some(landed_state(tick));
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashState {
    pub elapsed: f32,
    pub angle: Angle,
    nudge_velocity: Vec2,
}

impl DashState {
    /// Spends a dash charge and locks in the travel direction.
    pub fn enter(tick: &mut Tick) -> PlayerState {
        let body = &mut *tick.body;
        let direction = tick.input.direction.normalize_or_zero();
        let direction = if direction == Vec2::ZERO {
            body.facing.unit_vector()
        } else {
            direction
        };
        body.face_toward_x(direction.x);
        body.spend_dash();

        let angle = Angle::from_radians(direction.to_angle());
        body.velocity = angle.unit_vector() * body.dash_speed;

        PlayerState::Dash(DashState {
            elapsed: 0.0,
            angle,
            nudge_velocity: body.velocity,
        })
    }

    pub fn direction(&self) -> Vec2 {
        self.angle.unit_vector()
    }

    fn handle_input(&mut self, tick: &mut Tick) -> Option<PlayerState> {
        self.elapsed += tick.dt;
        tick.sink.set_dash_particles(true);

        ceiling_nudge(tick, self.nudge_velocity);
        tick.body.velocity = self.direction() * tick.body.dash_speed;
        self.nudge_velocity = tick.body.velocity;

        let next = if wants_charge(tick) {
            Some(ChargeState::enter(tick))
        } else if classify_jump(tick.body, tick.input, tick.physics, tick.tuning, true)
            == JumpType::BoostJump
        {
            Some(JumpState::enter(tick, JumpType::BoostJump))
        } else if self.elapsed >= tick.tuning.dash_duration {
            self.clamp_exit_velocity(tick);
            Some(if tick.on_floor() {
                PlayerState::Idle
            } else {
                PlayerState::Fall
            })
        } else {
            None
        };

        if next.is_some() {
            tick.sink.set_dash_particles(false);
        }
        next
    }

    fn clamp_exit_velocity(&self, tick: &mut Tick) {
        let max_vertical = tick.tuning.dash_exit_vertical_max;
        let body = &mut *tick.body;
        body.velocity.x = body.velocity.x.signum() * body.velocity.x.abs().min(body.run_speed);
        body.velocity.y = body.velocity.y.clamp(-max_vertical, max_vertical);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChargeState {
    pub elapsed: f32,
}

impl ChargeState {
    pub fn enter(tick: &mut Tick) -> PlayerState {
        tick.body.velocity = Vec2::ZERO;
        tick.body.super_jump_charge = 0.0;
        PlayerState::Charge(ChargeState::default())
    }

    fn handle_input(&mut self, tick: &mut Tick) -> Option<PlayerState> {
        tick.body.velocity = Vec2::ZERO;

        if tick.input.crouch_held {
            self.elapsed += tick.dt;
            tick.body.super_jump_charge = self.elapsed;
            if self.elapsed >= tick.tuning.min_charge_duration && !tick.body.can_super_jump {
                tick.body.can_super_jump = true;
                tick.sink.set_tint(Tint::Charged);
            }
            return None;
        }

        tick.sink.set_tint(Tint::Normal);
        if tick.body.can_super_jump && tick.body.has(Ability::SuperJump) {
            Some(PlayerState::SuperJump)
        } else {
            Some(PlayerState::Idle)
        }
    }
}

/// Owns the active state and applies transitions.
#[derive(Component, Debug, Clone)]
pub struct PlayerStateMachine {
    state: PlayerState,
}

impl Default for PlayerStateMachine {
    fn default() -> Self {
        Self {
            state: PlayerState::Idle,
        }
    }
}

impl PlayerStateMachine {
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Runs the active state for one tick. Returns true on a transition.
    pub fn step(&mut self, tick: &mut Tick) -> bool {
        if tick.on_floor() && tick.body.velocity.y <= 0.0 {
            tick.body.touch_ground();
        }
        if tick.input.jump_pressed {
            tick.body.jump_held_time = 0.0;
        }

        let next = self.state.handle_input(tick);

        if tick.input.jump_held {
            tick.body.jump_held_time += tick.dt;
        }

        match next {
            Some(next) => {
                debug!("Changing from {} to {}", self.state, next);
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Drops whatever the player was doing, e.g. after a respawn.
    pub fn reset(&mut self) {
        self.state = PlayerState::Idle;
    }
}
