//! Movement domain: pendulum swing on a grapple anchor.
//!
//! θ = 0 hangs straight below the anchor, positive θ swings to the right.
//! The bob sits at `anchor + length * (sin θ, -cos θ)`.

use bevy::prelude::*;

use crate::movement::context::Tick;
use crate::movement::state::PlayerState;

/// Ropes shorter than this cannot swing.
const MIN_LENGTH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GrappleState {
    pub anchor: Vec2,
    pub length: f32,
    pub angle: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    /// Floor contact only cancels the swing once the bob has been airborne.
    pub left_floor: bool,
}

impl GrappleState {
    /// Builds a pendulum from the body's current position and velocity.
    pub fn from_body(anchor: Vec2, position: Vec2, velocity: Vec2) -> Option<Self> {
        let offset = position - anchor;
        let length = offset.length();
        if length < MIN_LENGTH {
            return None;
        }
        let angle = offset.x.atan2(-offset.y);
        let angular_velocity = velocity.dot(tangent(angle)) / length;
        Some(Self {
            anchor,
            length,
            angle,
            angular_velocity,
            angular_acceleration: 0.0,
            left_floor: false,
        })
    }

    /// Entry action: the entry velocity becomes angular velocity and the body
    /// itself stops.
    pub fn enter(tick: &mut Tick) -> Option<Self> {
        let anchor = tick.body.grapple_anchor?;
        let mut state = Self::from_body(anchor, tick.body.position, tick.body.velocity)?;
        state.left_floor = !tick.on_floor();
        tick.body.velocity = Vec2::ZERO;
        Some(state)
    }

    pub fn bob_position(&self) -> Vec2 {
        self.anchor + self.length * Vec2::new(self.angle.sin(), -self.angle.cos())
    }

    /// Velocity of the bob along the swing.
    pub fn exit_velocity(&self) -> Vec2 {
        tangent(self.angle) * self.angular_velocity * self.length
    }

    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.angular_acceleration = -(gravity / self.length) * self.angle.sin();
        self.angle += self.angular_velocity * dt;
        self.angular_velocity += self.angular_acceleration * dt;
    }

    pub(crate) fn handle_input(&mut self, tick: &mut Tick) -> Option<PlayerState> {
        if !tick.input.grapple_held || tick.body.grapple_anchor.is_none() {
            tick.body.velocity = self.exit_velocity();
            tick.body.grapple_anchor = None;
            return Some(if !tick.on_floor() {
                PlayerState::Fall
            } else if tick.body.velocity.x == 0.0 {
                PlayerState::Idle
            } else {
                PlayerState::Run
            });
        }

        let touching = if self.left_floor {
            tick.physics.is_touching_anything()
        } else {
            tick.physics.is_on_wall() || tick.physics.is_on_ceiling()
        };
        if touching {
            tick.body.velocity = Vec2::ZERO;
            tick.body.grapple_anchor = None;
            return Some(PlayerState::Idle);
        }

        self.left_floor |= !tick.on_floor();
        self.integrate(tick.body.gravity, tick.dt);
        tick.body.position = self.bob_position();
        tick.body.velocity = Vec2::ZERO;
        None
    }
}

/// Direction of increasing θ.
fn tangent(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
