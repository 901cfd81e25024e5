//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub run_speed: f32,
    /// Apex height of a normal jump, in pixels
    pub jump_height: f32,
    /// Fixes gravity as `jump_height / (2 * time_in_air²)`; a full-speed
    /// jump reaches its apex after `2 * time_in_air` seconds
    pub time_in_air: f32,
    /// Exponential horizontal drag per second with no input, on the ground
    pub ground_friction: f32,
    /// Same as `ground_friction` but airborne; lower keeps more momentum
    pub air_friction: f32,
    /// Horizontal speeds below this snap to zero while decelerating
    pub stop_threshold: f32,
    /// Vertical speed under which apex gravity applies
    pub apex_threshold: f32,
    pub apex_gravity_scale: f32,
    pub coyote_time_buffer: f32,
    /// Extra jump speed per second of coyote time already spent
    pub coyote_bonus_per_second: f32,
    /// How long before landing a held jump still counts
    pub early_jump_buffer: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_exit_vertical_max: f32,
    pub base_max_dashes: u8,
    pub boost_jump_vertical_scale: f32,
    pub boost_jump_horizontal_scale: f32,
    pub min_charge_duration: f32,
    pub super_jump_speed: f32,
    pub ceiling_nudge_distance: f32,
    /// Horizontal inset of the inner ceiling sensors from the body edge
    pub ceiling_sensor_inset: f32,
    pub grapple_range: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run_speed: 220.0,
            jump_height: 110.0,
            time_in_air: 0.3,
            ground_friction: 18.0,
            air_friction: 3.0,
            stop_threshold: 4.0,
            apex_threshold: 40.0,
            apex_gravity_scale: 0.5,
            coyote_time_buffer: 0.1,
            coyote_bonus_per_second: 600.0,
            early_jump_buffer: 0.1,
            dash_speed: 750.0,
            dash_duration: 0.14,
            dash_exit_vertical_max: 300.0,
            base_max_dashes: 1,
            boost_jump_vertical_scale: 0.75,
            boost_jump_horizontal_scale: 1.5,
            min_charge_duration: 0.5,
            super_jump_speed: 650.0,
            ceiling_nudge_distance: 6.0,
            ceiling_sensor_inset: 4.0,
            grapple_range: 220.0,
        }
    }
}

impl MovementTuning {
    /// Constant gravity: g = h / (2t²), so a [`Self::jump_speed`] takeoff
    /// peaks at `jump_height` after `2 * time_in_air`.
    pub fn gravity(&self) -> f32 {
        self.jump_height / (2.0 * self.time_in_air * self.time_in_air)
    }

    /// Takeoff speed reaching `jump_height` under [`Self::gravity`]: v = √(2gh)
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.jump_height * self.gravity()).sqrt()
    }
}

/// One tick of player input. Sampled once, never mutated afterwards.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MovementInput {
    pub direction: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub crouch_pressed: bool,
    pub crouch_held: bool,
    pub dash_pressed: bool,
    pub grapple_pressed: bool,
    pub grapple_held: bool,
    pub melee_pressed: bool,
    pub interact_pressed: bool,
}

impl MovementInput {
    /// No direction, nothing pressed.
    pub fn neutral() -> Self {
        Self::default()
    }
}
