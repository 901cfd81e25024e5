//! Combat domain: tuning resources and the seeded RNG used by flyers.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Parameters for one kind of [`HitManager`](crate::combat::HitManager).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HitTuning {
    pub hit_points: u32,
    /// Seconds after an accepted hit during which further hits are dropped
    pub invulnerability_duration: f32,
    /// Seconds between opacity toggles while invulnerable
    pub flicker_interval: f32,
    /// Opacity used for the "hidden" half of the flicker
    pub flicker_alpha: f32,
    /// Knockback speed lost per second
    pub knockback_drag: f32,
}

impl Default for HitTuning {
    fn default() -> Self {
        Self {
            hit_points: 2,
            invulnerability_duration: 0.5,
            flicker_interval: 0.08,
            flicker_alpha: 0.3,
            knockback_drag: 600.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    pub player: HitTuning,
    pub enemy: HitTuning,
    pub melee_knockback: f32,
    /// Distance from the player's center to the sword hitbox center
    pub melee_reach: f32,
    pub melee_width: f32,
    pub melee_height: f32,
    pub melee_lifetime: f32,
    pub melee_cooldown: f32,
    /// Minimum upward knockback for targets that must be knocked off the floor
    pub knock_off_floor_lift: f32,
    /// Knockback applied by enemies touching the player
    pub contact_knockback: f32,
    pub pit_damage: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player: HitTuning {
                hit_points: 5,
                invulnerability_duration: 1.0,
                flicker_interval: 0.08,
                flicker_alpha: 0.3,
                knockback_drag: 900.0,
            },
            enemy: HitTuning::default(),
            melee_knockback: 300.0,
            melee_reach: 28.0,
            melee_width: 36.0,
            melee_height: 28.0,
            melee_lifetime: 0.15,
            melee_cooldown: 0.3,
            knock_off_floor_lift: 150.0,
            contact_knockback: 250.0,
            pit_damage: 1,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub patrol_foot_speed: f32,
    pub chase_foot_speed: f32,
    /// Line of sight reach in front of an enemy
    pub sight_range: f32,
    pub sight_height: f32,
    /// How far past the leading side the edge probe looks for floor or walls
    pub edge_probe_ahead: f32,
    /// How far past the leading side the drop probe looks; drops stop the feet
    pub drop_probe_ahead: f32,
    pub probe_depth: f32,
    pub gravity: f32,
    /// Aim error (radians) under which the gun counts as ready
    pub gun_ready_threshold: f32,
    /// Fraction of the remaining aim error closed per second
    pub gun_ready_speed: f32,
    pub gun_aim_duration: f32,
    pub gun_fire_duration: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub flyer_min_speed: f32,
    pub flyer_max_speed: f32,
    pub flyer_accel: f32,
    pub flyer_segment_min: f32,
    pub flyer_segment_max: f32,
    pub flyer_control_min: f32,
    pub flyer_control_max: f32,
    pub flyer_knockback: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            patrol_foot_speed: 40.0,
            chase_foot_speed: 110.0,
            sight_range: 160.0,
            sight_height: 48.0,
            edge_probe_ahead: 12.0,
            drop_probe_ahead: 4.0,
            probe_depth: 10.0,
            gravity: 980.0,
            gun_ready_threshold: PI / 128.0,
            gun_ready_speed: 2.0,
            gun_aim_duration: 0.5,
            gun_fire_duration: 0.1,
            projectile_speed: 220.0,
            projectile_lifetime: 3.0,
            flyer_min_speed: 10.0,
            flyer_max_speed: 30.0,
            flyer_accel: 10.0,
            flyer_segment_min: 20.0,
            flyer_segment_max: 50.0,
            flyer_control_min: 20.0,
            flyer_control_max: 50.0,
            flyer_knockback: 100.0,
        }
    }
}

/// Deterministic randomness for flyer paths.
#[derive(Resource, Debug)]
pub struct FlyerRng(pub ChaCha8Rng);

impl Default for FlyerRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(0x4d56_4d23))
    }
}
