//! Validation for loaded tuning values.

use super::data::GameplayDefaults;
use crate::combat::HitTuning;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Helper macro for checking that a value is strictly positive
macro_rules! check_positive {
    ($errors:expr, $section:expr, $owner:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($owner.$field > 0.0) {
                $errors.push(ValidationError {
                    section: $section,
                    field: stringify!($field),
                    message: format!("must be positive, got {}", $owner.$field),
                });
            }
        )+
    };
}

fn validate_hit_tuning(errors: &mut Vec<ValidationError>, section: &'static str, hit: &HitTuning) {
    if hit.hit_points == 0 {
        errors.push(ValidationError {
            section,
            field: "hit_points",
            message: "must be at least 1".to_string(),
        });
    }
    check_positive!(errors, section, hit, invulnerability_duration, knockback_drag);
    if !(0.0..=1.0).contains(&hit.flicker_alpha) {
        errors.push(ValidationError {
            section,
            field: "flicker_alpha",
            message: format!("must lie in [0, 1], got {}", hit.flicker_alpha),
        });
    }
}

/// Validate every tuning table.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_gameplay_defaults(defaults: &GameplayDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let movement = &defaults.movement;
    check_positive!(
        errors,
        "movement",
        movement,
        run_speed,
        jump_height,
        time_in_air,
        ground_friction,
        dash_speed,
        dash_duration,
        dash_exit_vertical_max,
        min_charge_duration,
        super_jump_speed,
        coyote_time_buffer,
        grapple_range,
    );
    if movement.air_friction > movement.ground_friction {
        errors.push(ValidationError {
            section: "movement",
            field: "air_friction",
            message: format!(
                "air friction {} exceeds ground friction {}",
                movement.air_friction, movement.ground_friction
            ),
        });
    }
    if movement.base_max_dashes == 0 {
        errors.push(ValidationError {
            section: "movement",
            field: "base_max_dashes",
            message: "must be at least 1".to_string(),
        });
    }
    if !(movement.boost_jump_vertical_scale > 0.0 && movement.boost_jump_vertical_scale < 1.0) {
        errors.push(ValidationError {
            section: "movement",
            field: "boost_jump_vertical_scale",
            message: format!(
                "must lie in (0, 1), got {}",
                movement.boost_jump_vertical_scale
            ),
        });
    }
    if !(movement.boost_jump_horizontal_scale > 1.0) {
        errors.push(ValidationError {
            section: "movement",
            field: "boost_jump_horizontal_scale",
            message: format!(
                "must exceed 1, got {}",
                movement.boost_jump_horizontal_scale
            ),
        });
    }

    let combat = &defaults.combat;
    validate_hit_tuning(&mut errors, "combat.player", &combat.player);
    validate_hit_tuning(&mut errors, "combat.enemy", &combat.enemy);
    check_positive!(
        errors,
        "combat",
        combat,
        melee_reach,
        melee_width,
        melee_height,
        melee_lifetime,
    );

    let enemies = &defaults.enemies;
    check_positive!(
        errors,
        "enemies",
        enemies,
        sight_range,
        probe_depth,
        gun_aim_duration,
        gun_fire_duration,
        projectile_speed,
        projectile_lifetime,
        flyer_min_speed,
        flyer_segment_min,
    );
    if enemies.flyer_max_speed < enemies.flyer_min_speed {
        errors.push(ValidationError {
            section: "enemies",
            field: "flyer_max_speed",
            message: "must not be below flyer_min_speed".to_string(),
        });
    }
    if enemies.flyer_segment_max < enemies.flyer_segment_min {
        errors.push(ValidationError {
            section: "enemies",
            field: "flyer_segment_max",
            message: "must not be below flyer_segment_min".to_string(),
        });
    }
    if enemies.flyer_control_max < enemies.flyer_control_min {
        errors.push(ValidationError {
            section: "enemies",
            field: "flyer_control_max",
            message: "must not be below flyer_control_min".to_string(),
        });
    }

    errors
}
