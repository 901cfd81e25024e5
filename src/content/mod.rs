//! Content domain: RON tuning files loaded at startup.

mod data;
mod loader;
mod validation;


pub use data::{CURRENT_SCHEMA_VERSION, GameplayDefaults};
pub use loader::{ContentLoadError, load_gameplay_defaults, parse_gameplay_defaults};
pub use validation::{ValidationError, validate_gameplay_defaults};

use std::path::Path;

use bevy::prelude::*;

use crate::combat::{CombatTuning, EnemyTuning};
use crate::movement::MovementTuning;

pub const GAMEPLAY_DEFAULTS_PATH: &str = "assets/data/gameplay_defaults.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, apply_gameplay_defaults);
    }
}

/// Replaces the built-in tuning resources with the values from disk. Any
/// load or validation failure keeps the built-in values.
fn apply_gameplay_defaults(
    mut movement: ResMut<MovementTuning>,
    mut combat: ResMut<CombatTuning>,
    mut enemies: ResMut<EnemyTuning>,
) {
    let defaults = match load_gameplay_defaults(Path::new(GAMEPLAY_DEFAULTS_PATH)) {
        Ok(defaults) => defaults,
        Err(e) => {
            warn!("{}; using built-in gameplay defaults", e);
            return;
        }
    };

    let errors = validate_gameplay_defaults(&defaults);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Invalid gameplay default {}", error);
        }
        warn!(
            "{} invalid values in {}; using built-in gameplay defaults",
            errors.len(),
            GAMEPLAY_DEFAULTS_PATH
        );
        return;
    }

    *movement = defaults.movement;
    *combat = defaults.combat;
    *enemies = defaults.enemies;
    info!(
        "Loaded gameplay defaults (schema v{}) from {}",
        defaults.schema_version, GAMEPLAY_DEFAULTS_PATH
    );
}
