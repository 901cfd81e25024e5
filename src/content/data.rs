//! Content domain: serde shapes of the RON content files.

use serde::{Deserialize, Serialize};

use crate::combat::{CombatTuning, EnemyTuning};
use crate::movement::MovementTuning;

/// Schema version this build understands.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Gameplay Defaults (gameplay_defaults.ron) - Single struct, not a list
// ============================================================================

/// Every tuning table, loaded once at startup. Omitted sections and fields
/// keep their built-in values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub movement: MovementTuning,
    pub combat: CombatTuning,
    pub enemies: EnemyTuning,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            movement: MovementTuning::default(),
            combat: CombatTuning::default(),
            enemies: EnemyTuning::default(),
        }
    }
}
