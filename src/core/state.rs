//! Core domain: game flow states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    Playing,
    /// The player has died; the scene stays frozen until the respawn delay runs out.
    Dead,
}
