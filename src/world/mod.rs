//! World domain: persistent world state, pickups, checkpoints, pits, levers,
//! doors and the level they live in.

mod components;
mod events;
mod level;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{AbilityPickup, Checkpoint, Door, HealthUpgrade, LevelEntity, Lever, Pit};
pub use events::SaveRequested;
pub use resources::{
    CheckpointRecord, WorldState, WorldStateSink, collect_ability, collect_health_upgrade,
    pull_lever, reach_checkpoint,
};

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::world::level::spawn_level;
use crate::world::systems::{
    collect_ability_pickups, collect_health_upgrades, fall_into_pits, log_save_requests,
    open_doors, pull_levers, touch_checkpoints,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldState>()
            .add_message::<SaveRequested>()
            .add_systems(OnEnter(GameState::Playing), spawn_level)
            .add_systems(
                Update,
                (
                    collect_ability_pickups,
                    collect_health_upgrades,
                    touch_checkpoints,
                    log_save_requests,
                    fall_into_pits,
                    pull_levers,
                    open_doors.run_if(resource_changed::<WorldState>),
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(gameplay_active),
            );
    }
}
