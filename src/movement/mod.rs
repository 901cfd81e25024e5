//! Movement domain: the player body, its state machine, input and contact sensing.

mod bootstrap;
mod components;
mod context;
#[cfg(feature = "dev-tools")]
mod dev;
mod grapple;
mod locomotion;
mod resources;
mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use bootstrap::{PLAYER_SIZE, restored_body, restored_hit_manager};
pub use components::{
    Ability, AnimationState, CeilingSensors, ContactState, DashParticle, GameLayer, Ground,
    Player, PlayerBody, PlayerPresentation, Tint, Wall,
};
pub use resources::{MovementInput, MovementTuning};
pub use state::{PlayerState, PlayerStateMachine};

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    acquire_grapple_anchor, apply_player_presentation, detect_contacts, fade_dash_particles,
    read_input, spawn_dash_particles, step_player,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(
                Update,
                (
                    read_input,
                    detect_contacts,
                    acquire_grapple_anchor,
                    step_player,
                    apply_player_presentation,
                    spawn_dash_particles,
                    fade_dash_particles,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(gameplay_active),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            dev::apply_dev_keys.run_if(in_state(GameState::Playing)),
        );
    }
}
