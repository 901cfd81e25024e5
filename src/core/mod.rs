//! Core domain: game flow states, pause tracking and the camera.

mod resources;
mod state;
mod systems;


pub use resources::{GameplayPaused, gameplay_active};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::resources::RespawnDelay;
use crate::core::systems::{
    finish_boot, follow_player, handle_player_death, setup_camera, start_respawn_delay,
    sync_physics_clock, tick_respawn_delay, toggle_pause,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<RespawnDelay>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(
                Update,
                (toggle_pause, handle_player_death, follow_player)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Dead), start_respawn_delay)
            .add_systems(
                Update,
                tick_respawn_delay.run_if(in_state(GameState::Dead)),
            )
            .add_systems(Update, sync_physics_clock.after(toggle_pause));
    }
}
