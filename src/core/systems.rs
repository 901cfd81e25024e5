//! Core domain: game flow systems and camera setup.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::DeathEvent;
use crate::core::resources::{
    GameplayPaused, PAUSE_MENU_SOURCE, RespawnDelay, follow_step, physics_should_run,
};
use crate::core::state::GameState;
use crate::movement::Player;

const CAMERA_FOLLOW_RATE: f32 = 6.0;
const CAMERA_SNAP_DISTANCE: f32 = 400.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Content is applied during `Startup`, so the first `Update` can start play.
pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    info!("Boot complete, entering play");
    game_state.set(GameState::Playing);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if paused.toggle(PAUSE_MENU_SOURCE) {
        info!("Gameplay paused");
    } else {
        info!("Gameplay resumed");
    }
}

/// Keeps avian's clock in step with the pause sources and the game state.
pub(crate) fn sync_physics_clock(
    paused: Res<GameplayPaused>,
    game_state: Res<State<GameState>>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    let run = physics_should_run(&paused, game_state.get());
    if run && physics_time.is_paused() {
        debug!("Physics resumed");
        physics_time.unpause();
    } else if !run && !physics_time.is_paused() {
        debug!("Physics paused");
        physics_time.pause();
    }
}

/// Moves to `Dead` when the player's hit manager queues its death.
pub(crate) fn handle_player_death(
    mut events: MessageReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        if players.contains(event.entity) {
            info!("Player is dead, respawning at the last checkpoint");
            game_state.set(GameState::Dead);
        }
    }
}

pub(crate) fn start_respawn_delay(
    mut delay: ResMut<RespawnDelay>,
    mut paused: ResMut<GameplayPaused>,
) {
    delay.reset();
    paused.unpause(PAUSE_MENU_SOURCE);
}

pub(crate) fn tick_respawn_delay(
    time: Res<Time>,
    mut delay: ResMut<RespawnDelay>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    delay.tick(time.delta());
    if delay.is_finished() {
        game_state.set(GameState::Playing);
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };

    let next = follow_step(
        camera.translation.truncate(),
        player.translation.truncate(),
        CAMERA_FOLLOW_RATE,
        CAMERA_SNAP_DISTANCE,
        time.delta_secs(),
    );
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
