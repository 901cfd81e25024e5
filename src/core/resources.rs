//! Core domain: pause tracking and the respawn delay.

use bevy::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::core::state::GameState;

/// Pause source toggled by the Escape key.
pub const PAUSE_MENU_SOURCE: &str = "pause_menu";

/// Seconds spent in `GameState::Dead` before the level is rebuilt.
pub const RESPAWN_DELAY: f32 = 1.5;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Flips a single source and reports whether it is now active.
    pub fn toggle(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Whether the physics clock should advance. Rigid bodies freeze while any
/// pause source is active and while the player is dead.
pub fn physics_should_run(paused: &GameplayPaused, state: &GameState) -> bool {
    !paused.is_paused() && *state != GameState::Dead
}

#[derive(Resource, Debug)]
pub struct RespawnDelay {
    pub timer: Timer,
}

impl Default for RespawnDelay {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(RESPAWN_DELAY, TimerMode::Once),
        }
    }
}

impl RespawnDelay {
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
    }

    pub fn is_finished(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }
}

/// Moves the camera part of the way toward its target each frame, closing the
/// gap exponentially at `rate` per second. Jumps straight to the target when it
/// is farther than `snap_distance` (respawns and pit teleports).
pub fn follow_step(camera: Vec2, target: Vec2, rate: f32, snap_distance: f32, delta: f32) -> Vec2 {
    if camera.distance(target) > snap_distance {
        return target;
    }
    let t = 1.0 - (-rate * delta).exp();
    camera.lerp(target, t.clamp(0.0, 1.0))
}
