//! World domain: the persistent world state and the sink interface over it.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::combat::HitManager;
use crate::movement::{Ability, PlayerBody};
use crate::world::level::PLAYER_START;

/// The "mark activated / save" interface gameplay code talks to. How the
/// state is stored is up to the implementor.
pub trait WorldStateSink {
    fn mark_activated(&mut self, object_id: &str);
    fn is_activated(&self, object_id: &str) -> bool;
    fn set_checkpoint(&mut self, checkpoint_id: &str, position: Vec2);
    fn is_current_checkpoint(&self, checkpoint_id: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRecord {
    pub id: String,
    pub position: Vec2,
}

/// Activated objects, the current checkpoint and collected health upgrades.
/// Survives player death and level rebuilds.
#[derive(Resource, Debug, Clone)]
pub struct WorldState {
    activated: HashMap<String, bool>,
    checkpoint: Option<CheckpointRecord>,
    health_upgrades: u32,
    start_point: Vec2,
}

impl WorldState {
    pub fn new(start_point: Vec2) -> Self {
        Self {
            activated: HashMap::new(),
            checkpoint: None,
            health_upgrades: 0,
            start_point,
        }
    }

    /// Current checkpoint position, or the level start before any checkpoint.
    pub fn respawn_point(&self) -> Vec2 {
        self.checkpoint
            .as_ref()
            .map_or(self.start_point, |checkpoint| checkpoint.position)
    }

    pub fn checkpoint(&self) -> Option<&CheckpointRecord> {
        self.checkpoint.as_ref()
    }

    pub fn health_upgrades(&self) -> u32 {
        self.health_upgrades
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(PLAYER_START)
    }
}

impl WorldStateSink for WorldState {
    fn mark_activated(&mut self, object_id: &str) {
        self.activated.insert(object_id.to_string(), true);
    }

    fn is_activated(&self, object_id: &str) -> bool {
        self.activated.get(object_id).copied().unwrap_or(false)
    }

    fn set_checkpoint(&mut self, checkpoint_id: &str, position: Vec2) {
        self.checkpoint = Some(CheckpointRecord {
            id: checkpoint_id.to_string(),
            position,
        });
    }

    fn is_current_checkpoint(&self, checkpoint_id: &str) -> bool {
        self.checkpoint
            .as_ref()
            .is_some_and(|checkpoint| checkpoint.id == checkpoint_id)
    }
}

/// Unlocks `ability` on the body and records it. False if it was already owned.
pub fn collect_ability<W: WorldStateSink + ?Sized>(
    world: &mut W,
    body: &mut PlayerBody,
    ability: Ability,
) -> bool {
    if body.has(ability) {
        return false;
    }
    body.unlock(ability);
    world.mark_activated(ability.object_id());
    true
}

/// Raises max hit points by one and heals fully, once per upgrade id.
pub fn collect_health_upgrade(
    world: &mut WorldState,
    upgrade_id: &str,
    manager: &mut HitManager,
) -> bool {
    if world.is_activated(upgrade_id) {
        return false;
    }
    world.mark_activated(upgrade_id);
    world.health_upgrades += 1;
    manager.raise_max_hit_points(1);
    manager.restore();
    true
}

/// Makes `checkpoint_id` current. False when it already was.
pub fn reach_checkpoint<W: WorldStateSink + ?Sized>(
    world: &mut W,
    checkpoint_id: &str,
    position: Vec2,
) -> bool {
    if world.is_current_checkpoint(checkpoint_id) {
        return false;
    }
    world.set_checkpoint(checkpoint_id, position);
    true
}

/// Flips a lever once, activating it and everything it controls.
pub fn pull_lever<W: WorldStateSink + ?Sized>(
    world: &mut W,
    lever_id: &str,
    targets: &[String],
) -> bool {
    if world.is_activated(lever_id) {
        return false;
    }
    world.mark_activated(lever_id);
    for target in targets {
        world.mark_activated(target);
    }
    true
}
