//! World domain: components for level geometry and persistent world objects.

use bevy::prelude::*;

use crate::movement::Ability;

/// Everything spawned for the current level. Despawned before a rebuild.
#[derive(Component, Debug)]
pub struct LevelEntity;

/// Touching it unlocks `ability` for good.
#[derive(Component, Debug)]
pub struct AbilityPickup {
    pub ability: Ability,
}

/// One extra max hit point, collected once.
#[derive(Component, Debug)]
pub struct HealthUpgrade {
    pub id: String,
}

#[derive(Component, Debug)]
pub struct Checkpoint {
    pub id: String,
}

/// Falling in costs hit points and puts the player back at `respawn`.
#[derive(Component, Debug)]
pub struct Pit {
    pub respawn: Vec2,
}

/// Interacting with a lever activates every id in `targets`.
#[derive(Component, Debug)]
pub struct Lever {
    pub id: String,
    pub targets: Vec<String>,
}

/// Solid until its id is activated.
#[derive(Component, Debug)]
pub struct Door {
    pub id: String,
}
