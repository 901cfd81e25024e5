//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::hittable::HitOutcome;

/// A hit or direct damage that was accepted by a hit manager.
#[derive(Debug)]
pub struct HitLandedEvent {
    pub target: Entity,
    pub outcome: HitOutcome,
    pub hit_points: u32,
}

impl Message for HitLandedEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}
