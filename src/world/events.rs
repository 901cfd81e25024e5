//! World domain: world-state events.

use bevy::ecs::message::Message;

/// The player reached a checkpoint and the world state should be persisted.
#[derive(Debug)]
pub struct SaveRequested {
    pub checkpoint_id: String,
}

impl Message for SaveRequested {}
