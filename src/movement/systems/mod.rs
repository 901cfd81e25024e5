//! Movement domain: ECS systems hosting the player state machine.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod machine;
pub(crate) mod presentation;

pub(crate) use collisions::{acquire_grapple_anchor, detect_contacts};
pub(crate) use input::read_input;
pub(crate) use machine::step_player;
pub(crate) use presentation::{apply_player_presentation, fade_dash_particles, spawn_dash_particles};
