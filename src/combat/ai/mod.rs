//! Combat domain: AI system modules for ground enemies and flyers.

pub(crate) mod enemy;
pub(crate) mod flyer;
pub(crate) mod strategies;

pub(crate) use enemy::{aim_guns, fire_projectiles, sense_surroundings, steer_enemies};
pub(crate) use flyer::drift_flyers;
