//! Movement domain: collaborators the state machine talks to each tick.

use crate::movement::components::{AnimationState, CeilingSensors, PlayerBody, Tint};
use crate::movement::resources::{MovementInput, MovementTuning};

/// Post-resolve contact results from the physics step.
pub trait PhysicsQueries {
    fn is_on_floor(&self) -> bool;

    fn is_on_wall(&self) -> bool;

    fn is_on_ceiling(&self) -> bool;

    fn ceiling_sensors(&self) -> CeilingSensors;

    fn is_touching_anything(&self) -> bool {
        self.is_on_floor() || self.is_on_wall() || self.is_on_ceiling()
    }
}

/// Fire-and-forget presentation requests.
pub trait PresentationSink {
    fn play_animation(&mut self, animation: AnimationState);

    fn set_dash_particles(&mut self, emitting: bool);

    fn set_tint(&mut self, tint: Tint);
}

/// Everything one `handle_input` call may read or write.
pub struct Tick<'a> {
    pub body: &'a mut PlayerBody,
    pub input: &'a MovementInput,
    pub physics: &'a dyn PhysicsQueries,
    pub sink: &'a mut dyn PresentationSink,
    pub tuning: &'a MovementTuning,
    pub dt: f32,
}

impl Tick<'_> {
    pub fn on_floor(&self) -> bool {
        self.physics.is_on_floor()
    }

    pub fn input_x(&self) -> f32 {
        self.input.direction.x
    }
}
