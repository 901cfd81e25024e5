//! Movement domain: player components and physics layers for locomotion.

use std::collections::HashMap;

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::XDirection;
use crate::movement::MovementTuning;
use crate::movement::context::{PhysicsQueries, PresentationSink};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, ceilings and platforms
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Pickups and triggers - should not block movement
    Sensor,
    /// Player sword hitboxes (damage enemies)
    PlayerHitbox,
    /// Enemy projectiles (damage player)
    EnemyHitbox,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Abilities unlocked by pickups in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Ability {
    /// Melee attack
    Stick,
    Dash,
    SuperJump,
    Grapple,
    /// Second dash charge
    DoubleDash,
    /// Killing blows refill dashes
    DashOnKill,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Stick,
        Ability::Dash,
        Ability::SuperJump,
        Ability::Grapple,
        Ability::DoubleDash,
        Ability::DashOnKill,
    ];

    /// Id under which the unlock is recorded in the world state.
    pub fn object_id(self) -> &'static str {
        match self {
            Ability::Stick => "Stick",
            Ability::Dash => "Dash",
            Ability::SuperJump => "SuperJump",
            Ability::Grapple => "Grapple",
            Ability::DoubleDash => "DoubleDash",
            Ability::DashOnKill => "DashOnKill",
        }
    }
}

/// The player's simulated body: everything the state machine reads and writes
/// between ticks. Health lives in the player's `HitManager`.
#[derive(Component, Debug, Clone)]
pub struct PlayerBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: XDirection,
    pub gravity: f32,
    pub jump_speed: f32,
    pub run_speed: f32,
    pub dash_speed: f32,
    pub abilities: HashMap<Ability, bool>,
    pub dashes_available: u8,
    pub max_dashes: u8,
    pub coyote_time_elapsed: f32,
    pub coyote_time_expired: bool,
    /// Seconds the jump button has been held; zeroed on the press tick
    pub jump_held_time: f32,
    pub super_jump_charge: f32,
    pub can_super_jump: bool,
    pub grapple_anchor: Option<Vec2>,
}

impl PlayerBody {
    pub fn new(tuning: &MovementTuning, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: XDirection::Right,
            gravity: tuning.gravity(),
            jump_speed: tuning.jump_speed(),
            run_speed: tuning.run_speed,
            dash_speed: tuning.dash_speed,
            abilities: HashMap::new(),
            dashes_available: tuning.base_max_dashes,
            max_dashes: tuning.base_max_dashes,
            coyote_time_elapsed: 0.0,
            coyote_time_expired: false,
            jump_held_time: 0.0,
            super_jump_charge: 0.0,
            can_super_jump: false,
            grapple_anchor: None,
        }
    }

    pub fn has(&self, ability: Ability) -> bool {
        self.abilities.get(&ability).copied().unwrap_or(false)
    }

    pub fn unlock(&mut self, ability: Ability) {
        self.abilities.insert(ability, true);
        if ability == Ability::DoubleDash {
            self.max_dashes = self.max_dashes.max(2);
            self.refill_dashes();
        }
    }

    pub fn can_dash(&self) -> bool {
        self.has(Ability::Dash) && self.dashes_available > 0
    }

    pub fn spend_dash(&mut self) {
        self.dashes_available = self.dashes_available.saturating_sub(1);
    }

    pub fn refill_dashes(&mut self) {
        self.dashes_available = self.max_dashes;
    }

    /// Grounded bookkeeping: dashes refill and coyote time rearms.
    pub fn touch_ground(&mut self) {
        self.refill_dashes();
        self.coyote_time_elapsed = 0.0;
        self.coyote_time_expired = false;
    }

    /// Moves the body to `position` at rest, dropping any grapple.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.grapple_anchor = None;
    }

    pub fn face_toward_x(&mut self, x: f32) {
        if let Some(direction) = XDirection::from_x(x) {
            self.facing = direction;
        }
    }
}

/// Whether each of the four upward ceiling sensors touches something.
/// Outer sensors sit on the body's edges, inner ones slightly inward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CeilingSensors {
    pub left_outer: bool,
    pub left_inner: bool,
    pub right_outer: bool,
    pub right_inner: bool,
}

impl CeilingSensors {
    /// Horizontal direction that slides the body off a barely-clipped corner.
    pub fn nudge_direction(&self) -> Option<f32> {
        if self.left_outer && !self.left_inner && !self.right_outer {
            Some(1.0)
        } else if self.right_outer && !self.right_inner && !self.left_outer {
            Some(-1.0)
        } else {
            None
        }
    }
}

/// Contact results of the last physics step.
#[derive(Component, Debug, Clone, Default)]
pub struct ContactState {
    pub on_floor: bool,
    pub on_wall: bool,
    pub on_ceiling: bool,
    pub ceiling: CeilingSensors,
}

impl PhysicsQueries for ContactState {
    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn is_on_wall(&self) -> bool {
        self.on_wall
    }

    fn is_on_ceiling(&self) -> bool {
        self.on_ceiling
    }

    fn ceiling_sensors(&self) -> CeilingSensors {
        self.ceiling
    }
}

/// Animation names the state machine asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl AnimationState {
    pub fn name(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Normal,
    /// Super jump fully charged
    Charged,
}

/// Presentation requests from the last tick, applied to sprites afterwards.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerPresentation {
    pub animation: AnimationState,
    pub dash_particles: bool,
    pub tint: Tint,
}

impl PresentationSink for PlayerPresentation {
    fn play_animation(&mut self, animation: AnimationState) {
        if self.animation != animation {
            self.animation = animation;
        }
    }

    fn set_dash_particles(&mut self, emitting: bool) {
        self.dash_particles = emitting;
    }

    fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }
}

/// Afterimage left behind while dashing.
#[derive(Component, Debug)]
pub struct DashParticle {
    pub remaining: f32,
}
