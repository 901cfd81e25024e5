//! Combat domain: composable enemy AI strategies.
//!
//! Every enemy runs one [`Ai`] per tick: `physics_process` first, then the
//! body asks for a facing and a foot speed. Strategies nest, so a walker is
//! `AvoidDrops(NoticeTarget(Patrol, Chase))`.

use bevy::prelude::*;

use crate::combat::resources::EnemyTuning;
use crate::math::{Angle, XDirection};

/// What an enemy observed about its surroundings this tick.
#[derive(Component, Debug, Clone, Default)]
pub struct AiSenses {
    pub position: Vec2,
    pub on_floor: bool,
    /// No floor, or a wall, just ahead of the leading side
    pub edge_ahead: bool,
    /// No floor right in front of the feet
    pub drop_ahead: bool,
    /// Target inside the line of sight this tick
    pub target_in_sight: bool,
    pub target_position: Option<Vec2>,
}

pub trait Ai: Send + Sync {
    fn physics_process(&mut self, _senses: &AiSenses, _dt: f32) {}

    fn next_x_direction(&self, current: XDirection, _senses: &AiSenses) -> XDirection {
        current
    }

    /// Horizontal speed of the feet in px/s.
    fn foot_speed(&self, senses: &AiSenses) -> f32;

    fn aim(&self) -> Option<Angle> {
        None
    }

    /// True once per shot fired; clears the pending shot.
    fn take_shot(&mut self) -> bool {
        false
    }
}

/// Walks slowly, turning around at edges and walls.
pub struct Patrol {
    pub speed: f32,
}

impl Ai for Patrol {
    fn next_x_direction(&self, current: XDirection, senses: &AiSenses) -> XDirection {
        if senses.edge_ahead {
            current.opposite()
        } else {
            current
        }
    }

    fn foot_speed(&self, _senses: &AiSenses) -> f32 {
        self.speed
    }
}

/// Stops the wrapped AI's feet in front of a drop; everything else passes through.
pub struct AvoidDrops<A> {
    pub inner: A,
}

impl<A: Ai> Ai for AvoidDrops<A> {
    fn physics_process(&mut self, senses: &AiSenses, dt: f32) {
        self.inner.physics_process(senses, dt);
    }

    fn next_x_direction(&self, current: XDirection, senses: &AiSenses) -> XDirection {
        self.inner.next_x_direction(current, senses)
    }

    fn foot_speed(&self, senses: &AiSenses) -> f32 {
        if senses.drop_ahead {
            0.0
        } else {
            self.inner.foot_speed(senses)
        }
    }

    fn aim(&self) -> Option<Angle> {
        self.inner.aim()
    }

    fn take_shot(&mut self) -> bool {
        self.inner.take_shot()
    }
}

/// Runs `no_target` until the target is first seen, then `with_target` for good.
pub struct NoticeTarget<N, T> {
    pub no_target: N,
    pub with_target: T,
    noticed: bool,
}

impl<N: Ai, T: Ai> NoticeTarget<N, T> {
    pub fn new(no_target: N, with_target: T) -> Self {
        Self {
            no_target,
            with_target,
            noticed: false,
        }
    }

    pub fn has_noticed(&self) -> bool {
        self.noticed
    }

    fn active(&self) -> &dyn Ai {
        if self.noticed {
            &self.with_target
        } else {
            &self.no_target
        }
    }
}

impl<N: Ai, T: Ai> Ai for NoticeTarget<N, T> {
    fn physics_process(&mut self, senses: &AiSenses, dt: f32) {
        if !self.noticed && senses.target_in_sight {
            self.noticed = true;
            debug!("Enemy noticed target at {:?}", senses.target_position);
        }
        if self.noticed {
            self.with_target.physics_process(senses, dt);
        } else {
            self.no_target.physics_process(senses, dt);
        }
    }

    fn next_x_direction(&self, current: XDirection, senses: &AiSenses) -> XDirection {
        self.active().next_x_direction(current, senses)
    }

    fn foot_speed(&self, senses: &AiSenses) -> f32 {
        self.active().foot_speed(senses)
    }

    fn aim(&self) -> Option<Angle> {
        self.active().aim()
    }

    fn take_shot(&mut self) -> bool {
        if self.noticed {
            self.with_target.take_shot()
        } else {
            self.no_target.take_shot()
        }
    }
}

/// Always faces the target and moves fast.
pub struct Chase {
    pub speed: f32,
}

impl Ai for Chase {
    fn next_x_direction(&self, current: XDirection, senses: &AiSenses) -> XDirection {
        match senses.target_position {
            Some(target) => XDirection::toward(senses.position, target),
            None => current,
        }
    }

    fn foot_speed(&self, _senses: &AiSenses) -> f32 {
        self.speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootingState {
    Readying,
    Aiming,
    Firing,
}

/// Stands still and runs a ready, aim, fire cycle at the target.
pub struct FireAtWill {
    state: ShootingState,
    aim: Angle,
    aim_elapsed: f32,
    fire_elapsed: f32,
    shot_pending: bool,
    ready_threshold: f32,
    ready_speed: f32,
    aim_duration: f32,
    fire_duration: f32,
}

impl FireAtWill {
    pub fn new(initial_aim: Angle, tuning: &EnemyTuning) -> Self {
        Self {
            state: ShootingState::Readying,
            aim: initial_aim,
            aim_elapsed: 0.0,
            fire_elapsed: 0.0,
            shot_pending: false,
            ready_threshold: tuning.gun_ready_threshold,
            ready_speed: tuning.gun_ready_speed,
            aim_duration: tuning.gun_aim_duration,
            fire_duration: tuning.gun_fire_duration,
        }
    }

    pub fn state(&self) -> ShootingState {
        self.state
    }
}

impl Ai for FireAtWill {
    fn physics_process(&mut self, senses: &AiSenses, dt: f32) {
        match self.state {
            ShootingState::Readying => {
                let Some(target) = senses.target_position else {
                    return;
                };
                let target_angle = Angle::between(senses.position, target);
                self.aim = self.aim.lerp(target_angle, dt * self.ready_speed);

                let aim_error = self.aim.smallest_angle_to(target_angle).radians().abs();
                if aim_error <= self.ready_threshold {
                    self.state = ShootingState::Aiming;
                    self.aim_elapsed = 0.0;
                }
            }
            ShootingState::Aiming => {
                self.aim_elapsed += dt;
                if self.aim_elapsed >= self.aim_duration {
                    self.state = ShootingState::Firing;
                    self.fire_elapsed = 0.0;
                    self.shot_pending = true;
                }
            }
            ShootingState::Firing => {
                self.fire_elapsed += dt;
                if self.fire_elapsed >= self.fire_duration {
                    self.state = ShootingState::Readying;
                }
            }
        }
    }

    fn next_x_direction(&self, current: XDirection, senses: &AiSenses) -> XDirection {
        match senses.target_position {
            Some(target) => XDirection::toward(senses.position, target),
            None => current,
        }
    }

    fn foot_speed(&self, _senses: &AiSenses) -> f32 {
        0.0
    }

    fn aim(&self) -> Option<Angle> {
        Some(self.aim)
    }

    fn take_shot(&mut self) -> bool {
        std::mem::take(&mut self.shot_pending)
    }
}

/// The strategy stack driving one enemy.
#[derive(Component)]
pub struct EnemyBrain {
    pub ai: Box<dyn Ai>,
}

impl EnemyBrain {
    pub fn walker(tuning: &EnemyTuning) -> Self {
        Self {
            ai: Box::new(AvoidDrops {
                inner: NoticeTarget::new(
                    Patrol {
                        speed: tuning.patrol_foot_speed,
                    },
                    Chase {
                        speed: tuning.chase_foot_speed,
                    },
                ),
            }),
        }
    }

    pub fn sniper(tuning: &EnemyTuning, facing: XDirection) -> Self {
        let initial_aim = Angle::from_radians(facing.unit_vector().to_angle());
        Self {
            ai: Box::new(AvoidDrops {
                inner: NoticeTarget::new(
                    Patrol {
                        speed: tuning.patrol_foot_speed,
                    },
                    FireAtWill::new(initial_aim, tuning),
                ),
            }),
        }
    }
}
