//! Combat domain: enemy spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::flyer::{FloatPath, RandomFlyer};
use crate::combat::ai::strategies::{AiSenses, EnemyBrain};
use crate::combat::components::{ContactKnockback, Enemy, EnemyKind, KnockbackCarry, SniperGun};
use crate::combat::hit_manager::HitManager;
use crate::combat::hittable::{HitStatus, KnockOffFloor};
use crate::combat::resources::{CombatTuning, EnemyTuning, FlyerRng};
use crate::math::XDirection;
use crate::movement::GameLayer;

const WALKER_SIZE: Vec2 = Vec2::new(20.0, 20.0);
const FLYER_RADIUS: f32 = 8.0;

impl EnemyKind {
    fn color(self) -> Color {
        match self {
            EnemyKind::Walker => Color::srgb(0.8, 0.35, 0.3),
            EnemyKind::Sniper => Color::srgb(0.55, 0.3, 0.75),
            EnemyKind::Flyer => Color::srgb(0.3, 0.7, 0.75),
        }
    }
}

/// Components every hittable enemy shares.
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub kind: EnemyKind,
    pub facing: XDirection,
    pub hit_manager: HitManager,
    pub hit_status: HitStatus,
    pub carry: KnockbackCarry,
    pub sprite: Sprite,
    pub transform: Transform,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(kind: EnemyKind, position: Vec2, size: Vec2, hit_manager: HitManager) -> Self {
        Self {
            enemy: Enemy,
            kind,
            facing: XDirection::Left,
            hit_manager,
            hit_status: HitStatus::default(),
            carry: KnockbackCarry::default(),
            sprite: Sprite {
                color: kind.color(),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Player,
                    GameLayer::PlayerHitbox,
                ],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
        }
    }
}

pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec2,
    combat: &CombatTuning,
    enemies: &EnemyTuning,
    rng: &mut FlyerRng,
) -> Entity {
    info!("Spawning {:?} at {:?}", kind, position);
    match kind {
        EnemyKind::Walker => commands
            .spawn((
                EnemyBundle::new(kind, position, WALKER_SIZE, HitManager::new(&combat.enemy)),
                EnemyBrain::walker(enemies),
                AiSenses::default(),
                KnockOffFloor,
                ContactKnockback(combat.contact_knockback),
                RigidBody::Dynamic,
                Collider::rectangle(WALKER_SIZE.x, WALKER_SIZE.y),
                Friction::new(0.0),
            ))
            .id(),
        EnemyKind::Sniper => {
            let facing = XDirection::Left;
            commands
                .spawn((
                    EnemyBundle::new(kind, position, WALKER_SIZE, HitManager::new(&combat.enemy)),
                    EnemyBrain::sniper(enemies, facing),
                    AiSenses::default(),
                    KnockOffFloor,
                    ContactKnockback(combat.contact_knockback),
                    RigidBody::Dynamic,
                    Collider::rectangle(WALKER_SIZE.x, WALKER_SIZE.y),
                    Friction::new(0.0),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        SniperGun,
                        Sprite {
                            color: Color::srgb(0.2, 0.2, 0.25),
                            custom_size: Some(Vec2::new(14.0, 4.0)),
                            ..default()
                        },
                        Transform::from_xyz(6.0, 2.0, 0.5),
                    ));
                })
                .id()
        }
        EnemyKind::Flyer => {
            let path = FloatPath::random_direction(&mut rng.0, position, enemies);
            let size = Vec2::splat(FLYER_RADIUS * 2.0);
            commands
                .spawn((
                    EnemyBundle::new(
                        kind,
                        position,
                        size,
                        HitManager::with_hit_points(&combat.enemy, 1),
                    ),
                    RandomFlyer::new(path, enemies),
                    ContactKnockback(enemies.flyer_knockback),
                    RigidBody::Kinematic,
                    Collider::circle(FLYER_RADIUS),
                ))
                .id()
        }
    }
}
