//! World domain: the hand-built room, rebuilt from the world state every time
//! play starts.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{
    CombatTuning, EnemyKind, EnemyProjectile, EnemyTuning, FlyerRng, SwordSwing, spawn_enemy,
};
use crate::movement::{Ability, DashParticle, GameLayer, Ground, Wall};
use crate::world::components::{
    AbilityPickup, Checkpoint, Door, HealthUpgrade, LevelEntity, Lever, Pit,
};
use crate::world::resources::{WorldState, WorldStateSink};

pub const PLAYER_START: Vec2 = Vec2::new(-520.0, -150.0);

const PICKUP_SIZE: Vec2 = Vec2::new(14.0, 14.0);
const MARKER_SIZE: Vec2 = Vec2::new(12.0, 32.0);

/// Floors, platforms and ceiling overhangs, as (center, size).
pub(crate) const GROUND_BLOCKS: [(Vec2, Vec2); 7] = [
    (Vec2::new(0.0, -200.0), Vec2::new(1200.0, 40.0)),
    (Vec2::new(1000.0, -200.0), Vec2::new(600.0, 40.0)),
    (Vec2::new(650.0, -460.0), Vec2::new(200.0, 40.0)),
    (Vec2::new(-300.0, -80.0), Vec2::new(160.0, 20.0)),
    (Vec2::new(200.0, -60.0), Vec2::new(140.0, 20.0)),
    (Vec2::new(350.0, 220.0), Vec2::new(1940.0, 40.0)),
    (Vec2::new(-60.0, -120.0), Vec2::new(80.0, 16.0)),
];

pub(crate) const WALL_BLOCKS: [(Vec2, Vec2); 2] = [
    (Vec2::new(-620.0, 0.0), Vec2::new(40.0, 480.0)),
    (Vec2::new(1320.0, 0.0), Vec2::new(40.0, 480.0)),
];

pub(crate) const ABILITY_PICKUPS: [(Ability, Vec2); 6] = [
    (Ability::Stick, Vec2::new(-460.0, -170.0)),
    (Ability::Dash, Vec2::new(-380.0, -170.0)),
    (Ability::SuperJump, Vec2::new(-300.0, -55.0)),
    (Ability::Grapple, Vec2::new(150.0, -38.0)),
    (Ability::DoubleDash, Vec2::new(900.0, -170.0)),
    (Ability::DashOnKill, Vec2::new(1260.0, -170.0)),
];

pub(crate) const HEALTH_UPGRADES: [(&str, Vec2); 1] =
    [("health_upgrade_ceiling", Vec2::new(-300.0, 150.0))];

pub(crate) const CHECKPOINTS: [(&str, Vec2); 1] =
    [("checkpoint_east", Vec2::new(800.0, -164.0))];

/// (center, size, respawn point)
pub(crate) const PITS: [(Vec2, Vec2, Vec2); 1] = [(
    Vec2::new(650.0, -330.0),
    Vec2::new(100.0, 200.0),
    Vec2::new(540.0, -150.0),
)];

pub(crate) const LEVERS: [(&str, &[&str], Vec2); 1] =
    [("lever_east", &["door_east"], Vec2::new(1060.0, -165.0))];

pub(crate) const DOORS: [(&str, Vec2, Vec2); 1] =
    [("door_east", Vec2::new(1200.0, -120.0), Vec2::new(20.0, 120.0))];

pub(crate) const ENEMIES: [(EnemyKind, Vec2); 3] = [
    (EnemyKind::Walker, Vec2::new(300.0, -168.0)),
    (EnemyKind::Sniper, Vec2::new(240.0, -38.0)),
    (EnemyKind::Flyer, Vec2::new(600.0, 60.0)),
];

/// Clears the previous level along with stray projectiles and effects, then
/// spawns the room, leaving out objects the world state marks as used up.
pub(crate) fn spawn_level(
    mut commands: Commands,
    world: Res<WorldState>,
    combat: Res<CombatTuning>,
    enemies: Res<EnemyTuning>,
    mut rng: ResMut<FlyerRng>,
    stale: Query<
        Entity,
        Or<(
            With<LevelEntity>,
            With<EnemyProjectile>,
            With<SwordSwing>,
            With<DashParticle>,
        )>,
    >,
) {
    for entity in &stale {
        commands.entity(entity).despawn();
    }

    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let wall_color = Color::srgb(0.25, 0.25, 0.35);
    let ground_layers = CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Enemy, GameLayer::EnemyHitbox],
    );
    let wall_layers = CollisionLayers::new(
        GameLayer::Wall,
        [GameLayer::Player, GameLayer::Enemy, GameLayer::EnemyHitbox],
    );
    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    for (center, size) in GROUND_BLOCKS {
        commands.spawn((
            LevelEntity,
            Ground,
            Sprite {
                color: ground_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    }

    for (center, size) in WALL_BLOCKS {
        commands.spawn((
            LevelEntity,
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }

    for (id, center, size) in DOORS {
        if world.is_activated(id) {
            continue;
        }
        commands.spawn((
            LevelEntity,
            Wall,
            Door { id: id.to_string() },
            Sprite {
                color: Color::srgb(0.5, 0.35, 0.2),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }

    for (ability, position) in ABILITY_PICKUPS {
        if world.is_activated(ability.object_id()) {
            continue;
        }
        commands.spawn((
            LevelEntity,
            AbilityPickup { ability },
            Sprite {
                color: Color::srgb(0.95, 0.8, 0.2),
                custom_size: Some(PICKUP_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.2),
            Collider::rectangle(PICKUP_SIZE.x, PICKUP_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers,
        ));
    }

    for (id, position) in HEALTH_UPGRADES {
        if world.is_activated(id) {
            continue;
        }
        commands.spawn((
            LevelEntity,
            HealthUpgrade { id: id.to_string() },
            Sprite {
                color: Color::srgb(0.9, 0.3, 0.4),
                custom_size: Some(PICKUP_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.2),
            Collider::rectangle(PICKUP_SIZE.x, PICKUP_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers,
        ));
    }

    for (id, position) in CHECKPOINTS {
        let color = if world.is_current_checkpoint(id) {
            Color::srgb(0.4, 0.9, 0.5)
        } else {
            Color::srgb(0.4, 0.5, 0.6)
        };
        commands.spawn((
            LevelEntity,
            Checkpoint { id: id.to_string() },
            Sprite {
                color,
                custom_size: Some(MARKER_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.1),
            Collider::rectangle(MARKER_SIZE.x, MARKER_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers,
        ));
    }

    for (center, size, respawn) in PITS {
        commands.spawn((
            LevelEntity,
            Pit { respawn },
            Transform::from_xyz(center.x, center.y, 0.0),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers,
        ));
    }

    for (id, targets, position) in LEVERS {
        commands.spawn((
            LevelEntity,
            Lever {
                id: id.to_string(),
                targets: targets.iter().map(|target| target.to_string()).collect(),
            },
            Sprite {
                color: lever_color(world.is_activated(id)),
                custom_size: Some(MARKER_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.1),
            Collider::rectangle(MARKER_SIZE.x, MARKER_SIZE.y),
            Sensor,
            sensor_layers,
        ));
    }

    for (kind, position) in ENEMIES {
        let entity = spawn_enemy(&mut commands, kind, position, &combat, &enemies, &mut rng);
        commands.entity(entity).insert(LevelEntity);
    }

    info!(
        "Level built, respawn point {:?}, {} health upgrades collected",
        world.respawn_point(),
        world.health_upgrades()
    );
}

pub(crate) fn lever_color(pulled: bool) -> Color {
    if pulled {
        Color::srgb(0.3, 0.8, 0.3)
    } else {
        Color::srgb(0.7, 0.3, 0.3)
    }
}
