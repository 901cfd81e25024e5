//! Movement domain: spawning the player from the persisted world state.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{CombatTuning, HitManager, HitStatus, HurtByEnemyContact, KnockbackCarry, MeleeCooldown};
use crate::movement::{
    Ability, ContactState, GameLayer, MovementTuning, Player, PlayerBody, PlayerPresentation,
    PlayerStateMachine,
};
use crate::world::{WorldState, WorldStateSink};

pub const PLAYER_SIZE: Vec2 = Vec2::new(16.0, 24.0);

/// Body with every ability the world state records as unlocked.
pub fn restored_body(tuning: &MovementTuning, world: &WorldState, position: Vec2) -> PlayerBody {
    let mut body = PlayerBody::new(tuning, position);
    for ability in Ability::ALL {
        if world.is_activated(ability.object_id()) {
            body.unlock(ability);
        }
    }
    body
}

/// Hit manager with collected health upgrades applied, at full health.
pub fn restored_hit_manager(combat: &CombatTuning, world: &WorldState) -> HitManager {
    let mut manager = HitManager::new(&combat.player);
    manager.raise_max_hit_points(world.health_upgrades());
    manager.restore();
    manager
}

/// Replaces any previous player with a fresh one at the current checkpoint.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    world: Res<WorldState>,
    existing: Query<Entity, With<Player>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let position = world.respawn_point();
    let body = restored_body(&tuning, &world, position);
    let hit_manager = restored_hit_manager(&combat, &world);
    info!(
        "Spawning player at {:?} with {} hit points, abilities: {:?}",
        position,
        hit_manager.max_hit_points(),
        Ability::ALL
            .iter()
            .filter(|a| body.has(**a))
            .collect::<Vec<_>>()
    );

    commands.spawn((
        // Identity & movement
        (
            Player,
            body,
            PlayerStateMachine::default(),
            ContactState::default(),
            PlayerPresentation::default(),
        ),
        // Combat
        (
            hit_manager,
            HitStatus::default(),
            KnockbackCarry::default(),
            MeleeCooldown::default(),
            HurtByEnemyContact,
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.95),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is integrated by the state machine
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollidingEntities::default(),
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Enemy,
                    GameLayer::EnemyHitbox,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));
}
