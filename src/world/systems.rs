//! World domain: pickups, checkpoints, pits, levers and doors.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{
    CombatTuning, HitLandedEvent, HitManager, HitStatus, HitTarget, KnockbackCarry,
};
use crate::movement::{MovementInput, Player, PlayerBody, PlayerStateMachine};
use crate::world::components::{AbilityPickup, Checkpoint, Door, HealthUpgrade, Lever, Pit};
use crate::world::events::SaveRequested;
use crate::world::level::lever_color;
use crate::world::resources::{
    WorldState, WorldStateSink, collect_ability, collect_health_upgrade, pull_lever,
    reach_checkpoint,
};

/// Returns (player, other) when one side of a collision is the player.
fn split_player_pair<F: Fn(Entity) -> bool>(
    event: &CollisionStart,
    is_player: F,
) -> Option<(Entity, Entity)> {
    if is_player(event.collider1) {
        Some((event.collider1, event.collider2))
    } else if is_player(event.collider2) {
        Some((event.collider2, event.collider1))
    } else {
        None
    }
}

pub(crate) fn collect_ability_pickups(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut world: ResMut<WorldState>,
    pickups: Query<&AbilityPickup>,
    mut players: Query<&mut PlayerBody, With<Player>>,
) {
    for event in collision_events.read() {
        let Some((player, other)) = split_player_pair(event, |e| players.contains(e)) else {
            continue;
        };
        let Ok(pickup) = pickups.get(other) else {
            continue;
        };
        let Ok(mut body) = players.get_mut(player) else {
            continue;
        };

        if collect_ability(&mut *world, &mut body, pickup.ability) {
            info!("Unlocked ability {:?}", pickup.ability);
        }
        commands.entity(other).try_despawn();
    }
}

pub(crate) fn collect_health_upgrades(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut world: ResMut<WorldState>,
    upgrades: Query<&HealthUpgrade>,
    mut players: Query<&mut HitManager, With<Player>>,
) {
    for event in collision_events.read() {
        let Some((player, other)) = split_player_pair(event, |e| players.contains(e)) else {
            continue;
        };
        let Ok(upgrade) = upgrades.get(other) else {
            continue;
        };
        let Ok(mut manager) = players.get_mut(player) else {
            continue;
        };

        if collect_health_upgrade(&mut world, &upgrade.id, &mut manager) {
            info!(
                "Collected {}, max hit points now {}",
                upgrade.id,
                manager.max_hit_points()
            );
        }
        commands.entity(other).try_despawn();
    }
}

pub(crate) fn touch_checkpoints(
    mut collision_events: MessageReader<CollisionStart>,
    mut save_requests: MessageWriter<SaveRequested>,
    mut world: ResMut<WorldState>,
    players: Query<(), With<Player>>,
    mut checkpoints: Query<(&Checkpoint, &Transform, &mut Sprite)>,
) {
    for event in collision_events.read() {
        let Some((_, other)) = split_player_pair(event, |e| players.contains(e)) else {
            continue;
        };
        let Ok((checkpoint, transform, _)) = checkpoints.get(other) else {
            continue;
        };

        let id = checkpoint.id.clone();
        if !reach_checkpoint(&mut *world, &id, transform.translation.truncate()) {
            continue;
        }
        info!("Reached checkpoint {}", id);
        save_requests.write(SaveRequested { checkpoint_id: id });

        for (checkpoint, _, mut sprite) in &mut checkpoints {
            sprite.color = if world.is_current_checkpoint(&checkpoint.id) {
                Color::srgb(0.4, 0.9, 0.5)
            } else {
                Color::srgb(0.4, 0.5, 0.6)
            };
        }
    }
}

/// Storage is external; this is where a save backend would hook in.
pub(crate) fn log_save_requests(
    mut save_requests: MessageReader<SaveRequested>,
    world: Res<WorldState>,
) {
    for request in save_requests.read() {
        info!(
            "Save requested at {} ({} health upgrades)",
            request.checkpoint_id,
            world.health_upgrades()
        );
    }
}

/// Pit damage goes through the hit manager, so invulnerability still applies.
/// The teleport always happens.
pub(crate) fn fall_into_pits(
    mut collision_events: MessageReader<CollisionStart>,
    mut hit_events: MessageWriter<HitLandedEvent>,
    tuning: Res<CombatTuning>,
    pits: Query<&Pit>,
    mut players: Query<
        (
            &mut Transform,
            &mut PlayerBody,
            &mut PlayerStateMachine,
            &mut HitManager,
            &mut HitStatus,
            &mut LinearVelocity,
            &mut KnockbackCarry,
        ),
        With<Player>,
    >,
) {
    for event in collision_events.read() {
        let Some((player, other)) = split_player_pair(event, |e| players.contains(e)) else {
            continue;
        };
        let Ok(pit) = pits.get(other) else {
            continue;
        };
        let Ok((
            mut transform,
            mut body,
            mut machine,
            mut manager,
            mut status,
            mut velocity,
            mut carry,
        )) = players.get_mut(player)
        else {
            continue;
        };

        let outcome = HitTarget::new(&mut manager, &mut status).take_damage(tuning.pit_damage);
        if outcome.landed() {
            info!(
                "Fell into a pit: {:?}, {} hit points left",
                outcome,
                manager.hit_points()
            );
            hit_events.write(HitLandedEvent {
                target: player,
                outcome,
                hit_points: manager.hit_points(),
            });
        }

        body.teleport(pit.respawn);
        machine.reset();
        transform.translation.x = pit.respawn.x;
        transform.translation.y = pit.respawn.y;
        velocity.0 = Vec2::ZERO;
        carry.0 = Vec2::ZERO;
    }
}

pub(crate) fn pull_levers(
    input: Res<MovementInput>,
    mut world: ResMut<WorldState>,
    players: Query<&CollidingEntities, With<Player>>,
    mut levers: Query<(&Lever, &mut Sprite)>,
) {
    if !input.interact_pressed {
        return;
    }
    let Ok(colliding) = players.single() else {
        return;
    };

    for &other in colliding.iter() {
        let Ok((lever, mut sprite)) = levers.get_mut(other) else {
            continue;
        };
        if pull_lever(&mut *world, &lever.id, &lever.targets) {
            info!("Pulled {}, activating {:?}", lever.id, lever.targets);
            sprite.color = lever_color(true);
        }
    }
}

pub(crate) fn open_doors(
    mut commands: Commands,
    world: Res<WorldState>,
    doors: Query<(Entity, &Door)>,
) {
    for (entity, door) in &doors {
        if world.is_activated(&door.id) {
            info!("Opened {}", door.id);
            commands.entity(entity).despawn();
        }
    }
}
