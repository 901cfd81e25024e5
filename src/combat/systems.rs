//! Combat domain: combat systems for melee, contact damage, hit timers and deaths.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    ContactKnockback, Enemy, EnemyProjectile, HitboxLifetime, HurtByEnemyContact, MeleeCooldown,
    SwordSwing,
};
use crate::combat::events::{DeathEvent, HitLandedEvent};
use crate::combat::hit_manager::HitManager;
use crate::combat::hittable::{
    HitOutcome, HitStatus, HitTarget, Hittable, KnockOffFloor, knockback_toward,
};
use crate::combat::resources::CombatTuning;
use crate::movement::{Ability, GameLayer, MovementInput, Player, PlayerBody};

pub(crate) fn tick_melee_cooldowns(time: Res<Time>, mut query: Query<&mut MeleeCooldown>) {
    let dt = time.delta_secs();
    for mut cooldown in &mut query {
        if cooldown.0 > 0.0 {
            cooldown.0 -= dt;
        }
    }
}

pub(crate) fn swing_sword(
    mut commands: Commands,
    input: Res<MovementInput>,
    tuning: Res<CombatTuning>,
    mut query: Query<(Entity, &Transform, &PlayerBody, &HitStatus, &mut MeleeCooldown), With<Player>>,
) {
    if !input.melee_pressed {
        return;
    }

    for (entity, transform, body, status, mut cooldown) in &mut query {
        if !body.has(Ability::Stick) || status.stunned || !cooldown.ready() {
            continue;
        }
        cooldown.0 = tuning.melee_cooldown;

        let (offset, size) = if input.direction.y > 0.5 {
            (
                Vec2::new(0.0, tuning.melee_reach),
                Vec2::new(tuning.melee_height, tuning.melee_width),
            )
        } else if input.direction.y < -0.5 {
            (
                Vec2::new(0.0, -tuning.melee_reach),
                Vec2::new(tuning.melee_height, tuning.melee_width),
            )
        } else {
            (
                body.facing.unit_vector() * tuning.melee_reach,
                Vec2::new(tuning.melee_width, tuning.melee_height),
            )
        };
        let position = transform.translation.truncate() + offset;

        commands.spawn((
            SwordSwing {
                owner: entity,
                hit_entities: Vec::new(),
            },
            HitboxLifetime(tuning.melee_lifetime),
            Sprite {
                color: Color::srgba(1.0, 1.0, 0.6, 0.5),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy]),
        ));
    }
}

pub(crate) fn cleanup_expired_hitboxes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitboxLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn resolve_sword_hits(
    mut collision_events: MessageReader<CollisionStart>,
    mut hit_events: MessageWriter<HitLandedEvent>,
    tuning: Res<CombatTuning>,
    mut swords: Query<&mut SwordSwing>,
    owners: Query<&Transform, With<Player>>,
    mut bodies: Query<&mut PlayerBody, With<Player>>,
    mut targets: Query<
        (&Transform, &mut HitManager, &mut HitStatus, Has<KnockOffFloor>),
        (With<Enemy>, Without<Player>),
    >,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (sword_entity, target_entity) in pairs {
            let Ok(mut sword) = swords.get_mut(sword_entity) else {
                continue;
            };
            if sword.hit_entities.contains(&target_entity) {
                continue;
            }
            let Ok((target_transform, mut manager, mut status, knock_off_floor)) =
                targets.get_mut(target_entity)
            else {
                continue;
            };
            let Ok(owner_transform) = owners.get(sword.owner) else {
                continue;
            };
            sword.hit_entities.push(target_entity);

            let mut target =
                HitTarget::new(&mut manager, &mut status).knocked_off_floor(knock_off_floor);
            let knockback = knockback_toward(
                &target,
                owner_transform.translation.truncate(),
                target_transform.translation.truncate(),
                tuning.melee_knockback,
                tuning.knock_off_floor_lift,
            );
            let outcome = target.take_hit(knockback);
            if !outcome.landed() {
                continue;
            }

            debug!("Sword hit {:?}: {:?}", target_entity, outcome);
            hit_events.write(HitLandedEvent {
                target: target_entity,
                outcome,
                hit_points: manager.hit_points(),
            });

            if outcome == HitOutcome::Killed
                && let Ok(mut body) = bodies.get_mut(sword.owner)
                && body.has(Ability::DashOnKill)
            {
                body.refill_dashes();
                debug!("Dash refilled by kill");
            }
        }
    }
}

/// Anything touching a `ContactKnockback` entity gets hit, every tick the
/// contact lasts, gated by invulnerability.
pub(crate) fn apply_contact_damage(
    mut hit_events: MessageWriter<HitLandedEvent>,
    attackers: Query<(&Transform, &ContactKnockback)>,
    mut targets: Query<
        (
            Entity,
            &Transform,
            &CollidingEntities,
            &mut HitManager,
            &mut HitStatus,
            Has<KnockOffFloor>,
        ),
        With<HurtByEnemyContact>,
    >,
) {
    for (entity, transform, colliding, mut manager, mut status, knock_off_floor) in &mut targets {
        // Ignored hits must not flag the status as changed.
        if manager.is_dead() || manager.is_invulnerable() {
            continue;
        }
        for &other in colliding.iter() {
            let Ok((attacker_transform, contact)) = attackers.get(other) else {
                continue;
            };

            let mut target =
                HitTarget::new(&mut manager, &mut status).knocked_off_floor(knock_off_floor);
            let knockback = knockback_toward(
                &target,
                attacker_transform.translation.truncate(),
                transform.translation.truncate(),
                contact.0,
                0.0,
            );
            let outcome = target.take_hit(knockback);
            if outcome.landed() {
                info!(
                    "Contact hit on {:?}: {:?}, {} hit points left",
                    entity,
                    outcome,
                    manager.hit_points()
                );
                hit_events.write(HitLandedEvent {
                    target: entity,
                    outcome,
                    hit_points: manager.hit_points(),
                });
            }
        }
    }
}

pub(crate) fn despawn_projectiles_on_contact(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    projectiles: Query<(), With<EnemyProjectile>>,
) {
    for event in collision_events.read() {
        for entity in [event.collider1, event.collider2] {
            if projectiles.contains(entity) {
                commands.entity(entity).try_despawn();
            }
        }
    }
}

pub(crate) fn tick_hit_managers(
    time: Res<Time>,
    mut query: Query<(&mut HitManager, &mut HitStatus)>,
) {
    let dt = time.delta_secs();
    for (mut manager, mut status) in &mut query {
        if let Some(next) = status.ticked(&mut manager, dt) {
            *status = next;
        }
    }
}

/// Mirrors the invulnerability flicker onto enemy sprites.
pub(crate) fn apply_hit_flicker(
    mut query: Query<(&HitStatus, &mut Sprite), (Changed<HitStatus>, Without<Player>)>,
) {
    for (status, mut sprite) in &mut query {
        sprite.color.set_alpha(status.opacity);
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageWriter<DeathEvent>,
    query: Query<(Entity, &HitStatus, Has<Player>), Changed<HitStatus>>,
) {
    for (entity, status, is_player) in &query {
        if !status.death_queued {
            continue;
        }
        death_events.write(DeathEvent { entity });
        if is_player {
            info!("Player died");
        } else {
            info!("Enemy {:?} died", entity);
            commands.entity(entity).despawn();
        }
    }
}
