//! Combat domain: sensing, walking and shooting for ground enemies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::strategies::{AiSenses, EnemyBrain};
use crate::combat::components::{
    ContactKnockback, Enemy, EnemyProjectile, HitboxLifetime, KnockbackCarry, SniperGun,
};
use crate::combat::hit_manager::{HitManager, strip_knockback};
use crate::combat::hittable::HitStatus;
use crate::combat::resources::{CombatTuning, EnemyTuning};
use crate::math::XDirection;
use crate::movement::{GameLayer, Player};

const PROJECTILE_SIZE: f32 = 6.0;

pub(crate) fn sense_surroundings(
    spatial_query: SpatialQuery,
    tuning: Res<EnemyTuning>,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (&Transform, &Collider, &XDirection, &mut AiSenses),
        (With<Enemy>, With<EnemyBrain>, Without<Player>),
    >,
) {
    let target = player_query.iter().next().map(|t| t.translation.truncate());
    let floor_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let solid_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, facing, mut senses) in &mut enemy_query {
        let position = transform.translation.truncate();
        let half = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::splat(12.0),
        };
        let ahead = facing.sign();
        let feet = position - Vec2::new(0.0, half.y);

        let floor_below = |x: f32, from: Vec2| {
            spatial_query
                .cast_ray(
                    from + Vec2::new(x, 0.0),
                    Dir2::NEG_Y,
                    tuning.probe_depth,
                    true,
                    &floor_filter,
                )
                .is_some()
        };

        senses.position = position;
        senses.on_floor = floor_below(0.0, feet);

        let edge_x = ahead * (half.x + tuning.edge_probe_ahead);
        let wall_ahead = spatial_query
            .cast_ray(
                position,
                if ahead > 0.0 { Dir2::X } else { Dir2::NEG_X },
                half.x + tuning.edge_probe_ahead,
                true,
                &solid_filter,
            )
            .is_some();
        senses.edge_ahead = senses.on_floor && (wall_ahead || !floor_below(edge_x, feet));
        senses.drop_ahead =
            senses.on_floor && !floor_below(ahead * (half.x + tuning.drop_probe_ahead), feet);

        senses.target_position = target;
        senses.target_in_sight = target.is_some_and(|t| {
            let offset = t - position;
            offset.x * ahead >= 0.0
                && offset.x.abs() <= tuning.sight_range
                && offset.y.abs() <= tuning.sight_height
        });
    }
}

pub(crate) fn steer_enemies(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut query: Query<
        (
            &mut EnemyBrain,
            &AiSenses,
            &mut XDirection,
            &HitManager,
            &HitStatus,
            &mut KnockbackCarry,
            &mut LinearVelocity,
        ),
        With<Enemy>,
    >,
) {
    let dt = time.delta_secs();

    for (mut brain, senses, mut facing, hit, status, mut carry, mut velocity) in &mut query {
        brain.ai.physics_process(senses, dt);
        *facing = brain.ai.next_x_direction(*facing, senses);

        let resolved = strip_knockback(velocity.0, carry.0, false, senses.on_floor);
        let mut next = Vec2::new(0.0, resolved.y);
        if senses.on_floor && !status.stunned {
            next.x += brain.ai.foot_speed(senses) * facing.sign();
        }
        if senses.on_floor {
            next.y = next.y.max(0.0);
        } else {
            next.y -= tuning.gravity * dt;
        }

        carry.0 = hit.knockback();
        velocity.0 = next + carry.0;
    }
}

pub(crate) fn aim_guns(
    brains: Query<(&EnemyBrain, &Children)>,
    mut guns: Query<&mut Transform, With<SniperGun>>,
) {
    for (brain, children) in &brains {
        let Some(aim) = brain.ai.aim() else {
            continue;
        };
        for child in children.iter() {
            if let Ok(mut transform) = guns.get_mut(child) {
                transform.rotation = Quat::from_rotation_z(aim.radians());
            }
        }
    }
}

pub(crate) fn fire_projectiles(
    mut commands: Commands,
    enemy_tuning: Res<EnemyTuning>,
    combat_tuning: Res<CombatTuning>,
    mut query: Query<(&Transform, &HitStatus, &mut EnemyBrain), With<Enemy>>,
) {
    for (transform, status, mut brain) in &mut query {
        if !brain.ai.take_shot() || status.stunned {
            continue;
        }
        let Some(aim) = brain.ai.aim() else {
            continue;
        };

        let direction = aim.unit_vector();
        let origin = transform.translation.truncate() + direction * 16.0;
        debug!("Sniper fired toward {:.2} rad", aim.radians());

        commands.spawn((
            EnemyProjectile,
            ContactKnockback(combat_tuning.contact_knockback),
            HitboxLifetime(enemy_tuning.projectile_lifetime),
            Sprite {
                color: Color::srgb(1.0, 0.4, 0.2),
                custom_size: Some(Vec2::splat(PROJECTILE_SIZE)),
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            RigidBody::Kinematic,
            Collider::circle(PROJECTILE_SIZE * 0.5),
            Sensor,
            LinearVelocity(direction * enemy_tuning.projectile_speed),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::EnemyHitbox,
                [GameLayer::Player, GameLayer::Ground, GameLayer::Wall],
            ),
        ));
    }
}
