//! Movement domain: applies presentation requests to the player's sprite.

use bevy::prelude::*;

use crate::combat::HitStatus;
use crate::math::XDirection;
use crate::movement::{DashParticle, Player, PlayerBody, PlayerPresentation, Tint};

const PLAYER_COLOR: Color = Color::srgb(0.9, 0.9, 0.95);
const CHARGED_COLOR: Color = Color::srgb(1.0, 0.85, 0.3);
const DASH_PARTICLE_LIFETIME: f32 = 0.2;
const DASH_PARTICLE_ALPHA: f32 = 0.5;

pub(crate) fn apply_player_presentation(
    mut query: Query<(&PlayerPresentation, &PlayerBody, &HitStatus, &mut Sprite), With<Player>>,
) {
    for (presentation, body, status, mut sprite) in &mut query {
        let mut color = match presentation.tint {
            Tint::Normal => PLAYER_COLOR,
            Tint::Charged => CHARGED_COLOR,
        };
        color.set_alpha(status.opacity);
        sprite.color = color;
        sprite.flip_x = body.facing == XDirection::Left;
    }
}

/// Leaves a fading afterimage behind the player every frame of a dash.
pub(crate) fn spawn_dash_particles(
    mut commands: Commands,
    query: Query<(&Transform, &Sprite, &PlayerPresentation), With<Player>>,
) {
    for (transform, sprite, presentation) in &query {
        if !presentation.dash_particles {
            continue;
        }
        let mut color = sprite.color;
        color.set_alpha(DASH_PARTICLE_ALPHA);
        commands.spawn((
            DashParticle {
                remaining: DASH_PARTICLE_LIFETIME,
            },
            Sprite {
                color,
                custom_size: sprite.custom_size,
                flip_x: sprite.flip_x,
                ..default()
            },
            Transform::from_translation(transform.translation - Vec3::Z * 0.1),
        ));
    }
}

pub(crate) fn fade_dash_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DashParticle, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut sprite) in &mut query {
        particle.remaining -= dt;
        if particle.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        sprite
            .color
            .set_alpha(DASH_PARTICLE_ALPHA * particle.remaining / DASH_PARTICLE_LIFETIME);
    }
}
