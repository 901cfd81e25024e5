//! Movement domain: floor, wall and ceiling sensing plus grapple targeting.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Ability, CeilingSensors, ContactState, GameLayer, MovementInput, MovementTuning, Player,
    PlayerBody,
};

/// How far past the collider a surface still counts as touching.
const CONTACT_PROBE: f32 = 3.0;
/// Reach of the upward corner sensors.
const CEILING_SENSOR_REACH: f32 = 8.0;
/// Keeps edge rays just inside the collider's sides.
const EDGE_INSET: f32 = 0.5;

pub(crate) fn detect_contacts(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut ContactState), With<Player>>,
) {
    let solid = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, mut contacts) in &mut query {
        let half = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(8.0, 12.0),
        };
        let center = transform.translation.truncate();
        let edge = half.x - EDGE_INSET;

        let hits = |origin: Vec2, direction: Dir2, distance: f32| {
            spatial_query
                .cast_ray(origin, direction, distance, true, &solid)
                .is_some()
        };

        let feet = center - Vec2::new(0.0, half.y);
        let head = center + Vec2::new(0.0, half.y);
        let on_floor = [-edge, 0.0, edge]
            .into_iter()
            .any(|x| hits(feet + Vec2::new(x, 0.0), Dir2::NEG_Y, CONTACT_PROBE));
        let on_ceiling = [-edge, 0.0, edge]
            .into_iter()
            .any(|x| hits(head + Vec2::new(x, 0.0), Dir2::Y, CONTACT_PROBE));
        let on_wall = hits(center, Dir2::NEG_X, half.x + CONTACT_PROBE)
            || hits(center, Dir2::X, half.x + CONTACT_PROBE);

        let inner = half.x - tuning.ceiling_sensor_inset;
        let sensor = |x: f32| hits(head + Vec2::new(x, 0.0), Dir2::Y, CEILING_SENSOR_REACH);
        let ceiling = CeilingSensors {
            left_outer: sensor(-edge),
            left_inner: sensor(-inner),
            right_outer: sensor(edge),
            right_inner: sensor(inner),
        };

        if on_floor != contacts.on_floor {
            debug!("Player on_floor={}", on_floor);
        }
        *contacts = ContactState {
            on_floor,
            on_wall,
            on_ceiling,
            ceiling,
        };
    }
}

/// Shoots the grapple on press and drops the anchor on release.
pub(crate) fn acquire_grapple_anchor(
    spatial_query: SpatialQuery,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &mut PlayerBody), With<Player>>,
) {
    let Ok((transform, mut body)) = query.single_mut() else {
        return;
    };

    if !input.grapple_held {
        if body.grapple_anchor.take().is_some() {
            debug!("Grapple released");
        }
        return;
    }
    if !input.grapple_pressed || body.grapple_anchor.is_some() || !body.has(Ability::Grapple) {
        return;
    }

    // Never aim downward; no input aims up and forward.
    let mut aim = input.direction;
    aim.y = aim.y.max(0.0);
    if aim == Vec2::ZERO {
        aim = Vec2::new(body.facing.sign(), 1.0);
    }
    let Ok(direction) = Dir2::new(aim) else {
        return;
    };

    let origin = transform.translation.truncate();
    let solid = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
    match spatial_query.cast_ray(origin, direction, tuning.grapple_range, true, &solid) {
        Some(hit) => {
            let anchor = origin + *direction * hit.distance;
            debug!("Grapple anchored at {:?}", anchor);
            body.grapple_anchor = Some(anchor);
        }
        None => debug!("Grapple missed"),
    }
}
