//! Combat domain: floating enemies that drift along random S-shaped paths.

use std::f32::consts::PI;

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::Enemy;
use crate::combat::hittable::HitStatus;
use crate::combat::resources::{EnemyTuning, FlyerRng};
use crate::math::{Sign, XDirection, from_polar, with_sign};
use crate::movement::GameLayer;

/// Samples per bezier segment when measuring arc length.
const SAMPLES_PER_SEGMENT: usize = 24;

/// Two cubic segments meeting at a midpoint with mirrored control points.
#[derive(Debug, Clone)]
pub struct FloatPath {
    points: [Vec2; 7],
    /// Cumulative arc length at each baked sample
    lengths: Vec<f32>,
    baked: Vec<Vec2>,
}

impl FloatPath {
    /// `control` is the offset of the midpoint's outgoing handle.
    pub fn new(start: Vec2, mid: Vec2, control: Vec2, end: Vec2) -> Self {
        let points = [start, start, mid - control, mid, mid + control, end, end];
        let mut baked = Vec::with_capacity(SAMPLES_PER_SEGMENT * 2 + 1);
        for segment in 0..2 {
            let p = &points[segment * 3..segment * 3 + 4];
            for i in 0..SAMPLES_PER_SEGMENT {
                let t = i as f32 / SAMPLES_PER_SEGMENT as f32;
                baked.push(cubic_bezier(p[0], p[1], p[2], p[3], t));
            }
        }
        baked.push(end);

        let mut lengths = Vec::with_capacity(baked.len());
        let mut total = 0.0;
        lengths.push(0.0);
        for pair in baked.windows(2) {
            total += pair[0].distance(pair[1]);
            lengths.push(total);
        }

        Self {
            points,
            lengths,
            baked,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    pub fn end(&self) -> Vec2 {
        self.points[6]
    }

    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point `distance` along the path, clamped to its ends.
    pub fn sample(&self, distance: f32) -> Vec2 {
        if distance <= 0.0 {
            return self.start();
        }
        let index = self.lengths.partition_point(|&l| l < distance);
        if index >= self.baked.len() {
            return self.end();
        }
        let (before, after) = (self.lengths[index - 1], self.lengths[index]);
        let span = after - before;
        let t = if span > 0.0 {
            (distance - before) / span
        } else {
            0.0
        };
        self.baked[index - 1].lerp(self.baked[index], t)
    }

    /// S-curve of random length heading along `radians`.
    pub fn random_ess(rng: &mut impl Rng, start: Vec2, radians: f32, tuning: &EnemyTuning) -> Self {
        let distance = rng.random_range(tuning.flyer_segment_min..=tuning.flyer_segment_max);
        let end = start + from_polar(distance, radians);
        let mid = (start + end) * 0.5;
        let control_angle = radians + rng.random_range(-PI * 0.75..=PI * 0.75);
        let control_length = rng.random_range(tuning.flyer_control_min..=tuning.flyer_control_max);
        Self::new(start, mid, from_polar(control_length, control_angle), end)
    }

    pub fn random_direction(rng: &mut impl Rng, start: Vec2, tuning: &EnemyTuning) -> Self {
        let radians = rng.random_range(-PI..PI);
        Self::random_ess(rng, start, radians, tuning)
    }
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[derive(Component, Debug, Clone)]
pub struct RandomFlyer {
    pub path: FloatPath,
    pub distance: f32,
    pub speed: f32,
    pub accel_sign: Sign,
}

impl RandomFlyer {
    pub fn new(path: FloatPath, tuning: &EnemyTuning) -> Self {
        Self {
            path,
            distance: 0.0,
            speed: tuning.flyer_min_speed,
            accel_sign: Sign::Positive,
        }
    }

    /// Speed ping-pongs between the configured bounds.
    pub fn advance(&mut self, tuning: &EnemyTuning, dt: f32) {
        if self.speed >= tuning.flyer_max_speed {
            self.accel_sign = Sign::Negative;
        }
        if self.speed <= tuning.flyer_min_speed {
            self.accel_sign = Sign::Positive;
        }
        self.speed += dt * with_sign(tuning.flyer_accel, self.accel_sign);
        self.distance += dt * self.speed;
    }

    pub fn restart(&mut self, path: FloatPath) {
        self.path = path;
        self.distance = 0.0;
    }
}

pub(crate) fn drift_flyers(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    spatial_query: SpatialQuery,
    mut rng: ResMut<FlyerRng>,
    mut query: Query<
        (
            &Transform,
            &Collider,
            &HitStatus,
            &mut RandomFlyer,
            &mut XDirection,
            &mut LinearVelocity,
        ),
        With<Enemy>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let solid = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, status, mut flyer, mut facing, mut velocity) in &mut query {
        let position = transform.translation.truncate();
        if status.stunned {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        flyer.advance(&tuning, dt);
        if flyer.distance >= flyer.path.length() {
            let start = flyer.path.end();
            flyer.restart(FloatPath::random_direction(&mut rng.0, start, &tuning));
        }

        let movement = flyer.path.sample(flyer.distance) - position;
        if let Some(direction) = XDirection::from_x(movement.x) {
            *facing = direction;
        }

        let radius = match collider.shape_scaled().as_ball() {
            Some(ball) => ball.radius,
            None => 8.0,
        };
        let blocked = Dir2::new(movement).ok().and_then(|direction| {
            spatial_query.cast_ray(
                position,
                direction,
                radius + movement.length(),
                true,
                &solid,
            )
        });

        match blocked {
            Some(hit) => {
                let away = hit.normal.y.atan2(hit.normal.x);
                flyer.restart(FloatPath::random_ess(&mut rng.0, position, away, &tuning));
                velocity.0 = Vec2::ZERO;
            }
            None => velocity.0 = movement / dt,
        }
    }
}
