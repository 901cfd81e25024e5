//! Math domain: wrapped angles for aiming.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// An angle in radians, always wrapped into `(-PI, PI]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angle(f32);

impl Angle {
    pub fn from_radians(radians: f32) -> Self {
        Self(wrap(radians))
    }

    /// Angle of the vector pointing from `from` to `to`.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        Self::from_radians(d.y.atan2(d.x))
    }

    pub fn radians(self) -> f32 {
        self.0
    }

    /// Signed shortest rotation that turns `self` into `target`.
    pub fn smallest_angle_to(self, target: Angle) -> Angle {
        Angle::from_radians(target.0 - self.0)
    }

    /// Rotates a fraction `t` of the way toward `target` along the shorter arc.
    pub fn lerp(self, target: Angle, t: f32) -> Angle {
        let t = t.clamp(0.0, 1.0);
        Angle::from_radians(self.0 + self.smallest_angle_to(target).0 * t)
    }

    pub fn unit_vector(self) -> Vec2 {
        Vec2::from_angle(self.0)
    }
}

fn wrap(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps PI onto -PI; keep the upper bound inclusive.
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
