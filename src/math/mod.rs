//! Math domain: signs, horizontal directions, angles and small vector helpers.

mod angle;
mod sign;
#[cfg(test)]
mod tests;

pub use angle::Angle;
pub use sign::{Sign, XDirection};

use bevy::prelude::*;

/// Moves `current` toward `target` by at most `max_delta` without overshooting.
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Exponential approach toward zero at `rate` per second.
/// Values whose magnitude drops below `threshold` snap to exactly zero.
pub fn decay_toward_zero(value: f32, rate: f32, dt: f32, threshold: f32) -> f32 {
    let decayed = value * (-rate * dt).exp();
    if decayed.abs() < threshold {
        0.0
    } else {
        decayed
    }
}

/// Shortens `v` by `amount`, stopping at zero instead of flipping direction.
pub fn shrink_toward_zero(v: Vec2, amount: f32) -> Vec2 {
    let length = v.length();
    if length <= amount || length == 0.0 {
        Vec2::ZERO
    } else {
        v * ((length - amount) / length)
    }
}

/// Vector of the given length pointing along `radians`.
pub fn from_polar(magnitude: f32, radians: f32) -> Vec2 {
    Vec2::from_angle(radians) * magnitude
}

/// `|magnitude|` carrying the given sign (zero for `Sign::None`).
pub fn with_sign(magnitude: f32, sign: Sign) -> f32 {
    magnitude.abs() * sign.unit()
}
