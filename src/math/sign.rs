//! Math domain: three-way signs and left/right facing.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    Positive,
    #[default]
    None,
    Negative,
}

impl Sign {
    pub fn of(n: f32) -> Self {
        if n > 0.0 {
            Sign::Positive
        } else if n < 0.0 {
            Sign::Negative
        } else {
            Sign::None
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
            Sign::None => Sign::None,
        }
    }

    /// +1, -1 or 0.
    pub fn unit(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
            Sign::None => 0.0,
        }
    }
}

/// Horizontal facing shared by the player and enemies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XDirection {
    Left,
    #[default]
    Right,
}

impl XDirection {
    /// Direction of a nonzero horizontal component, `None` for zero.
    pub fn from_x(x: f32) -> Option<Self> {
        match Sign::of(x) {
            Sign::Positive => Some(XDirection::Right),
            Sign::Negative => Some(XDirection::Left),
            Sign::None => None,
        }
    }

    /// Direction from `from` toward `to`; ties face right.
    pub fn toward(from: Vec2, to: Vec2) -> Self {
        if to.x < from.x {
            XDirection::Left
        } else {
            XDirection::Right
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            XDirection::Left => XDirection::Right,
            XDirection::Right => XDirection::Left,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            XDirection::Left => -1.0,
            XDirection::Right => 1.0,
        }
    }

    pub fn unit_vector(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}
