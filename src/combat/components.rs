//! Combat domain: components for enemies, hitboxes and contact damage.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Walker,
    Sniper,
    Flyer,
}

/// Touching this entity hurts anything marked [`HurtByEnemyContact`].
/// The value is the knockback magnitude.
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactKnockback(pub f32);

#[derive(Component, Debug)]
pub struct HurtByEnemyContact;

/// Knockback added into the requested velocity last tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct KnockbackCarry(pub Vec2);

/// Short-lived player melee hitbox.
#[derive(Component, Debug)]
pub struct SwordSwing {
    pub owner: Entity,
    /// Targets already struck by this swing
    pub hit_entities: Vec<Entity>,
}

#[derive(Component, Debug)]
pub struct HitboxLifetime(pub f32);

#[derive(Component, Debug, Default)]
pub struct MeleeCooldown(pub f32);

impl MeleeCooldown {
    pub fn ready(&self) -> bool {
        self.0 <= 0.0
    }
}

/// Sniper bullet; despawns on any contact.
#[derive(Component, Debug)]
pub struct EnemyProjectile;

/// Visual barrel of a sniper, rotated to the current aim.
#[derive(Component, Debug)]
pub struct SniperGun;
