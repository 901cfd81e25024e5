//! Combat domain: the hittable capability and the hooks a hit manager drives.

use bevy::prelude::*;

use crate::combat::hit_manager::HitManager;

/// Result of delivering a hit or direct damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Dropped: the target was dead or invulnerable.
    Ignored,
    Hurt,
    /// The hit took the last hit point.
    Killed,
}

impl HitOutcome {
    pub fn landed(self) -> bool {
        self != HitOutcome::Ignored
    }
}

/// Anything that can be struck: enemies, the player, hurtboxes.
pub trait Hittable {
    fn take_hit(&mut self, knockback: Vec2) -> HitOutcome;

    fn queue_death(&mut self);

    fn is_death_queued(&self) -> bool;

    /// Grounded targets whose friction would eat horizontal knockback ask the
    /// attacker for an upward lift.
    fn must_knock_off_floor_to_create_distance(&self) -> bool {
        false
    }
}

/// Callbacks a [`HitManager`] makes into its owner.
pub trait HitHooks {
    fn stun(&mut self) {}

    fn unstun(&mut self) {}

    /// Cosmetic flicker while invulnerable.
    fn set_opacity(&mut self, _alpha: f32) {}

    fn queue_death(&mut self);

    fn is_death_queued(&self) -> bool;
}

/// Per-entity view of the owner side of a hit: stun, flicker and death flags.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HitStatus {
    pub stunned: bool,
    pub death_queued: bool,
    pub opacity: f32,
}

impl Default for HitStatus {
    fn default() -> Self {
        Self {
            stunned: false,
            death_queued: false,
            opacity: 1.0,
        }
    }
}

impl HitStatus {
    /// Advances `manager` against a copy of this status. Returns the new
    /// status only when a hook changed it.
    pub fn ticked(&self, manager: &mut HitManager, dt: f32) -> Option<HitStatus> {
        let mut next = self.clone();
        manager.tick(&mut next, dt);
        (next != *self).then_some(next)
    }
}

impl HitHooks for HitStatus {
    fn stun(&mut self) {
        self.stunned = true;
    }

    fn unstun(&mut self) {
        self.stunned = false;
    }

    fn set_opacity(&mut self, alpha: f32) {
        self.opacity = alpha;
    }

    fn queue_death(&mut self) {
        self.death_queued = true;
    }

    fn is_death_queued(&self) -> bool {
        self.death_queued
    }
}

/// Marker for entities whose knockback needs an upward lift when grounded.
#[derive(Component, Debug, Default)]
pub struct KnockOffFloor;

/// Borrowed ECS parts of one hittable entity, assembled by the systems that
/// deliver hits.
pub struct HitTarget<'a> {
    pub manager: &'a mut HitManager,
    pub status: &'a mut HitStatus,
    pub knock_off_floor: bool,
}

impl<'a> HitTarget<'a> {
    pub fn new(manager: &'a mut HitManager, status: &'a mut HitStatus) -> Self {
        Self {
            manager,
            status,
            knock_off_floor: false,
        }
    }

    pub fn knocked_off_floor(mut self, knock_off_floor: bool) -> Self {
        self.knock_off_floor = knock_off_floor;
        self
    }

    pub fn take_damage(&mut self, amount: u32) -> HitOutcome {
        self.manager.take_damage(&mut *self.status, amount)
    }
}

impl Hittable for HitTarget<'_> {
    fn take_hit(&mut self, knockback: Vec2) -> HitOutcome {
        self.manager.take_hit(&mut *self.status, knockback)
    }

    fn queue_death(&mut self) {
        self.status.queue_death();
    }

    fn is_death_queued(&self) -> bool {
        self.status.is_death_queued()
    }

    fn must_knock_off_floor_to_create_distance(&self) -> bool {
        self.knock_off_floor
    }
}

/// Knockback of `magnitude` pointing from `attacker` to the target, lifted
/// upward when the target asks to be knocked off the floor.
pub fn knockback_toward<H: Hittable + ?Sized>(
    target: &H,
    attacker: Vec2,
    target_position: Vec2,
    magnitude: f32,
    floor_lift: f32,
) -> Vec2 {
    let direction = (target_position - attacker).normalize_or_zero();
    let direction = if direction == Vec2::ZERO {
        Vec2::X
    } else {
        direction
    };
    let mut knockback = direction * magnitude;
    if target.must_knock_off_floor_to_create_distance() {
        knockback.y = knockback.y.max(floor_lift);
    }
    knockback
}
