//! Combat domain: hit points, invulnerability window and knockback decay.

use bevy::prelude::*;

use crate::combat::hittable::{HitHooks, HitOutcome};
use crate::combat::resources::HitTuning;
use crate::math::shrink_toward_zero;

/// Shared by the player and every hittable enemy.
///
/// Hits landing while the invulnerability window is open are dropped, never
/// stacked. Knockback accumulates across separate hits and drains linearly at
/// `knockback_drag` per second.
#[derive(Component, Debug, Clone)]
pub struct HitManager {
    hit_points: u32,
    max_hit_points: u32,
    knockback: Vec2,
    knockback_drag: f32,
    invulnerability_elapsed: f32,
    invulnerability_duration: f32,
    invulnerability_override: bool,
    flicker_elapsed: f32,
    flicker_interval: f32,
    flicker_alpha: f32,
    flicker_visible: bool,
}

impl HitManager {
    pub fn new(tuning: &HitTuning) -> Self {
        Self::with_hit_points(tuning, tuning.hit_points)
    }

    pub fn with_hit_points(tuning: &HitTuning, hit_points: u32) -> Self {
        Self {
            hit_points,
            max_hit_points: hit_points,
            knockback: Vec2::ZERO,
            knockback_drag: tuning.knockback_drag,
            // Start with the window already closed.
            invulnerability_elapsed: tuning.invulnerability_duration,
            invulnerability_duration: tuning.invulnerability_duration,
            invulnerability_override: false,
            flicker_elapsed: 0.0,
            flicker_interval: tuning.flicker_interval,
            flicker_alpha: tuning.flicker_alpha,
            flicker_visible: true,
        }
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    pub fn knockback(&self) -> Vec2 {
        self.knockback
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points == 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_override || self.in_invulnerability_window()
    }

    fn in_invulnerability_window(&self) -> bool {
        self.invulnerability_elapsed < self.invulnerability_duration
    }

    /// Immunity independent of the timer, e.g. while dashing.
    pub fn set_invulnerability_override(&mut self, enabled: bool) {
        self.invulnerability_override = enabled;
    }

    pub fn take_hit<H: HitHooks + ?Sized>(&mut self, owner: &mut H, knockback: Vec2) -> HitOutcome {
        self.apply_hit(owner, knockback, 1)
    }

    /// Direct damage (pits, projectiles) with no knockback.
    pub fn take_damage<H: HitHooks + ?Sized>(&mut self, owner: &mut H, amount: u32) -> HitOutcome {
        self.apply_hit(owner, Vec2::ZERO, amount)
    }

    fn apply_hit<H: HitHooks + ?Sized>(
        &mut self,
        owner: &mut H,
        knockback: Vec2,
        amount: u32,
    ) -> HitOutcome {
        if self.is_dead() || self.is_invulnerable() {
            return HitOutcome::Ignored;
        }

        self.knockback += knockback;
        self.invulnerability_elapsed = 0.0;
        self.flicker_elapsed = 0.0;
        self.flicker_visible = true;
        owner.stun();

        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.hit_points == 0 {
            if !owner.is_death_queued() {
                owner.queue_death();
            }
            return HitOutcome::Killed;
        }
        HitOutcome::Hurt
    }

    /// Advance timers by one physics tick.
    pub fn tick<H: HitHooks + ?Sized>(&mut self, owner: &mut H, dt: f32) {
        if self.is_dead() {
            return;
        }

        if self.in_invulnerability_window() {
            self.invulnerability_elapsed += dt;
            if self.in_invulnerability_window() {
                self.advance_flicker(owner, dt);
            } else {
                self.flicker_visible = true;
                self.flicker_elapsed = 0.0;
                owner.unstun();
                owner.set_opacity(1.0);
            }
        }

        self.knockback = shrink_toward_zero(self.knockback, self.knockback_drag * dt);
    }

    fn advance_flicker<H: HitHooks + ?Sized>(&mut self, owner: &mut H, dt: f32) {
        if self.flicker_interval <= 0.0 {
            return;
        }
        self.flicker_elapsed += dt;
        while self.flicker_elapsed >= self.flicker_interval {
            self.flicker_elapsed -= self.flicker_interval;
            self.flicker_visible = !self.flicker_visible;
            owner.set_opacity(if self.flicker_visible {
                1.0
            } else {
                self.flicker_alpha
            });
        }
    }

    /// Health upgrade: one more hit point of capacity.
    pub fn raise_max_hit_points(&mut self, amount: u32) {
        self.max_hit_points += amount;
    }

    pub fn restore(&mut self) {
        self.hit_points = self.max_hit_points;
    }
}

/// Takes last tick's knockback back out of a physics-resolved velocity.
/// Axes a contact has stopped dead are left at zero instead of reversing.
pub fn strip_knockback(resolved: Vec2, carried: Vec2, blocked_x: bool, blocked_y: bool) -> Vec2 {
    let mut velocity = resolved - carried;
    if blocked_x && resolved.x.abs() < RESOLVED_EPSILON {
        velocity.x = 0.0;
    }
    if blocked_y && resolved.y.abs() < RESOLVED_EPSILON {
        velocity.y = 0.0;
    }
    velocity
}

const RESOLVED_EPSILON: f32 = 1e-3;
