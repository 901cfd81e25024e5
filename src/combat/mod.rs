//! Combat domain: hit management, melee, contact damage and enemy AI wiring.

mod ai;
mod components;
mod events;
mod hit_manager;
mod hittable;
mod resources;
mod spawn;
mod systems;


pub use ai::flyer::{FloatPath, RandomFlyer};
pub use ai::strategies::{
    Ai, AiSenses, AvoidDrops, Chase, EnemyBrain, FireAtWill, NoticeTarget, Patrol, ShootingState,
};
pub use components::{
    ContactKnockback, Enemy, EnemyKind, EnemyProjectile, HurtByEnemyContact, KnockbackCarry,
    MeleeCooldown, SwordSwing,
};
pub use events::{DeathEvent, HitLandedEvent};
pub use hit_manager::{HitManager, strip_knockback};
pub use hittable::{HitHooks, HitOutcome, HitStatus, HitTarget, Hittable, KnockOffFloor, knockback_toward};
pub use resources::{CombatTuning, EnemyTuning, FlyerRng, HitTuning};
pub use spawn::spawn_enemy;

use bevy::prelude::*;

use crate::combat::ai::{aim_guns, drift_flyers, fire_projectiles, sense_surroundings, steer_enemies};
use crate::combat::systems::{
    apply_contact_damage, apply_hit_flicker, cleanup_expired_hitboxes,
    despawn_projectiles_on_contact, process_deaths, resolve_sword_hits, swing_sword,
    tick_hit_managers, tick_melee_cooldowns,
};
use crate::core::{GameState, gameplay_active};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<EnemyTuning>()
            .init_resource::<FlyerRng>()
            .add_message::<HitLandedEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                Update,
                (
                    tick_hit_managers,
                    apply_contact_damage,
                    (tick_melee_cooldowns, swing_sword, resolve_sword_hits).chain(),
                    despawn_projectiles_on_contact,
                    cleanup_expired_hitboxes,
                    apply_hit_flicker,
                    process_deaths,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (
                    sense_surroundings,
                    steer_enemies,
                    aim_guns,
                    fire_projectiles,
                    drift_flyers,
                )
                    .chain()
                    .after(tick_hit_managers)
                    .run_if(in_state(GameState::Playing))
                    .run_if(gameplay_active),
            );
    }
}
