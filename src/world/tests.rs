//! World domain: tests for the world-state sink, pickups and level layout.

use std::collections::HashSet;

use bevy::prelude::*;

use super::level::{
    ABILITY_PICKUPS, CHECKPOINTS, DOORS, HEALTH_UPGRADES, LEVERS, PITS, PLAYER_START,
};
use super::{
    WorldState, WorldStateSink, collect_ability, collect_health_upgrade, pull_lever,
    reach_checkpoint,
};
use crate::combat::{CombatTuning, HitManager};
use crate::movement::{
    Ability, MovementTuning, PlayerBody, restored_body, restored_hit_manager,
};

fn new_body() -> PlayerBody {
    PlayerBody::new(&MovementTuning::default(), PLAYER_START)
}

#[test]
fn test_fresh_world_respawns_at_start() {
    let world = WorldState::default();
    assert_eq!(world.respawn_point(), PLAYER_START);
    assert!(world.checkpoint().is_none());
    assert_eq!(world.health_upgrades(), 0);
    assert!(!world.is_activated("anything"));
}

#[test]
fn test_checkpoint_moves_respawn_point() {
    let mut world = WorldState::default();
    let position = Vec2::new(800.0, -164.0);

    assert!(reach_checkpoint(&mut world, "checkpoint_east", position));
    assert!(world.is_current_checkpoint("checkpoint_east"));
    assert!(!world.is_current_checkpoint("checkpoint_west"));
    assert_eq!(world.respawn_point(), position);

    // Touching the current checkpoint again is not a new save
    assert!(!reach_checkpoint(&mut world, "checkpoint_east", position));

    let west = Vec2::new(-100.0, 0.0);
    assert!(reach_checkpoint(&mut world, "checkpoint_west", west));
    assert_eq!(world.respawn_point(), west);
}

#[test]
fn test_ability_pickup_unlocks_and_records() {
    let mut world = WorldState::default();
    let mut body = new_body();

    assert!(collect_ability(&mut world, &mut body, Ability::Dash));
    assert!(body.has(Ability::Dash));
    assert!(world.is_activated(Ability::Dash.object_id()));

    assert!(!collect_ability(&mut world, &mut body, Ability::Dash));
}

#[test]
fn test_double_dash_pickup_raises_max_dashes() {
    let mut world = WorldState::default();
    let mut body = new_body();
    body.dashes_available = 0;

    collect_ability(&mut world, &mut body, Ability::DoubleDash);
    assert_eq!(body.max_dashes, 2);
    assert_eq!(body.dashes_available, 2);
}

#[test]
fn test_health_upgrade_collected_once() {
    let combat = CombatTuning::default();
    let mut world = WorldState::default();
    let mut manager = HitManager::new(&combat.player);
    let base_max = manager.max_hit_points();

    assert!(collect_health_upgrade(&mut world, "upgrade_a", &mut manager));
    assert_eq!(manager.max_hit_points(), base_max + 1);
    assert_eq!(manager.hit_points(), base_max + 1);
    assert_eq!(world.health_upgrades(), 1);

    assert!(!collect_health_upgrade(&mut world, "upgrade_a", &mut manager));
    assert_eq!(manager.max_hit_points(), base_max + 1);
    assert_eq!(world.health_upgrades(), 1);
}

#[test]
fn test_lever_activates_targets_once() {
    let mut world = WorldState::default();
    let targets = vec!["door_a".to_string(), "door_b".to_string()];

    assert!(pull_lever(&mut world, "lever_a", &targets));
    assert!(world.is_activated("lever_a"));
    assert!(world.is_activated("door_a"));
    assert!(world.is_activated("door_b"));

    assert!(!pull_lever(&mut world, "lever_a", &targets));
}

#[test]
fn test_respawned_player_keeps_progress() {
    let tuning = MovementTuning::default();
    let combat = CombatTuning::default();
    let mut world = WorldState::default();
    let mut body = new_body();
    let mut manager = HitManager::new(&combat.player);

    collect_ability(&mut world, &mut body, Ability::Grapple);
    collect_ability(&mut world, &mut body, Ability::DoubleDash);
    collect_health_upgrade(&mut world, "upgrade_a", &mut manager);
    reach_checkpoint(&mut world, "checkpoint_east", Vec2::new(800.0, -164.0));

    let restored = restored_body(&tuning, &world, world.respawn_point());
    assert_eq!(restored.position, Vec2::new(800.0, -164.0));
    assert!(restored.has(Ability::Grapple));
    assert!(restored.has(Ability::DoubleDash));
    assert!(!restored.has(Ability::Dash));
    assert_eq!(restored.max_dashes, 2);

    let restored_manager = restored_hit_manager(&combat, &world);
    assert_eq!(restored_manager.max_hit_points(), manager.max_hit_points());
    assert_eq!(restored_manager.hit_points(), restored_manager.max_hit_points());
}

#[test]
fn test_level_object_ids_are_unique() {
    let mut ids = HashSet::new();
    let all = ABILITY_PICKUPS
        .iter()
        .map(|(ability, _)| ability.object_id())
        .chain(HEALTH_UPGRADES.iter().map(|(id, _)| *id))
        .chain(CHECKPOINTS.iter().map(|(id, _)| *id))
        .chain(LEVERS.iter().map(|(id, _, _)| *id))
        .chain(DOORS.iter().map(|(id, _, _)| *id));
    for id in all {
        assert!(ids.insert(id), "duplicate object id {}", id);
    }
}

#[test]
fn test_level_offers_every_ability() {
    for ability in Ability::ALL {
        assert!(
            ABILITY_PICKUPS.iter().any(|(a, _)| *a == ability),
            "no pickup for {:?}",
            ability
        );
    }
}

#[test]
fn test_every_lever_target_is_a_door() {
    let doors: HashSet<&str> = DOORS.iter().map(|(id, _, _)| *id).collect();
    for (_, targets, _) in LEVERS {
        for target in targets {
            assert!(doors.contains(target), "lever targets unknown {}", target);
        }
    }
}

#[test]
fn test_pit_respawn_points_are_outside_pits() {
    for (center, size, respawn) in PITS {
        let half = size / 2.0;
        let inside = (respawn.x - center.x).abs() <= half.x && (respawn.y - center.y).abs() <= half.y;
        assert!(!inside, "respawn {:?} lies inside its pit", respawn);
    }
}
