//! Movement domain: developer shortcuts, compiled with the `dev-tools` feature.

use bevy::prelude::*;

use crate::combat::HitManager;
use crate::movement::{Ability, Player, PlayerBody};

/// F1 unlocks every ability, F2 restores hit points.
pub(crate) fn apply_dev_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut PlayerBody, &mut HitManager), With<Player>>,
) {
    let Ok((mut body, mut hit_manager)) = query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::F1) {
        for ability in Ability::ALL {
            body.unlock(ability);
        }
        info!("Dev: unlocked all abilities");
    }
    if keyboard.just_pressed(KeyCode::F2) {
        hit_manager.restore();
        info!("Dev: restored {} hit points", hit_manager.hit_points());
    }
}
