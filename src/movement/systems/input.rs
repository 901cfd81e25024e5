//! Movement domain: input sampling for the player.

use bevy::prelude::*;

use crate::movement::MovementInput;

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const CROUCH_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];
const GRAPPLE_KEYS: [KeyCode; 2] = [KeyCode::KeyL, KeyCode::KeyC];
const MELEE_KEYS: [KeyCode; 2] = [KeyCode::KeyU, KeyCode::KeyX];

/// Samples the keyboard once per frame into a fresh snapshot.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut x = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.any_pressed(CROUCH_KEYS) {
        y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        y += 1.0;
    }

    *input = MovementInput {
        direction: Vec2::new(x, y),
        jump_pressed: keyboard.any_just_pressed(JUMP_KEYS),
        jump_held: keyboard.any_pressed(JUMP_KEYS),
        crouch_pressed: keyboard.any_just_pressed(CROUCH_KEYS),
        crouch_held: keyboard.any_pressed(CROUCH_KEYS),
        dash_pressed: keyboard.any_just_pressed(DASH_KEYS),
        grapple_pressed: keyboard.any_just_pressed(GRAPPLE_KEYS),
        grapple_held: keyboard.any_pressed(GRAPPLE_KEYS),
        melee_pressed: keyboard.any_just_pressed(MELEE_KEYS),
        interact_pressed: keyboard.just_pressed(KeyCode::KeyE),
    };
}
