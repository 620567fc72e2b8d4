//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

/// Samples the keyboard every frame. Axes are overwritten; key presses are
/// latched until a fixed tick consumes them so none fall between ticks.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (forward motion while gravity is sideways)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed |= keyboard.just_pressed(KeyCode::Space);
    input.jump_keys.w |= keyboard.just_pressed(KeyCode::KeyW);
    input.jump_keys.a |= keyboard.just_pressed(KeyCode::KeyA);
    input.jump_keys.s |= keyboard.just_pressed(KeyCode::KeyS);
    input.jump_keys.d |= keyboard.just_pressed(KeyCode::KeyD);
}
