//! Movement domain: player bootstrap from tuning and level start data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimationState, GameLayer, GravityDirection, MovementTuning, Player, PlayerMotor, PlayerStart,
};

/// Spawns the player at the level start once tuning has been loaded.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    start: Res<PlayerStart>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let gravity = GravityDirection::from_rotation_degrees(start.rotation_degrees);
    let mut motor = PlayerMotor::new(&tuning, start.position, gravity);
    if !start.facing_right {
        motor = motor.facing_left();
    }

    info!(
        "Spawning player at {:?}: gravity={:?}, jump_velocity={:.2}, gravity_strength={:.2}",
        start.position,
        gravity,
        tuning.jump_velocity(),
        tuning.gravity()
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            motor,
            AnimationState {
                facing_right: start.facing_right,
                ..default()
            },
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(tuning.body_size()),
            flip_x: !start.facing_right,
            ..default()
        },
        Transform::from_translation(start.position.extend(1.0))
            .with_rotation(Quat::from_rotation_z(gravity.rotation_degrees().to_radians())),
        Visibility::Visible,
        // Physics: the motor moves the body; the collider only lets
        // trigger sensors see it.
        (
            RigidBody::Kinematic,
            Collider::rectangle(tuning.body_width, tuning.body_height),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Sensor]),
        ),
    ));
}
