//! Movement domain: fixed-tick motor updates and presentation sync.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{AnimationState, MovementInput, MovementTuning, Player, PlayerMotor};

/// Rebuilds motors when tuning changes after the player has spawned.
pub(crate) fn apply_tuning_changes(
    tuning: Res<MovementTuning>,
    mut query: Query<&mut PlayerMotor, With<Player>>,
) {
    if !tuning.is_changed() || tuning.is_added() {
        return;
    }

    for mut motor in &mut query {
        motor.retune(&tuning);
        debug!(
            "Motor retuned: gravity={:.2}, jump_velocity={:.2}",
            tuning.gravity(),
            tuning.jump_velocity()
        );
    }
}

pub(crate) fn tick_motors(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut input: ResMut<MovementInput>,
    mut query: Query<&mut PlayerMotor, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut motor in &mut query {
        motor.tick(&input, dt, &spatial_query);
    }

    input.consume_presses();
}

/// Mirrors motor state onto the components the renderer and physics read.
#[allow(clippy::type_complexity)]
pub(crate) fn sync_motor_state(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &PlayerMotor,
            &mut Transform,
            &mut Sprite,
            &mut Visibility,
            &mut AnimationState,
            Has<ColliderDisabled>,
        ),
        With<Player>,
    >,
) {
    for (entity, motor, mut transform, mut sprite, mut visibility, mut animation, disabled) in
        &mut query
    {
        let gravity = motor.gravity_direction();
        transform.translation = motor.position().extend(transform.translation.z);
        transform.rotation = Quat::from_rotation_z(gravity.rotation_degrees().to_radians());

        let facing_right = motor.facing().sign() > 0.0;
        if sprite.flip_x == facing_right {
            sprite.flip_x = !facing_right;
        }

        let wanted = if motor.is_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }

        let flags = motor.animation();
        animation.set_if_neq(AnimationState {
            is_jumping: flags.is_jumping,
            is_walking: flags.is_walking,
            facing_right,
        });

        match (motor.collider_enabled(), disabled) {
            (true, true) => {
                commands.entity(entity).remove::<ColliderDisabled>();
            }
            (false, false) => {
                commands.entity(entity).insert(ColliderDisabled);
            }
            _ => {}
        }
    }
}
