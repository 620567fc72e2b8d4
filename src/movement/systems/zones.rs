//! Movement domain: trigger areas and the messages they raise.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    Checkpoint, GravityChanged, GravityZone, Hazard, Player, PlayerMotor, RespawnRequested,
    SpawnPointReached, TriggerArea,
};

/// Fires checkpoints, hazards and gravity zones when the player's collider
/// starts touching their sensors. A disabled collider reports no contacts.
#[allow(clippy::type_complexity)]
pub(crate) fn detect_triggers(
    mut collision_start_events: MessageReader<CollisionStart>,
    areas: Query<
        (
            &GlobalTransform,
            Option<&GravityZone>,
            Option<&Checkpoint>,
            Has<Hazard>,
        ),
        With<TriggerArea>,
    >,
    mut players: Query<&mut PlayerMotor, With<Player>>,
    mut gravity_changed: MessageWriter<GravityChanged>,
    mut spawn_reached: MessageWriter<SpawnPointReached>,
    mut respawn_requested: MessageWriter<RespawnRequested>,
) {
    for event in collision_start_events.read() {
        let (area_entity, player) = if areas.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if areas.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        let Ok(mut motor) = players.get_mut(player) else {
            continue;
        };
        let Ok((transform, zone, checkpoint, hazard)) = areas.get(area_entity) else {
            continue;
        };

        if let Some(zone) = zone {
            let from = motor.gravity_direction();
            if zone.direction != from {
                motor.change_gravity(zone.direction);
                info!(
                    "Gravity zone {:?}: {:?} -> {:?}",
                    area_entity, from, zone.direction
                );
                gravity_changed.write(GravityChanged {
                    entity: player,
                    from,
                    to: zone.direction,
                });
            }
        }

        if let Some(checkpoint) = checkpoint {
            spawn_reached.write(SpawnPointReached {
                position: transform.translation().truncate(),
                gravity: checkpoint.gravity,
            });
        }

        if hazard {
            respawn_requested.write(RespawnRequested);
        }
    }
}

pub(crate) fn handle_spawn_points(
    mut messages: MessageReader<SpawnPointReached>,
    mut query: Query<&mut PlayerMotor, With<Player>>,
) {
    for message in messages.read() {
        for mut motor in &mut query {
            let gravity = message.gravity.unwrap_or(motor.gravity_direction());
            if motor.spawn_point().position == message.position
                && motor.spawn_point().gravity == gravity
            {
                continue;
            }
            motor.set_spawn(message.position, gravity);
            info!(
                "Spawn point set to {:?} with gravity {:?}",
                message.position, gravity
            );
        }
    }
}

pub(crate) fn handle_respawn_requests(
    mut messages: MessageReader<RespawnRequested>,
    mut query: Query<&mut PlayerMotor, With<Player>>,
) {
    // Several hazards touched in one tick still mean one respawn.
    if messages.read().count() == 0 {
        return;
    }

    for mut motor in &mut query {
        motor.respawn();
    }
}
