//! Movement domain: gravity-aware platformer locomotion plugin and public exports.

mod bootstrap;
pub mod collision;
mod components;
mod dev;
mod events;
pub mod geometry;
pub mod math;
mod motor;
mod orientation;
mod resources;
pub mod respawn;
mod systems;


pub use collision::{CollisionInfo, CollisionResolver, MoveRequest, MoveResult, ResolverSettings};
pub use components::{
    AnimationState, Checkpoint, Facing, GameLayer, GravityZone, Ground, Hazard, Player,
    TriggerArea, Wall, trigger_layers,
};
pub use dev::spawn_test_room;
pub use events::{GravityChanged, RespawnRequested, SpawnPointReached};
pub use geometry::{GeometryQuery, RayHit, StaticGeometry};
pub use motor::{AnimationFlags, MotorSnapshot, MotorState, PlayerMotor, SpawnPoint};
pub use orientation::{GravityDirection, InputAxis, InputMapping, JumpKey, MomentumTransfer};
pub use resources::{JumpKeys, MovementInput, MovementTuning, PlayerStart};

use bevy::input::InputSystems;
use bevy::prelude::*;

use crate::core::BootSet;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_tuning_changes, detect_triggers, handle_respawn_requests, handle_spawn_points,
    read_input, sync_motor_state, tick_motors,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<PlayerStart>()
            .register_type::<GravityDirection>()
            .add_message::<RespawnRequested>()
            .add_message::<SpawnPointReached>()
            .add_message::<GravityChanged>()
            .add_systems(Startup, spawn_player.in_set(BootSet::Spawn))
            .add_systems(PreUpdate, read_input.after(InputSystems))
            .add_systems(
                FixedUpdate,
                (
                    apply_tuning_changes,
                    tick_motors,
                    detect_triggers,
                    handle_spawn_points,
                    handle_respawn_requests,
                    sync_motor_state,
                )
                    .chain(),
            );
    }
}
