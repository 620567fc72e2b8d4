//! Movement domain: messages exchanged with checkpoint, hazard and zone collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::GravityDirection;

/// Sent by hazards when the player must go back to its spawn point.
#[derive(Debug, Clone, Copy, Default)]
pub struct RespawnRequested;

impl Message for RespawnRequested {}

/// Sent by checkpoints. Without an explicit gravity the player's current
/// gravity is saved with the spawn point.
#[derive(Debug, Clone, Copy)]
pub struct SpawnPointReached {
    pub position: Vec2,
    pub gravity: Option<GravityDirection>,
}

impl Message for SpawnPointReached {}

/// Emitted after a gravity zone reorients the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityChanged {
    pub entity: Entity,
    pub from: GravityDirection,
    pub to: GravityDirection,
}

impl Message for GravityChanged {}
