//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Serialize;

use crate::movement::GravityDirection;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, ramps)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Sensors (gravity zones, triggers) - should not block movement
    Sensor,
}

impl GameLayer {
    /// Layers the collision resolver casts against.
    pub fn solid() -> LayerMask {
        LayerMask::from([GameLayer::Ground, GameLayer::Wall])
    }
}

#[derive(Component, Debug)]
pub struct Player;

/// Which way the body's sprite faces along its local x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for sensor regions that react to the player entering them.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TriggerArea;

/// Collision layers for trigger sensors: they only detect the player.
pub fn trigger_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

/// Sensor that reorients the player's gravity on contact.
#[derive(Component, Debug, Clone, Copy)]
#[require(TriggerArea)]
pub struct GravityZone {
    pub direction: GravityDirection,
}

/// Saves the touching position as the player's spawn point.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(TriggerArea)]
pub struct Checkpoint {
    /// Gravity restored on respawn; `None` keeps the gravity the player had
    /// when it reached the checkpoint.
    pub gravity: Option<GravityDirection>,
}

/// Sends the player back to its spawn point on contact.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(TriggerArea)]
pub struct Hazard;

/// Animation flags mirrored from the motor for display collaborators.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub is_jumping: bool,
    pub is_walking: bool,
    pub facing_right: bool,
}
