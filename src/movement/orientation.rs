//! Movement domain: gravity directions and the tables keyed by them.
//!
//! Every per-direction rule lives in a table indexed by [`GravityDirection`]:
//! body rotation, which raw input axis drives forward motion, which key
//! jumps, and how velocity is carried across a reorientation.

use bevy::math::Rot2;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::math::round_to_multiple;

/// The axis currently treated as "down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum GravityDirection {
    #[default]
    Down = 0,
    Left = 1,
    Up = 2,
    Right = 3,
}

/// Raw input axis sampled for forward motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAxis {
    Horizontal,
    Vertical,
}

/// Directional key that jumps away from the current gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKey {
    W,
    A,
    S,
    D,
}

/// How raw input is read for one gravity direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapping {
    pub forward_axis: InputAxis,
    pub forward_sign: f32,
    pub jump_key: JumpKey,
}

impl InputMapping {
    /// Forward input in the body frame from a raw `(horizontal, vertical)` axis.
    pub fn forward(&self, raw_axis: Vec2) -> f32 {
        let raw = match self.forward_axis {
            InputAxis::Horizontal => raw_axis.x,
            InputAxis::Vertical => raw_axis.y,
        };
        raw * self.forward_sign
    }
}

struct Orientation {
    degrees: f32,
    sin: f32,
    cos: f32,
    input: InputMapping,
}

const ORIENTATIONS: [Orientation; 4] = [
    // Down
    Orientation {
        degrees: 0.0,
        sin: 0.0,
        cos: 1.0,
        input: InputMapping {
            forward_axis: InputAxis::Horizontal,
            forward_sign: 1.0,
            jump_key: JumpKey::W,
        },
    },
    // Left
    Orientation {
        degrees: -90.0,
        sin: -1.0,
        cos: 0.0,
        input: InputMapping {
            forward_axis: InputAxis::Vertical,
            forward_sign: -1.0,
            jump_key: JumpKey::D,
        },
    },
    // Up
    Orientation {
        degrees: 180.0,
        sin: 0.0,
        cos: -1.0,
        input: InputMapping {
            forward_axis: InputAxis::Horizontal,
            forward_sign: -1.0,
            jump_key: JumpKey::S,
        },
    },
    // Right
    Orientation {
        degrees: 90.0,
        sin: 1.0,
        cos: 0.0,
        input: InputMapping {
            forward_axis: InputAxis::Vertical,
            forward_sign: 1.0,
            jump_key: JumpKey::A,
        },
    },
];

/// Velocity rule applied when gravity is reoriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumTransfer {
    Keep,
    /// 180 degree change: both axes negate.
    Reverse,
    /// 90 degree clockwise change: `(x, y) -> (-y, x)`.
    Clockwise,
    /// 90 degree counter-clockwise change: `(x, y) -> (y, -x)`.
    CounterClockwise,
}

use MomentumTransfer::{Clockwise as Cw, CounterClockwise as Ccw, Keep, Reverse};

/// Indexed `[from][to]`.
const MOMENTUM_TRANSFERS: [[MomentumTransfer; 4]; 4] = [
    // from Down:  Down  Left  Up       Right
    [Keep, Cw, Reverse, Ccw],
    // from Left
    [Ccw, Keep, Cw, Reverse],
    // from Up
    [Reverse, Ccw, Keep, Cw],
    // from Right
    [Cw, Reverse, Ccw, Keep],
];

impl MomentumTransfer {
    pub fn between(from: GravityDirection, to: GravityDirection) -> Self {
        MOMENTUM_TRANSFERS[from.index()][to.index()]
    }

    pub fn apply(self, velocity: Vec2) -> Vec2 {
        match self {
            Keep => velocity,
            Reverse => -velocity,
            Cw => Vec2::new(-velocity.y, velocity.x),
            Ccw => Vec2::new(velocity.y, -velocity.x),
        }
    }
}

impl GravityDirection {
    pub const ALL: [GravityDirection; 4] = [
        GravityDirection::Down,
        GravityDirection::Left,
        GravityDirection::Up,
        GravityDirection::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Maps a level-authored rotation to the gravity it implies, snapping to
    /// the nearest quarter turn.
    pub fn from_rotation_degrees(degrees: f32) -> Self {
        let snapped = round_to_multiple(degrees, 90.0).rem_euclid(360.0);
        match snapped as i32 {
            90 => GravityDirection::Right,
            180 => GravityDirection::Up,
            270 => GravityDirection::Left,
            _ => GravityDirection::Down,
        }
    }

    #[cfg(test)]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    pub fn rotation_degrees(self) -> f32 {
        ORIENTATIONS[self.index()].degrees
    }

    /// Body rotation for this gravity, built from exact quarter-turn values.
    pub fn rotation(self) -> Rot2 {
        let row = &ORIENTATIONS[self.index()];
        Rot2::from_sin_cos(row.sin, row.cos)
    }

    /// World-space unit vector pointing "up" for a body under this gravity.
    pub fn up(self) -> Vec2 {
        self.rotation() * Vec2::Y
    }

    /// World-space unit vector gravity pulls along.
    pub fn down(self) -> Vec2 {
        -self.up()
    }

    pub fn input_mapping(self) -> InputMapping {
        ORIENTATIONS[self.index()].input
    }
}
