//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::collision::ResolverSettings;
use crate::movement::{GameLayer, JumpKey};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub jump_height: f32,
    pub time_to_jump_apex: f32,
    pub grounded_acceleration_time: f32,
    pub airborne_acceleration_time: f32,
    pub max_fall_speed: f32,
    /// Horizontal speed above which the walk animation plays.
    pub walk_animation_threshold: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub skin_width: f32,
    pub horizontal_ray_count: usize,
    pub vertical_ray_count: usize,
    /// Steepest walkable slope, in degrees.
    pub max_traversable_angle: f32,
    pub max_step_height: f32,
    pub steep_slope_friction: f32,
    pub respawn_delay_ticks: u32,
    pub blink_interval_ticks: u32,
    pub blink_toggles: u32,
    /// Blink toggle after which control is handed back.
    pub control_return_toggle: u32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_height: 4.0,
            time_to_jump_apex: 0.4,
            grounded_acceleration_time: 0.1,
            airborne_acceleration_time: 0.2,
            max_fall_speed: 20.0,
            walk_animation_threshold: 2.0,
            body_width: 0.8,
            body_height: 1.0,
            skin_width: 0.06,
            horizontal_ray_count: 8,
            vertical_ray_count: 4,
            max_traversable_angle: 60.0,
            max_step_height: 0.25,
            steep_slope_friction: 0.5,
            respawn_delay_ticks: 30,
            blink_interval_ticks: 9,
            blink_toggles: 8,
            control_return_toggle: 4,
        }
    }
}

impl MovementTuning {
    /// Gravity strength that reaches `jump_height` in `time_to_jump_apex`.
    /// Uses h = g t² / 2.
    pub fn gravity(&self) -> f32 {
        2.0 * self.jump_height / self.time_to_jump_apex.powi(2)
    }

    pub fn jump_velocity(&self) -> f32 {
        self.gravity().abs() * self.time_to_jump_apex
    }

    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.body_width, self.body_height)
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            skin_width: self.skin_width,
            horizontal_ray_count: self.horizontal_ray_count,
            vertical_ray_count: self.vertical_ray_count,
            max_traversable_angle: self.max_traversable_angle,
            max_step_height: self.max_step_height,
            steep_slope_friction: self.steep_slope_friction,
            gravity: self.gravity(),
            layers: GameLayer::solid(),
        }
    }
}

/// Directional jump keys pressed since the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

impl JumpKeys {
    pub fn pressed(&self, key: JumpKey) -> bool {
        match key {
            JumpKey::W => self.w,
            JumpKey::A => self.a,
            JumpKey::S => self.s,
            JumpKey::D => self.d,
        }
    }
}

/// Raw input sampled once per tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Raw `(horizontal, vertical)` axes, each in `[-1, 1]`.
    pub axis: Vec2,
    /// Space bar; jumps under any gravity.
    pub jump_just_pressed: bool,
    pub jump_keys: JumpKeys,
}

impl MovementInput {
    /// Clears the latched key presses once a tick has consumed them.
    pub fn consume_presses(&mut self) {
        self.jump_just_pressed = false;
        self.jump_keys = JumpKeys::default();
    }
}

/// Where and how the player first appears in a level.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerStart {
    pub position: Vec2,
    /// Rotation of the start platform in degrees; snapped to a quarter turn
    /// to pick the starting gravity.
    pub rotation_degrees: f32,
    pub facing_right: bool,
}

impl Default for PlayerStart {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, 1.0),
            rotation_degrees: 0.0,
            facing_right: true,
        }
    }
}
