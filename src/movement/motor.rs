//! Movement domain: the gravity-aware player motor.
//!
//! The motor owns the body's gravity direction and velocity. Each tick it
//! turns raw input into a target velocity, accumulates gravity, asks the
//! collision resolver for a consistent displacement, and derives animation
//! flags from the result. It also reorients gravity on demand and runs the
//! respawn sequence.

use bevy::prelude::*;
use serde::Serialize;

use crate::movement::collision::{
    BodyPose, CollisionInfo, CollisionResolver, MoveRequest, MoveResult,
};
use crate::movement::geometry::GeometryQuery;
use crate::movement::math::smooth_damp;
use crate::movement::respawn::{RespawnSequence, RespawnTiming};
use crate::movement::{Facing, GravityDirection, MomentumTransfer, MovementInput, MovementTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MotorState {
    #[default]
    Normal,
    /// Hidden and frozen until the respawn delay elapses.
    Respawning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnimationFlags {
    pub is_jumping: bool,
    pub is_walking: bool,
}

/// Where the body returns on respawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpawnPoint {
    pub position: Vec2,
    pub gravity: GravityDirection,
}

/// Constants derived from tuning once, when the motor is built or retuned.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MotorConstants {
    gravity: f32,
    jump_velocity: f32,
    move_speed: f32,
    max_fall_speed: f32,
    grounded_acceleration_time: f32,
    airborne_acceleration_time: f32,
    walk_animation_threshold: f32,
    respawn: RespawnTiming,
}

impl From<&MovementTuning> for MotorConstants {
    fn from(tuning: &MovementTuning) -> Self {
        Self {
            gravity: tuning.gravity(),
            jump_velocity: tuning.jump_velocity(),
            move_speed: tuning.move_speed,
            max_fall_speed: tuning.max_fall_speed,
            grounded_acceleration_time: tuning.grounded_acceleration_time,
            airborne_acceleration_time: tuning.airborne_acceleration_time,
            walk_animation_threshold: tuning.walk_animation_threshold,
            respawn: RespawnTiming::from(tuning),
        }
    }
}

/// Serializable view of the motor for debug tooling.
#[derive(Debug, Clone, Serialize)]
pub struct MotorSnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub gravity: GravityDirection,
    pub facing: Facing,
    pub state: MotorState,
    pub control_enabled: bool,
    pub visible: bool,
    pub animation: AnimationFlags,
    pub collisions: CollisionInfo,
    pub respawn: Option<RespawnSequence>,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerMotor {
    resolver: CollisionResolver,
    constants: MotorConstants,
    position: Vec2,
    gravity: GravityDirection,
    /// Body-frame velocity in units per second.
    velocity: Vec2,
    velocity_x_smoothing: f32,
    target_velocity_x: f32,
    collisions: CollisionInfo,
    facing: Facing,
    animation: AnimationFlags,
    state: MotorState,
    control_enabled: bool,
    collider_enabled: bool,
    visible: bool,
    spawn: SpawnPoint,
    respawn: Option<RespawnSequence>,
    respawn_generation: u64,
}

impl PlayerMotor {
    pub fn new(tuning: &MovementTuning, position: Vec2, gravity: GravityDirection) -> Self {
        Self {
            resolver: CollisionResolver::new(tuning.body_size(), tuning.resolver_settings()),
            constants: MotorConstants::from(tuning),
            position,
            gravity,
            velocity: Vec2::ZERO,
            velocity_x_smoothing: 0.0,
            target_velocity_x: 0.0,
            collisions: CollisionInfo::default(),
            facing: Facing::Right,
            animation: AnimationFlags::default(),
            state: MotorState::Normal,
            control_enabled: true,
            collider_enabled: true,
            visible: true,
            spawn: SpawnPoint { position, gravity },
            respawn: None,
            respawn_generation: 0,
        }
    }

    pub fn facing_left(mut self) -> Self {
        self.facing = Facing::Left;
        self
    }

    /// Rebuilds the resolver and derived constants from new tuning.
    pub fn retune(&mut self, tuning: &MovementTuning) {
        self.resolver = CollisionResolver::new(tuning.body_size(), tuning.resolver_settings());
        self.constants = MotorConstants::from(tuning);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[cfg(test)]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn gravity_direction(&self) -> GravityDirection {
        self.gravity
    }

    pub fn collisions(&self) -> CollisionInfo {
        self.collisions
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animation(&self) -> AnimationFlags {
        self.animation
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    pub fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn spawn_point(&self) -> SpawnPoint {
        self.spawn
    }

    pub fn respawn_sequence(&self) -> Option<&RespawnSequence> {
        self.respawn.as_ref()
    }

    pub fn respawn_generation(&self) -> u64 {
        self.respawn_generation
    }

    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    pub fn pose(&self) -> BodyPose {
        BodyPose {
            position: self.position,
            rotation: self.gravity.rotation(),
        }
    }

    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn disable_control(&mut self) {
        self.control_enabled = false;
    }

    pub fn enable_control(&mut self) {
        self.control_enabled = true;
    }

    pub fn set_spawn(&mut self, position: Vec2, gravity: GravityDirection) {
        self.spawn = SpawnPoint { position, gravity };
    }

    /// Runs one simulation tick. Returns the resolved move, or `None` while
    /// the body is hidden for a respawn.
    pub fn tick(
        &mut self,
        input: &MovementInput,
        dt: f32,
        geometry: &impl GeometryQuery,
    ) -> Option<MoveResult> {
        let result = match self.state {
            MotorState::Normal => {
                let result = self.handle_movement(input, dt, geometry);
                self.handle_display();
                Some(result)
            }
            MotorState::Respawning => None,
        };

        self.advance_respawn();
        result
    }

    fn handle_movement(
        &mut self,
        input: &MovementInput,
        dt: f32,
        geometry: &impl GeometryQuery,
    ) -> MoveResult {
        let c = self.constants;

        if self.collisions.above || self.collisions.below {
            self.velocity.y = 0.0;
        }

        let mut forward_input = 0.0;
        if self.control_enabled {
            let mapping = self.gravity.input_mapping();
            forward_input = mapping.forward(input.axis);

            let jump_pressed = input.jump_just_pressed || input.jump_keys.pressed(mapping.jump_key);
            // A committed step counts as footing.
            let has_footing = self.collisions.below || self.collisions.stepping;
            if jump_pressed && has_footing && !self.collisions.on_steep_slope {
                self.velocity.y = c.jump_velocity;
            }
        }

        self.target_velocity_x = forward_input * c.move_speed;
        let acceleration_time = if self.collisions.below {
            c.grounded_acceleration_time
        } else {
            c.airborne_acceleration_time
        };
        self.velocity.x = smooth_damp(
            self.velocity.x,
            self.target_velocity_x,
            &mut self.velocity_x_smoothing,
            acceleration_time,
            dt,
        );

        if self.velocity.y - c.gravity * dt >= -c.max_fall_speed {
            self.velocity.y -= c.gravity * dt;
        } else {
            self.velocity.y = -c.max_fall_speed;
        }

        let mut pose = self.pose();
        let result = self.resolver.move_body(
            geometry,
            &mut pose,
            self.collisions,
            MoveRequest {
                velocity: self.velocity * dt,
                max_fall_speed: c.max_fall_speed * dt,
                facing: self.facing,
                forward_input,
                dt,
            },
        );

        self.position = pose.position;
        self.collisions = result.collisions;
        result
    }

    fn handle_display(&mut self) {
        if (self.velocity.x < 0.0 && self.facing == Facing::Right)
            || (self.velocity.x > 0.0 && self.facing == Facing::Left)
        {
            self.facing = self.facing.flipped();
        }

        let info = &self.collisions;
        self.animation.is_jumping = (!info.below || info.on_steep_slope) && !info.stepping;
        self.animation.is_walking = (self.velocity.x.abs() > self.constants.walk_animation_threshold
            || self.target_velocity_x != 0.0)
            && !info.on_steep_slope;
    }

    /// Reorients gravity: rotation follows the new direction at once and
    /// velocity is carried across so momentum is conserved.
    pub fn change_gravity(&mut self, direction: GravityDirection) {
        let transfer = MomentumTransfer::between(self.gravity, direction);
        self.velocity = transfer.apply(self.velocity);
        debug!(
            "Gravity {:?} -> {:?} ({:?}), velocity={:?}",
            self.gravity, direction, transfer, self.velocity
        );
        self.gravity = direction;
    }

    /// Starts a respawn, replacing any sequence already running.
    pub fn respawn(&mut self) {
        if let Some(stale) = self.respawn.take() {
            debug!(
                "Cancelling respawn generation {} at {:?}",
                stale.generation(),
                stale.stage()
            );
        }

        self.respawn_generation += 1;
        self.respawn = Some(RespawnSequence::new(
            self.respawn_generation,
            self.constants.respawn,
        ));

        self.state = MotorState::Respawning;
        self.disable_control();
        self.collider_enabled = false;
        self.visible = false;

        info!(
            "Respawn started (generation {}), spawn at {:?} with gravity {:?}",
            self.respawn_generation, self.spawn.position, self.spawn.gravity
        );
    }

    fn advance_respawn(&mut self) {
        let Some(mut sequence) = self.respawn.take() else {
            return;
        };
        if sequence.generation() != self.respawn_generation {
            return;
        }

        let step = sequence.advance();

        if step.reset_body {
            self.velocity = Vec2::ZERO;
            self.velocity_x_smoothing = 0.0;
            self.change_gravity(self.spawn.gravity);
            self.position = self.spawn.position;
            self.collisions = CollisionInfo::default();
            self.visible = true;
            self.collider_enabled = true;
            self.state = MotorState::Normal;
        }
        if step.toggle_visibility {
            self.visible = !self.visible;
        }
        if step.enable_control {
            self.enable_control();
        }
        if step.finished {
            self.visible = true;
            info!("Respawn finished (generation {})", sequence.generation());
            return;
        }

        self.respawn = Some(sequence);
    }

    pub fn snapshot(&self) -> MotorSnapshot {
        MotorSnapshot {
            position: self.position.to_array(),
            velocity: self.velocity.to_array(),
            gravity: self.gravity,
            facing: self.facing,
            state: self.state,
            control_enabled: self.control_enabled,
            visible: self.visible,
            animation: self.animation,
            collisions: self.collisions,
            respawn: self.respawn,
        }
    }
}
