//! Movement domain: raycast collision resolution against static geometry.
//!
//! The resolver turns a requested per-tick displacement, expressed in the
//! body frame (x along the body's right, y along its up), into one that is
//! consistent with the world. It handles walls and ceilings, walkable slope
//! ascent and descent, sliding down slopes steeper than the traversable
//! angle, and mounting short steps.

use avian2d::prelude::LayerMask;
use bevy::math::Rot2;
use bevy::prelude::*;
use serde::Serialize;

use crate::movement::Facing;
use crate::movement::geometry::{GeometryQuery, RayHit};
use crate::movement::math::{sign, slope_angle, smooth_damp};

/// Length of the ground probes used for slope descent.
pub const GROUND_PROBE_DISTANCE: f32 = f32::MAX;
/// Slope angles closer than this (degrees) are treated as the same slope.
const ANGLE_EPSILON: f32 = 1e-3;
/// The clearance probe beyond a step assumes a slightly shallower slope than
/// the walkable limit.
pub const STEP_CLEARANCE_MARGIN: f32 = 2.0;
/// Slack when deciding whether the body already touches an obstacle.
const CONTACT_TOLERANCE: f32 = 1e-4;
const MIN_RAY_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    pub skin_width: f32,
    pub horizontal_ray_count: usize,
    pub vertical_ray_count: usize,
    /// Steepest walkable slope, in degrees.
    pub max_traversable_angle: f32,
    pub max_step_height: f32,
    pub steep_slope_friction: f32,
    /// Gravity strength, used to scale steep-slope acceleration.
    pub gravity: f32,
    pub layers: LayerMask,
}

/// Body box in its own rotated frame, inset by the skin width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    half_extents: Vec2,
}

impl BoundingBox {
    pub fn new(size: Vec2, skin_width: f32) -> Self {
        Self {
            half_extents: (size * 0.5 - Vec2::splat(skin_width)).max(Vec2::ZERO),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    pub fn origins(&self, position: Vec2, rotation: Rot2) -> RaycastOrigins {
        let h = self.half_extents;
        let corner = |local: Vec2| position + rotation * local;
        RaycastOrigins {
            top_left: corner(Vec2::new(-h.x, h.y)),
            top_right: corner(Vec2::new(h.x, h.y)),
            bottom_left: corner(Vec2::new(-h.x, -h.y)),
            bottom_right: corner(Vec2::new(h.x, -h.y)),
        }
    }
}

/// Corners of the inset box in world space. Left/right and top/bottom are
/// relative to the body, not the world.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

/// Contact state produced by one move.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CollisionInfo {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
    pub ascending_slope: bool,
    pub descending_slope: bool,
    pub on_steep_slope: bool,
    pub stepping: bool,
    pub slope_angle: f32,
    pub old_slope_angle: f32,
    /// Per-tick slide distance; survives only while sliding continues.
    pub slope_slide_distance: f32,
    pub old_y_velocity: f32,
}

impl CollisionInfo {
    /// Fresh state for a new tick, carrying over what must persist.
    pub fn next_tick(self, velocity: Vec2) -> Self {
        Self {
            old_slope_angle: self.slope_angle,
            slope_slide_distance: if self.on_steep_slope {
                self.slope_slide_distance
            } else {
                0.0
            },
            old_y_velocity: velocity.y,
            ..Self::default()
        }
    }

    /// Number of slope modes set this tick; never more than one.
    pub fn slope_modes(&self) -> usize {
        [
            self.ascending_slope,
            self.descending_slope,
            self.on_steep_slope,
        ]
        .into_iter()
        .filter(|&mode| mode)
        .count()
    }
}

/// Position and rotation of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec2,
    pub rotation: Rot2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Displacement wanted this tick, in the body frame.
    pub velocity: Vec2,
    /// Largest fall distance allowed this tick.
    pub max_fall_speed: f32,
    pub facing: Facing,
    /// Raw forward input this tick, used to let the body step off a steep slope.
    pub forward_input: f32,
    pub dt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Displacement actually applied, in the body frame.
    pub displacement: Vec2,
    pub collisions: CollisionInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResolver {
    bounds: BoundingBox,
    settings: ResolverSettings,
    horizontal_ray_spacing: f32,
    vertical_ray_spacing: f32,
}

impl CollisionResolver {
    pub fn new(size: Vec2, mut settings: ResolverSettings) -> Self {
        settings.horizontal_ray_count = settings.horizontal_ray_count.max(MIN_RAY_COUNT);
        settings.vertical_ray_count = settings.vertical_ray_count.max(MIN_RAY_COUNT);

        let bounds = BoundingBox::new(size, settings.skin_width);
        let inner = bounds.half_extents() * 2.0;

        Self {
            bounds,
            horizontal_ray_spacing: inner.y / (settings.horizontal_ray_count - 1) as f32,
            vertical_ray_spacing: inner.x / (settings.vertical_ray_count - 1) as f32,
            settings,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn horizontal_ray_spacing(&self) -> f32 {
        self.horizontal_ray_spacing
    }

    /// Resolves one tick of movement and applies it to `pose`.
    ///
    /// Call at most once per tick, passing the previous tick's collision info.
    pub fn move_body(
        &self,
        geometry: &impl GeometryQuery,
        pose: &mut BodyPose,
        previous: CollisionInfo,
        request: MoveRequest,
    ) -> MoveResult {
        let mut pass = MovePass {
            resolver: self,
            geometry,
            origins: self.bounds.origins(pose.position, pose.rotation),
            right: pose.rotation * Vec2::X,
            up: pose.rotation * Vec2::Y,
            info: previous.next_tick(request.velocity),
            velocity: request.velocity,
            request,
        };

        pass.run();

        debug_assert!(
            pass.info.slope_modes() <= 1,
            "more than one slope mode governs this tick: {:?}",
            pass.info
        );

        let displacement = pass.velocity;
        pose.position += pass.right * displacement.x + pass.up * displacement.y;

        MoveResult {
            displacement,
            collisions: pass.info,
        }
    }
}

/// Working state for a single move.
struct MovePass<'a, G: GeometryQuery> {
    resolver: &'a CollisionResolver,
    geometry: &'a G,
    origins: RaycastOrigins,
    right: Vec2,
    up: Vec2,
    info: CollisionInfo,
    velocity: Vec2,
    request: MoveRequest,
}

impl<G: GeometryQuery> MovePass<'_, G> {
    fn settings(&self) -> &ResolverSettings {
        &self.resolver.settings
    }

    fn run(&mut self) {
        if self.velocity.y <= 0.0 {
            self.descend_slope();
        }
        if self.velocity.x != 0.0 {
            self.horizontal_collisions();
        }
        if self.velocity.y != 0.0 && !self.info.descending_slope && !self.info.on_steep_slope {
            self.vertical_collisions();
        }
    }

    fn cast(&self, origin: Vec2, direction: Vec2, length: f32) -> Option<RayHit> {
        let direction = Dir2::new(direction).ok()?;
        self.geometry
            .raycast(origin, direction, length, self.settings().layers)
    }

    /// Downhill direction of a surface along the body's x axis.
    fn relative_slope_direction(&self, hit: &RayHit) -> f32 {
        sign(hit.normal.dot(self.right))
    }

    /// Whether a slope under the body is near enough to matter at the
    /// current horizontal speed.
    fn slope_close_enough(&self, distance: f32, angle: f32) -> bool {
        distance - self.settings().skin_width
            <= angle.to_radians().tan() * self.velocity.x.abs()
    }

    fn descend_slope(&mut self) {
        let facing = self.request.facing;
        let (back_origin, front_origin) = match facing {
            Facing::Right => (self.origins.bottom_left, self.origins.bottom_right),
            Facing::Left => (self.origins.bottom_right, self.origins.bottom_left),
        };

        let back_hit = self.cast(back_origin, -self.up, GROUND_PROBE_DISTANCE);
        let front_hit = self.cast(front_origin, -self.up, GROUND_PROBE_DISTANCE);
        if back_hit.is_none() && front_hit.is_none() {
            return;
        }

        let max_angle = self.settings().max_traversable_angle;
        let facing_sign = facing.sign();

        // The back probe matters only for slopes falling away in the travel
        // direction; the front probe only for slopes rising toward the body.
        let back = back_hit.map(|hit| {
            let angle = slope_angle(hit.normal, self.up);
            let affects = self.slope_close_enough(hit.distance, angle)
                && self.relative_slope_direction(&hit) == facing_sign;
            (hit, angle, affects)
        });
        let front = front_hit.map(|hit| {
            let angle = slope_angle(hit.normal, self.up);
            let affects = self.slope_close_enough(hit.distance, angle)
                && self.relative_slope_direction(&hit) != facing_sign;
            (hit, angle, affects)
        });

        if let Some((_, angle, true)) = front {
            if angle <= max_angle {
                // Walkable ground ahead; the horizontal pass handles ascent.
                return;
            }
        }

        match (back, front) {
            (Some((hit, angle, true)), _) if angle <= max_angle && angle > ANGLE_EPSILON => {
                let direction = self.relative_slope_direction(&hit);
                let distance = self.velocity.x.abs();
                self.handle_descent(angle, direction, distance);
                self.info.descending_slope = true;
            }
            (_, Some((hit, angle, true))) if angle > max_angle => {
                self.steep_slope_slide(angle, self.relative_slope_direction(&hit));
            }
            (Some((hit, angle, true)), _) if angle > max_angle => {
                self.steep_slope_slide(angle, self.relative_slope_direction(&hit));
            }
            _ => {}
        }
    }

    /// Projects `distance` of travel onto a descending slope.
    fn handle_descent(&mut self, angle: f32, direction: f32, distance: f32) {
        let radians = angle.to_radians();
        self.velocity.x = radians.cos() * distance * direction;
        self.velocity.y = -radians.sin() * distance;

        self.info.slope_angle = angle;
        self.info.below = true;
    }

    fn steep_slope_slide(&mut self, angle: f32, direction: f32) {
        let settings = *self.settings();
        let max_slide_speed = (self.request.max_fall_speed * angle.to_radians().sin()).abs();
        let smooth_time = settings.steep_slope_friction / (settings.gravity * angle.sqrt());

        // The smoothing rate starts fresh every tick, so the slide eases toward
        // its terminal speed exponentially.
        let mut rate = 0.0;
        let current = self.info.slope_slide_distance.min(max_slide_speed);
        self.info.slope_slide_distance = smooth_damp(
            current,
            max_slide_speed,
            &mut rate,
            smooth_time,
            self.request.dt,
        );

        let momentum_x = self.velocity.x;
        self.handle_descent(angle, direction, self.info.slope_slide_distance);

        // Raw input and carried momentum are checked separately: the body
        // steps off only when both point downhill.
        let input = self.request.forward_input;
        let input_downhill = input != 0.0 && sign(input) == direction;
        let momentum_downhill = sign(momentum_x) == direction;

        if input_downhill && momentum_downhill {
            self.velocity.x += momentum_x;
            self.info.below = false;
            self.info.on_steep_slope = false;
        } else {
            self.info.on_steep_slope = true;
        }
    }

    fn horizontal_collisions(&mut self) {
        let skin = self.settings().skin_width;
        let max_angle = self.settings().max_traversable_angle;
        let max_step = self.settings().max_step_height;
        let ray_count = self.settings().horizontal_ray_count;
        let spacing = self.resolver.horizontal_ray_spacing;

        let x_direction = sign(self.velocity.x);
        let forward = self.right * x_direction;
        let mut ray_length = self.velocity.x.abs() + skin;

        let corner = if x_direction < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.bottom_right
        };
        let mut previous_hit: Option<RayHit> = None;

        for i in 0..ray_count {
            let ray_origin = corner + self.up * (i as f32 * spacing);
            let hit = self.cast(ray_origin, forward, ray_length);

            if let Some(hit) = hit {
                previous_hit = Some(hit);

                if self.info.stepping {
                    self.cancel_step();
                }

                let angle = slope_angle(hit.normal, self.up);

                if i == 0 && angle <= max_angle && angle > ANGLE_EPSILON {
                    // Travel up to the slope's start at the old angle first.
                    let mut distance_to_slope_start = 0.0;
                    if (angle - self.info.old_slope_angle).abs() > ANGLE_EPSILON {
                        distance_to_slope_start = hit.distance - skin;
                        self.velocity.x -= distance_to_slope_start * x_direction;
                    }
                    self.ascend_slope(angle);
                    self.velocity.x += distance_to_slope_start * x_direction;
                } else if !self.info.ascending_slope || angle > max_angle {
                    self.velocity.x = (hit.distance - skin) * x_direction;
                    ray_length = hit.distance;

                    if self.info.ascending_slope {
                        self.velocity.y =
                            self.info.slope_angle.to_radians().tan() * self.velocity.x.abs();
                    }

                    self.info.right = x_direction > 0.0;
                    self.info.left = x_direction < 0.0;
                }
            } else if let Some(blocked) = previous_hit {
                let step_height = (ray_origin - corner).length() + skin;
                if self.info.stepping
                    || self.info.ascending_slope
                    || step_height > max_step
                    || blocked.distance > skin + CONTACT_TOLERANCE
                {
                    continue;
                }

                let clearance =
                    step_height / (max_angle - STEP_CLEARANCE_MARGIN).to_radians().tan();
                if self.cast(ray_origin, forward, clearance).is_none()
                    && step_height > self.velocity.y
                {
                    debug!("Stepping up ledge: height={:.3}", step_height);
                    self.info.stepping = true;
                    self.info.below = true;
                    self.info.right = false;
                    self.info.left = false;
                    self.velocity.y = step_height;
                }
            }
        }
    }

    fn ascend_slope(&mut self, angle: f32) {
        let radians = angle.to_radians();
        let move_distance = self.velocity.x.abs();
        let climb_velocity_y = radians.sin() * move_distance;

        if self.velocity.y <= climb_velocity_y {
            self.velocity.y = climb_velocity_y;
            self.velocity.x = radians.cos() * move_distance * sign(self.velocity.x);
            self.info.below = true;
            self.info.ascending_slope = true;
            self.info.descending_slope = false;
            self.info.on_steep_slope = false;
            self.info.slope_angle = angle;
        }
    }

    /// Restores the vertical velocity a step replaced.
    fn cancel_step(&mut self) {
        self.info.stepping = false;
        self.info.below = false;
        self.velocity.y = self.info.old_y_velocity;
    }

    fn vertical_collisions(&mut self) {
        let skin = self.settings().skin_width;
        let ray_count = self.settings().vertical_ray_count;
        let spacing = self.resolver.vertical_ray_spacing;

        let mut y_direction = sign(self.velocity.y);
        let mut ray_length = self.velocity.y.abs() + skin;

        let mut i = 0;
        while i < ray_count {
            let edge = if y_direction < 0.0 {
                self.origins.bottom_left
            } else {
                self.origins.top_left
            };
            let ray_origin = edge + self.right * (i as f32 * spacing + self.velocity.x);

            if let Some(hit) = self.cast(ray_origin, self.up * y_direction, ray_length) {
                if self.info.stepping {
                    // Blocked above the step: fall back to the pre-step motion
                    // and scan again from the first ray.
                    self.cancel_step();
                    if self.velocity.y == 0.0 {
                        break;
                    }
                    y_direction = sign(self.velocity.y);
                    ray_length = self.velocity.y.abs() + skin;
                    i = 0;
                    continue;
                }

                self.velocity.y = (hit.distance - skin) * y_direction;
                ray_length = hit.distance;

                self.info.above = y_direction > 0.0;
                self.info.below = y_direction < 0.0;

                if self.info.ascending_slope {
                    self.velocity.x = self.velocity.y
                        / self.info.slope_angle.to_radians().tan()
                        * sign(self.velocity.x);
                }
            }

            i += 1;
        }
    }
}
