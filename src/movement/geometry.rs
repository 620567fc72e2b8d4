//! Movement domain: ray queries against static collidable geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Rays closer to parallel than this never hit a segment.
const PARALLEL_EPSILON: f32 = 1e-8;
/// Tolerance on segment endpoints so rays through shared corners are not lost.
const ENDPOINT_EPSILON: f32 = 1e-5;

/// Nearest surface hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    /// Unit surface normal facing back toward the ray origin.
    pub normal: Vec2,
    pub point: Vec2,
}

/// Answers ray casts against the static world.
pub trait GeometryQuery {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit>;
}

impl GeometryQuery for SpatialQuery<'_, '_> {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        let filter = SpatialQueryFilter::from_mask(layers);
        self.cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayHit {
                distance: hit.distance,
                normal: hit.normal,
                point: origin + *direction * hit.distance,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Surface {
    start: Vec2,
    end: Vec2,
    layers: LayerMask,
}

impl Surface {
    fn intersect(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let edge = self.end - self.start;
        let denom = direction.perp_dot(edge);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let to_start = self.start - origin;
        let distance = to_start.perp_dot(edge) / denom;
        let along = to_start.perp_dot(direction) / denom;

        if distance < 0.0 || distance > max_distance {
            return None;
        }
        if !(-ENDPOINT_EPSILON..=1.0 + ENDPOINT_EPSILON).contains(&along) {
            return None;
        }

        let mut normal = edge.perp().normalize_or_zero();
        if normal.dot(direction) > 0.0 {
            normal = -normal;
        }

        Some(RayHit {
            distance,
            normal,
            point: origin + direction * distance,
        })
    }
}

/// In-memory world made of line segments, used for headless simulation.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    surfaces: Vec<Surface>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, start: Vec2, end: Vec2, layers: impl Into<LayerMask>) {
        self.surfaces.push(Surface {
            start,
            end,
            layers: layers.into(),
        });
    }

    /// Adds the four edges of an axis-aligned box.
    pub fn add_box(&mut self, min: Vec2, max: Vec2, layers: impl Into<LayerMask>) {
        self.add_polygon(
            &[
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ],
            layers,
        );
    }

    /// Adds a closed polygon; the last point connects back to the first.
    pub fn add_polygon(&mut self, points: &[Vec2], layers: impl Into<LayerMask>) {
        let layers = layers.into();
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            if start != end {
                self.surfaces.push(Surface { start, end, layers });
            }
        }
    }

    pub fn with_box(mut self, min: Vec2, max: Vec2, layers: impl Into<LayerMask>) -> Self {
        self.add_box(min, max, layers);
        self
    }

    pub fn with_polygon(mut self, points: &[Vec2], layers: impl Into<LayerMask>) -> Self {
        self.add_polygon(points, layers);
        self
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }
}

impl GeometryQuery for StaticGeometry {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        self.surfaces
            .iter()
            .filter(|surface| surface.layers.0 & layers.0 != 0)
            .filter_map(|surface| surface.intersect(origin, *direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
