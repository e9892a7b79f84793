//! Cursor-to-ground placement.
//!
//! The cursor is pushed back through the projection and view transforms to a
//! world-space ray, which is then intersected with the plane of the ground
//! object. Degenerate geometry falls back to the world origin.

use crate::scene::{rotation_matrix, SceneObject};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Below this, the ray counts as parallel to the ground.
const PARALLEL_EPSILON: f32 = 1e-6;

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera through `cursor_ndc` (x and y in [-1, 1]).
    pub fn from_cursor(cursor_ndc: Vec2, view: &Mat4, projection: &Mat4) -> Self {
        let clip = Vec4::new(cursor_ndc.x, cursor_ndc.y, -1.0, 1.0);
        let eye = projection.inverse() * clip;
        let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

        let inverse_view = view.inverse();
        let direction = (inverse_view * eye).truncate().normalize_or_zero();
        let origin = (inverse_view * Vec4::W).truncate();
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the plane `dot(p, normal) = offset`, or
    /// `None` when parallel or behind the origin.
    pub fn intersect_plane(&self, normal: Vec3, offset: f32) -> Option<f32> {
        let denom = self.direction.dot(normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (offset - self.origin.dot(normal)) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// Plane of the ground object as (unit normal, signed offset).
pub fn ground_plane(ground: &SceneObject) -> (Vec3, f32) {
    let normal = (rotation_matrix(ground.angles) * Vec4::Z).truncate();
    let offset = ground.position.truncate().dot(normal);
    (normal, offset)
}

/// Where a new object should go when the cursor sits at `cursor_ndc`.
///
/// Returns the world origin when the ray misses the ground.
pub fn placement_point(
    cursor_ndc: Vec2,
    view: &Mat4,
    projection: &Mat4,
    ground: &SceneObject,
) -> Vec4 {
    let ray = Ray::from_cursor(cursor_ndc, view, projection);
    let (normal, offset) = ground_plane(ground);
    match ray.intersect_plane(normal, offset) {
        Some(t) => ray.point_at(t).extend(1.0),
        None => {
            log::debug!("cursor ray misses the ground, placing at origin");
            Vec4::W
        }
    }
}
