use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Camera orbiting the scene centre. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    /// Distance from the camera to the centre of the scene.
    pub distance: f32,
    /// Rotation sideways around the centre.
    pub yaw_deg: f32,
    /// Rotation up and over the centre.
    pub pitch_deg: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 15.0,
            yaw_deg: 0.0,
            pitch_deg: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraField {
    Distance,
    Yaw,
    Pitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl OrbitCamera {
    pub fn new(distance: f32, yaw_deg: f32, pitch_deg: f32) -> Self {
        Self {
            distance,
            yaw_deg,
            pitch_deg,
        }
    }

    /// Rotate about Y for bearing, then X for inclination, then back away.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_rotation_x(self.pitch_deg.to_radians())
            * Mat4::from_rotation_y(self.yaw_deg.to_radians())
    }

    pub fn inverse_view(&self) -> Mat4 {
        Mat4::from_rotation_y(-self.yaw_deg.to_radians())
            * Mat4::from_rotation_x(-self.pitch_deg.to_radians())
            * Mat4::from_translation(Vec3::new(0.0, 0.0, self.distance))
    }

    pub fn eye_position(&self) -> Vec3 {
        (self.inverse_view() * Vec4::W).truncate()
    }

    /// Scrolling up pulls in by 20%, down pushes out by 25%; both add a
    /// small constant step so the camera can pass through the centre.
    pub fn zoom(&mut self, direction: ScrollDirection) {
        let d = self.distance;
        self.distance = match direction {
            ScrollDirection::Up => (if d < 0.0 { d } else { d * 0.8 }) - 0.05,
            ScrollDirection::Down => (if d < 0.0 { d } else { d * 1.25 }) + 0.05,
        };
    }

    pub fn field_mut(&mut self, field: CameraField) -> &mut f32 {
        match field {
            CameraField::Distance => &mut self.distance,
            CameraField::Yaw => &mut self.yaw_deg,
            CameraField::Pitch => &mut self.pitch_deg,
        }
    }
}

/// Perspective frustum that keeps the same part of the scene visible across
/// the narrower window axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Half extent of the near plane along the shorter window axis.
    pub near_half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            near_half_extent: 0.02,
            near: 0.2,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let e = self.near_half_extent;
        if w < h {
            frustum(-e, e, -e * h / w, e * h / w, self.near, self.far)
        } else {
            frustum(-e * w / h, e * w / h, -e, e, self.near, self.far)
        }
    }
}

/// OpenGL-style off-axis perspective matrix.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let fnr = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / rl, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / tb, 0.0, 0.0),
        Vec4::new((right + left) / rl, (top + bottom) / tb, -(far + near) / fnr, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * far * near / fnr, 0.0),
    )
}
