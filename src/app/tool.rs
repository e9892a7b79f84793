//! Two-axis mouse tools.
//!
//! A tool binds two pairs of float attributes. Dragging with the primary
//! button feeds the mouse delta through pair A's matrix, dragging with the
//! secondary button through pair B's. Every editing mode in the session is one
//! of these bindings with different targets and gains.

use crate::render::CameraField;
use crate::scene::{ObjectField, SceneState, LIGHT_INDICES};
use glam::{Mat2, Vec2};

/// Something a tool axis can change, looked up again on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTarget {
    Camera(CameraField),
    LightSpread,
    Object { index: usize, field: ObjectField },
}

impl ToolTarget {
    fn resolve<'a>(&self, state: &'a mut SceneState) -> Option<&'a mut f32> {
        match *self {
            Self::Camera(field) => Some(state.camera.field_mut(field)),
            Self::LightSpread => Some(state.light_spread_mut()),
            Self::Object { index, field } => state
                .objects
                .get_mut(index)
                .map(|object| object.field_mut(field)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPair {
    pub first: ToolTarget,
    pub second: ToolTarget,
    /// Maps `(dx, dy)` to `(d first, d second)`.
    pub matrix: Mat2,
}

impl ToolPair {
    pub fn new(first: ToolTarget, second: ToolTarget, matrix: Mat2) -> Self {
        Self {
            first,
            second,
            matrix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChannel {
    /// Left drag.
    Primary,
    /// Shift + left drag, or middle drag.
    Secondary,
}

/// Matrix written row by row, as it reads on paper.
pub fn matrix_rows(m00: f32, m01: f32, m10: f32, m11: f32) -> Mat2 {
    Mat2::from_cols(Vec2::new(m00, m10), Vec2::new(m01, m11))
}

pub fn diag(x: f32, y: f32) -> Mat2 {
    Mat2::from_diagonal(Vec2::new(x, y))
}

/// Ground-plane motion that follows the screen whatever the camera yaw.
pub fn camera_relative(yaw_deg: f32) -> Mat2 {
    Mat2::from_angle(-yaw_deg.to_radians()) * diag(10.0, -10.0)
}

#[derive(Debug, Default)]
pub struct ToolBinding {
    pairs: Option<[ToolPair; 2]>,
    engaged: Option<ToolChannel>,
    last_cursor: Vec2,
}

impl ToolBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, primary: ToolPair, secondary: ToolPair) {
        self.pairs = Some([primary, secondary]);
    }

    pub fn is_bound(&self) -> bool {
        self.pairs.is_some()
    }

    pub fn engaged(&self) -> Option<ToolChannel> {
        self.engaged
    }

    pub fn pair(&self, channel: ToolChannel) -> Option<&ToolPair> {
        self.pairs.as_ref().map(|pairs| match channel {
            ToolChannel::Primary => &pairs[0],
            ToolChannel::Secondary => &pairs[1],
        })
    }

    /// Starts a drag. `cursor` is normalized to [0, 1] with y up.
    pub fn engage(&mut self, channel: ToolChannel, cursor: Vec2) {
        self.engaged = Some(channel);
        self.last_cursor = cursor;
    }

    pub fn update(&mut self, state: &mut SceneState, cursor: Vec2) {
        let delta = cursor - self.last_cursor;
        self.last_cursor = cursor;
        if let Some(channel) = self.engaged {
            self.apply_delta(state, channel, delta);
        }
    }

    pub fn apply_delta(&self, state: &mut SceneState, channel: ToolChannel, delta: Vec2) {
        let Some(pair) = self.pair(channel) else {
            return;
        };
        let change = pair.matrix * delta;
        for (target, amount) in [(pair.first, change.x), (pair.second, change.y)] {
            match target.resolve(state) {
                Some(value) => *value += amount,
                None => log::debug!("tool target {:?} no longer exists", target),
            }
        }
        state.clamp_light_spread();
    }

    /// Ends the drag but keeps the bindings.
    pub fn release(&mut self) {
        self.engaged = None;
    }

    pub fn clear(&mut self) {
        self.pairs = None;
        self.engaged = None;
    }
}

/// Which of the two lights a light tool works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightSlot {
    First,
    Second,
}

impl LightSlot {
    pub fn index(self) -> usize {
        match self {
            Self::First => LIGHT_INDICES[0],
            Self::Second => LIGHT_INDICES[1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    CameraRotate,
    PositionScale,
    RotationTextureScale,
    MaterialColor,
    MaterialShading,
    LightMove(LightSlot),
    LightColor(LightSlot),
    LightRotateSpread,
}

impl ToolMode {
    /// Whether the mode edits the current object.
    pub fn needs_selection(self) -> bool {
        matches!(
            self,
            Self::PositionScale
                | Self::RotationTextureScale
                | Self::MaterialColor
                | Self::MaterialShading
        )
    }

    /// Primary and secondary pairs for this mode, `None` when it edits the
    /// current object and there is none.
    pub fn pairs(self, yaw_deg: f32, current: Option<usize>) -> Option<(ToolPair, ToolPair)> {
        use ObjectField::*;
        let camera = ToolTarget::Camera;
        let object = |index: usize| move |field: ObjectField| ToolTarget::Object { index, field };
        let identity = Mat2::IDENTITY;

        let pairs = match self {
            Self::CameraRotate => (
                ToolPair::new(
                    camera(CameraField::Yaw),
                    camera(CameraField::Distance),
                    diag(400.0, -20.0),
                ),
                ToolPair::new(
                    camera(CameraField::Yaw),
                    camera(CameraField::Pitch),
                    diag(400.0, -90.0),
                ),
            ),
            Self::PositionScale => {
                let o = object(current?);
                (
                    ToolPair::new(o(PositionX), o(PositionZ), camera_relative(yaw_deg)),
                    ToolPair::new(o(Scale), o(PositionY), diag(0.05, 10.0)),
                )
            }
            Self::RotationTextureScale => {
                let o = object(current?);
                (
                    ToolPair::new(o(AngleY), o(AngleX), diag(400.0, -400.0)),
                    ToolPair::new(o(AngleZ), o(TextureScale), diag(400.0, 6.0)),
                )
            }
            Self::MaterialColor => {
                let o = object(current?);
                (
                    ToolPair::new(o(Red), o(Green), identity),
                    ToolPair::new(o(Blue), o(Brightness), identity),
                )
            }
            Self::MaterialShading => {
                let o = object(current?);
                (
                    ToolPair::new(o(Ambient), o(Diffuse), identity),
                    ToolPair::new(o(Specular), o(Shine), diag(1.0, 20.0)),
                )
            }
            Self::LightMove(slot) => {
                let o = object(slot.index());
                (
                    ToolPair::new(o(PositionX), o(PositionZ), camera_relative(yaw_deg)),
                    ToolPair::new(o(Brightness), o(PositionY), diag(1.0, 10.0)),
                )
            }
            Self::LightColor(slot) => {
                let o = object(slot.index());
                (
                    ToolPair::new(o(Red), o(Green), identity),
                    ToolPair::new(o(Blue), o(Brightness), identity),
                )
            }
            Self::LightRotateSpread => {
                let o = object(LightSlot::First.index());
                (
                    ToolPair::new(o(AngleY), o(AngleX), diag(-400.0, -200.0)),
                    ToolPair::new(o(Brightness), ToolTarget::LightSpread, diag(1.0, -1.0)),
                )
            }
        };
        Some(pairs)
    }
}
