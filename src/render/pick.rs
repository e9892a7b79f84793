//! Tag-pass object picking
//!
//! Each pass renders a subset of the scene into a side buffer (stencil) where
//! every object writes a small integer tag, then reads back the tag under the
//! cursor. A tag buffer only distinguishes 255 objects (0 means background), so
//! larger scenes are resolved one base-255 digit of the object index per pass.
//!
//! ## Architecture
//!
//! The picker owns no GPU resources. A [`TagTarget`] supplied by the renderer
//! does the clearing, tagged drawing and one-pixel readback; the picker only
//! decides which objects go into each pass and with which tag. The target keeps
//! the last tag written to a pixel, so when several objects cover the cursor in
//! one pass, the one drawn last wins.

use crate::scene::{SceneObject, SceneObjectStore, NUM_LIGHTS_AND_GROUND};

/// Distinct non-background tag values per pass.
pub const TAG_VALUES: usize = 255;

// ========================================================================
// PickTag: one stencil value
// ========================================================================

/// Stencil value written by an object during a pick pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickTag(u8);

impl PickTag {
    pub const BACKGROUND: Self = Self(0);

    /// Tag for the `slot`-th object drawn in a pass.
    pub fn for_slot(slot: usize) -> Self {
        Self(1 + (slot % TAG_VALUES) as u8)
    }

    pub fn from_raw(value: u8) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> u8 {
        self.0
    }

    pub fn is_background(&self) -> bool {
        self.0 == 0
    }

    /// Slot residue this tag encodes, `None` for background.
    pub fn digit(&self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

// ========================================================================
// PickPixel: readback location
// ========================================================================

/// Pixel in the tag buffer, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickPixel {
    pub x: u32,
    pub y: u32,
}

impl PickPixel {
    /// Converts top-left screen coordinates into buffer coordinates.
    pub fn from_screen(screen_x: f32, screen_y: f32, width: u32, height: u32) -> Self {
        let x = (screen_x.max(0.0) as u32).min(width.saturating_sub(1));
        let y = height
            .saturating_sub(1)
            .saturating_sub(screen_y.max(0.0) as u32);
        Self { x, y }
    }
}

// ========================================================================
// TagTarget: renderer seam
// ========================================================================

pub trait TagTarget {
    /// Clears the tag and depth buffers (only `pixel` needs to survive).
    fn begin_pass(&mut self, pixel: PickPixel);

    /// Draws `object` writing `tag` wherever it passes the depth test.
    fn draw_tagged(&mut self, index: usize, object: &SceneObject, tag: PickTag);

    /// Reads the tag at `pixel`; `None` when the readback failed.
    fn read_tag(&mut self, pixel: PickPixel) -> Option<PickTag>;
}

// ========================================================================
// PickOutcome
// ========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// A user-editable object is under the cursor.
    Object(usize),
    /// The ground or a light is under the cursor.
    Reserved(usize),
    /// Nothing is under the cursor.
    Background,
    /// The readback failed or returned a tag that was never drawn.
    Failed,
}

impl PickOutcome {
    /// New current object: only an editable hit changes the selection.
    pub fn resolve(self, current: Option<usize>) -> Option<usize> {
        match self {
            Self::Object(index) => Some(index),
            Self::Reserved(_) | Self::Background | Self::Failed => current,
        }
    }
}

// ========================================================================
// ObjectPicker
// ========================================================================

#[derive(Debug, Default)]
pub struct ObjectPicker {
    last_passes: usize,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render passes used by the most recent pick.
    pub fn last_passes(&self) -> usize {
        self.last_passes
    }

    /// Finds the object under `pixel`.
    ///
    /// Pass `k` draws the candidates `base + power * i` for `i < range`
    /// tagged `1 + i % 255`. The tag read back fixes the next base-255 digit
    /// of the index and narrows the candidates to that residue class; once a
    /// single candidate is left, `base` is the answer.
    pub fn pick(
        &mut self,
        objects: &SceneObjectStore,
        pixel: PickPixel,
        target: &mut dyn TagTarget,
    ) -> PickOutcome {
        let mut range = objects.len();
        let mut power = 1usize;
        let mut base = 0usize;
        self.last_passes = 0;

        loop {
            self.last_passes += 1;
            target.begin_pass(pixel);
            for slot in 0..range {
                let index = base + power * slot;
                target.draw_tagged(index, &objects[index], PickTag::for_slot(slot));
            }

            let Some(tag) = target.read_tag(pixel) else {
                log::warn!("Pick readback failed at ({},{})", pixel.x, pixel.y);
                return PickOutcome::Failed;
            };
            let Some(digit) = tag.digit() else {
                return PickOutcome::Background;
            };
            if digit >= range {
                log::warn!(
                    "Pick readback returned tag {} but only {} objects were drawn",
                    tag.raw(),
                    range
                );
                return PickOutcome::Failed;
            }

            base += power * digit;
            if digit < range % TAG_VALUES {
                range += TAG_VALUES;
            }
            range /= TAG_VALUES;
            power *= TAG_VALUES;
            if range <= 1 {
                break;
            }
        }

        log::debug!("picked object {} in {} passes", base, self.last_passes);
        if base < NUM_LIGHTS_AND_GROUND {
            PickOutcome::Reserved(base)
        } else {
            PickOutcome::Object(base)
        }
    }
}

// ========================================================================
// Tests
// ========================================================================
