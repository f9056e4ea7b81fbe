//! Camera transform and feature toggles.
//!
//! Neither is read by the field computations; they belong to the input and rendering layers,
//! which convert pointer positions to world coordinates before touching the scene.

use crate::math::{R2, Scalar};

/// Smallest allowed zoom.
pub const MIN_SCALE: Scalar = 0.1;
/// Largest allowed zoom.
pub const MAX_SCALE: Scalar = 5.0;

/// Uniform scale plus translation from world (canvas) pixels to screen pixels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub scale: Scalar,
    /// Screen position of the world origin.
    pub offset: R2,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, offset: R2::zeros() }
    }
}

impl Camera {
    /// `(screen - offset) / scale`.
    #[must_use]
    pub fn screen_to_world(&self, screen: R2) -> R2 {
        (screen - self.offset) / self.scale
    }

    /// `world · scale + offset`.
    #[must_use]
    pub fn world_to_screen(&self, world: R2) -> R2 {
        world * self.scale + self.offset
    }

    /// Wheel zoom by 0.9 (scrolling down) or 1.1 (up), keeping the world point under `anchor`
    /// fixed on screen.
    pub fn zoom_at(&mut self, anchor: R2, wheel_delta: Scalar) {
        let factor = if wheel_delta > 0.0 { 0.9 } else { 1.1 };
        let world = self.screen_to_world(anchor);
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = anchor - world * scale;
        self.scale = scale;
    }

    /// Button zoom in (×1.2) about the world origin.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * 1.2).min(MAX_SCALE);
    }

    /// Button zoom out (×0.8) about the world origin.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale * 0.8).max(MIN_SCALE);
    }

    /// Shifts the view by a screen-space drag.
    pub fn pan(&mut self, screen_delta: R2) {
        self.offset += screen_delta;
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World-space size of a `width × height` screen viewport.
    #[must_use]
    pub fn world_extent(&self, width: Scalar, height: Scalar) -> (Scalar, Scalar) {
        (width / self.scale, height / self.scale)
    }
}

/// Which geometry the renderer asks for each frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    /// Trace field lines.
    pub show_field_lines: bool,
    /// Extract equipotential contours.
    pub show_equipotentials: bool,
    /// Sample the vector field.
    pub show_vectors: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { show_field_lines: true, show_equipotentials: false, show_vectors: false }
    }
}
