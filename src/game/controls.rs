//! Pointer controls in canvas space.

use crate::core::constants::{MUTE_BUTTON_RADIUS, MUTE_BUTTON_TOLERANCE, MUTE_BUTTON_X, MUTE_BUTTON_Y};

/// Round mute toggle drawn in the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuteButton {
    /// Top-left of the bounding square.
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Extra slack around the circle for fat fingers.
    pub tolerance: f64,
}

impl Default for MuteButton {
    fn default() -> Self {
        Self {
            x: MUTE_BUTTON_X,
            y: MUTE_BUTTON_Y,
            radius: MUTE_BUTTON_RADIUS,
            tolerance: MUTE_BUTTON_TOLERANCE,
        }
    }
}

impl MuteButton {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius)
    }

    /// A pointer press at canvas `(px, py)` lands on the button.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (cx, cy) = self.center();
        let reach = self.radius + self.tolerance;
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= reach * reach
    }
}
