//! Interaction state types for the picker controller

use crate::color_space::{Hsv, hex_to_hsv};
use crate::error::ColorError;
use crate::layout::Point;

/// Which control, if any, is being dragged.
///
/// Only one axis can be dragged at a time; the wheel and the track are
/// independent gesture sources sharing the canonical color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging on the hue/saturation wheel
    WheelDragging,
    /// Dragging along the value track
    TrackDragging,
}

impl DragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    pub fn is_wheel(&self) -> bool {
        matches!(self, DragState::WheelDragging)
    }

    pub fn is_track(&self) -> bool {
        matches!(self, DragState::TrackDragging)
    }

    /// Stop dragging
    pub fn stop_drag(&mut self) {
        *self = DragState::Idle;
    }
}

/// Positions the visual thumbs converge toward, derived from the canonical color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbTarget {
    /// Wheel thumb center in wheel-local coordinates
    pub wheel: Point,
    /// Track thumb offset from the track origin along its primary axis
    pub track_offset: f32,
}

/// Part of the color an external update applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Hue, saturation and value
    #[default]
    All,
    /// Hue and saturation (the wheel)
    HueSat,
    /// Value (the track)
    Value,
}

impl Axis {
    pub fn includes_hue_sat(self) -> bool {
        matches!(self, Axis::All | Axis::HueSat)
    }

    pub fn includes_value(self) -> bool {
        matches!(self, Axis::All | Axis::Value)
    }
}

/// Override for the selected axis's saturation (HueSat) or value (Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extreme {
    /// Use the input's own component
    #[default]
    Keep,
    /// Force to 100
    Max,
    /// Force to 0
    Min,
}

/// A programmatic color change.
///
/// # Example
/// ```
/// use huewheel_core::{Axis, ColorUpdate, Extreme};
///
/// // Jump saturation to max while taking the hue from green
/// let update = ColorUpdate::from_hex("#00ff00")
///     .unwrap()
///     .axis(Axis::HueSat)
///     .extreme(Extreme::Max);
/// assert_eq!(update.color().h(), 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorUpdate {
    color: Hsv,
    axis: Axis,
    extreme: Extreme,
    force: bool,
}

impl ColorUpdate {
    /// Update every component to `color`.
    pub fn new(color: Hsv) -> Self {
        Self {
            color,
            axis: Axis::All,
            extreme: Extreme::Keep,
            force: false,
        }
    }

    /// Build an update from `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        hex_to_hsv(hex)
            .map(Self::new)
            .ok_or_else(|| ColorError::InvalidHex {
                input: hex.to_string(),
            })
    }

    /// Restrict the update to one axis.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Force the selected axis's saturation/value to an extreme.
    pub fn extreme(mut self, extreme: Extreme) -> Self {
        self.extreme = extreme;
        self
    }

    /// Take the whole input color, not just the selected axis.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn color(&self) -> Hsv {
        self.color
    }

    pub fn selected_axis(&self) -> Axis {
        self.axis
    }

    pub fn selected_extreme(&self) -> Extreme {
        self.extreme
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    /// Merge this update into the `current` canonical color.
    pub fn resolve(&self, current: Hsv) -> Hsv {
        let input = self.color;
        let takes_hue_sat = self.axis.includes_hue_sat() || self.force;
        let takes_value = self.axis.includes_value() || self.force;

        let h = if takes_hue_sat { input.h() } else { current.h() };

        let s = match (self.axis, self.extreme) {
            (Axis::HueSat, Extreme::Max) => 100.0,
            (Axis::HueSat, Extreme::Min) => 0.0,
            _ if takes_hue_sat => input.s(),
            _ => current.s(),
        };

        let v = match (self.axis, self.extreme) {
            (Axis::Value, Extreme::Max) => 100.0,
            (Axis::Value, Extreme::Min) => 0.0,
            _ if takes_value => input.v(),
            _ => current.v(),
        };

        Hsv::new(h, s, v)
    }

    /// The swatch follows only whole-color or forced updates.
    pub fn refreshes_swatch(&self) -> bool {
        self.axis == Axis::All || self.force
    }

    /// Whether hue/saturation may change, so the wheel thumb must move.
    pub fn moves_wheel(&self) -> bool {
        self.axis.includes_hue_sat() || self.force
    }

    /// Whether value may change, so the track thumb must move.
    pub fn moves_track(&self) -> bool {
        self.axis.includes_value() || self.force
    }
}

/// Behavior switches for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionOptions {
    /// Snap saturation to 0/100 when a wheel drag ends near the center/edge
    pub snap: bool,
    /// Quantize the track value to steps of 11
    pub discrete: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            snap: true,
            discrete: false,
        }
    }
}
