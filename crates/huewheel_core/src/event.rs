//! Gesture input and color change output.

use serde::Serialize;

use crate::color_space::Hsv;
use crate::layout::Point;

/// Where a gesture sample sits in its press-drag-release sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer went down
    Start,
    /// Pointer moved while down
    Move,
    /// Pointer was released
    End,
}

/// One pointer sample, in the coordinate space of whatever geometry it is
/// tested against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub position: Point,
    pub phase: GesturePhase,
}

impl GestureSample {
    pub fn new(position: Point, phase: GesturePhase) -> Self {
        Self { position, phase }
    }

    pub fn start(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), GesturePhase::Start)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), GesturePhase::Move)
    }

    pub fn end(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), GesturePhase::End)
    }

    /// The same sample expressed relative to `origin` (host space to local space).
    pub fn translated(&self, origin: Point) -> Self {
        Self::new(self.position.relative_to(origin), self.phase)
    }
}

/// The color as it crosses the boundary: hex plus HSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorChange {
    pub hex: String,
    pub hsv: Hsv,
}

impl ColorChange {
    pub fn from_hsv(hsv: Hsv) -> Self {
        Self {
            hex: hsv.to_hex(),
            hsv,
        }
    }
}

/// Notifications produced by the controller.
///
/// `Changed` is the live value, emitted for every accepted sample or
/// programmatic update. `Completed` is the committed value, emitted once per
/// release or programmatic update.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorEvent {
    Changed(ColorChange),
    Completed(ColorChange),
}

impl ColorEvent {
    /// The color carried by this event.
    pub fn change(&self) -> &ColorChange {
        match self {
            ColorEvent::Changed(change) | ColorEvent::Completed(change) => change,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ColorEvent::Completed(_))
    }
}
