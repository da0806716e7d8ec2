//! huewheel_core - Interaction engine for an HSV color wheel picker
//!
//! This crate owns the canonical color and everything that changes it: the
//! color conversions, the wheel/track geometry mappers, the gesture state
//! machine and the thumb animations. It draws nothing; a host feeds it
//! layout measurements, gestures and animation frames, and reads back thumb
//! positions and colors.

pub mod color_space;
pub mod constants;
pub mod geometry;

mod animation;
mod callback;
mod controller;
mod error;
mod event;
mod layout;
mod state;

pub use animation::{
    AnimationDriver, AnimationHandle, AnimationId, AnimationStatus, Channel, Easing, Motion,
    SpringConfig,
};
pub use callback::Callback;
pub use color_space::{Hsv, Rgb};
pub use controller::{quantize_value, snap_saturation, InteractionController};
pub use error::ColorError;
pub use event::{ColorChange, ColorEvent, GesturePhase, GestureSample};
pub use geometry::{Orientation, Polar, TrackGeometry, WheelGeometry};
pub use layout::{Bounds, Point};
pub use state::{Axis, ColorUpdate, DragState, Extreme, InteractionOptions, ThumbTarget};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Axis, Bounds, Callback, ColorChange, ColorEvent, ColorUpdate, Extreme, GestureSample,
        Hsv, InteractionController, InteractionOptions, Orientation, Point,
    };
}
