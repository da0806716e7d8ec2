//! huewheel - HSV color wheel picker
//!
//! A hue/saturation wheel plus a value track, driven by gestures, layout
//! measurements and animation frames from a host UI. The interaction engine
//! lives in `huewheel_core`; this crate adds configuration and the
//! host-facing [`ColorPicker`].

mod config;
mod picker;

pub use config::{AnimationSettings, CONFIG_VERSION, ConfigError, LogLevel, PickerConfig};
pub use picker::ColorPicker;

// Re-export the core types hosts need
pub use huewheel_core::{
    Axis, Bounds, ColorChange, ColorError, ColorUpdate, Extreme, GesturePhase, GestureSample, Hsv,
    Orientation, Point,
};
