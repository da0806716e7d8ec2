//! Centralized constants for huewheel_core
//!
//! Color ranges, snapping thresholds and animation defaults live here so the
//! controller, the mappers and the driver agree on them.

use std::time::Duration;

// =============================================================================
// Color ranges
// =============================================================================

/// Hue is measured in degrees, wrapping at this value
pub const HUE_MAX: f32 = 360.0;

/// Saturation and value are percentages
pub const SV_MAX: f32 = 100.0;

/// Largest 8-bit channel value
pub const RGB_MAX: f32 = 255.0;

// =============================================================================
// Wheel snapping
// =============================================================================

/// Releasing at or inside this normalized radius snaps saturation to 0
pub const SNAP_CENTER_RADIUS: f32 = 0.1;

/// Releasing at or beyond this normalized radius (up to the edge) snaps saturation to 100
pub const SNAP_EDGE_RADIUS: f32 = 0.95;

// =============================================================================
// Discrete value track
// =============================================================================

/// Quantization step for the discrete track (roughly 100 / 9)
pub const DISCRETE_STEP: f32 = 11.0;

/// Quantized values at or above this become exactly [`SV_MAX`]
pub const DISCRETE_CEILING: f32 = 99.0;

// =============================================================================
// Animation
// =============================================================================

/// Spring stiffness used for thumb convergence
pub const DEFAULT_SPRING_STIFFNESS: f32 = 200.0;

/// Spring damping, slightly below critical for the default stiffness
pub const DEFAULT_SPRING_DAMPING: f32 = 28.0;

/// Spring mass
pub const DEFAULT_SPRING_MASS: f32 = 1.0;

/// Largest integration step for spring physics, in seconds
pub const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// Upper bound on integration steps per frame; very stiff springs take coarser steps
pub const MAX_SPRING_SUBSTEPS: u32 = 1024;

/// Accepted spring stiffness range
pub const SPRING_STIFFNESS_RANGE: (f32, f32) = (1.0e-3, 1.0e5);

/// Accepted spring mass range
pub const SPRING_MASS_RANGE: (f32, f32) = (1.0e-3, 1.0e3);

/// Longest frame gap fed to the animations; longer pauses are treated as this
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// A spring is at rest once it is closer than this to its target (in pixels)...
pub const REST_DISPLACEMENT: f32 = 0.01;

/// ...and slower than this (in pixels per second)
pub const REST_SPEED: f32 = 0.01;

/// Duration of the cosmetic pulse played when the track thumb is released
pub const PULSE_DURATION: Duration = Duration::from_millis(500);

// =============================================================================
// Thumbs
// =============================================================================

/// Default diameter of the wheel thumb
pub const DEFAULT_THUMB_SIZE: f32 = 50.0;
