//! Error types for color parsing.

use thiserror::Error;

/// Errors produced when a color representation cannot be interpreted.
///
/// Gesture handling never produces errors; this type only surfaces where a
/// caller asks for a reason, e.g. when validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input is not a `#rrggbb` hex color
    #[error("Invalid hex color '{input}': expected #rrggbb")]
    InvalidHex {
        /// The rejected input
        input: String,
    },
}
