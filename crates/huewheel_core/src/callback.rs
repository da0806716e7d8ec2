//! Callback abstraction for picker event handlers
//!
//! Instead of storing `Option<Box<dyn Fn(T) -> M>>` for every listener, the
//! picker holds a `Callback<T, M>`. Calling an unset callback simply yields
//! `None`, which is how optional listeners such as `on_color_change` stay
//! optional.
//!
//! # Examples
//!
//! ```
//! use huewheel_core::{Callback, ColorChange, Hsv};
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Picked(String),
//! }
//!
//! let on_change: Callback<ColorChange, Message> =
//!     Callback::new(|change: ColorChange| Message::Picked(change.hex));
//!
//! let msg = on_change.call(ColorChange::from_hsv(Hsv::WHITE));
//! assert_eq!(msg, Some(Message::Picked("#ffffff".to_string())));
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional event handler.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (e.g. a [`ColorChange`](crate::ColorChange))
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no callback is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
