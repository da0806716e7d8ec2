//! Scenario tests for the interaction controller.
//!
//! These tests drive the controller through gestures, layout measurements and
//! programmatic updates, and check the emitted events and thumb positions.
