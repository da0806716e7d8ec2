//! Host-facing color picker.
//!
//! [`ColorPicker`] adapts the interaction controller to a host UI: it takes
//! absolute layout boxes and window-space gestures, routes them to the wheel
//! or the track, and turns color events into host messages through the
//! `on_color_change` / `on_color_change_complete` callbacks.

use std::time::Duration;

use huewheel_core::{
    Bounds, Callback, ColorChange, ColorError, ColorEvent, ColorUpdate, DragState, GesturePhase,
    GestureSample, Hsv, InteractionController, Orientation, Point, TrackGeometry, WheelGeometry,
};
use web_time::Instant;

use crate::config::PickerConfig;

/// An HSV wheel with a value track.
pub struct ColorPicker<M> {
    controller: InteractionController,
    /// Diameter of the wheel thumb
    thumb_size: f32,
    orientation: Orientation,
    /// Absolute wheel box, set once measured
    wheel_bounds: Option<Bounds>,
    /// Absolute track box, set once measured
    track_bounds: Option<Bounds>,
    /// Callback for live changes during a drag or update
    on_color_change: Callback<ColorChange, M>,
    /// Callback for committed changes (release or programmatic update)
    on_color_change_complete: Callback<ColorChange, M>,
}

impl<M> ColorPicker<M> {
    /// Create a picker from configuration.
    pub fn new(config: &PickerConfig) -> Self {
        let controller =
            InteractionController::new(config.initial_hsv(), config.interaction_options())
                .with_animator(config.animation_driver());
        Self {
            controller,
            thumb_size: config.thumb_size,
            orientation: config.track_orientation(),
            wheel_bounds: None,
            track_bounds: None,
            on_color_change: Callback::none(),
            on_color_change_complete: Callback::none(),
        }
    }

    /// Set the live change callback
    pub fn on_color_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(ColorChange) -> M + 'static,
    {
        self.on_color_change = Callback::new(handler);
        self
    }

    /// Set the committed change callback
    pub fn on_color_change_complete<F>(mut self, handler: F) -> Self
    where
        F: Fn(ColorChange) -> M + 'static,
    {
        self.on_color_change_complete = Callback::new(handler);
        self
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// The wheel box was measured (absolute coordinates).
    pub fn on_wheel_layout(&mut self, bounds: Bounds) {
        let geometry = WheelGeometry::from_bounds(bounds);
        if geometry.is_none() {
            log::debug!("ColorPicker: unusable wheel box {:?}", bounds);
        }
        self.wheel_bounds = geometry.map(|_| bounds);
        self.controller.set_wheel_geometry(geometry);
    }

    /// The track box was measured (absolute coordinates).
    pub fn on_track_layout(&mut self, bounds: Bounds) {
        let geometry = TrackGeometry::from_bounds(bounds, self.orientation);
        if geometry.is_none() {
            log::debug!("ColorPicker: unusable track box {:?}", bounds);
        }
        self.track_bounds = geometry.map(|_| bounds);
        self.controller.set_track_geometry(geometry);
    }

    /// Forget both measurements, e.g. after a resize. Gestures are ignored
    /// until the boxes are measured again.
    pub fn invalidate_layout(&mut self) {
        self.wheel_bounds = None;
        self.track_bounds = None;
        self.controller.set_wheel_geometry(None);
        self.controller.set_track_geometry(None);
    }

    /// Both controls are measured and accept gestures.
    pub fn is_ready(&self) -> bool {
        self.wheel_bounds.is_some() && self.track_bounds.is_some()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a pointer sample in window coordinates.
    ///
    /// A press goes to the wheel if it lands on it, otherwise to the track.
    /// Later samples follow whichever control accepted the press.
    pub fn on_gesture(&mut self, sample: GestureSample) -> Vec<M> {
        let events = match (sample.phase, self.controller.drag_state()) {
            (GesturePhase::Start, DragState::Idle) => {
                let events = self.route_to_wheel(sample);
                if self.controller.drag_state().is_dragging() {
                    events
                } else {
                    self.route_to_track(sample)
                }
            }
            (_, DragState::WheelDragging) => self.route_to_wheel(sample),
            (_, DragState::TrackDragging) => self.route_to_track(sample),
            _ => Vec::new(),
        };
        self.dispatch(events)
    }

    fn route_to_wheel(&mut self, sample: GestureSample) -> Vec<ColorEvent> {
        match self.wheel_bounds {
            Some(bounds) => self
                .controller
                .handle_wheel(sample.translated(bounds.position())),
            None => Vec::new(),
        }
    }

    fn route_to_track(&mut self, sample: GestureSample) -> Vec<ColorEvent> {
        match self.track_bounds {
            Some(bounds) => self
                .controller
                .handle_track(sample.translated(bounds.position())),
            None => Vec::new(),
        }
    }

    /// Apply an update, jumping the thumbs.
    pub fn set_color(&mut self, update: ColorUpdate) -> Vec<M> {
        let events = self.controller.set_color(update);
        self.dispatch(events)
    }

    /// Apply an update, animating the thumbs.
    pub fn animate_color(&mut self, update: ColorUpdate) -> Vec<M> {
        let events = self.controller.animate_color(update);
        self.dispatch(events)
    }

    /// Jump to a `#rrggbb` color. A malformed hex keeps the current color.
    pub fn set_hex(&mut self, hex: &str) -> Result<Vec<M>, ColorError> {
        let update = ColorUpdate::from_hex(hex)?;
        Ok(self.set_color(update))
    }

    /// Animate back to the configured initial color.
    pub fn revert(&mut self) -> Vec<M> {
        let events = self.controller.revert();
        self.dispatch(events)
    }

    fn dispatch(&self, events: Vec<ColorEvent>) -> Vec<M> {
        events
            .into_iter()
            .filter_map(|event| match event {
                ColorEvent::Changed(change) => self.on_color_change.call(change),
                ColorEvent::Completed(change) => self.on_color_change_complete.call(change),
            })
            .collect()
    }

    // =========================================================================
    // Animation frames
    // =========================================================================

    /// Advance thumb animations to `now`. Returns true while more frames are needed.
    pub fn frame(&mut self, now: Instant) -> bool {
        self.controller.frame(now);
        self.is_animating()
    }

    /// Advance thumb animations by a fixed step. Returns true while more frames are needed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.controller.advance(dt);
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        !self.controller.animator().is_idle()
    }

    // =========================================================================
    // Rendering outputs
    // =========================================================================

    /// Top-left offset of the wheel thumb inside the wheel box.
    pub fn wheel_thumb(&self) -> Point {
        let center = self.controller.wheel_thumb();
        let half = self.thumb_size / 2.0;
        Point::new(center.x - half, center.y - half)
    }

    /// Offset of the track thumb along the track.
    pub fn track_thumb(&self) -> f32 {
        self.controller.track_thumb()
    }

    /// Release pulse progress for the track thumb, `0.0` when idle.
    pub fn track_pulse(&self) -> f32 {
        self.controller.track_pulse()
    }

    pub fn thumb_size(&self) -> f32 {
        self.thumb_size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The live color, used as the picker background.
    pub fn background_hex(&self) -> String {
        self.controller.hex()
    }

    /// Hue/saturation at full value, used for the track gradient.
    pub fn swatch_hex(&self) -> String {
        self.controller.swatch_hex()
    }

    pub fn hsv(&self) -> Hsv {
        self.controller.color()
    }

    pub fn hex(&self) -> String {
        self.controller.hex()
    }
}
