//! The interaction controller: owner of the canonical color.
//!
//! The controller sequences gestures, layout measurements and programmatic
//! updates into color changes. It never does geometry math itself; it asks
//! [`crate::geometry`] for positions and hands thumb targets to the
//! [`AnimationDriver`].
//!
//! Gesture positions are expected in the local coordinate space of the
//! control they are routed to (wheel-local for [`InteractionController::handle_wheel`],
//! track-local for [`InteractionController::handle_track`]).

use std::time::Duration;

use log::{debug, trace};
use web_time::Instant;

use crate::animation::{AnimationDriver, AnimationHandle, Channel};
use crate::color_space::Hsv;
use crate::constants::{
    DISCRETE_CEILING, DISCRETE_STEP, SNAP_CENTER_RADIUS, SNAP_EDGE_RADIUS, SV_MAX,
};
use crate::event::{ColorChange, ColorEvent, GesturePhase, GestureSample};
use crate::geometry::{
    from_ratio, to_cartesian, to_polar, to_ratio, Orientation, Polar, TrackGeometry,
    WheelGeometry,
};
use crate::layout::Point;
use crate::state::{ColorUpdate, DragState, InteractionOptions, ThumbTarget};

#[cfg(test)]
mod tests;

/// How thumbs reach a new target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Immediate,
    Animated,
}

/// Saturation a wheel release snaps to, if the release radius is in a snap zone.
pub fn snap_saturation(radius: f32) -> Option<f32> {
    if (0.0..=SNAP_CENTER_RADIUS).contains(&radius) {
        Some(0.0)
    } else if (SNAP_EDGE_RADIUS..=1.0).contains(&radius) {
        Some(SV_MAX)
    } else {
        None
    }
}

/// Quantize a track value to the discrete steps; the top step becomes 100.
pub fn quantize_value(v: f32) -> f32 {
    let stepped = DISCRETE_STEP * (v / DISCRETE_STEP).round();
    if stepped >= DISCRETE_CEILING {
        SV_MAX
    } else {
        stepped
    }
}

fn track_channel(orientation: Orientation) -> Channel {
    match orientation {
        Orientation::Horizontal => Channel::TrackX,
        Orientation::Vertical => Channel::TrackY,
    }
}

/// Holds the canonical color and every piece of interaction state.
#[derive(Debug)]
pub struct InteractionController {
    color: Hsv,
    /// Construction color, restored by `revert`
    base: Hsv,
    swatch: Hsv,
    drag: DragState,
    wheel: Option<WheelGeometry>,
    track: Option<TrackGeometry>,
    options: InteractionOptions,
    animator: AnimationDriver,
    targets: ThumbTarget,
}

impl InteractionController {
    pub fn new(initial: Hsv, options: InteractionOptions) -> Self {
        Self {
            color: initial,
            base: initial,
            swatch: initial.swatch(),
            drag: DragState::Idle,
            wheel: None,
            track: None,
            options,
            animator: AnimationDriver::new(),
            targets: ThumbTarget::default(),
        }
    }

    /// Replace the animation driver (custom spring or pulse timing).
    pub fn with_animator(mut self, animator: AnimationDriver) -> Self {
        self.animator = animator;
        self
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// The canonical color.
    pub fn color(&self) -> Hsv {
        self.color
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    /// Hue/saturation preview at full value.
    pub fn swatch(&self) -> Hsv {
        self.swatch
    }

    pub fn swatch_hex(&self) -> String {
        self.swatch.to_hex()
    }

    pub fn base(&self) -> Hsv {
        self.base
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn options(&self) -> InteractionOptions {
        self.options
    }

    pub fn wheel_geometry(&self) -> Option<WheelGeometry> {
        self.wheel
    }

    pub fn track_geometry(&self) -> Option<TrackGeometry> {
        self.track
    }

    pub fn animator(&self) -> &AnimationDriver {
        &self.animator
    }

    /// Where the thumbs are heading, derived from the canonical color.
    pub fn thumb_target(&self) -> ThumbTarget {
        self.targets
    }

    /// Live wheel thumb center in wheel-local coordinates.
    pub fn wheel_thumb(&self) -> Point {
        Point::new(
            self.animator.value(Channel::WheelX),
            self.animator.value(Channel::WheelY),
        )
    }

    /// Live track thumb offset from the track origin.
    pub fn track_thumb(&self) -> f32 {
        let orientation = self
            .track
            .map(|track| track.orientation())
            .unwrap_or_default();
        self.animator.value(track_channel(orientation))
    }

    /// Progress of the release pulse, `0.0` when idle.
    pub fn track_pulse(&self) -> f32 {
        self.animator.value(Channel::TrackPulse)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Install or clear the wheel geometry.
    ///
    /// A new geometry places the wheel thumb immediately and emits nothing.
    pub fn set_wheel_geometry(&mut self, geometry: Option<WheelGeometry>) {
        self.wheel = geometry;
        match geometry {
            Some(wheel) => {
                debug!(
                    "ColorPicker: wheel measured (radius {:.1})",
                    wheel.radius()
                );
                self.place_wheel(Placement::Immediate);
            }
            None => {
                if self.drag.is_wheel() {
                    debug!("ColorPicker: wheel geometry cleared mid-drag, dropping drag");
                    self.drag.stop_drag();
                }
                self.animator.cancel(Channel::WheelX);
                self.animator.cancel(Channel::WheelY);
            }
        }
    }

    /// Install or clear the track geometry.
    pub fn set_track_geometry(&mut self, geometry: Option<TrackGeometry>) {
        self.track = geometry;
        self.animator.cancel(Channel::TrackX);
        self.animator.cancel(Channel::TrackY);
        match geometry {
            Some(track) => {
                debug!(
                    "ColorPicker: track measured (length {:.1}, {:?})",
                    track.length(),
                    track.orientation()
                );
                self.place_track(Placement::Immediate);
            }
            None => {
                if self.drag.is_track() {
                    debug!("ColorPicker: track geometry cleared mid-drag, dropping drag");
                    self.drag.stop_drag();
                }
            }
        }
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Process a wheel-local gesture sample.
    pub fn handle_wheel(&mut self, sample: GestureSample) -> Vec<ColorEvent> {
        let Some(wheel) = self.wheel else {
            trace!("ColorPicker: wheel sample before measurement ignored");
            return Vec::new();
        };
        let polar = to_polar(sample.position, &wheel);

        match (sample.phase, self.drag) {
            (GesturePhase::Start, DragState::Idle) => {
                if !on_wheel(polar) {
                    trace!("ColorPicker: wheel press outside the wheel rejected");
                    return Vec::new();
                }
                self.drag = DragState::WheelDragging;
                debug!("ColorPicker: started dragging wheel");
                vec![self.apply_wheel(polar)]
            }
            (GesturePhase::Move, DragState::WheelDragging) => {
                if !on_wheel(polar) {
                    return Vec::new();
                }
                vec![self.apply_wheel(polar)]
            }
            (GesturePhase::End, DragState::WheelDragging) => self.release_wheel(polar),
            _ => Vec::new(),
        }
    }

    /// Process a track-local gesture sample.
    pub fn handle_track(&mut self, sample: GestureSample) -> Vec<ColorEvent> {
        let Some(track) = self.track else {
            trace!("ColorPicker: track sample before measurement ignored");
            return Vec::new();
        };

        match (sample.phase, self.drag) {
            (GesturePhase::Start, DragState::Idle) => {
                if !track.contains(sample.position) {
                    trace!("ColorPicker: track press outside the track rejected");
                    return Vec::new();
                }
                self.drag = DragState::TrackDragging;
                debug!("ColorPicker: started dragging track");
                vec![self.apply_track(&track, sample.position)]
            }
            (GesturePhase::Move, DragState::TrackDragging) => {
                if !track.contains_along(sample.position) {
                    return Vec::new();
                }
                vec![self.apply_track(&track, sample.position)]
            }
            (GesturePhase::End, DragState::TrackDragging) => {
                self.drag.stop_drag();
                debug!("ColorPicker: stopped dragging track");
                self.animator.pulse(Channel::TrackPulse);
                vec![ColorEvent::Completed(ColorChange::from_hsv(self.color))]
            }
            _ => Vec::new(),
        }
    }

    fn apply_wheel(&mut self, polar: Polar) -> ColorEvent {
        // The angle is meaningless at the exact center
        let hue = if polar.radius > 0.0 {
            polar.angle_deg
        } else {
            self.color.h()
        };
        self.set_gesture_color(Hsv::new(hue, polar.radius * SV_MAX, self.color.v()));
        self.place_wheel(Placement::Immediate);
        ColorEvent::Changed(ColorChange::from_hsv(self.color))
    }

    fn release_wheel(&mut self, polar: Polar) -> Vec<ColorEvent> {
        self.drag.stop_drag();
        debug!("ColorPicker: stopped dragging wheel");

        let mut events = Vec::new();
        let snapped = self
            .options
            .snap
            .then(|| snap_saturation(polar.radius))
            .flatten();
        if let Some(saturation) = snapped {
            let color = self.color.with_saturation(saturation);
            debug!(
                "ColorPicker: release at radius {:.3} snaps saturation to {}",
                polar.radius, saturation
            );
            if color != self.color {
                self.set_gesture_color(color);
                self.place_wheel(Placement::Animated);
                events.push(ColorEvent::Changed(ColorChange::from_hsv(self.color)));
            }
        }
        events.push(ColorEvent::Completed(ColorChange::from_hsv(self.color)));
        events
    }

    fn apply_track(&mut self, track: &TrackGeometry, position: Point) -> ColorEvent {
        let mut value = to_ratio(position, track) * SV_MAX;
        if self.options.discrete {
            value = quantize_value(value);
        }
        self.set_gesture_color(self.color.with_value(value));
        self.place_track(Placement::Immediate);
        ColorEvent::Changed(ColorChange::from_hsv(self.color))
    }

    /// Gestures always keep the swatch in step with the color.
    fn set_gesture_color(&mut self, color: Hsv) {
        trace!("ColorPicker: {} -> {}", self.color.to_hex(), color.to_hex());
        self.color = color;
        self.swatch = color.swatch();
    }

    // =========================================================================
    // Programmatic updates
    // =========================================================================

    /// Apply an update and jump the affected thumbs to their new targets.
    pub fn set_color(&mut self, update: ColorUpdate) -> Vec<ColorEvent> {
        self.apply_update(update, Placement::Immediate)
    }

    /// Apply an update and spring the affected thumbs to their new targets.
    ///
    /// Animations still running from an earlier update are cancelled.
    pub fn animate_color(&mut self, update: ColorUpdate) -> Vec<ColorEvent> {
        self.apply_update(update, Placement::Animated)
    }

    /// Animate back to the construction color.
    pub fn revert(&mut self) -> Vec<ColorEvent> {
        debug!("ColorPicker: reverting to {}", self.base.to_hex());
        self.animate_color(ColorUpdate::new(self.base))
    }

    fn apply_update(&mut self, update: ColorUpdate, placement: Placement) -> Vec<ColorEvent> {
        let resolved = update.resolve(self.color);
        debug!(
            "ColorPicker: {:?} update on {:?} ({:?}, force: {}) -> {}",
            placement,
            update.selected_axis(),
            update.selected_extreme(),
            update.is_forced(),
            resolved.to_hex()
        );

        self.color = resolved;
        if update.refreshes_swatch() {
            self.swatch = resolved.swatch();
        }
        if update.moves_wheel() {
            self.place_wheel(placement);
        }
        if update.moves_track() {
            self.place_track(placement);
        }

        let change = ColorChange::from_hsv(resolved);
        vec![
            ColorEvent::Changed(change.clone()),
            ColorEvent::Completed(change),
        ]
    }

    // =========================================================================
    // Thumbs
    // =========================================================================

    fn place_wheel(&mut self, placement: Placement) {
        let Some(wheel) = self.wheel else {
            return;
        };
        let target = to_cartesian(self.color.h(), self.color.s() / SV_MAX, &wheel);
        self.targets.wheel = target;
        self.move_thumb(Channel::WheelX, target.x, placement);
        self.move_thumb(Channel::WheelY, target.y, placement);
    }

    fn place_track(&mut self, placement: Placement) {
        let Some(track) = self.track else {
            return;
        };
        let target = from_ratio(self.color.v() / SV_MAX, &track);
        self.targets.track_offset = target;
        self.move_thumb(track_channel(track.orientation()), target, placement);
    }

    fn move_thumb(&mut self, channel: Channel, target: f32, placement: Placement) {
        match placement {
            Placement::Immediate => self.animator.set_immediate(channel, target),
            Placement::Animated => {
                self.animator.animate_to(channel, target);
            }
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Step thumb animations by `dt`. Returns the animations that completed.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationHandle> {
        self.animator.advance(dt)
    }

    /// Step thumb animations to `now`.
    pub fn frame(&mut self, now: Instant) -> Vec<AnimationHandle> {
        self.animator.frame(now)
    }
}

/// Radius 1 is the edge and still on the wheel; NaN never is.
fn on_wheel(polar: Polar) -> bool {
    polar.radius <= 1.0
}
