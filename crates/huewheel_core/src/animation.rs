//! Cancellable animations for the picker thumbs.
//!
//! Every animatable quantity is a [`Channel`] holding a current value and at
//! most one in-flight animation. Starting an animation on a channel always
//! cancels the previous one on that channel first, so an older, slower
//! convergence can never land after a newer target was set. Cancelled
//! animations report [`AnimationStatus::Cancelled`] through their handle and
//! never reach their target.
//!
//! The driver is advanced cooperatively by the host's animation frames via
//! [`AnimationDriver::advance`] or [`AnimationDriver::frame`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::constants::{
    DEFAULT_SPRING_DAMPING, DEFAULT_SPRING_MASS, DEFAULT_SPRING_STIFFNESS, MAX_FRAME_DELTA,
    MAX_SPRING_STEP, MAX_SPRING_SUBSTEPS, PULSE_DURATION, REST_DISPLACEMENT, REST_SPEED,
    SPRING_MASS_RANGE, SPRING_STIFFNESS_RANGE,
};

/// Longest stretch of spring physics simulated for a single frame.
/// Frames arriving after a longer pause only advance the spring this far.
const MAX_SPRING_FRAME: f32 = 1.0;

/// An animatable visual quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Wheel thumb x
    WheelX,
    /// Wheel thumb y
    WheelY,
    /// Track thumb offset on a horizontal track
    TrackX,
    /// Track thumb offset on a vertical track
    TrackY,
    /// Cosmetic pulse played on the track thumb after release
    TrackPulse,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::WheelX,
        Channel::WheelY,
        Channel::TrackX,
        Channel::TrackY,
        Channel::TrackPulse,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

const CHANNEL_COUNT: usize = Channel::ALL.len();

/// Lifecycle of a single animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Completed,
    Cancelled,
}

/// Unique, monotonically increasing animation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Observer for one started animation.
///
/// The driver keeps a clone; the status is shared so callers can see whether
/// the animation completed or was superseded.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    id: AnimationId,
    channel: Channel,
    status: Rc<Cell<AnimationStatus>>,
}

impl AnimationHandle {
    fn new(id: AnimationId, channel: Channel) -> Self {
        Self {
            id,
            channel,
            status: Rc::new(Cell::new(AnimationStatus::Running)),
        }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status() == AnimationStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == AnimationStatus::Cancelled
    }

    /// A finished animation never changes status again.
    fn finish(&self, status: AnimationStatus) {
        if self.is_running() {
            self.status.set(status);
        }
    }
}

impl PartialEq for AnimationHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnimationHandle {}

/// Damped spring parameters.
///
/// Only constructed through [`SpringConfig::new`] or [`Default`], so the
/// parameters are always finite and within the accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    stiffness: f32,
    damping: f32,
    mass: f32,
}

impl SpringConfig {
    /// Create a spring.
    ///
    /// Non-positive or non-finite parameters fall back to defaults. Stiffness
    /// and mass are clamped to [`SPRING_STIFFNESS_RANGE`] and [`SPRING_MASS_RANGE`].
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        let defaults = Self::default();
        let positive = |x: f32, fallback: f32, (min, max): (f32, f32)| {
            if x.is_finite() && x > 0.0 {
                x.clamp(min, max)
            } else {
                fallback
            }
        };
        Self {
            stiffness: positive(stiffness, defaults.stiffness, SPRING_STIFFNESS_RANGE),
            damping: if damping.is_finite() && damping >= 0.0 {
                damping
            } else {
                defaults.damping
            },
            mass: positive(mass, defaults.mass, SPRING_MASS_RANGE),
        }
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Integration step small enough to keep semi-implicit Euler stable.
    fn max_step(&self) -> f32 {
        let natural = 0.5 * (self.mass / self.stiffness).sqrt();
        let damped = if self.damping > 0.0 {
            0.5 * self.mass / self.damping
        } else {
            f32::INFINITY
        };
        MAX_SPRING_STEP.min(natural).min(damped)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_SPRING_STIFFNESS,
            damping: DEFAULT_SPRING_DAMPING,
            mass: DEFAULT_SPRING_MASS,
        }
    }
}

/// Progress curve for fixed-duration animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// How an animation moves toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Spring(SpringConfig),
    Timed { duration: Duration, easing: Easing },
}

#[derive(Debug)]
struct Animation {
    handle: AnimationHandle,
    motion: Motion,
    from: f32,
    target: f32,
    elapsed: Duration,
    /// Value written to the channel on completion
    settle_to: f32,
}

#[derive(Debug, Default)]
struct ChannelState {
    value: f32,
    velocity: f32,
    animation: Option<Animation>,
}

impl ChannelState {
    fn cancel(&mut self) -> Option<AnimationHandle> {
        let animation = self.animation.take()?;
        animation.handle.finish(AnimationStatus::Cancelled);
        Some(animation.handle)
    }

    /// Advance the running animation. Returns its handle if it finished.
    fn step(&mut self, dt: Duration) -> Option<AnimationHandle> {
        let animation = self.animation.as_mut()?;
        animation.elapsed += dt;

        let done = match animation.motion {
            Motion::Spring(spring) => {
                let secs = dt.as_secs_f32().min(MAX_SPRING_FRAME);
                let (value, velocity) = (&mut self.value, &mut self.velocity);
                step_spring(value, velocity, animation.target, spring, secs)
            }
            Motion::Timed { duration, easing } => {
                if duration.is_zero() || animation.elapsed >= duration {
                    true
                } else {
                    let t = animation.elapsed.as_secs_f32() / duration.as_secs_f32();
                    self.value =
                        animation.from + (animation.target - animation.from) * easing.apply(t);
                    false
                }
            }
        };

        if !done {
            return None;
        }

        let animation = self.animation.take()?;
        self.value = animation.settle_to;
        self.velocity = 0.0;
        animation.handle.finish(AnimationStatus::Completed);
        Some(animation.handle)
    }
}

/// Integrate a damped spring for `secs` seconds. Returns true once at rest.
///
/// At most [`MAX_SPRING_SUBSTEPS`] equal steps are taken per call.
fn step_spring(
    value: &mut f32,
    velocity: &mut f32,
    target: f32,
    spring: SpringConfig,
    secs: f32,
) -> bool {
    let steps = (secs / spring.max_step())
        .ceil()
        .clamp(1.0, MAX_SPRING_SUBSTEPS as f32) as u32;
    let h = secs / steps as f32;

    for _ in 0..steps {
        let displacement = *value - target;
        let accel = (-spring.stiffness * displacement - spring.damping * *velocity) / spring.mass;
        *velocity += accel * h;
        *value += *velocity * h;
    }

    if !value.is_finite() || !velocity.is_finite() {
        return true;
    }
    (*value - target).abs() < REST_DISPLACEMENT && velocity.abs() < REST_SPEED
}

/// Drives the visual thumb positions toward their targets.
#[derive(Debug)]
pub struct AnimationDriver {
    channels: [ChannelState; CHANNEL_COUNT],
    spring: SpringConfig,
    pulse_duration: Duration,
    next_id: u64,
    last_frame: Option<Instant>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            channels: Default::default(),
            spring: SpringConfig::default(),
            pulse_duration: PULSE_DURATION,
            next_id: 0,
            last_frame: None,
        }
    }

    /// Use `spring` for thumb convergence.
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Set how long the release pulse lasts.
    pub fn with_pulse_duration(mut self, duration: Duration) -> Self {
        self.pulse_duration = duration;
        self
    }

    pub fn spring(&self) -> SpringConfig {
        self.spring
    }

    pub fn pulse_duration(&self) -> Duration {
        self.pulse_duration
    }

    /// Current visual value of a channel.
    pub fn value(&self, channel: Channel) -> f32 {
        self.channels[channel.index()].value
    }

    /// The in-flight animation on a channel, if any.
    pub fn handle(&self, channel: Channel) -> Option<&AnimationHandle> {
        self.channels[channel.index()]
            .animation
            .as_ref()
            .map(|animation| &animation.handle)
    }

    pub fn is_animating(&self, channel: Channel) -> bool {
        self.channels[channel.index()].animation.is_some()
    }

    /// True when no channel has a running animation.
    pub fn is_idle(&self) -> bool {
        self.channels.iter().all(|state| state.animation.is_none())
    }

    /// Jump a channel to `value`, cancelling whatever was running on it.
    pub fn set_immediate(&mut self, channel: Channel, value: f32) {
        let state = &mut self.channels[channel.index()];
        if let Some(cancelled) = state.cancel() {
            log::trace!(
                "Animation: {:?} on {:?} cancelled by immediate set",
                cancelled.id(),
                channel
            );
        }
        state.value = value;
        state.velocity = 0.0;
    }

    /// Spring a channel toward `target`, replacing any running animation.
    pub fn animate_to(&mut self, channel: Channel, target: f32) -> AnimationHandle {
        self.animate_with(channel, target, Motion::Spring(self.spring))
    }

    /// Animate a channel toward `target` using an explicit motion model.
    pub fn animate_with(
        &mut self,
        channel: Channel,
        target: f32,
        motion: Motion,
    ) -> AnimationHandle {
        self.start(channel, target, target, motion)
    }

    /// Play a 0 → 1 pulse on `channel` that drops back to 0 when done.
    pub fn pulse(&mut self, channel: Channel) -> AnimationHandle {
        self.set_immediate(channel, 0.0);
        let motion = Motion::Timed {
            duration: self.pulse_duration,
            easing: Easing::EaseOut,
        };
        self.start(channel, 1.0, 0.0, motion)
    }

    fn start(
        &mut self,
        channel: Channel,
        target: f32,
        settle_to: f32,
        motion: Motion,
    ) -> AnimationHandle {
        // Frames stop while idle, so the previous timestamp is stale
        if self.is_idle() {
            self.last_frame = None;
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let handle = AnimationHandle::new(id, channel);

        let state = &mut self.channels[channel.index()];
        if let Some(cancelled) = state.cancel() {
            log::trace!("Animation: {:?} on {:?} superseded by {:?}", cancelled.id(), channel, id);
        }
        if matches!(motion, Motion::Timed { .. }) {
            state.velocity = 0.0;
        }
        state.animation = Some(Animation {
            handle: handle.clone(),
            motion,
            from: state.value,
            target,
            elapsed: Duration::ZERO,
            settle_to,
        });

        log::trace!("Animation: {:?} started on {:?} toward {}", id, channel, target);
        handle
    }

    /// Cancel the animation on one channel, leaving the value where it is.
    pub fn cancel(&mut self, channel: Channel) -> Option<AnimationHandle> {
        self.channels[channel.index()].cancel()
    }

    pub fn cancel_all(&mut self) {
        for state in &mut self.channels {
            state.cancel();
        }
    }

    /// Advance all running animations by `dt`. Returns the ones that completed.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationHandle> {
        let completed: Vec<AnimationHandle> = self
            .channels
            .iter_mut()
            .filter_map(|state| state.step(dt))
            .collect();
        for handle in &completed {
            log::trace!("Animation: {:?} completed on {:?}", handle.id(), handle.channel());
        }
        completed
    }

    /// Advance by the time elapsed since the previous frame.
    ///
    /// The first frame after the driver was idle only records the timestamp.
    /// Gaps longer than [`MAX_FRAME_DELTA`] advance by `MAX_FRAME_DELTA`.
    pub fn frame(&mut self, now: Instant) -> Vec<AnimationHandle> {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).min(MAX_FRAME_DELTA))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        self.advance(dt)
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_idle(driver: &mut AnimationDriver) -> usize {
        let mut frames = 0;
        while !driver.is_idle() {
            driver.advance(FRAME);
            frames += 1;
            assert!(frames < 1000, "animation never settled");
        }
        frames
    }

    #[test]
    fn test_set_immediate() {
        let mut driver = AnimationDriver::new();
        driver.set_immediate(Channel::WheelX, 42.0);
        assert_eq!(driver.value(Channel::WheelX), 42.0);
        assert!(!driver.is_animating(Channel::WheelX));
    }

    #[test]
    fn test_spring_reaches_target_and_completes() {
        let mut driver = AnimationDriver::new();
        let handle = driver.animate_to(Channel::WheelX, 100.0);
        assert!(handle.is_running());

        run_until_idle(&mut driver);

        assert_eq!(driver.value(Channel::WheelX), 100.0);
        assert!(handle.is_completed());
    }

    #[test]
    fn test_restart_cancels_previous_animation() {
        let mut driver = AnimationDriver::new();
        let first = driver.animate_to(Channel::WheelX, 100.0);
        driver.advance(FRAME);
        let second = driver.animate_to(Channel::WheelX, -50.0);

        assert!(first.is_cancelled());
        assert!(second.is_running());
        assert_ne!(first, second);

        run_until_idle(&mut driver);

        assert_eq!(driver.value(Channel::WheelX), -50.0);
        assert!(second.is_completed());
        // A cancelled animation stays cancelled
        assert!(first.is_cancelled());
    }

    #[test]
    fn test_set_immediate_cancels_running_animation() {
        let mut driver = AnimationDriver::new();
        let handle = driver.animate_to(Channel::TrackX, 80.0);
        driver.set_immediate(Channel::TrackX, 5.0);
        assert!(handle.is_cancelled());

        driver.advance(Duration::from_secs(2));
        assert_eq!(driver.value(Channel::TrackX), 5.0);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut driver = AnimationDriver::new();
        let x = driver.animate_to(Channel::WheelX, 10.0);
        let y = driver.animate_to(Channel::WheelY, 20.0);
        assert!(x.is_running());
        assert!(y.is_running());

        run_until_idle(&mut driver);
        assert_eq!(driver.value(Channel::WheelX), 10.0);
        assert_eq!(driver.value(Channel::WheelY), 20.0);
    }

    #[test]
    fn test_pulse_rises_then_resets() {
        let mut driver = AnimationDriver::new().with_pulse_duration(Duration::from_millis(100));
        let handle = driver.pulse(Channel::TrackPulse);

        driver.advance(Duration::from_millis(50));
        let mid = driver.value(Channel::TrackPulse);
        assert!(mid > 0.0 && mid < 1.0, "pulse midway at {mid}");

        let completed = driver.advance(Duration::from_millis(60));
        assert_eq!(completed, vec![handle.clone()]);
        assert!(handle.is_completed());
        assert_eq!(driver.value(Channel::TrackPulse), 0.0);
    }

    #[test]
    fn test_timed_linear_motion() {
        let mut driver = AnimationDriver::new();
        driver.animate_with(
            Channel::TrackY,
            10.0,
            Motion::Timed {
                duration: Duration::from_millis(100),
                easing: Easing::Linear,
            },
        );
        driver.advance(Duration::from_millis(25));
        assert!((driver.value(Channel::TrackY) - 2.5).abs() < 0.01);
    }

    #[test]
    fn test_frame_uses_elapsed_time() {
        let mut driver = AnimationDriver::new().with_pulse_duration(Duration::from_millis(100));
        let handle = driver.pulse(Channel::TrackPulse);
        let start = Instant::now();

        // First frame only records the time
        driver.frame(start);
        assert!(handle.is_running());
        assert_eq!(driver.value(Channel::TrackPulse), 0.0);

        driver.frame(start + Duration::from_millis(150));
        assert!(handle.is_completed());
    }

    #[test]
    fn test_stiff_spring_stays_finite() {
        let mut driver = AnimationDriver::new().with_spring(SpringConfig::new(1.0e6, 0.0, 1.0));
        driver.animate_to(Channel::WheelY, 30.0);
        driver.advance(Duration::from_millis(100));
        assert!(driver.value(Channel::WheelY).is_finite());
    }

    #[test]
    fn test_extreme_stiffness_advances_in_bounded_time() {
        let mut driver = AnimationDriver::new().with_spring(SpringConfig::new(1.0e18, 28.0, 1.0));
        driver.animate_to(Channel::WheelX, 30.0);
        driver.advance(FRAME);
        driver.advance(Duration::from_secs(5));
        assert!(driver.value(Channel::WheelX).is_finite());
    }

    #[test]
    fn test_stiffest_spring_settles_within_frame_budget() {
        let spring = SpringConfig::new(f32::MAX, 0.0, 1.0e-9);
        let (mut value, mut velocity) = (0.0_f32, 0.0_f32);
        let at_rest = step_spring(&mut value, &mut velocity, 10.0, spring, MAX_SPRING_FRAME);
        assert!(at_rest || value.is_finite());
    }

    #[test]
    fn test_spring_config_sanitizes() {
        let spring = SpringConfig::new(-1.0, f32::NAN, 0.0);
        assert_eq!(spring, SpringConfig::default());
    }

    #[test]
    fn test_spring_config_clamps_ranges() {
        let stiff = SpringConfig::new(1.0e18, 10.0, 1.0e-9);
        assert_eq!(stiff.stiffness(), SPRING_STIFFNESS_RANGE.1);
        assert_eq!(stiff.mass(), SPRING_MASS_RANGE.0);
        assert_eq!(stiff.damping(), 10.0);

        let soft = SpringConfig::new(1.0e-9, 0.0, 1.0e9);
        assert_eq!(soft.stiffness(), SPRING_STIFFNESS_RANGE.0);
        assert_eq!(soft.mass(), SPRING_MASS_RANGE.1);
    }

    #[test]
    fn test_frame_after_idle_pause_restarts_timing() {
        let mut driver = AnimationDriver::new();
        let t0 = Instant::now();
        driver.frame(t0);
        assert!(driver.is_idle());

        // Host stopped sending frames; the next animation starts much later
        let pulse = driver.pulse(Channel::TrackPulse);
        driver.frame(t0 + Duration::from_secs(5));
        assert!(pulse.is_running());
        assert_eq!(driver.value(Channel::TrackPulse), 0.0);

        driver.frame(t0 + Duration::from_secs(5) + FRAME);
        assert!(pulse.is_running());
        let value = driver.value(Channel::TrackPulse);
        assert!(value > 0.0 && value < 1.0, "pulse at {value}");
    }

    #[test]
    fn test_frame_gap_is_capped() {
        let mut driver = AnimationDriver::new();
        let t0 = Instant::now();
        driver.animate_to(Channel::WheelX, 100.0);
        driver.frame(t0);
        driver.frame(t0 + Duration::from_secs(10));

        // One capped frame cannot carry the spring all the way
        let value = driver.value(Channel::WheelX);
        assert!(value > 0.0 && value < 99.0, "thumb jumped to {value}");
        assert!(driver.is_animating(Channel::WheelX));
    }

    #[test]
    fn test_easing_bounds() {
        for easing in [Easing::Linear, Easing::EaseOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }
}
