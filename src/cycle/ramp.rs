//! Value ramps for color and intensity.
//!
//! A ramp linearly interpolates from a captured start value to a target over a fixed
//! duration. Progress is not wall-clock time: the cycle feeds each ramp the rotation
//! step of the tick, so ramps speed up and slow down together with the sun.
//!
//! A ramp does not block. [`Ramp::step`] advances it once and reports whether it is
//! still running, which lets the cycle poll both ramps from the same tick.

use super::color::Rgb;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy + PartialEq {
    fn lerp(from: Self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * t
    }
}

impl Lerp for Rgb {
    fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
        Rgb::lerp(from, to, t)
    }
}

/// Result of advancing a ramp by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStatus {
    /// No ramp is in flight.
    Idle,
    /// The ramp moved but has not reached its target.
    Running,
    /// The ramp reached its target on this step.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Progress<T> {
    from: T,
    elapsed: f64,
}

/// A single-slot ramp. Starting it again while in flight overwrites the running
/// ramp in place with the new start and target.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp<T: Lerp> {
    current: T,
    desired: T,
    duration: f64,
    progress: Option<Progress<T>>,
}

pub type ColorRamp = Ramp<Rgb>;
pub type IntensityRamp = Ramp<f64>;

impl<T: Lerp> Ramp<T> {
    /// Create an idle ramp resting at `value`. `duration` must be positive; it is
    /// checked by configuration validation before a ramp is ever built.
    pub fn new(value: T, duration: f64) -> Self {
        Self {
            current: value,
            desired: value,
            duration,
            progress: None,
        }
    }

    /// Begin ramping from `from` to `to`, replacing any ramp in flight.
    pub fn start(&mut self, from: T, to: T) {
        self.current = from;
        self.desired = to;
        self.progress = Some(Progress { from, elapsed: 0.0 });
    }

    /// Restart toward the desired value from wherever `current` is now.
    pub fn resume(&mut self) {
        self.start(self.current, self.desired);
    }

    /// Advance by `delta` progress units.
    pub fn step(&mut self, delta: f64) -> RampStatus {
        let Some(progress) = self.progress.as_mut() else {
            return RampStatus::Idle;
        };

        progress.elapsed += delta.max(0.0);
        if progress.elapsed >= self.duration {
            // Exact assignment; no interpolation residue at the end
            self.current = self.desired;
            self.progress = None;
            return RampStatus::Completed;
        }

        let t = (progress.elapsed / self.duration).clamp(0.0, 1.0);
        self.current = T::lerp(progress.from, self.desired, t);
        RampStatus::Running
    }

    pub fn is_running(&self) -> bool {
        self.progress.is_some()
    }

    /// True when the value still differs from its target.
    pub fn is_short_of_target(&self) -> bool {
        self.current != self.desired
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn desired(&self) -> T {
        self.desired
    }

    /// Progress accumulated by the ramp in flight.
    pub fn elapsed(&self) -> Option<f64> {
        self.progress.map(|p| p.elapsed)
    }

    /// Overwrite both values without starting a ramp.
    pub fn set(&mut self, current: T, desired: T) {
        self.current = current;
        self.desired = desired;
        self.progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_ramp_does_nothing() {
        let mut ramp = IntensityRamp::new(0.4, 2.0);
        assert_eq!(ramp.step(1.0), RampStatus::Idle);
        assert_eq!(ramp.current(), 0.4);
        assert!(!ramp.is_running());
    }

    #[test]
    fn test_intensity_ramp_interpolates_linearly() {
        let mut ramp = IntensityRamp::new(0.0, 4.0);
        ramp.start(0.0, 1.0);

        assert_eq!(ramp.step(1.0), RampStatus::Running);
        assert_eq!(ramp.current(), 0.25);
        assert_eq!(ramp.step(1.0), RampStatus::Running);
        assert_eq!(ramp.current(), 0.5);
        assert_eq!(ramp.elapsed(), Some(2.0));
    }

    #[test]
    fn test_completion_is_exact() {
        let mut ramp = ColorRamp::new(Rgb::BLACK, 0.3);
        let target = Rgb::new(0.1, 0.2, 0.3);
        ramp.start(Rgb::BLACK, target);

        let mut status = RampStatus::Running;
        while status == RampStatus::Running {
            status = ramp.step(0.1);
        }

        assert_eq!(status, RampStatus::Completed);
        assert_eq!(ramp.current(), target);
        assert!(!ramp.is_running());
        assert_eq!(ramp.step(0.1), RampStatus::Idle);
    }

    #[test]
    fn test_overshooting_step_lands_on_target() {
        let mut ramp = IntensityRamp::new(1.0, 1.0);
        ramp.start(1.0, 0.0);
        assert_eq!(ramp.step(5.0), RampStatus::Completed);
        assert_eq!(ramp.current(), 0.0);
    }

    #[test]
    fn test_restart_captures_mid_transition_value() {
        let mut ramp = IntensityRamp::new(0.0, 4.0);
        ramp.start(0.0, 1.0);
        ramp.step(2.0);
        assert_eq!(ramp.current(), 0.5);

        ramp.start(ramp.current(), 0.0);
        assert_eq!(ramp.elapsed(), Some(0.0));
        ramp.step(2.0);
        assert_eq!(ramp.current(), 0.25);
    }

    #[test]
    fn test_resume_continues_from_current() {
        let mut ramp = IntensityRamp::new(0.0, 2.0);
        ramp.set(0.3, 0.5);
        assert!(ramp.is_short_of_target());

        ramp.resume();
        ramp.step(1.0);
        assert!((ramp.current() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_negative_delta_makes_no_progress() {
        let mut ramp = IntensityRamp::new(0.0, 1.0);
        ramp.start(0.0, 1.0);
        assert_eq!(ramp.step(-3.0), RampStatus::Running);
        assert_eq!(ramp.current(), 0.0);
    }
}
