//! Rotation accumulator.
//!
//! The accumulated angle serves two purposes. It orients the light while the sun is
//! above the horizon, and it is the monotonic clock the phase machine compares against
//! its thresholds. The angle is never wrapped; it only resets when dawn is triggered.

use crate::constants::{DEGREES_PER_MINUTE, HORIZON_ANGLE, SPEED_DIVISOR};

#[derive(Debug, Clone, PartialEq)]
pub struct RotationAccumulator {
    rotated_angle: f64,
    last_step: f64,
    update_buffer: f64,
    update_threshold: f64,
}

impl RotationAccumulator {
    pub fn new(update_threshold: f64) -> Self {
        Self {
            rotated_angle: 0.0,
            last_step: 0.0,
            update_buffer: 0.0,
            update_threshold,
        }
    }

    /// Accumulate one tick of rotation and return the step taken.
    ///
    /// `step = delta_time * (speed_multiplier / 60) / 4 * day_length`. Inputs that would
    /// produce a negative or non-finite step count as no progress.
    pub fn advance(&mut self, delta_time: f64, speed_multiplier: f64, day_length: f64) -> f64 {
        let step = rotation_step(delta_time, speed_multiplier, day_length);
        self.rotated_angle += step;
        self.update_buffer += step;
        self.last_step = step;
        step
    }

    /// Drain the buffer into a rotation update when one is due.
    ///
    /// Updates are only produced while the sun is above the horizon and enough
    /// rotation has been buffered to cross the threshold.
    pub fn take_update(&mut self) -> Option<f64> {
        if self.rotated_angle < HORIZON_ANGLE && self.update_buffer >= self.update_threshold {
            self.update_buffer = 0.0;
            Some(self.rotated_angle)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.rotated_angle = 0.0;
    }

    pub fn rotated_angle(&self) -> f64 {
        self.rotated_angle
    }

    pub fn set_rotated_angle(&mut self, angle: f64) {
        self.rotated_angle = angle.max(0.0);
    }

    pub fn last_step(&self) -> f64 {
        self.last_step
    }

    pub fn update_buffer(&self) -> f64 {
        self.update_buffer
    }
}

fn rotation_step(delta_time: f64, speed_multiplier: f64, day_length: f64) -> f64 {
    let step = delta_time * (speed_multiplier / SPEED_DIVISOR) / DEGREES_PER_MINUTE * day_length;
    if step.is_finite() && step > 0.0 {
        step
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_formula() {
        let mut rotation = RotationAccumulator::new(0.0);
        // 240s at speed 60 and day length 1 is 240 simulated minutes
        let step = rotation.advance(240.0, 60.0, 1.0);
        assert_eq!(step, 60.0);
        assert_eq!(rotation.rotated_angle(), 60.0);
        assert_eq!(rotation.last_step(), 60.0);
    }

    #[test]
    fn test_day_length_scales_step() {
        let mut rotation = RotationAccumulator::new(0.0);
        assert_eq!(rotation.advance(4.0, 60.0, 2.0), 2.0);
    }

    #[test]
    fn test_bad_inputs_count_as_no_progress() {
        let mut rotation = RotationAccumulator::new(0.0);
        assert_eq!(rotation.advance(-1.0, 60.0, 1.0), 0.0);
        assert_eq!(rotation.advance(f64::NAN, 60.0, 1.0), 0.0);
        assert_eq!(rotation.advance(1.0, -60.0, 1.0), 0.0);
        assert_eq!(rotation.advance(f64::INFINITY, 60.0, 1.0), 0.0);
        assert_eq!(rotation.rotated_angle(), 0.0);
        assert_eq!(rotation.update_buffer(), 0.0);
    }

    #[test]
    fn test_buffered_update_threshold() {
        let mut rotation = RotationAccumulator::new(1.0);
        // 0.5 degrees of rotation: below the threshold
        rotation.advance(2.0, 60.0, 0.5);
        rotation.advance(2.0, 60.0, 0.5);
        assert_eq!(rotation.take_update(), None);
        assert_eq!(rotation.update_buffer(), 0.5);

        // A further 0.6 degrees crosses it
        rotation.advance(2.4, 60.0, 1.0);
        let angle = rotation.take_update().expect("update due");
        assert!((angle - 1.1).abs() < 1e-12);
        assert_eq!(angle, rotation.rotated_angle());
        assert_eq!(rotation.update_buffer(), 0.0);
        assert_eq!(rotation.take_update(), None);
    }

    #[test]
    fn test_no_update_below_horizon() {
        let mut rotation = RotationAccumulator::new(1.0);
        rotation.set_rotated_angle(178.5);
        rotation.advance(8.0, 60.0, 1.0);
        assert_eq!(rotation.rotated_angle(), 180.5);
        assert_eq!(rotation.take_update(), None);

        // The angle keeps accumulating so the full cycle can still be detected
        rotation.advance(720.0, 60.0, 1.0);
        assert_eq!(rotation.rotated_angle(), 360.5);
        assert_eq!(rotation.take_update(), None);
    }

    #[test]
    fn test_reset_only_clears_angle() {
        let mut rotation = RotationAccumulator::new(10.0);
        rotation.advance(4.0, 60.0, 1.0);
        rotation.reset();
        assert_eq!(rotation.rotated_angle(), 0.0);
        assert_eq!(rotation.update_buffer(), 1.0);
    }
}
