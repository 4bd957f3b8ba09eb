//! Scriptable clock and recording sink for driving the cycle in tests.
//!
//! Available to unit tests and, through the `testing-support` feature, to the
//! integration tests under `tests/`.

use anyhow::Result;

use crate::sink::{LightFrame, LightSink};
use crate::time_source::ClockAdapter;

/// Clock whose readings are set directly by the test.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    pub delta: f64,
    pub speed: f64,
    pub hour: u32,
}

impl ManualClock {
    pub fn new(delta: f64, speed: f64, hour: u32) -> Self {
        Self { delta, speed, hour }
    }

    /// Clock advancing the rotation by `degrees` per tick at `day_length` 1.0.
    pub fn degrees_per_tick(degrees: f64, hour: u32) -> Self {
        // 4 real seconds at speed 60 rotate one degree
        Self::new(degrees * 4.0, 60.0, hour)
    }

    pub fn set_hour(&mut self, hour: u32) {
        self.hour = hour;
    }
}

impl ClockAdapter for ManualClock {
    fn delta_time(&mut self) -> f64 {
        self.delta
    }

    fn speed_multiplier(&self) -> f64 {
        self.speed
    }

    fn current_hour(&self) -> u32 {
        self.hour
    }
}

/// Sink keeping every frame it receives, optionally failing on demand.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<LightFrame>,
    pub fail_next: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation updates emitted so far, in order.
    pub fn rotations(&self) -> Vec<f64> {
        self.frames.iter().filter_map(|frame| frame.rotation).collect()
    }
}

impl LightSink for RecordingSink {
    fn apply(&mut self, frame: &LightFrame) -> Result<()> {
        if self.fail_next {
            self.fail_next = false;
            anyhow::bail!("recording sink asked to fail");
        }
        self.frames.push(*frame);
        Ok(())
    }
}
