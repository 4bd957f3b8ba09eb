//! Clock abstraction feeding the cycle.
//!
//! The cycle is driven by a [`ClockAdapter`] handed to every tick rather than by
//! ambient global time, so the same core runs against the real clock, a fast
//! fixed-step simulation, or a scripted test clock.
//!
//! All clocks here share the same model of simulated time: a time of day that advances
//! by `delta_time * speed_multiplier` seconds per tick. At the default multiplier of 60
//! one real second is one simulated minute, matching the rotation rate of
//! 4 degrees per simulated minute.

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, NaiveTime, Timelike};
use std::time::Instant;

/// Source of time for one tick of the cycle.
#[cfg_attr(test, mockall::automock)]
pub trait ClockAdapter {
    /// Real seconds elapsed since the previous tick.
    fn delta_time(&mut self) -> f64;

    /// Simulation speed multiplier (simulated minutes per real second at 1.0 = 1/60).
    fn speed_multiplier(&self) -> f64;

    /// Current simulated hour of day, `0..=23`.
    fn current_hour(&self) -> u32;
}

/// Simulated time of day advanced by scaled deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedDay {
    time: NaiveTime,
    // Sub-nanosecond remainder carried between advances
    carry: f64,
}

impl SimulatedDay {
    pub fn new(start: NaiveTime) -> Self {
        Self {
            time: start,
            carry: 0.0,
        }
    }

    /// Advance by `seconds` of simulated time, wrapping at midnight.
    pub fn advance(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        let total = seconds + self.carry;
        let nanos = (total * 1_000_000_000.0).floor();
        self.carry = total - nanos / 1_000_000_000.0;
        // Only the position within the day matters
        let nanos = (nanos % 86_400_000_000_000.0) as i64;
        self.time += ChronoDuration::nanoseconds(nanos);
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

/// Parse a time of day in `HH:MM:SS` format.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .with_context(|| format!("Invalid time '{s}'. Use HH:MM:SS"))
}

/// Real-time clock: deltas are measured with a monotonic [`Instant`].
pub struct WallClock {
    last: Instant,
    speed_multiplier: f64,
    day: SimulatedDay,
}

impl WallClock {
    pub fn new(start: NaiveTime, speed_multiplier: f64) -> Self {
        Self {
            last: Instant::now(),
            speed_multiplier,
            day: SimulatedDay::new(start),
        }
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.day.time()
    }
}

impl ClockAdapter for WallClock {
    fn delta_time(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.day.advance(delta * self.speed_multiplier);
        delta
    }

    fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    fn current_hour(&self) -> u32 {
        self.day.hour()
    }
}

/// Fixed-step clock for fast simulation: every tick reports the same delta.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    delta: f64,
    speed_multiplier: f64,
    day: SimulatedDay,
    ticks: u64,
}

impl SteppedClock {
    pub fn new(start: NaiveTime, delta: f64, speed_multiplier: f64) -> Self {
        Self {
            delta,
            speed_multiplier,
            day: SimulatedDay::new(start),
            ticks: 0,
        }
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.day.time()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl ClockAdapter for SteppedClock {
    fn delta_time(&mut self) -> f64 {
        self.ticks += 1;
        self.day.advance(self.delta * self.speed_multiplier);
        self.delta
    }

    fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    fn current_hour(&self) -> u32 {
        self.day.hour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        parse_time_of_day(s).unwrap()
    }

    #[test]
    fn test_simulated_day_advances() {
        let mut day = SimulatedDay::new(time("05:59:00"));
        day.advance(60.0);
        assert_eq!(day.time(), time("06:00:00"));
        assert_eq!(day.hour(), 6);
    }

    #[test]
    fn test_simulated_day_wraps_midnight() {
        let mut day = SimulatedDay::new(time("23:30:00"));
        day.advance(3600.0);
        assert_eq!(day.time(), time("00:30:00"));

        day.advance(86_400.0 * 3.0);
        assert_eq!(day.time(), time("00:30:00"));
    }

    #[test]
    fn test_simulated_day_ignores_bad_input() {
        let mut day = SimulatedDay::new(time("12:00:00"));
        day.advance(-5.0);
        day.advance(f64::NAN);
        assert_eq!(day.time(), time("12:00:00"));
    }

    #[test]
    fn test_stepped_clock() {
        let mut clock = SteppedClock::new(time("05:00:00"), 1.0, 60.0);
        for _ in 0..60 {
            assert_eq!(clock.delta_time(), 1.0);
        }
        assert_eq!(clock.ticks(), 60);
        assert_eq!(clock.current_hour(), 6);
        assert_eq!(clock.speed_multiplier(), 60.0);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert!(parse_time_of_day("06:30:00").is_ok());
        assert!(parse_time_of_day("6am").is_err());
        assert!(parse_time_of_day("25:00:00").is_err());
    }
}
