//! The day/night cycle: phase state machine, rotation accumulator and value ramps.
//!
//! [`DayCycle`] is polled once per external clock tick. Each tick runs the same fixed
//! sequence, and reordering it changes visible behavior:
//!
//! 1. **Rotation**: the clock's delta becomes a rotation step, accumulated into the
//!    rotated angle and the visual update buffer.
//! 2. **Transitions**: the rotated angle and the dawn-hour gate decide whether dusk or
//!    dawn is triggered and whether dawn's ramps may start.
//! 3. **Ramps**: running color and intensity ramps advance by the rotation step. A
//!    completed color ramp moves the phase along ([`Phase::after_color_ramp`]).
//! 4. **Sink**: the resulting [`LightFrame`] is handed to the light sink.
//!
//! Ramps started in step 2 take their first step on the following tick, so the start
//! value of every ramp is visible for one frame.
//!
//! ## Phase Flow
//! - **Dawn**: rotation resets to zero, color jumps to the dawn color and intensity to
//!   zero. Nothing moves until the clock reaches the dawn hour; then both ramps head
//!   for day values. Color ramp completion enters Day.
//! - **Day**: stable until the rotated angle passes the dusk angle.
//! - **Dusk**: both ramps head for the dusk color and zero intensity. Color ramp
//!   completion enters Night.
//! - **Night**: stable until the rotated angle completes a full turn, which triggers
//!   Dawn again.

pub mod color;
pub mod persisted;
pub mod phase;
pub mod ramp;
pub mod rotation;

pub use color::Rgb;
pub use persisted::PersistedState;
pub use phase::Phase;
pub use ramp::{ColorRamp, IntensityRamp, Lerp, Ramp, RampStatus};
pub use rotation::RotationAccumulator;

use anyhow::{Context, Result};

use crate::config::validation::validate_settings;
use crate::constants::*;
use crate::sink::{LightFrame, LightSink};
use crate::time_source::ClockAdapter;

/// Resolved, validated parameters of the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSettings {
    pub dawn_color: Rgb,
    pub day_color: Rgb,
    pub dusk_color: Rgb,
    pub day_intensity: f64,
    /// Dawn ramps wait until the clock's hour of day reaches this value
    pub dawn_hour: u32,
    /// Ramp durations, in degrees of rotation
    pub color_transition_duration: f64,
    pub intensity_transition_duration: f64,
    pub day_length: f64,
    /// Minimum buffered rotation before a visual rotation update is emitted
    pub rotation_update_threshold: f64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            dawn_color: DEFAULT_DAWN_COLOR,
            day_color: DEFAULT_DAY_COLOR,
            dusk_color: DEFAULT_DUSK_COLOR,
            day_intensity: DEFAULT_DAY_INTENSITY,
            dawn_hour: DEFAULT_DAWN_HOUR,
            color_transition_duration: DEFAULT_COLOR_TRANSITION_DURATION,
            intensity_transition_duration: DEFAULT_INTENSITY_TRANSITION_DURATION,
            day_length: DEFAULT_DAY_LENGTH,
            rotation_update_threshold: DEFAULT_ROTATION_UPDATE_THRESHOLD,
        }
    }
}

/// Point-in-time view of the cycle's scalar state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    pub rotated_angle: f64,
    /// Rotation step taken on the most recent tick
    pub rotation_step: f64,
    pub update_buffer: f64,
    pub phase: Phase,
    pub initialized: bool,
}

/// The day/night cycle state machine.
#[derive(Debug, Clone)]
pub struct DayCycle {
    settings: CycleSettings,
    rotation: RotationAccumulator,
    phase: Phase,
    initialized: bool,
    awaiting_dawn_hour: bool,
    color: ColorRamp,
    intensity: IntensityRamp,
    // Phase the color ramp was started in; keys the completion transition
    color_origin: Phase,
    pending_rotation: Option<f64>,
}

impl DayCycle {
    /// Create a fresh cycle. Dawn is triggered immediately.
    pub fn new(settings: CycleSettings) -> Result<Self> {
        validate_settings(&settings)?;
        let mut cycle = Self::idle(settings);
        cycle.trigger_dawn();
        Ok(cycle)
    }

    /// Rebuild a cycle from persisted state.
    ///
    /// An uninitialized state starts a fresh cycle. Otherwise every ramp still short
    /// of its desired value resumes from the saved current value, unless dawn is still
    /// waiting for its hour, in which case the ramps stay parked behind the gate.
    pub fn restore(settings: CycleSettings, state: &PersistedState) -> Result<Self> {
        if !state.initialized {
            log_decorated!("Saved state is uninitialized, starting a fresh cycle");
            return Self::new(settings);
        }

        validate_settings(&settings)?;
        state.validate().context("Invalid persisted cycle state")?;

        let mut cycle = Self::idle(settings);
        cycle.initialized = true;
        cycle.phase = state.phase;
        cycle.color_origin = state.phase;
        cycle.rotation.set_rotated_angle(state.rotated_angle);
        cycle.color.set(state.current_color, state.desired_color);
        cycle
            .intensity
            .set(state.current_intensity, state.desired_intensity);
        cycle.awaiting_dawn_hour = state.phase == Phase::Dawn && state.awaiting_dawn_hour;

        log_block_start!(
            "Restored {}{} at {:.2}°",
            state.phase.symbol(),
            state.phase,
            state.rotated_angle
        );

        if cycle.awaiting_dawn_hour {
            log_indented!("Waiting for dawn hour {:02}:00", cycle.settings.dawn_hour);
            return Ok(cycle);
        }

        if cycle.color.is_short_of_target() {
            log_indented!(
                "Resuming color {} → {}",
                state.current_color,
                state.desired_color
            );
            cycle.color.resume();
        } else if let Some(next) = state.phase.after_color_ramp() {
            // Saved right as the color ramp landed; finish the edge it would have taken
            cycle.enter(next);
        }

        if cycle.intensity.is_short_of_target() {
            log_indented!(
                "Resuming intensity {:.2} → {:.2}",
                state.current_intensity,
                state.desired_intensity
            );
            cycle.intensity.resume();
        }

        Ok(cycle)
    }

    fn idle(settings: CycleSettings) -> Self {
        Self {
            rotation: RotationAccumulator::new(settings.rotation_update_threshold),
            phase: Phase::Dawn,
            initialized: false,
            awaiting_dawn_hour: false,
            color: ColorRamp::new(settings.dawn_color, settings.color_transition_duration),
            intensity: IntensityRamp::new(0.0, settings.intensity_transition_duration),
            color_origin: Phase::Dawn,
            pending_rotation: None,
            settings,
        }
    }

    /// Advance the cycle by one clock tick and hand the resulting frame to `sink`.
    ///
    /// Bad clock readings (negative, NaN or infinite) count as zero progress for the
    /// tick. A sink error is returned after the cycle has already advanced.
    pub fn tick<C, S>(&mut self, clock: &mut C, sink: &mut S) -> Result<LightFrame>
    where
        C: ClockAdapter + ?Sized,
        S: LightSink + ?Sized,
    {
        let delta = sanitize_clock_reading(clock.delta_time(), "delta time");
        let speed = sanitize_clock_reading(clock.speed_multiplier(), "speed multiplier");

        // A dawn triggered between ticks emits its zero rotation unless superseded
        let mut rotation = self.pending_rotation.take();

        let step = self.rotation.advance(delta, speed, self.settings.day_length);
        if let Some(angle) = self.rotation.take_update() {
            rotation = Some(angle);
        }

        let ramps_started = self.check_transitions(clock.current_hour());
        if let Some(angle) = self.pending_rotation.take() {
            rotation = Some(angle);
        }

        if !ramps_started {
            self.step_ramps(step);
        }

        let frame = LightFrame {
            rotation,
            color: self.color.current(),
            intensity: self.intensity.current(),
        };
        sink.apply(&frame).context("Light sink failed to apply frame")?;
        Ok(frame)
    }

    /// Returns true when ramps were started, which defers their first step.
    fn check_transitions(&mut self, hour: u32) -> bool {
        let angle = self.rotation.rotated_angle();
        let mut ramps_started = false;

        if self.phase == Phase::Day && angle > DUSK_ANGLE {
            self.trigger_dusk();
            ramps_started = true;
        }

        if self.phase == Phase::Night && angle >= FULL_CYCLE_ANGLE {
            self.trigger_dawn();
        }

        if self.awaiting_dawn_hour && hour >= self.settings.dawn_hour {
            self.release_dawn();
            ramps_started = true;
        }

        ramps_started
    }

    fn step_ramps(&mut self, step: f64) {
        if self.color.step(step) == RampStatus::Completed
            && let Some(next) = self.color_origin.after_color_ramp()
        {
            self.enter(next);
        }
        self.intensity.step(step);
    }

    /// Reset the cycle to dawn.
    ///
    /// The rotation restarts at zero (emitted as an immediate rotation on the next
    /// frame), color jumps to the dawn color and intensity to zero. Both ramps are
    /// parked until the clock reaches the dawn hour.
    pub fn trigger_dawn(&mut self) {
        self.rotation.reset();
        self.pending_rotation = Some(0.0);
        self.color.set(self.settings.dawn_color, self.settings.day_color);
        self.intensity.set(0.0, self.settings.day_intensity);
        self.awaiting_dawn_hour = true;
        self.initialized = true;
        self.enter(Phase::Dawn);
        log_indented!("Waiting for dawn hour {:02}:00", self.settings.dawn_hour);
    }

    /// Start dusk: both ramps head from their current values toward the dusk color
    /// and zero intensity. A dusk ramp already in flight restarts from where it is.
    pub fn trigger_dusk(&mut self) {
        self.color.start(self.color.current(), self.settings.dusk_color);
        self.intensity.start(self.intensity.current(), 0.0);
        self.color_origin = Phase::Dusk;
        self.enter(Phase::Dusk);
    }

    fn release_dawn(&mut self) {
        self.awaiting_dawn_hour = false;
        self.color.resume();
        self.intensity.resume();
        self.color_origin = Phase::Dawn;
        log_decorated!(
            "Dawn hour reached, ramping to {} at intensity {:.2}",
            self.color.desired(),
            self.intensity.desired()
        );
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        log_block_start!(
            "Entering {}{} at {:.2}°",
            phase.symbol(),
            phase,
            self.rotation.rotated_angle()
        );
    }

    /// State to save for a later [`DayCycle::restore`].
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            rotated_angle: self.rotation.rotated_angle(),
            phase: self.phase,
            current_color: self.color.current(),
            desired_color: self.color.desired(),
            current_intensity: self.intensity.current(),
            desired_intensity: self.intensity.desired(),
            initialized: self.initialized,
            awaiting_dawn_hour: self.awaiting_dawn_hour,
        }
    }

    pub fn state(&self) -> CycleState {
        CycleState {
            rotated_angle: self.rotation.rotated_angle(),
            rotation_step: self.rotation.last_step(),
            update_buffer: self.rotation.update_buffer(),
            phase: self.phase,
            initialized: self.initialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotated_angle(&self) -> f64 {
        self.rotation.rotated_angle()
    }

    pub fn color(&self) -> Rgb {
        self.color.current()
    }

    pub fn intensity(&self) -> f64 {
        self.intensity.current()
    }

    pub fn color_ramp(&self) -> &ColorRamp {
        &self.color
    }

    pub fn intensity_ramp(&self) -> &IntensityRamp {
        &self.intensity
    }

    pub fn is_awaiting_dawn_hour(&self) -> bool {
        self.awaiting_dawn_hour
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }
}

fn sanitize_clock_reading(value: f64, what: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log_debug!("Ignoring invalid clock {}: {}", what, value);
        0.0
    }
}
