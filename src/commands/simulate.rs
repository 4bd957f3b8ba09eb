//! Implementation of the simulate command.
//!
//! Runs a fresh cycle for a fixed number of ticks on a [`SteppedClock`], as fast as
//! possible. Frames are either logged as they change, followed by a summary of the
//! phase changes, or streamed to stdout as JSON lines.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::io::{self, BufWriter, Write};

use crate::config::Config;
use crate::constants::*;
use crate::cycle::{DayCycle, Phase};
use crate::logger::Log;
use crate::sink::{ConsoleSink, JsonLinesSink, LightSink};
use crate::time_source::{ClockAdapter, SteppedClock, parse_time_of_day};

/// Options of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateOptions {
    pub ticks: u64,
    /// Seconds per tick; the default step when unset
    pub delta: Option<f64>,
    /// Speed multiplier; the configured one when unset
    pub speed: Option<f64>,
    pub json: bool,
}

/// What happened during a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    /// Tick number (1-based) and phase entered, in order
    pub phase_changes: Vec<(u64, Phase)>,
    pub final_phase: Phase,
    pub final_angle: f64,
}

impl SimulationSummary {
    /// Completed day/night cycles, counted as returns to dawn.
    pub fn completed_cycles(&self) -> usize {
        self.phase_changes
            .iter()
            .filter(|(_, phase)| *phase == Phase::Dawn)
            .count()
    }
}

/// Handle the simulate command.
pub fn handle_simulate_command(options: SimulateOptions) -> Result<()> {
    // JSON output owns stdout
    if options.json {
        Log::set_enabled(false);
    } else {
        log_version!();
    }

    let config = Config::load()?;
    let settings = config.cycle_settings()?;
    let start = match config.start_time {
        Some(_) => config.start_time()?,
        None => parse_time_of_day(DEFAULT_START_TIME)?,
    };
    let delta = options.delta.unwrap_or(DEFAULT_SIMULATE_DELTA);
    let speed = options.speed.unwrap_or_else(|| config.speed_multiplier());

    let mut clock = SteppedClock::new(start, delta, speed);
    let mut cycle = DayCycle::new(settings)?;

    if options.json {
        let stdout = io::stdout().lock();
        let mut sink = JsonLinesSink::new(BufWriter::new(stdout));
        simulate_ticks(&mut cycle, &mut clock, &mut sink, options.ticks)?;
        sink.into_inner()
            .flush()
            .context("Failed to flush simulation output")?;
        return Ok(());
    }

    log_block_start!(
        "Simulating {} ticks of {}s at {}x speed from {}",
        options.ticks,
        delta,
        speed,
        start.format("%H:%M:%S")
    );

    let mut sink = ConsoleSink::new();
    let summary = simulate_ticks(&mut cycle, &mut clock, &mut sink, options.ticks)?;
    Log::set_simulated_time(None);

    log_summary(&summary, clock.time_of_day());
    Ok(())
}

/// Tick `cycle` `ticks` times, recording every phase change.
pub fn simulate_ticks<S: LightSink + ?Sized>(
    cycle: &mut DayCycle,
    clock: &mut SteppedClock,
    sink: &mut S,
    ticks: u64,
) -> Result<SimulationSummary> {
    let mut phase_changes = Vec::new();
    let mut phase = cycle.phase();

    for tick in 1..=ticks {
        cycle
            .tick(clock, sink)
            .with_context(|| format!("Simulation failed at tick {tick}"))?;
        Log::set_simulated_time(Some(clock.time_of_day()));

        if cycle.phase() != phase {
            phase = cycle.phase();
            phase_changes.push((tick, phase));
        }
    }

    log_debug!(
        "Simulated {} ticks, final hour {:02}",
        ticks,
        clock.current_hour()
    );

    Ok(SimulationSummary {
        ticks,
        phase_changes,
        final_phase: cycle.phase(),
        final_angle: cycle.rotated_angle(),
    })
}

fn log_summary(summary: &SimulationSummary, end: NaiveTime) {
    log_block_start!("Simulation complete at {}", end.format("%H:%M:%S"));
    if summary.phase_changes.is_empty() {
        log_indented!("No phase changes");
    }
    for (tick, phase) in &summary.phase_changes {
        log_indented!("tick {:>6}: {}{}", tick, phase.symbol(), phase);
    }
    log_indented!(
        "Finished in {} at {:.2}° after {} completed cycles",
        summary.final_phase,
        summary.final_angle,
        summary.completed_cycles()
    );
    log_end!();
}
