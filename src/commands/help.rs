//! Help command implementation for suncycle.
//!
//! Shows command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => crate::args::display_help(),
        Some("run") => display_run_help(),
        Some("simulate") | Some("s") => display_simulate_help(),
        Some("status") | Some("st") => display_status_help(),
        Some("reset") => display_reset_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            crate::args::display_help();
        }
    }
    Ok(())
}

fn display_run_help() {
    log_version!();
    log_block_start!("run - Drive the cycle in real time");
    log_block_start!("Usage: suncycle [run] [--fresh]");
    log_block_start!("Options:");
    log_indented!("--fresh  Discard the saved state and start at dawn");
    log_block_start!("Behavior:");
    log_indented!("Ticks every tick_interval ms until SIGINT or SIGTERM.");
    log_indented!("Simulated time starts at start_time (or the local time)");
    log_indented!("and advances speed_multiplier times faster than real time.");
    log_indented!("The cycle state is saved on exit when persist_state is on.");
    log_end!();
}

fn display_simulate_help() {
    log_version!();
    log_block_start!("simulate - Run the cycle on a fixed-step clock");
    log_block_start!("Usage: suncycle simulate <ticks> [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--delta <s>  Real seconds per tick (default 1.0)");
    log_indented!("--speed <x>  Speed multiplier (default from config)");
    log_indented!("--json       Print one JSON object per frame");
    log_block_start!("Examples:");
    log_indented!("# One degree per tick, a little over one full day");
    log_indented!("suncycle simulate 400 --delta 4");
    log_pipe!();
    log_indented!("# Stream frames for another program");
    log_indented!("suncycle simulate 1000 --json > frames.jsonl");
    log_end!();
}

fn display_status_help() {
    log_version!();
    log_block_start!("status - Show the saved cycle state");
    log_block_start!("Usage: suncycle status");
    log_end!();
}

fn display_reset_help() {
    log_version!();
    log_block_start!("reset - Delete the saved cycle state");
    log_block_start!("Usage: suncycle reset");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: suncycle help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_end!();
}
