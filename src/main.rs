//! Main application entry point.
//!
//! Parses the command line, applies the global flags (debug output, file logging,
//! custom configuration directory) and dispatches to the selected command. Errors
//! are reported through the logger and turned into a failing exit code.

use anyhow::Result;

use suncycle::args::{self, CliAction, GlobalFlags, ParsedArgs};
use suncycle::commands;
use suncycle::commands::simulate::SimulateOptions;
use suncycle::config;
use suncycle::constants::*;
use suncycle::logger::{Log, LoggerGuard};
use suncycle::{log_debug, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::from_env();
    // Outlives dispatch so a failing command's error still reaches the log file
    let mut log_guard = None;

    let exit_code = match dispatch(parsed_args.action, &mut log_guard) {
        Ok(code) => code,
        Err(e) => {
            // Errors from a JSON simulation must still reach the terminal
            Log::set_enabled(true);
            log_error_exit!("{:#}", e);
            EXIT_FAILURE
        }
    };

    // process::exit skips destructors
    drop(log_guard);
    std::process::exit(exit_code);
}

fn dispatch(action: CliAction, log_guard: &mut Option<LoggerGuard>) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref())?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Run { flags, fresh } => {
            *log_guard = apply_global_flags(&flags)?;
            commands::run::run_cycle(fresh)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Simulate {
            flags,
            ticks,
            delta,
            speed,
            json,
        } => {
            *log_guard = apply_global_flags(&flags)?;
            commands::simulate::handle_simulate_command(SimulateOptions {
                ticks,
                delta,
                speed,
                json,
            })?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Status { flags } => {
            *log_guard = apply_global_flags(&flags)?;
            commands::status::handle_status_command()?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Reset { flags } => {
            *log_guard = apply_global_flags(&flags)?;
            commands::reset::handle_reset_command()?;
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Apply the flags shared by every command. The returned guard keeps file logging
/// alive and must be held until the command's outcome has been logged.
fn apply_global_flags(flags: &GlobalFlags) -> Result<Option<LoggerGuard>> {
    Log::set_debug(flags.debug_enabled);
    config::set_config_dir(flags.config_dir.clone())?;

    match &flags.log_file {
        Some(path) => {
            let guard = Log::start_file_logging(path.clone())?;
            log_debug!("Logging to {}", path);
            Ok(Some(guard))
        }
        None => Ok(None),
    }
}
