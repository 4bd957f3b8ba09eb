//! Command-line argument parsing and processing.
//!
//! Global flags (`--config`, `--debug`, `--log`, `--help`, `--version`) may appear
//! anywhere on the command line. The first non-flag argument selects the command;
//! with no command the real-time cycle is run.

/// Flags shared by every command.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GlobalFlags {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub log_file: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the cycle in real time until interrupted
    Run { flags: GlobalFlags, fresh: bool },
    /// Run a fixed number of ticks on a stepped clock
    Simulate {
        flags: GlobalFlags,
        ticks: u64,
        delta: Option<f64>,
        speed: Option<f64>,
        json: bool,
    },
    /// Print the saved cycle state
    Status { flags: GlobalFlags },
    /// Delete the saved cycle state
    Reset { flags: GlobalFlags },
    /// Show help for a specific command (or general help)
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

fn usage_error(message: &str) -> ParsedArgs {
    log_error!("{}", message);
    ParsedArgs {
        action: CliAction::ShowHelpDueToError,
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid value for {flag}: '{value}'"))
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Convert to vector for easier indexed access
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        // Help and version take precedence over everything else
        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut flags = GlobalFlags::default();
        let mut positional: Vec<String> = Vec::new();
        let mut fresh = false;
        let mut json = false;
        let mut delta: Option<f64> = None;
        let mut speed: Option<f64> = None;

        let mut iter = args_vec.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" | "-d" => flags.debug_enabled = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => flags.config_dir = Some(dir.clone()),
                    None => return usage_error("--config requires a directory"),
                },
                "--log" | "-l" => match iter.next() {
                    Some(file) => flags.log_file = Some(file.clone()),
                    None => return usage_error("--log requires a file path"),
                },
                "--fresh" => fresh = true,
                "--json" => json = true,
                "--delta" => match parse_number::<f64>("--delta", iter.next()) {
                    Ok(value) => delta = Some(value),
                    Err(message) => return usage_error(&message),
                },
                "--speed" => match parse_number::<f64>("--speed", iter.next()) {
                    Ok(value) => speed = Some(value),
                    Err(message) => return usage_error(&message),
                },
                other if other.starts_with('-') => {
                    return usage_error(&format!("Unknown option: {other}"));
                }
                other => positional.push(other.to_string()),
            }
        }

        let command = positional.first().map(String::as_str);
        let operands = positional.get(1..).unwrap_or_default();

        // Command-specific flags are only accepted by their command
        let simulate_flags = json || delta.is_some() || speed.is_some();
        if simulate_flags && !matches!(command, Some("simulate" | "s")) {
            return usage_error("--json, --delta and --speed are only valid with 'simulate'");
        }
        if fresh && !matches!(command, None | Some("run")) {
            return usage_error("--fresh is only valid with 'run'");
        }

        let action = match command {
            None | Some("run") => {
                if !operands.is_empty() {
                    return usage_error("'run' takes no arguments");
                }
                CliAction::Run { flags, fresh }
            }
            Some("simulate" | "s") => {
                let ticks = match operands {
                    [ticks] => match ticks.parse::<u64>() {
                        Ok(ticks) if ticks > 0 => ticks,
                        _ => {
                            return usage_error(&format!(
                                "Tick count must be a positive integer (got '{ticks}')"
                            ));
                        }
                    },
                    [] => return usage_error("'simulate' requires a tick count"),
                    _ => return usage_error("'simulate' takes exactly one tick count"),
                };

                if let Some(delta) = delta
                    && !(delta.is_finite() && delta > 0.0)
                {
                    return usage_error(&format!("--delta must be greater than zero (got {delta})"));
                }
                if let Some(speed) = speed
                    && !(speed.is_finite() && speed >= 0.0)
                {
                    return usage_error(&format!("--speed must be zero or positive (got {speed})"));
                }

                CliAction::Simulate {
                    flags,
                    ticks,
                    delta,
                    speed,
                    json,
                }
            }
            Some("status" | "st") if operands.is_empty() => CliAction::Status { flags },
            Some("reset") if operands.is_empty() => CliAction::Reset { flags },
            Some("help") => match operands {
                [] => CliAction::Help { command: None },
                [topic] => CliAction::Help {
                    command: Some(topic.clone()),
                },
                _ => return usage_error("'help' takes at most one command"),
            },
            Some(cmd @ ("status" | "st" | "reset")) => {
                return usage_error(&format!("'{cmd}' takes no arguments"));
            }
            Some(unknown) => return usage_error(&format!("Unknown command: {unknown}")),
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("suncycle [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-l, --log <file>       Write log output to a file");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("run [--fresh]          Run the cycle in real time (default)");
    log_indented!("simulate, s <ticks>    Run ticks on a fixed-step clock");
    log_indented!("status, st             Show the saved cycle state");
    log_indented!("reset                  Delete the saved cycle state");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}
