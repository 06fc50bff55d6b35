//! # Croupier CLI Library
//!
//! Command-line surface for the croupier casino simulations. Each subcommand
//! builds a trial function from `croupier-ai`, runs it through the
//! `croupier-engine` Monte Carlo driver and prints the resulting statistics.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand. The `croupier` binary
//! is a thin wrapper around it.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["croupier", "blackjack", "--iterations", "1000", "--seed", "42"];
//! let code = croupier_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `blackjack`: Strategy simulation plus dealer bust rates by up card
//! - `rtb`: Ride the Bus cash-out strategies ranked by expected value
//! - `slots`: Slot machine return to player
//! - `all`: Every game in sequence with one seed
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;

use cli::{CroupierCli, Commands};
use commands::{
    handle_all_command, handle_blackjack_command, handle_cfg_command, handle_rtb_command,
    handle_slots_command,
};

pub use commands::BREAK_AFTER_ENV;
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for reports (typically `stdout`)
/// * `err` - Output stream for errors and warnings (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors (a failed trial included),
/// `130` when a run stopped early and printed partial statistics.
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["croupier", "slots", "--iterations", "200", "--seed", "7"];
/// let mut out = Vec::new();
/// let code = croupier_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Return to player"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CroupierCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Croupier casino simulator");
            write_or_exit!(err, "Usage: croupier <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in Commands::NAMES {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: croupier --help");
            return exit_code::ERROR;
        }
    };

    let result = match &cli.cmd {
        Commands::Blackjack {
            run,
            table,
            bet,
            strategy,
            json,
        } => handle_blackjack_command(run, table, *bet, strategy, *json, out, err),
        Commands::Rtb {
            run,
            strategy,
            json,
        } => handle_rtb_command(run, strategy, *json, out, err),
        Commands::Slots {
            run,
            reels,
            symbols,
            bet,
            json,
        } => handle_slots_command(run, *reels, *symbols, *bet, *json, out, err),
        Commands::All { run } => handle_all_command(run, out, err),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // The warning was already written next to the partial report
        Err(e @ CliError::Interrupted(_)) => exit_code::for_error(&e),
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::for_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let argv = std::iter::once("croupier").chain(args.iter().copied());
        let code = run(argv, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn unknown_command_prints_usage() {
        let (code, out, err) = run_args(&["roulette"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(err.contains("Usage: croupier"));
        for c in Commands::NAMES {
            assert!(err.contains(c));
        }
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_args(&["--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("blackjack"));
    }

    #[test]
    #[serial]
    fn zero_iterations_is_an_error() {
        let (code, _, err) = run_args(&["rtb", "--iterations", "0"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.starts_with("Error:"));
    }
}
