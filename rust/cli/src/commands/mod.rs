//! Command handlers for the `croupier` CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - `pub fn handle_COMMAND_command(...) -> Result<(), CliError>` resolves the
//!   configuration and writes its report to the injected `out` stream
//! - errors propagate as [`CliError`]; the caller maps them to exit codes
//!
//! Simulation commands share [`settings`] (configuration plus command-line
//! overrides) and [`run_trials`] (the driver call with the early-stop hook).

pub mod all;
pub mod blackjack;
pub mod cfg;
pub mod rtb;
pub mod slots;

pub use all::handle_all_command;
pub use blackjack::handle_blackjack_command;
pub use cfg::handle_cfg_command;
pub use rtb::handle_rtb_command;
pub use slots::handle_slots_command;

use std::error::Error;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use croupier_engine::montecarlo::MonteCarlo;
use croupier_engine::stats::SimulationStatistics;
use croupier_engine::trial::TrialResult;
use rand_chacha::ChaCha20Rng;

use crate::cli::{RunArgs, TableArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Stops every run after this many trials and reports what was completed.
pub const BREAK_AFTER_ENV: &str = "CROUPIER_SIM_BREAK_AFTER";

fn break_after() -> Option<u64> {
    std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
}

/// Resolved configuration with command-line flags applied on top.
pub(crate) fn settings(
    run: &RunArgs,
    table: Option<&TableArgs>,
    bet: Option<f64>,
) -> Result<Config, CliError> {
    let mut cfg = config::load()?;
    if let Some(n) = run.iterations {
        cfg.iterations = n;
    }
    if run.seed.is_some() {
        cfg.seed = run.seed;
    }
    if let Some(b) = bet {
        cfg.bet = b;
    }
    if let Some(t) = table {
        if let Some(d) = t.decks {
            cfg.num_decks = d;
        }
        if let Some(p) = t.blackjack_payout {
            cfg.blackjack_payout = p;
        }
        cfg.dealer_hits_soft_17 |= t.hit_soft_17;
        cfg.allow_double &= !t.no_double;
        cfg.allow_split &= !t.no_split;
        cfg.allow_resplit |= t.resplit;
        cfg.allow_surrender |= t.surrender;
    }
    config::validate(&cfg)?;
    Ok(cfg)
}

/// Runs `trial` on `mc`. When [`BREAK_AFTER_ENV`] is set the run stops after
/// that many trials and the statistics come back marked partial.
pub(crate) fn run_trials<F, E>(
    mc: &mut MonteCarlo,
    mut trial: F,
    iterations: u64,
) -> Result<SimulationStatistics, CliError>
where
    F: FnMut(&mut ChaCha20Rng) -> Result<TrialResult, E>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    let stop = AtomicBool::new(false);
    let limit = break_after();
    let mut done = 0u64;
    let stats = mc.run_until(
        |rng| {
            let record = trial(rng);
            done += 1;
            if limit.is_some_and(|n| done >= n) {
                stop.store(true, Ordering::Relaxed);
            }
            record
        },
        iterations,
        &stop,
    )?;
    Ok(stats)
}

/// Turns a partial run into [`CliError::Interrupted`] after its report has
/// been written.
pub(crate) fn ensure_complete(
    stats: &SimulationStatistics,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !stats.partial {
        return Ok(());
    }
    let msg = format!(
        "stopped after {} of {} trials; statistics are partial",
        stats.iterations, stats.requested
    );
    ui::display_warning(err, &msg)?;
    Err(CliError::Interrupted(msg))
}

pub(crate) fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::errors::GameError;
    use serial_test::serial;

    #[test]
    #[serial]
    fn break_after_marks_run_partial() {
        unsafe { std::env::set_var(BREAK_AFTER_ENV, "7") };
        let mut mc = MonteCarlo::new(Some(1));
        let stats = run_trials(&mut mc, |_| Ok::<_, GameError>(TrialResult::new("x")), 100);
        unsafe { std::env::remove_var(BREAK_AFTER_ENV) };

        let stats = stats.unwrap();
        assert!(stats.partial);
        assert_eq!(stats.iterations, 7);
        assert_eq!(stats.requested, 100);

        let mut err = Vec::new();
        let e = ensure_complete(&stats, &mut err).unwrap_err();
        assert!(matches!(e, CliError::Interrupted(_)));
        assert!(String::from_utf8(err).unwrap().starts_with("WARNING:"));
    }

    #[test]
    #[serial]
    fn flags_override_configuration() {
        let run = RunArgs {
            iterations: Some(12),
            seed: Some(5),
        };
        let table = TableArgs {
            decks: Some(2),
            no_split: true,
            surrender: true,
            ..TableArgs::default()
        };
        let cfg = settings(&run, Some(&table), Some(2.5)).unwrap();
        assert_eq!(cfg.iterations, 12);
        assert_eq!(cfg.seed, Some(5));
        assert_eq!(cfg.num_decks, 2);
        assert_eq!(cfg.bet, 2.5);
        assert!(!cfg.allow_split && cfg.allow_surrender && cfg.allow_double);
    }

    #[test]
    #[serial]
    fn out_of_range_flag_is_rejected() {
        let run = RunArgs::default();
        let table = TableArgs {
            decks: Some(9),
            ..TableArgs::default()
        };
        assert!(matches!(
            settings(&run, Some(&table), None),
            Err(CliError::Config(_))
        ));
    }
}
