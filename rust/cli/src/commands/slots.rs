//! Slot machine command handler.

use std::io::Write;

use croupier_ai::trials::spin_slots;
use croupier_engine::montecarlo::MonteCarlo;
use croupier_engine::slots::SlotMachine;

use super::{ensure_complete, run_trials, settings, write_json};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters;

pub const DEFAULT_REELS: usize = 3;
pub const DEFAULT_SYMBOLS: usize = 10;

pub fn handle_slots_command(
    run: &RunArgs,
    reels: usize,
    symbols: usize,
    bet: Option<f64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = settings(run, None, bet)?;
    run_slots(&cfg, reels, symbols, json, out, err)
}

/// The reel strips come from the run's own stream, so a seed reproduces the
/// machine as well as the spins.
pub(crate) fn run_slots(
    cfg: &Config,
    reels: usize,
    symbols: usize,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut mc = MonteCarlo::new(cfg.seed)
        .declare_field("payout")
        .declare_field("net_win");
    let machine = SlotMachine::new(reels, symbols, mc.rng_mut())?;
    let stats = run_trials(
        &mut mc,
        |rng| spin_slots(&machine, cfg.bet, rng),
        cfg.iterations,
    )?;

    if json {
        let strips: Vec<Vec<&str>> = machine
            .reels()
            .iter()
            .map(|r| r.iter().map(|s| s.as_str()).collect())
            .collect();
        write_json(
            out,
            &serde_json::json!({
                "game": "slots",
                "bet": cfg.bet,
                "reels": strips,
                "return_to_player_percent": formatters::return_to_player(&stats),
                "stats": stats,
            }),
        )?;
    } else {
        formatters::write_slots_report(out, machine.reels(), &stats)?;
    }
    ensure_complete(&stats, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn cfg() -> Config {
        Config {
            iterations: 1_000,
            seed: Some(3),
            ..Config::default()
        }
    }

    #[test]
    #[serial]
    fn same_seed_same_machine() {
        let run = || {
            let mut out = Vec::new();
            let mut err = Vec::new();
            run_slots(&cfg(), 3, 10, true, &mut out, &mut err).unwrap();
            serde_json::from_slice::<serde_json::Value>(&out).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a["reels"], b["reels"]);
        assert_eq!(a["stats"]["counts"], b["stats"]["counts"]);
        assert_eq!(a["reels"].as_array().unwrap().len(), 3);
    }

    #[test]
    #[serial]
    fn zero_reels_is_a_config_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let r = run_slots(&cfg(), 0, 10, false, &mut out, &mut err);
        assert!(matches!(r, Err(CliError::Config(_))));
    }
}
