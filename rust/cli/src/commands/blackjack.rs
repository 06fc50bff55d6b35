//! Blackjack command handler.
//!
//! Plays `iterations` rounds with the chosen strategy, then runs the
//! dealer-bust study for the same number of trials from the same seeded
//! stream. Both reports are printed as text, or together as one JSON
//! document with `--json`.

use std::io::Write;

use croupier_ai::trials::{dealer_bust_study, play_blackjack_round};
use croupier_ai::{STRATEGY_NAMES, create_strategy};
use croupier_engine::montecarlo::MonteCarlo;
use croupier_engine::stats::SimulationStatistics;

use super::{ensure_complete, run_trials, settings, write_json};
use crate::cli::{RunArgs, TableArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters;

pub fn handle_blackjack_command(
    run: &RunArgs,
    table: &TableArgs,
    bet: Option<f64>,
    strategy: &str,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = settings(run, Some(table), bet)?;
    run_blackjack(&cfg, strategy, json, out, err)
}

pub(crate) fn run_blackjack(
    cfg: &Config,
    strategy: &str,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let policy = create_strategy(strategy).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown strategy '{}' (expected one of: {})",
            strategy,
            STRATEGY_NAMES.join(", ")
        ))
    })?;
    let rules = cfg.blackjack_rules();
    rules.validate()?;

    let mut mc = MonteCarlo::new(cfg.seed)
        .declare_field("net_win")
        .declare_field("payout");
    let rounds = run_trials(
        &mut mc,
        |rng| play_blackjack_round(&rules, policy.as_ref(), cfg.bet, rng),
        cfg.iterations,
    )?;
    // A partial strategy run skips the study.
    let study = if rounds.partial {
        None
    } else {
        Some(run_trials(&mut mc, |rng| dealer_bust_study(&rules, rng), cfg.iterations)?)
    };

    write_report(out, policy.name(), cfg, &rounds, study.as_ref(), json)?;
    ensure_complete(&rounds, err)?;
    match &study {
        Some(study) => ensure_complete(study, err),
        None => Ok(()),
    }
}

fn write_report(
    out: &mut dyn Write,
    strategy: &str,
    cfg: &Config,
    rounds: &SimulationStatistics,
    study: Option<&SimulationStatistics>,
    json: bool,
) -> Result<(), CliError> {
    let rules = cfg.blackjack_rules();
    if json {
        return write_json(
            out,
            &serde_json::json!({
                "game": "blackjack",
                "strategy": strategy,
                "rules": rules,
                "bet": cfg.bet,
                "house_edge_percent": formatters::house_edge_percent(rounds),
                "rounds": rounds,
                "dealer_bust": study,
            }),
        );
    }
    formatters::write_blackjack_report(out, strategy, &rules, rounds)?;
    if let Some(study) = study {
        formatters::write_dealer_bust_report(out, study)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn cfg(iterations: u64) -> Config {
        Config {
            iterations,
            seed: Some(42),
            ..Config::default()
        }
    }

    #[test]
    #[serial]
    fn unknown_strategy_is_invalid_input() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let r = run_blackjack(&cfg(10), "card-counter", false, &mut out, &mut err);
        match r {
            Err(CliError::InvalidInput(msg)) => assert!(msg.contains("basic, dealer")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    #[serial]
    fn json_report_has_both_runs() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_blackjack(&cfg(500), "basic", true, &mut out, &mut err).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["rounds"]["iterations"].as_u64(), Some(500));
        assert_eq!(v["rounds"]["seed"].as_u64(), Some(42));
        assert_eq!(v["dealer_bust"]["counts"]["played"].as_u64(), Some(500));
        assert_eq!(v["rules"]["num_decks"].as_u64(), Some(6));
        assert!(err.is_empty());
    }
}
