//! Ride the Bus command handler: one run per cash-out strategy from a
//! shared seeded stream, followed by a ranking by expected value.

use std::io::Write;

use croupier_ai::rtb::{RtbStrategy, play_rtb};
use croupier_engine::montecarlo::MonteCarlo;
use croupier_engine::stats::SimulationStatistics;

use super::{ensure_complete, run_trials, settings, write_json};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::{formatters, ui};

pub fn handle_rtb_command(
    run: &RunArgs,
    strategy: &str,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = settings(run, None, None)?;
    run_rtb(&cfg, strategy, json, out, err)
}

/// `all` selects every strategy.
pub fn parse_strategies(name: &str) -> Result<Vec<RtbStrategy>, CliError> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(RtbStrategy::ALL.to_vec());
    }
    RtbStrategy::from_name(name)
        .map(|s| vec![s])
        .ok_or_else(|| {
            let names: Vec<&str> = RtbStrategy::ALL.iter().map(|s| s.name()).collect();
            CliError::InvalidInput(format!(
                "unknown strategy '{}' (expected all or one of: {})",
                name,
                names.join(", ")
            ))
        })
}

pub(crate) fn run_rtb(
    cfg: &Config,
    strategy: &str,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let strategies = parse_strategies(strategy)?;
    let mut mc = MonteCarlo::new(cfg.seed)
        .declare_field("net_win")
        .declare_field("winnings");

    let mut results: Vec<(RtbStrategy, SimulationStatistics)> = Vec::new();
    for s in strategies {
        let stats = run_trials(&mut mc, |rng| play_rtb(s, cfg.bet, rng), cfg.iterations)?;
        let partial = stats.partial;
        results.push((s, stats));
        if partial {
            break;
        }
    }

    if json {
        let runs: Vec<serde_json::Value> = results
            .iter()
            .map(|(s, stats)| {
                serde_json::json!({
                    "strategy": s.name(),
                    "ev_percent": formatters::expected_value_percent(stats),
                    "stats": stats,
                })
            })
            .collect();
        let ranking: Vec<&str> = formatters::rank_by_ev(&results)
            .iter()
            .map(|(s, _)| s.name())
            .collect();
        write_json(
            out,
            &serde_json::json!({
                "game": "rtb",
                "bet": cfg.bet,
                "runs": runs,
                "ranking": ranking,
            }),
        )?;
    } else {
        ui::write_heading(out, "Ride the Bus")?;
        for (s, stats) in &results {
            formatters::write_rtb_report(out, *s, stats)?;
        }
        if results.len() > 1 {
            formatters::write_rtb_ranking(out, &results)?;
        }
    }

    match results.last() {
        Some((_, stats)) => ensure_complete(stats, err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn strategy_names() {
        assert_eq!(parse_strategies("all").unwrap().len(), 3);
        assert_eq!(
            parse_strategies("cashout-after-inout").unwrap(),
            vec![RtbStrategy::CashoutAfterInOut]
        );
        assert!(matches!(
            parse_strategies("ride-forever"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    #[serial]
    fn ranks_every_strategy() {
        let cfg = Config {
            iterations: 2_000,
            seed: Some(9),
            ..Config::default()
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_rtb(&cfg, "all", false, &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Ride the Bus\n"));
        assert!(text.contains("Ranking by expected value"));
        for s in RtbStrategy::ALL {
            assert!(text.contains(s.name()));
        }
    }
}
