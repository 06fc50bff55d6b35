//! Plain-text report formatting for simulation statistics.
//!
//! Every writer takes `&mut dyn Write` and the statistics returned by the
//! driver, so reports can be captured in tests with a `Vec<u8>`.
//!
//! ```rust
//! use croupier_cli::formatters::{format_percent, format_signed};
//!
//! assert_eq!(format_percent(42.126), "42.13%");
//! assert_eq!(format_signed(-0.5), "-0.5000");
//! ```

use std::io::{self, Write};

use croupier_ai::rtb::RtbStrategy;
use croupier_ai::trials::{UP_CARDS, dealer_bust_field};
use croupier_engine::rules::BlackjackRules;
use croupier_engine::slots::Symbol;
use croupier_engine::stats::SimulationStatistics;

use crate::ui;

const LABEL_WIDTH: usize = 22;

pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p)
}

pub fn format_signed(x: f64) -> String {
    format!("{:+.4}", x)
}

/// House edge in percent of the initial wager: the negated mean net win.
pub fn house_edge_percent(stats: &SimulationStatistics) -> f64 {
    -stats.mean("net_win").unwrap_or(0.0) * 100.0
}

/// Expected value in percent of the stake.
pub fn expected_value_percent(stats: &SimulationStatistics) -> f64 {
    stats.mean("net_win").unwrap_or(0.0) * 100.0
}

fn write_row(out: &mut dyn Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{:<width$}{}", format!("{label}:"), value, width = LABEL_WIDTH)
}

/// Trial count, seed and throughput. Partial runs say so.
pub fn write_run_line(out: &mut dyn Write, stats: &SimulationStatistics) -> io::Result<()> {
    if stats.partial {
        writeln!(
            out,
            "Trials: {} of {} (partial)  seed: {}",
            stats.iterations, stats.requested, stats.seed
        )
    } else {
        writeln!(
            out,
            "Trials: {}  seed: {}  ({:.0} trials/s)",
            stats.iterations, stats.seed, stats.iterations_per_sec
        )
    }
}

pub fn describe_rules(rules: &BlackjackRules) -> String {
    let mut parts = vec![
        format!(
            "{} deck{}",
            rules.num_decks,
            if rules.num_decks == 1 { "" } else { "s" }
        ),
        if rules.dealer_hits_soft_17 {
            "dealer hits soft 17".to_string()
        } else {
            "dealer stands on soft 17".to_string()
        },
        format!("blackjack pays {}x", rules.blackjack_payout),
    ];
    if !rules.allow_double {
        parts.push("no double".into());
    }
    if !rules.allow_split {
        parts.push("no split".into());
    } else if rules.allow_resplit {
        parts.push(format!("resplit to {} hands", rules.max_hands));
    }
    if rules.allow_surrender {
        parts.push("late surrender".into());
    }
    parts.join(", ")
}

pub fn write_blackjack_report(
    out: &mut dyn Write,
    strategy: &str,
    rules: &BlackjackRules,
    rounds: &SimulationStatistics,
) -> io::Result<()> {
    ui::write_heading(out, &format!("Blackjack ({strategy} strategy)"))?;
    writeln!(out, "Rules: {}", describe_rules(rules))?;
    write_run_line(out, rounds)?;
    writeln!(out)?;
    write_row(out, "Win rate", &format_percent(rounds.percentage("win")))?;
    write_row(out, "Blackjack rate", &format_percent(rounds.percentage("blackjack")))?;
    write_row(out, "Push rate", &format_percent(rounds.percentage("push")))?;
    write_row(out, "Loss rate", &format_percent(rounds.percentage("lose")))?;
    if rules.allow_surrender {
        write_row(out, "Surrender rate", &format_percent(rounds.percentage("surrender")))?;
    }
    if let Some(net) = rounds.field("net_win") {
        write_row(
            out,
            "Average net win",
            &format!("{} (± {:.4})", format_signed(net.mean), net.std_error),
        )?;
    }
    write_row(out, "House edge", &format_percent(house_edge_percent(rounds)))
}

pub fn write_dealer_bust_report(
    out: &mut dyn Write,
    study: &SimulationStatistics,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Dealer bust probability by up card")?;
    write_run_line(out, study)?;
    for up in UP_CARDS {
        let p = study.mean(&dealer_bust_field(up)).unwrap_or(0.0) * 100.0;
        writeln!(out, "  {:>2}: {}", up.label(), format_percent(p))?;
    }
    Ok(())
}

pub fn write_rtb_report(
    out: &mut dyn Write,
    strategy: RtbStrategy,
    stats: &SimulationStatistics,
) -> io::Result<()> {
    writeln!(out, "Strategy: {}", strategy.name())?;
    write_run_line(out, stats)?;
    write_row(out, "  Win rate", &format_percent(stats.percentage("win")))?;
    write_row(
        out,
        "  Average net win",
        &format_signed(stats.mean("net_win").unwrap_or(0.0)),
    )?;
    write_row(
        out,
        "  Expected value",
        &format_percent(expected_value_percent(stats)),
    )?;
    writeln!(out)
}

/// Strategies ordered by expected value, best first.
pub fn rank_by_ev(results: &[(RtbStrategy, SimulationStatistics)]) -> Vec<(RtbStrategy, f64)> {
    let mut ranked: Vec<(RtbStrategy, f64)> = results
        .iter()
        .map(|(s, stats)| (*s, expected_value_percent(stats)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

pub fn write_rtb_ranking(
    out: &mut dyn Write,
    results: &[(RtbStrategy, SimulationStatistics)],
) -> io::Result<()> {
    writeln!(out, "Ranking by expected value")?;
    for (i, (strategy, ev)) in rank_by_ev(results).iter().enumerate() {
        writeln!(out, "  {}. {:<22} {}", i + 1, strategy.name(), format_percent(*ev))?;
    }
    Ok(())
}

pub fn format_reel(reel: &[Symbol]) -> String {
    reel.iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_slots_report(
    out: &mut dyn Write,
    reels: &[Vec<Symbol>],
    stats: &SimulationStatistics,
) -> io::Result<()> {
    ui::write_heading(out, "Slot Machine")?;
    for (i, reel) in reels.iter().enumerate() {
        writeln!(out, "Reel {}: {}", i + 1, format_reel(reel))?;
    }
    write_run_line(out, stats)?;
    writeln!(out)?;
    for (category, pct) in &stats.percentages {
        write_row(out, category, &format_percent(*pct))?;
    }
    write_row(
        out,
        "Average payout",
        &format!("{:.4}", stats.mean("payout").unwrap_or(0.0)),
    )?;
    write_row(
        out,
        "Average net win",
        &format_signed(stats.mean("net_win").unwrap_or(0.0)),
    )?;
    write_row(out, "Return to player", &format_percent(return_to_player(stats)))
}

/// Payout returned per unit staked, in percent.
pub fn return_to_player(stats: &SimulationStatistics) -> f64 {
    match (stats.mean("payout"), stats.mean("bet")) {
        (Some(payout), Some(bet)) if bet > 0.0 => payout / bet * 100.0,
        _ => 0.0,
    }
}
