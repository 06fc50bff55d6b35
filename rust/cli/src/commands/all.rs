//! Runs every game back to back from one resolved seed.

use std::io::Write;

use super::blackjack::run_blackjack;
use super::rtb::run_rtb;
use super::settings;
use super::slots::{DEFAULT_REELS, DEFAULT_SYMBOLS, run_slots};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::ui;

pub fn handle_all_command(
    run: &RunArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = settings(run, None, None)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    cfg.seed = Some(seed);
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out)?;

    run_blackjack(&cfg, "basic", false, out, err)?;
    ui::write_separator(out)?;
    run_rtb(&cfg, "all", false, out, err)?;
    ui::write_separator(out)?;
    run_slots(&cfg, DEFAULT_REELS, DEFAULT_SYMBOLS, false, out, err)
}
