//! Exit codes: 0 on success, 2 on any error, 130 when a run stops early.
//! Errors and warnings go to stderr, never stdout.

mod helpers;

use croupier_cli::exit_code;
use helpers::CliRunner;
use serial_test::serial;

#[test]
#[serial]
fn break_after_reports_partial_statistics() {
    let res = CliRunner::new().run_with_env(
        &["slots", "--iterations", "1000", "--seed", "4"],
        &[(croupier_cli::BREAK_AFTER_ENV, "25")],
    );
    assert_eq!(res.exit_code, exit_code::INTERRUPTED);
    assert!(res.stdout.contains("Trials: 25 of 1000 (partial)"));
    assert!(res.stderr.starts_with("WARNING: stopped after 25 of 1000 trials"));
    assert!(!res.stderr.contains("Error:"));
}

#[test]
#[serial]
fn break_after_in_blackjack_skips_the_bust_study() {
    let res = CliRunner::new().run_with_env(
        &["blackjack", "--iterations", "500", "--seed", "4", "--json"],
        &[(croupier_cli::BREAK_AFTER_ENV, "10")],
    );
    assert_eq!(res.exit_code, exit_code::INTERRUPTED);
    let json = res.json();
    assert_eq!(json["rounds"]["partial"].as_bool(), Some(true));
    assert_eq!(json["rounds"]["iterations"].as_u64(), Some(10));
    assert!(json["dealer_bust"].is_null());
}

#[test]
#[serial]
fn break_after_beyond_run_length_is_a_full_run() {
    let res = CliRunner::new().run_with_env(
        &["rtb", "--iterations", "50", "--seed", "4", "--strategy", "always-go-for-suit"],
        &[(croupier_cli::BREAK_AFTER_ENV, "500")],
    );
    assert_eq!(res.exit_code, exit_code::SUCCESS);
    assert!(res.stderr.is_empty());
}

#[test]
#[serial]
fn zero_iterations_returns_two() {
    let res = CliRunner::new().run(&["slots", "--iterations", "0"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stdout.is_empty());
    assert!(res.stderr.contains("iterations must be >=1"));
}

#[test]
#[serial]
fn unknown_strategy_returns_two() {
    let res = CliRunner::new().run(&["rtb", "--iterations", "10", "--strategy", "yolo"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.starts_with("Error: Invalid input: unknown strategy 'yolo'"));
}

#[test]
#[serial]
fn negative_bet_returns_two() {
    let res = CliRunner::new().run(&["blackjack", "--iterations", "10", "--bet=-1"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("bet must be >0"));
}

#[test]
#[serial]
fn empty_reel_returns_two() {
    let res = CliRunner::new().run(&["slots", "--iterations", "10", "--symbols", "0"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.starts_with("Error: Configuration error:"));
}

#[test]
fn missing_subcommand_prints_usage() {
    let res = CliRunner::new().run(&[]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("Usage: croupier <command> [options]"));
}

#[test]
fn simulation_failure_maps_to_error() {
    use croupier_cli::CliError;
    use croupier_engine::errors::{GameError, SimulationError};

    let e = CliError::from(SimulationError::Failure {
        trial: 3,
        source: Box::new(GameError::DeckExhausted),
    });
    assert_eq!(exit_code::for_error(&e), exit_code::ERROR);
    assert_eq!(
        exit_code::for_error(&CliError::Interrupted("stop".into())),
        exit_code::INTERRUPTED
    );
}
