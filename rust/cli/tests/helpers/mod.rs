//! Shared helpers for the CLI integration tests.
//!
//! `CliRunner` calls `croupier_cli::run` in-process with captured streams.
//! Environment overrides are applied for the duration of one call and then
//! restored, so tests touching the environment must also be `#[serial]`.
#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Variables the CLI reads; cleared before every run so a developer's shell
/// cannot leak into the tests.
pub const CROUPIER_VARS: &[&str] = &[
    "CROUPIER_CONFIG",
    "CROUPIER_ITERATIONS",
    "CROUPIER_SEED",
    "CROUPIER_DECKS",
    "CROUPIER_HIT_SOFT_17",
    "CROUPIER_BLACKJACK_PAYOUT",
    "CROUPIER_SIM_BREAK_AFTER",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CliResult {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should be JSON")
    }
}

struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in CROUPIER_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            if !CROUPIER_VARS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CliRunner;

impl CliRunner {
    pub fn new() -> Self {
        CliRunner
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        let _guard = EnvGuard::apply(env);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let start = Instant::now();
        let argv: Vec<String> = std::iter::once("croupier".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let code = croupier_cli::run(argv, &mut out, &mut err);
        CliResult {
            exit_code: code,
            stdout: String::from_utf8_lossy(&out).to_string(),
            stderr: String::from_utf8_lossy(&err).to_string(),
            duration: start.elapsed(),
        }
    }
}
