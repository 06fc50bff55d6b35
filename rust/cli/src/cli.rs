//! Command-line definitions parsed with clap.

use clap::{Args, Parser, Subcommand};

use crate::commands::slots::{DEFAULT_REELS, DEFAULT_SYMBOLS};

#[derive(Parser, Debug)]
#[command(
    name = "croupier",
    version,
    about = "Monte Carlo simulations of blackjack, ride the bus and slots"
)]
pub struct CroupierCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Flags shared by every simulation command. Unset values fall back to the
/// resolved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Number of trials per simulation
    #[arg(long)]
    pub iterations: Option<u64>,
    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Number of 52-card decks in the shoe
    #[arg(long)]
    pub decks: Option<usize>,
    /// Dealer hits soft 17
    #[arg(long)]
    pub hit_soft_17: bool,
    /// Payout ratio for a natural
    #[arg(long)]
    pub blackjack_payout: Option<f64>,
    #[arg(long)]
    pub no_double: bool,
    #[arg(long)]
    pub no_split: bool,
    /// Allow re-splitting pairs formed after a split
    #[arg(long)]
    pub resplit: bool,
    /// Allow late surrender on the first action
    #[arg(long)]
    pub surrender: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play blackjack rounds with a strategy, then measure dealer bust rates
    Blackjack {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        table: TableArgs,
        /// Wager per round
        #[arg(long)]
        bet: Option<f64>,
        /// Player policy: basic or dealer
        #[arg(long, default_value = "basic")]
        strategy: String,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare ride the bus cash-out strategies
    Rtb {
        #[command(flatten)]
        run: RunArgs,
        /// Strategy name, or `all`
        #[arg(long, default_value = "all")]
        strategy: String,
        #[arg(long)]
        json: bool,
    },
    /// Spin a randomly built slot machine
    Slots {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long, default_value_t = DEFAULT_REELS)]
        reels: usize,
        /// Positions per reel
        #[arg(long, default_value_t = DEFAULT_SYMBOLS)]
        symbols: usize,
        #[arg(long)]
        bet: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Run blackjack, ride the bus and slots back to back
    All {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["blackjack", "rtb", "slots", "all", "cfg"];
}
