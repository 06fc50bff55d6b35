//! # croupier-ai: Decision Policies and Trial Functions
//!
//! Player-side decision making for the games in `croupier-engine`, plus the
//! trial functions that play one complete game with a policy and return a
//! [`TrialResult`](croupier_engine::trial::TrialResult) for the Monte Carlo
//! driver.
//!
//! ## Core Components
//!
//! - [`Strategy`] - Trait defining the interface for blackjack decision making
//! - [`basic_strategy`] - The basic strategy chart and its lookups
//! - [`dealer_mimic`] - A policy that plays the player's hand like the dealer
//! - [`rtb`] - Ride the Bus choice heuristics and cash-out strategies
//! - [`trials`] - One-game trial functions for every game
//! - [`create_strategy`] - Factory function for blackjack policies
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_ai::create_strategy;
//! use croupier_ai::trials::play_blackjack_round;
//! use croupier_engine::montecarlo::run_simulation;
//! use croupier_engine::rules::BlackjackRules;
//!
//! let strategy = create_strategy("basic").unwrap();
//! let rules = BlackjackRules::default();
//! let stats = run_simulation(
//!     |rng| play_blackjack_round(&rules, strategy.as_ref(), 1.0, rng),
//!     1_000,
//!     Some(42),
//! )
//! .unwrap();
//! println!("mean net win: {:?}", stats.mean("net_win"));
//! ```
//!
//! ## Strategy Types
//!
//! - `"basic"` - Basic strategy chart
//! - `"dealer"` - Hit below 17, never double, split or surrender

use croupier_engine::cards::Card;
use croupier_engine::player::Action;

pub mod basic_strategy;
pub mod dealer_mimic;
pub mod rtb;
pub mod trials;

pub use basic_strategy::{HandView, Permissions};

/// Names accepted by [`create_strategy`].
pub const STRATEGY_NAMES: [&str; 2] = ["basic", "dealer"];

/// Trait defining the interface for blackjack player policies.
///
/// # Required Methods
///
/// - [`decide`](Strategy::decide) - Choose the next action for one hand
/// - [`name`](Strategy::name) - Return the policy's identifier
///
/// # Example Implementation
///
/// ```rust
/// use croupier_ai::{HandView, Strategy};
/// use croupier_engine::cards::Card;
/// use croupier_engine::player::Action;
///
/// struct AlwaysStand;
///
/// impl Strategy for AlwaysStand {
///     fn decide(&self, _hand: &dyn HandView, _up: Card, _allowed: &[Action]) -> Action {
///         Action::Stand
///     }
///
///     fn name(&self) -> &str {
///         "always-stand"
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Choose an action for `hand` against the dealer's up card.
    ///
    /// # Arguments
    ///
    /// * `hand` - The player hand awaiting a decision
    /// * `dealer_up` - The dealer's face-up card
    /// * `allowed` - Actions the table rules currently permit on this hand
    ///
    /// # Returns
    ///
    /// One of `allowed`. Returning anything else makes the round fail with
    /// `GameError::InvalidAction`.
    fn decide(&self, hand: &dyn HandView, dealer_up: Card, allowed: &[Action]) -> Action;

    /// Return the name/identifier of this policy.
    fn name(&self) -> &str;
}

/// Factory function to create blackjack policies by name.
///
/// # Arguments
///
/// * `name` - One of [`STRATEGY_NAMES`]
///
/// # Returns
///
/// A boxed policy, or `None` for an unknown name.
///
/// # Example
///
/// ```rust
/// use croupier_ai::create_strategy;
///
/// let s = create_strategy("basic").unwrap();
/// assert_eq!(s.name(), "basic");
/// assert!(create_strategy("martingale").is_none());
/// ```
pub fn create_strategy(name: &str) -> Option<Box<dyn Strategy>> {
    match name {
        "basic" => Some(Box::new(basic_strategy::BasicStrategy)),
        "dealer" => Some(Box::new(dealer_mimic::DealerMimic)),
        _ => None,
    }
}
