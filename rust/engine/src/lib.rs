//! # croupier-engine: Casino Game Simulation Core
//!
//! Card and shoe model, a blackjack rules engine, two peer games (slot
//! machine and Ride the Bus) and a seeded Monte Carlo driver that reduces
//! per-trial records into aggregate statistics.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Multi-deck shoe with seeded ChaCha20 shuffling
//! - [`hand`] - Blackjack hand totals and lifecycle
//! - [`rules`] - Table rules, player actions, dealer policy and settlement
//! - [`blackjack`] - Single-player round orchestration
//! - [`slots`] - Weighted-reel slot machine
//! - [`rtb`] - Ride the Bus
//! - [`trial`] - The record every trial returns
//! - [`montecarlo`] - Simulation driver
//! - [`stats`] - Streaming statistics
//! - [`errors`] - Error types for game operations and simulation runs
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_engine::montecarlo::run_simulation;
//! use croupier_engine::trial::TrialResult;
//! use croupier_engine::errors::GameError;
//!
//! let stats = run_simulation(
//!     |_rng| Ok::<_, GameError>(TrialResult::new("win").with("net_win", 1.0)),
//!     10,
//!     Some(42),
//! )
//! .unwrap();
//! assert_eq!(stats.percentage("win"), 100.0);
//! ```
//!
//! ## Deterministic Shuffles
//!
//! ```rust
//! use croupier_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(6, 42).unwrap();
//! let mut b = Deck::new_with_seed(6, 42).unwrap();
//! assert_eq!(a.draw_n(312).unwrap(), b.draw_n(312).unwrap());
//! ```

pub mod blackjack;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod montecarlo;
pub mod player;
pub mod rtb;
pub mod rules;
pub mod slots;
pub mod stats;
pub mod trial;
