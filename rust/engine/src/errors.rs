use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid action {action:?}: {reason}")]
    InvalidAction { action: Action, reason: String },
    #[error("Invalid bet amount: {amount}")]
    InvalidBet { amount: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Round played out of order: expected {expected}")]
    OutOfOrder { expected: &'static str },
}

impl GameError {
    pub fn invalid_action(action: Action, reason: impl Into<String>) -> Self {
        GameError::InvalidAction {
            action,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the Monte Carlo driver.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A trial signalled an error; the run was aborted at that trial.
    #[error("trial {trial} failed: {source}")]
    Failure {
        /// 0-based index of the failing trial
        trial: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("iterations must be >= 1 (got {0})")]
    InvalidIterations(u64),
}

impl SimulationError {
    /// Index of the failing trial, if the error came from a trial.
    pub fn trial_index(&self) -> Option<u64> {
        match self {
            SimulationError::Failure { trial, .. } => Some(*trial),
            SimulationError::InvalidIterations(_) => None,
        }
    }
}
