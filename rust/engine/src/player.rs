use serde::{Deserialize, Serialize};
use std::fmt;

/// A player decision in blackjack.
/// Shared vocabulary between the rules engine, the dealer policy and the
/// basic strategy chart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take one more card
    Hit,
    /// Keep the current total
    Stand,
    /// Double the wager, take exactly one card, then stand
    Double,
    /// Split a pair into two hands
    Split,
    /// Forfeit half the wager and end the hand
    Surrender,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
            Action::Split => "split",
            Action::Surrender => "surrender",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement category of a single hand (or of a whole round).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Push,
    /// Natural paid at the table's blackjack ratio
    Blackjack,
    Surrender,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Push => "push",
            Outcome::Blackjack => "blackjack",
            Outcome::Surrender => "surrender",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
