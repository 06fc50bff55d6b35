use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::GameError;
use crate::trial::TrialResult;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Cherry,
    Lemon,
    Grapes,
    Watermelon,
    Bell,
    Seven,
}

/// Relative frequency of each symbol when a reel is built.
pub const SYMBOL_WEIGHTS: [(Symbol, u32); 6] = [
    (Symbol::Cherry, 20),
    (Symbol::Lemon, 15),
    (Symbol::Grapes, 15),
    (Symbol::Watermelon, 12),
    (Symbol::Bell, 10),
    (Symbol::Seven, 5),
];

impl Symbol {
    pub fn is_fruit(self) -> bool {
        matches!(
            self,
            Symbol::Cherry | Symbol::Lemon | Symbol::Grapes | Symbol::Watermelon
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Cherry => "cherry",
            Symbol::Lemon => "lemon",
            Symbol::Grapes => "grapes",
            Symbol::Watermelon => "watermelon",
            Symbol::Bell => "bell",
            Symbol::Seven => "seven",
        }
    }

    fn weighted<R: Rng + ?Sized>(rng: &mut R) -> Symbol {
        let total: u32 = SYMBOL_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut r = rng.random_range(0..total);
        for (symbol, weight) in SYMBOL_WEIGHTS {
            if r < weight {
                return symbol;
            }
            r -= weight;
        }
        Symbol::Cherry
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paytable category of one spin.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinCategory {
    /// Every reel shows a seven
    Jackpot,
    Bells,
    /// Every reel shows the same fruit
    TripleFruit,
    /// Every reel shows a fruit, no two alike
    MixedFruit,
    Lose,
}

impl SpinCategory {
    pub fn multiplier(self) -> f64 {
        match self {
            SpinCategory::Jackpot => 100.0,
            SpinCategory::Bells => 25.0,
            SpinCategory::TripleFruit => 10.0,
            SpinCategory::MixedFruit => 3.0,
            SpinCategory::Lose => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpinCategory::Jackpot => "jackpot",
            SpinCategory::Bells => "bells",
            SpinCategory::TripleFruit => "triple_fruit",
            SpinCategory::MixedFruit => "mixed_fruit",
            SpinCategory::Lose => "lose",
        }
    }
}

pub fn classify(line: &[Symbol]) -> SpinCategory {
    let Some(&first) = line.first() else {
        return SpinCategory::Lose;
    };
    if line.iter().all(|&s| s == first) {
        return match first {
            Symbol::Seven => SpinCategory::Jackpot,
            Symbol::Bell => SpinCategory::Bells,
            _ => SpinCategory::TripleFruit,
        };
    }
    let all_fruit = line.iter().all(|s| s.is_fruit());
    let distinct = line
        .iter()
        .enumerate()
        .all(|(i, s)| !line[..i].contains(s));
    if all_fruit && distinct {
        SpinCategory::MixedFruit
    } else {
        SpinCategory::Lose
    }
}

/// Reel strips are drawn once from the weighted symbol table when the
/// machine is built; each spin then picks one position per reel.
#[derive(Debug, Clone)]
pub struct SlotMachine {
    reels: Vec<Vec<Symbol>>,
}

impl SlotMachine {
    pub fn new<R: Rng + ?Sized>(
        reels: usize,
        symbols_per_reel: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if reels == 0 || symbols_per_reel == 0 {
            return Err(GameError::InvalidConfig(format!(
                "slot machine needs at least one reel and one symbol per reel (got {reels}x{symbols_per_reel})"
            )));
        }
        let reels = (0..reels)
            .map(|_| (0..symbols_per_reel).map(|_| Symbol::weighted(rng)).collect())
            .collect();
        Ok(Self { reels })
    }

    /// Machine with fixed reel strips.
    pub fn from_reels(reels: Vec<Vec<Symbol>>) -> Result<Self, GameError> {
        if reels.is_empty() || reels.iter().any(|r| r.is_empty()) {
            return Err(GameError::InvalidConfig("empty reel".into()));
        }
        Ok(Self { reels })
    }

    pub fn reels(&self) -> &[Vec<Symbol>] {
        &self.reels
    }

    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Symbol> {
        self.reels
            .iter()
            .map(|reel| reel[rng.random_range(0..reel.len())])
            .collect()
    }

    /// One paid spin.
    pub fn play<R: Rng + ?Sized>(&self, bet: f64, rng: &mut R) -> Result<TrialResult, GameError> {
        if !(bet > 0.0 && bet.is_finite()) {
            return Err(GameError::InvalidBet { amount: bet });
        }
        let category = classify(&self.spin(rng));
        let payout = category.multiplier() * bet;
        Ok(TrialResult::new(category.as_str())
            .with("bet", bet)
            .with("payout", payout)
            .with("net_win", payout - bet))
    }
}
