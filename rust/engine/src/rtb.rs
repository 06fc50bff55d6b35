//! Ride the Bus: four escalating guesses against a single 52-card deck.
//!
//! Each correct guess multiplies the running winnings; a wrong guess loses
//! everything staked. The player may cash out between rounds.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{Card, Suit};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::trial::TrialResult;

pub const COLOR_MULTIPLIER: f64 = 2.0;
pub const HIGH_LOW_MULTIPLIER: f64 = 3.0;
pub const IN_OUT_MULTIPLIER: f64 = 4.0;
pub const SUIT_MULTIPLIER: f64 = 20.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGuess {
    Red,
    Black,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighLowGuess {
    /// Wins on an equal value as well
    Higher,
    Lower,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InOutGuess {
    /// Between the first two cards, bounds included
    Inside,
    Outside,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Color,
    HighLow,
    InOut,
    Suit,
    Finished,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Color => "color",
            Stage::HighLow => "high_low",
            Stage::InOut => "in_out",
            Stage::Suit => "suit",
            Stage::Finished => "finished",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RideTheBus {
    deck: Deck,
    drawn: Vec<Card>,
    bet: f64,
    winnings: f64,
    stage: Stage,
}

impl RideTheBus {
    pub fn new<R: Rng + ?Sized>(bet: f64, rng: &mut R) -> Result<Self, GameError> {
        let mut deck = Deck::new(1)?;
        deck.shuffle(rng);
        Self::with_deck(bet, deck)
    }

    pub fn with_deck(bet: f64, deck: Deck) -> Result<Self, GameError> {
        if !(bet > 0.0 && bet.is_finite()) {
            return Err(GameError::InvalidBet { amount: bet });
        }
        Ok(Self {
            deck,
            drawn: Vec::with_capacity(4),
            bet,
            winnings: 0.0,
            stage: Stage::Color,
        })
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn winnings(&self) -> f64 {
        self.winnings
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn drawn(&self) -> &[Card] {
        &self.drawn
    }

    pub fn rounds_played(&self) -> usize {
        self.drawn.len()
    }

    fn expect_stage(&self, stage: Stage) -> Result<(), GameError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(GameError::OutOfOrder {
                expected: self.stage.as_str(),
            })
        }
    }

    fn resolve(&mut self, correct: bool, multiplier: f64, next: Stage) -> bool {
        if correct {
            self.winnings = if self.stage == Stage::Color {
                self.bet * multiplier
            } else {
                self.winnings * multiplier
            };
            self.stage = next;
        } else {
            self.winnings = 0.0;
            self.stage = Stage::Finished;
        }
        correct
    }

    pub fn guess_color(&mut self, guess: ColorGuess) -> Result<bool, GameError> {
        self.expect_stage(Stage::Color)?;
        let card = self.deck.draw()?;
        self.drawn.push(card);
        let correct = card.suit.is_red() == (guess == ColorGuess::Red);
        Ok(self.resolve(correct, COLOR_MULTIPLIER, Stage::HighLow))
    }

    pub fn guess_high_low(&mut self, guess: HighLowGuess) -> Result<bool, GameError> {
        self.expect_stage(Stage::HighLow)?;
        let prev = self.drawn[0].rank.high_value();
        let card = self.deck.draw()?;
        self.drawn.push(card);
        let higher = card.rank.high_value() >= prev;
        let correct = higher == (guess == HighLowGuess::Higher);
        Ok(self.resolve(correct, HIGH_LOW_MULTIPLIER, Stage::InOut))
    }

    pub fn guess_in_out(&mut self, guess: InOutGuess) -> Result<bool, GameError> {
        self.expect_stage(Stage::InOut)?;
        let (low, high) = inout_bounds(self.drawn[0], self.drawn[1]);
        let card = self.deck.draw()?;
        self.drawn.push(card);
        let v = card.rank.high_value();
        let inside = (low..=high).contains(&v);
        let correct = inside == (guess == InOutGuess::Inside);
        Ok(self.resolve(correct, IN_OUT_MULTIPLIER, Stage::Suit))
    }

    pub fn guess_suit(&mut self, guess: Suit) -> Result<bool, GameError> {
        self.expect_stage(Stage::Suit)?;
        let card = self.deck.draw()?;
        self.drawn.push(card);
        Ok(self.resolve(card.suit == guess, SUIT_MULTIPLIER, Stage::Finished))
    }

    /// Stops playing and keeps the current winnings.
    pub fn cash_out(&mut self) -> f64 {
        self.stage = Stage::Finished;
        self.winnings
    }

    /// Final record: `win` when the player walked away with a profit.
    pub fn to_trial_result(&self) -> TrialResult {
        let net_win = self.winnings - self.bet;
        TrialResult::new(if net_win > 0.0 { "win" } else { "lose" })
            .with("bet", self.bet)
            .with("winnings", self.winnings)
            .with("net_win", net_win)
            .with("rounds_played", self.rounds_played() as f64)
    }
}

/// Low and high card values bounding the inside/outside round (Ace high).
pub fn inout_bounds(a: Card, b: Card) -> (u8, u8) {
    let (x, y) = (a.rank.high_value(), b.rank.high_value());
    (x.min(y), x.max(y))
}
