//! Ride the Bus choice heuristics and the three cash-out strategies.

use rand::Rng;

use croupier_engine::cards::{Card, Suit, all_suits};
use croupier_engine::errors::GameError;
use croupier_engine::rtb::{ColorGuess, HighLowGuess, InOutGuess, RideTheBus, inout_bounds};
use croupier_engine::trial::TrialResult;

/// When to stop riding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtbStrategy {
    /// Walk away at 2x after a correct colour
    CashoutAfterColor,
    /// Walk away at 24x after inside/outside
    CashoutAfterInOut,
    /// Play all four rounds for 480x
    AlwaysGoForSuit,
}

impl RtbStrategy {
    pub const ALL: [RtbStrategy; 3] = [
        RtbStrategy::CashoutAfterColor,
        RtbStrategy::CashoutAfterInOut,
        RtbStrategy::AlwaysGoForSuit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RtbStrategy::CashoutAfterColor => "cashout-after-color",
            RtbStrategy::CashoutAfterInOut => "cashout-after-inout",
            RtbStrategy::AlwaysGoForSuit => "always-go-for-suit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

pub fn choose_color<R: Rng + ?Sized>(rng: &mut R) -> ColorGuess {
    if rng.random_bool(0.5) {
        ColorGuess::Red
    } else {
        ColorGuess::Black
    }
}

/// Leans towards the side with more ranks left: strongly for extreme
/// cards, linearly for the middle of the range.
pub fn choose_high_low<R: Rng + ?Sized>(previous: Card, rng: &mut R) -> HighLowGuess {
    let v = previous.rank.high_value();
    let p_higher = if v >= 10 {
        0.05
    } else if v <= 5 {
        0.95
    } else {
        (1.15 - f64::from(v) / 10.0).max(0.0)
    };
    if rng.random::<f64>() < p_higher {
        HighLowGuess::Higher
    } else {
        HighLowGuess::Lower
    }
}

/// Compares the number of ranks strictly between the bounds with the
/// number outside them; the bigger side is picked 90% of the time and a
/// tie leans outside.
pub fn choose_in_out<R: Rng + ?Sized>(first: Card, second: Card, rng: &mut R) -> InOutGuess {
    let (low, high) = inout_bounds(first, second);
    let inside = i32::from(high) - i32::from(low) - 1;
    let outside = (i32::from(low) - 1) + (14 - i32::from(high));
    let p_inside = match inside.cmp(&outside) {
        std::cmp::Ordering::Greater => 0.9,
        std::cmp::Ordering::Less => 0.1,
        std::cmp::Ordering::Equal => 0.45,
    };
    if rng.random::<f64>() < p_inside {
        InOutGuess::Inside
    } else {
        InOutGuess::Outside
    }
}

pub fn choose_suit<R: Rng + ?Sized>(rng: &mut R) -> Suit {
    all_suits()[rng.random_range(0..4)]
}

/// Plays one game of Ride the Bus with `strategy` on a freshly shuffled deck.
pub fn play_rtb<R: Rng + ?Sized>(
    strategy: RtbStrategy,
    bet: f64,
    rng: &mut R,
) -> Result<TrialResult, GameError> {
    let mut game = RideTheBus::new(bet, rng)?;
    let done = |game: &RideTheBus| game.winnings() == 0.0;

    game.guess_color(choose_color(rng))?;
    if done(&game) || strategy == RtbStrategy::CashoutAfterColor {
        game.cash_out();
        return Ok(game.to_trial_result());
    }

    let guess = choose_high_low(game.drawn()[0], rng);
    game.guess_high_low(guess)?;
    if done(&game) {
        return Ok(game.to_trial_result());
    }

    let guess = choose_in_out(game.drawn()[0], game.drawn()[1], rng);
    game.guess_in_out(guess)?;
    if done(&game) || strategy == RtbStrategy::CashoutAfterInOut {
        game.cash_out();
        return Ok(game.to_trial_result());
    }

    game.guess_suit(choose_suit(rng))?;
    Ok(game.to_trial_result())
}
