use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Lifecycle of one player hand.
///
/// `Dealt -> Acting -> (Stood | Doubled | Bust | Surrendered) -> Settled`.
/// Splitting replaces a `Dealt` hand with two fresh `Dealt` hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum HandState {
    /// Initial cards only, no decision taken yet
    Dealt,
    /// At least one card drawn by a hit
    Acting,
    Stood,
    Doubled,
    Bust,
    Surrendered,
    Settled,
}

impl HandState {
    /// Whether the hand still accepts player actions.
    pub fn is_open(self) -> bool {
        matches!(self, HandState::Dealt | HandState::Acting)
    }
}

/// Cards held by one participant plus the wager riding on them.
///
/// Totals and flags are always derived from `cards`, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    bet: f64,
    state: HandState,
    from_split: bool,
}

impl Hand {
    pub fn new(bet: f64) -> Self {
        Self {
            cards: Vec::with_capacity(4),
            bet,
            state: HandState::Dealt,
            from_split: false,
        }
    }

    pub fn with_cards(cards: Vec<Card>, bet: f64) -> Self {
        Self {
            cards,
            bet,
            state: HandState::Dealt,
            from_split: false,
        }
    }

    pub(crate) fn split_child(card: Card, bet: f64) -> Self {
        Self {
            cards: vec![card],
            bet,
            state: HandState::Dealt,
            from_split: true,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    pub fn is_from_split(&self) -> bool {
        self.from_split
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn set_state(&mut self, state: HandState) {
        self.state = state;
    }

    pub(crate) fn set_bet(&mut self, bet: f64) {
        self.bet = bet;
    }

    pub(crate) fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Total with every Ace counted as one.
    pub fn hard_total(&self) -> u8 {
        self.cards.iter().map(|c| c.rank.blackjack_value()).sum()
    }

    /// Best total: one Ace is promoted to eleven when that does not bust.
    pub fn value(&self) -> u8 {
        let hard = self.hard_total();
        if self.has_ace() && hard + 10 <= 21 {
            hard + 10
        } else {
            hard
        }
    }

    /// An Ace is currently counted as eleven.
    pub fn is_soft(&self) -> bool {
        self.has_ace() && self.hard_total() + 10 <= 21
    }

    pub fn is_bust(&self) -> bool {
        self.hard_total() > 21
    }

    /// Two-card 21 on an original (non-split) hand.
    pub fn is_blackjack(&self) -> bool {
        !self.from_split && self.cards.len() == 2 && self.value() == 21
    }

    /// Rank of the pair when the hand is exactly two cards of equal rank.
    pub fn pair_rank(&self) -> Option<Rank> {
        match self.cards.as_slice() {
            [a, b] if a.rank == b.rank => Some(a.rank),
            _ => None,
        }
    }

    fn has_ace(&self) -> bool {
        self.cards.iter().any(|c| c.rank == Rank::Ace)
    }
}
