use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered shoe of one or more 52-card decks.
///
/// Cards are dealt from the front; `position` marks the next card to draw so
/// that `reset` can restore the shoe without reallocating.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    num_decks: usize,
}

/// Builds a fresh shoe of `52 * num_decks` cards in canonical order.
pub fn new_deck(num_decks: usize) -> Result<Deck, GameError> {
    Deck::new(num_decks)
}

impl Deck {
    pub fn new(num_decks: usize) -> Result<Self, GameError> {
        if num_decks == 0 {
            return Err(GameError::InvalidConfig(
                "num_decks must be >= 1".to_string(),
            ));
        }
        Ok(Self {
            cards: canonical_shoe(num_decks),
            position: 0,
            num_decks,
        })
    }

    /// Fresh shoe shuffled with a ChaCha20 stream seeded from `seed`.
    pub fn new_with_seed(num_decks: usize, seed: u64) -> Result<Self, GameError> {
        let mut deck = Self::new(num_decks)?;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        deck.shuffle(&mut rng);
        Ok(deck)
    }

    /// Shoe with an explicit card order; the first element is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let num_decks = cards.len().div_ceil(52).max(1);
        Self {
            cards,
            position: 0,
            num_decks,
        }
    }

    /// Uniformly permutes the undealt cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards[self.position..].shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.draw()).collect()
    }

    /// Restores a full shoe in canonical order.
    pub fn reset(&mut self) {
        self.cards = canonical_shoe(self.num_decks);
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Fraction of the shoe already dealt.
    pub fn penetration(&self) -> f64 {
        if self.cards.is_empty() {
            return 1.0;
        }
        self.position as f64 / self.cards.len() as f64
    }
}

fn canonical_shoe(num_decks: usize) -> Vec<Card> {
    let mut v = Vec::with_capacity(52 * num_decks);
    for _ in 0..num_decks {
        v.extend(full_deck());
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn zero_decks_is_rejected() {
        assert!(matches!(Deck::new(0), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn from_cards_draws_in_given_order() {
        let mut deck = Deck::from_cards(vec![
            Card::new(Rank::Five, Suit::Clubs),
            Card::new(Rank::King, Suit::Hearts),
        ]);
        assert_eq!(deck.draw().unwrap().rank, Rank::Five);
        assert_eq!(deck.draw().unwrap().rank, Rank::King);
        assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn penetration_tracks_dealt_fraction() {
        let mut deck = Deck::new(1).unwrap();
        assert_eq!(deck.penetration(), 0.0);
        deck.draw_n(13).unwrap();
        assert!((deck.penetration() - 0.25).abs() < 1e-12);
        deck.reset();
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn shuffle_only_touches_undealt_cards() {
        let mut deck = Deck::new(1).unwrap();
        let first = deck.draw().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        deck.shuffle(&mut rng);
        assert_eq!(deck.remaining(), 51);
        let rest = deck.draw_n(51).unwrap();
        assert!(!rest.contains(&first));
    }
}
