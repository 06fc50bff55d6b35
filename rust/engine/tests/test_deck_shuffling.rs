use std::collections::HashMap;

use croupier_engine::cards::Card;
use croupier_engine::deck::{new_deck, Deck};
use croupier_engine::errors::GameError;

#[test]
fn same_seed_yields_identical_shoe() {
    for seed in [0u64, 1, 42, 12345, u64::MAX] {
        let mut d1 = Deck::new_with_seed(6, seed).unwrap();
        let mut d2 = Deck::new_with_seed(6, seed).unwrap();
        let a: Vec<Card> = d1.draw_n(312).unwrap();
        let b: Vec<Card> = d2.draw_n(312).unwrap();
        assert_eq!(a, b, "seed {seed} must reproduce the shoe");
    }
}

#[test]
fn different_seeds_differ() {
    let mut d1 = Deck::new_with_seed(1, 1).unwrap();
    let mut d2 = Deck::new_with_seed(1, 2).unwrap();
    let a = d1.draw_n(10).unwrap();
    let b = d2.draw_n(10).unwrap();
    assert_ne!(a, b, "different seeds should produce different orders (high probability)");
}

#[test]
fn shoe_holds_each_card_once_per_deck() {
    for decks in 1..=8usize {
        let mut deck = Deck::new_with_seed(decks, 99).unwrap();
        assert_eq!(deck.len(), 52 * decks);
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for i in 0..52 * decks {
            let c = deck.draw().unwrap_or_else(|e| panic!("draw {i} failed: {e}"));
            *counts.entry(c).or_default() += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == decks));
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    }
}

#[test]
fn zero_decks_is_a_config_error() {
    assert!(matches!(new_deck(0), Err(GameError::InvalidConfig(_))));
}

#[test]
fn reset_restores_full_shoe() {
    let mut deck = new_deck(2).unwrap();
    deck.draw_n(100).unwrap();
    assert_eq!(deck.remaining(), 4);
    deck.reset();
    assert_eq!(deck.remaining(), 104);
    assert_eq!(deck.penetration(), 0.0);
}
