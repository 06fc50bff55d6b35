//! One-game trial functions. Each plays a complete game with its own fresh
//! deck, drawing every random choice from the driver's stream, and returns
//! the game's [`TrialResult`].

use rand::Rng;
use tracing::trace;

use croupier_engine::blackjack::BlackjackGame;
use croupier_engine::cards::{Card, Rank, Suit};
use croupier_engine::deck::Deck;
use croupier_engine::errors::GameError;
use croupier_engine::hand::Hand;
use croupier_engine::rules::{BlackjackRules, dealer_play};
use croupier_engine::slots::SlotMachine;
use croupier_engine::trial::TrialResult;

use crate::Strategy;

/// Dealer up cards covered by the bust study, one per distinct blackjack value.
pub const UP_CARDS: [Rank; 10] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Ace,
];

/// Field name carrying the bust flag for `up`.
pub fn dealer_bust_field(up: Rank) -> String {
    format!("dealer_bust_{}", up.label())
}

/// Deals one blackjack round and lets `strategy` play every player hand.
pub fn play_blackjack_round<R: Rng + ?Sized>(
    rules: &BlackjackRules,
    strategy: &dyn Strategy,
    bet: f64,
    rng: &mut R,
) -> Result<TrialResult, GameError> {
    let mut game = BlackjackGame::new(rules.clone(), rng)?;
    game.deal_initial_hands(bet)?;
    let up = game.dealer_up_card().ok_or(GameError::DeckExhausted)?;

    while let Some(i) = game.next_open_hand() {
        let allowed = game.legal_actions(i);
        let action = strategy.decide(&game.hands()[i], up, &allowed);
        trace!(hand = i, %action, strategy = strategy.name(), "player decision");
        game.apply(i, action)?;
    }

    game.play_dealer()?;
    Ok(game.settle()?.to_trial_result())
}

/// Plays the dealer policy once against each up card 2..A from one shoe and
/// records `dealer_bust_<up>` as 1.0 or 0.0.
pub fn dealer_bust_study<R: Rng + ?Sized>(
    rules: &BlackjackRules,
    rng: &mut R,
) -> Result<TrialResult, GameError> {
    let mut deck = Deck::new(rules.num_decks)?;
    deck.shuffle(rng);
    let mut result = TrialResult::new("played");
    for up in UP_CARDS {
        // A single deck can run dry across ten dealer hands.
        if deck.remaining() < 12 {
            deck.reset();
            deck.shuffle(rng);
        }
        let mut dealer = Hand::with_cards(vec![Card::new(up, Suit::Spades), deck.draw()?], 0.0);
        dealer_play(&mut dealer, &mut deck, rules.dealer_hits_soft_17)?;
        let busted = if dealer.is_bust() { 1.0 } else { 0.0 };
        result.set(dealer_bust_field(up), busted);
    }
    Ok(result)
}

/// One paid spin on a machine built once per run.
pub fn spin_slots<R: Rng + ?Sized>(
    machine: &SlotMachine,
    bet: f64,
    rng: &mut R,
) -> Result<TrialResult, GameError> {
    machine.play(bet, rng)
}
