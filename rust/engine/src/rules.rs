use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{Hand, HandState};
use crate::player::{Action, Outcome};
use crate::trial::TrialResult;

/// Table rules for one blackjack game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackjackRules {
    pub num_decks: usize,
    /// Dealer draws on soft 17 (H17) instead of standing (S17)
    pub dealer_hits_soft_17: bool,
    /// Profit multiple paid on a natural, 1.5 for 3:2
    pub blackjack_payout: f64,
    pub allow_double: bool,
    pub allow_double_after_split: bool,
    pub allow_split: bool,
    pub allow_resplit: bool,
    /// Upper bound on player hands once re-splitting is allowed
    pub max_hands: usize,
    pub allow_surrender: bool,
}

impl Default for BlackjackRules {
    fn default() -> Self {
        Self {
            num_decks: 6,
            dealer_hits_soft_17: false,
            blackjack_payout: 1.5,
            allow_double: true,
            allow_double_after_split: true,
            allow_split: true,
            allow_resplit: false,
            max_hands: 4,
            allow_surrender: false,
        }
    }
}

impl BlackjackRules {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_decks == 0 {
            return Err(GameError::InvalidConfig("num_decks must be >= 1".into()));
        }
        if !(self.blackjack_payout > 0.0 && self.blackjack_payout.is_finite()) {
            return Err(GameError::InvalidConfig(format!(
                "blackjack_payout must be > 0 (got {})",
                self.blackjack_payout
            )));
        }
        if self.max_hands < 2 {
            return Err(GameError::InvalidConfig("max_hands must be >= 2".into()));
        }
        Ok(())
    }
}

/// Money movement for one settled hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    /// Amount staked on the hand, including any double
    pub wager: f64,
    /// Amount returned to the player, stake included
    pub payout: f64,
    pub net_win: f64,
}

impl Settlement {
    fn new(outcome: Outcome, wager: f64, payout: f64) -> Self {
        Self {
            outcome,
            wager,
            payout,
            net_win: payout - wager,
        }
    }
}

impl From<&Settlement> for TrialResult {
    fn from(s: &Settlement) -> Self {
        TrialResult::new(s.outcome.as_str())
            .with("payout", s.payout)
            .with("net_win", s.net_win)
            .with("total_bet", s.wager)
    }
}

fn ensure_open(hand: &Hand, action: Action) -> Result<(), GameError> {
    if hand.state().is_open() {
        Ok(())
    } else {
        Err(GameError::invalid_action(
            action,
            format!("hand is {:?}", hand.state()),
        ))
    }
}

/// Appends one card; the hand goes bust when its total passes 21.
pub fn hit(hand: &mut Hand, deck: &mut Deck) -> Result<Card, GameError> {
    ensure_open(hand, Action::Hit)?;
    let card = deck.draw()?;
    hand.push(card);
    hand.set_state(if hand.is_bust() {
        HandState::Bust
    } else {
        HandState::Acting
    });
    Ok(card)
}

pub fn stand(hand: &mut Hand) -> Result<(), GameError> {
    ensure_open(hand, Action::Stand)?;
    hand.set_state(HandState::Stood);
    Ok(())
}

/// Doubles the wager, draws exactly one card and closes the hand.
pub fn double(hand: &mut Hand, deck: &mut Deck, rules: &BlackjackRules) -> Result<Card, GameError> {
    ensure_open(hand, Action::Double)?;
    if !rules.allow_double {
        return Err(GameError::invalid_action(Action::Double, "doubling is disabled"));
    }
    if hand.state() != HandState::Dealt || hand.cards().len() != 2 {
        return Err(GameError::invalid_action(
            Action::Double,
            "only allowed as the first action on two cards",
        ));
    }
    if hand.is_from_split() && !rules.allow_double_after_split {
        return Err(GameError::invalid_action(
            Action::Double,
            "doubling after a split is disabled",
        ));
    }
    let card = deck.draw()?;
    hand.set_bet(hand.bet() * 2.0);
    hand.push(card);
    hand.set_state(if hand.is_bust() {
        HandState::Bust
    } else {
        HandState::Doubled
    });
    Ok(card)
}

/// Late surrender: half the wager is forfeited, first action only.
pub fn surrender(hand: &mut Hand, rules: &BlackjackRules) -> Result<(), GameError> {
    ensure_open(hand, Action::Surrender)?;
    if !rules.allow_surrender {
        return Err(GameError::invalid_action(Action::Surrender, "surrender is disabled"));
    }
    if hand.state() != HandState::Dealt || hand.is_from_split() {
        return Err(GameError::invalid_action(
            Action::Surrender,
            "only allowed as the first action on the original hand",
        ));
    }
    hand.set_state(HandState::Surrendered);
    Ok(())
}

/// Splits a pair into two hands, each keeping one original card and
/// receiving one fresh card, each carrying the original wager.
pub fn split(hand: &mut Hand, deck: &mut Deck) -> Result<(Hand, Hand), GameError> {
    ensure_open(hand, Action::Split)?;
    if hand.state() != HandState::Dealt || hand.pair_rank().is_none() {
        return Err(GameError::invalid_action(
            Action::Split,
            "requires exactly two cards of equal rank",
        ));
    }
    let bet = hand.bet();
    let (first_extra, second_extra) = (deck.draw()?, deck.draw()?);
    let mut cards = hand.take_cards().into_iter();
    let (Some(c1), Some(c2)) = (cards.next(), cards.next()) else {
        return Err(GameError::invalid_action(Action::Split, "missing cards"));
    };
    let mut first = Hand::split_child(c1, bet);
    first.push(first_extra);
    let mut second = Hand::split_child(c2, bet);
    second.push(second_extra);
    hand.set_state(HandState::Settled);
    Ok((first, second))
}

/// Dealer policy: draw below 17, and on soft 17 when `hits_soft_17`.
/// Returns the dealer's final total.
pub fn dealer_play(dealer: &mut Hand, deck: &mut Deck, hits_soft_17: bool) -> Result<u8, GameError> {
    loop {
        let v = dealer.value();
        let must_hit = v < 17 || (v == 17 && hits_soft_17 && dealer.is_soft());
        if !must_hit {
            break;
        }
        dealer.push(deck.draw()?);
    }
    dealer.set_state(if dealer.is_bust() {
        HandState::Bust
    } else {
        HandState::Stood
    });
    Ok(dealer.value())
}

/// Settles one player hand against the dealer's final hand.
///
/// Order of precedence: surrender, player bust, naturals (a dealer natural
/// beats any non-natural), dealer bust, then the higher total; equal totals
/// push.
pub fn settle(player: &Hand, dealer: &Hand, blackjack_payout: f64) -> Settlement {
    let wager = player.bet();
    if player.state() == HandState::Surrendered {
        return Settlement::new(Outcome::Surrender, wager, wager / 2.0);
    }
    if player.is_bust() {
        return Settlement::new(Outcome::Lose, wager, 0.0);
    }
    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => return Settlement::new(Outcome::Push, wager, wager),
        (true, false) => {
            return Settlement::new(Outcome::Blackjack, wager, wager * (1.0 + blackjack_payout))
        }
        (false, true) => return Settlement::new(Outcome::Lose, wager, 0.0),
        (false, false) => {}
    }
    if dealer.is_bust() {
        return Settlement::new(Outcome::Win, wager, wager * 2.0);
    }
    let (p, d) = (player.value(), dealer.value());
    if p > d {
        Settlement::new(Outcome::Win, wager, wager * 2.0)
    } else if p < d {
        Settlement::new(Outcome::Lose, wager, 0.0)
    } else {
        Settlement::new(Outcome::Push, wager, wager)
    }
}
