use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{Hand, HandState};
use crate::player::{Action, Outcome};
use crate::rules::{self, BlackjackRules, Settlement};
use crate::trial::TrialResult;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Complete,
    Settled,
}

/// One round of single-player blackjack against the dealer.
#[derive(Debug, Clone)]
pub struct BlackjackGame {
    rules: BlackjackRules,
    deck: Deck,
    hands: Vec<Hand>,
    dealer: Hand,
    phase: Phase,
}

impl BlackjackGame {
    /// New round on a freshly shuffled shoe.
    pub fn new<R: Rng + ?Sized>(rules: BlackjackRules, rng: &mut R) -> Result<Self, GameError> {
        rules.validate()?;
        let mut deck = Deck::new(rules.num_decks)?;
        deck.shuffle(rng);
        Ok(Self::assemble(rules, deck))
    }

    /// New round on a caller-provided shoe, drawn in its current order.
    pub fn with_deck(rules: BlackjackRules, deck: Deck) -> Result<Self, GameError> {
        rules.validate()?;
        Ok(Self::assemble(rules, deck))
    }

    fn assemble(rules: BlackjackRules, deck: Deck) -> Self {
        Self {
            rules,
            deck,
            hands: Vec::new(),
            dealer: Hand::new(0.0),
            phase: Phase::Betting,
        }
    }

    pub fn rules(&self) -> &BlackjackRules {
        &self.rules
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer.cards().first().copied()
    }

    /// Deals player, dealer, player, dealer. Player naturals are closed at
    /// once; a dealer natural under an Ace or ten is peeked and ends the
    /// player's turn.
    pub fn deal_initial_hands(&mut self, bet: f64) -> Result<(), GameError> {
        if self.phase != Phase::Betting {
            return Err(GameError::OutOfOrder { expected: "betting" });
        }
        if !(bet > 0.0 && bet.is_finite()) {
            return Err(GameError::InvalidBet { amount: bet });
        }
        let mut player = Hand::new(bet);
        player.push(self.deck.draw()?);
        self.dealer.push(self.deck.draw()?);
        player.push(self.deck.draw()?);
        self.dealer.push(self.deck.draw()?);

        let up_is_peekable = self
            .dealer_up_card()
            .is_some_and(|c| c.rank.is_ten_value() || c.rank == Rank::Ace);
        if player.is_blackjack() || (up_is_peekable && self.dealer.is_blackjack()) {
            player.set_state(HandState::Stood);
        }
        self.hands.push(player);
        self.phase = Phase::PlayerTurn;
        self.advance();
        Ok(())
    }

    /// Index of the first hand still awaiting a decision.
    pub fn next_open_hand(&self) -> Option<usize> {
        self.hands.iter().position(|h| h.state().is_open())
    }

    /// Actions the rules currently allow on hand `index`.
    pub fn legal_actions(&self, index: usize) -> Vec<Action> {
        let Some(hand) = self.hands.get(index) else {
            return Vec::new();
        };
        if self.phase != Phase::PlayerTurn || !hand.state().is_open() {
            return Vec::new();
        }
        let mut v = vec![Action::Hit, Action::Stand];
        if self.can_double(hand) {
            v.push(Action::Double);
        }
        if self.can_split(hand) {
            v.push(Action::Split);
        }
        if self.can_surrender(hand) {
            v.push(Action::Surrender);
        }
        v
    }

    fn can_double(&self, hand: &Hand) -> bool {
        self.rules.allow_double
            && hand.state() == HandState::Dealt
            && hand.cards().len() == 2
            && (!hand.is_from_split() || self.rules.allow_double_after_split)
    }

    fn can_split(&self, hand: &Hand) -> bool {
        let resplit_ok = if hand.is_from_split() {
            self.rules.allow_resplit && self.hands.len() < self.rules.max_hands
        } else {
            true
        };
        self.rules.allow_split
            && hand.state() == HandState::Dealt
            && hand.pair_rank().is_some()
            && resplit_ok
    }

    fn can_surrender(&self, hand: &Hand) -> bool {
        self.rules.allow_surrender && hand.state() == HandState::Dealt && !hand.is_from_split()
    }

    pub fn apply(&mut self, index: usize, action: Action) -> Result<(), GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::invalid_action(action, "not the player's turn"));
        }
        if index >= self.hands.len() {
            return Err(GameError::invalid_action(action, format!("no hand {index}")));
        }
        match action {
            Action::Hit => {
                rules::hit(&mut self.hands[index], &mut self.deck)?;
            }
            Action::Stand => rules::stand(&mut self.hands[index])?,
            Action::Double => {
                rules::double(&mut self.hands[index], &mut self.deck, &self.rules)?;
            }
            Action::Surrender => rules::surrender(&mut self.hands[index], &self.rules)?,
            Action::Split => self.split(index)?,
        }
        self.advance();
        Ok(())
    }

    pub fn hit(&mut self, index: usize) -> Result<(), GameError> {
        self.apply(index, Action::Hit)
    }

    pub fn stand(&mut self, index: usize) -> Result<(), GameError> {
        self.apply(index, Action::Stand)
    }

    pub fn double(&mut self, index: usize) -> Result<(), GameError> {
        self.apply(index, Action::Double)
    }

    pub fn surrender(&mut self, index: usize) -> Result<(), GameError> {
        self.apply(index, Action::Surrender)
    }

    fn split(&mut self, index: usize) -> Result<(), GameError> {
        if !self.rules.allow_split {
            return Err(GameError::invalid_action(Action::Split, "splitting is disabled"));
        }
        if !self.can_split(&self.hands[index]) {
            return Err(GameError::invalid_action(
                Action::Split,
                "hand cannot be split under the table rules",
            ));
        }
        let (first, second) = rules::split(&mut self.hands[index], &mut self.deck)?;
        self.hands[index] = first;
        self.hands.insert(index + 1, second);
        Ok(())
    }

    fn advance(&mut self) {
        if self.phase == Phase::PlayerTurn && self.next_open_hand().is_none() {
            self.phase = Phase::DealerTurn;
        }
    }

    /// Plays the dealer's hand out and returns its final total. The dealer
    /// skips drawing when no player hand is left to decide.
    pub fn play_dealer(&mut self) -> Result<u8, GameError> {
        if self.phase != Phase::DealerTurn {
            return Err(GameError::OutOfOrder {
                expected: "player hands closed",
            });
        }
        let any_live = self
            .hands
            .iter()
            .any(|h| !h.is_blackjack() && !matches!(h.state(), HandState::Bust | HandState::Surrendered));
        let total = if any_live && !self.dealer.is_blackjack() {
            rules::dealer_play(&mut self.dealer, &mut self.deck, self.rules.dealer_hits_soft_17)?
        } else {
            self.dealer.set_state(HandState::Stood);
            self.dealer.value()
        };
        self.phase = Phase::Complete;
        Ok(total)
    }

    /// Settles every player hand against the dealer's final hand. A round
    /// settles once.
    pub fn settle(&mut self) -> Result<RoundSummary, GameError> {
        match self.phase {
            Phase::Complete => {}
            Phase::Settled => {
                return Err(GameError::OutOfOrder {
                    expected: "a new round",
                });
            }
            _ => {
                return Err(GameError::OutOfOrder {
                    expected: "dealer play",
                });
            }
        }
        let settlements: Vec<Settlement> = self
            .hands
            .iter()
            .map(|h| rules::settle(h, &self.dealer, self.rules.blackjack_payout))
            .collect();
        for h in &mut self.hands {
            h.set_state(HandState::Settled);
        }
        self.phase = Phase::Settled;
        Ok(RoundSummary::new(settlements))
    }
}

/// Settlements of every hand in a round and their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub settlements: Vec<Settlement>,
    pub outcome: Outcome,
    pub total_bet: f64,
    pub payout: f64,
    pub net_win: f64,
}

impl RoundSummary {
    fn new(settlements: Vec<Settlement>) -> Self {
        let total_bet = settlements.iter().map(|s| s.wager).sum();
        let payout = settlements.iter().map(|s| s.payout).sum();
        let net_win: f64 = settlements.iter().map(|s| s.net_win).sum();
        let outcome = match settlements.as_slice() {
            [only] => only.outcome,
            _ if net_win > 0.0 => Outcome::Win,
            _ if net_win < 0.0 => Outcome::Lose,
            _ => Outcome::Push,
        };
        Self {
            settlements,
            outcome,
            total_bet,
            payout,
            net_win,
        }
    }

    pub fn to_trial_result(&self) -> TrialResult {
        TrialResult::new(self.outcome.as_str())
            .with("net_win", self.net_win)
            .with("payout", self.payout)
            .with("total_bet", self.total_bet)
            .with("num_hands", self.settlements.len() as f64)
    }
}
