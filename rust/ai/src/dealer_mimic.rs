//! Plays the player's hand with the dealer's fixed policy: hit below 17,
//! stand otherwise. Useful as a baseline against the chart.

use croupier_engine::cards::Card;
use croupier_engine::player::Action;

use crate::{HandView, Strategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct DealerMimic;

impl Strategy for DealerMimic {
    fn decide(&self, hand: &dyn HandView, _dealer_up: Card, _allowed: &[Action]) -> Action {
        if hand.total() < 17 {
            Action::Hit
        } else {
            Action::Stand
        }
    }

    fn name(&self) -> &str {
        "dealer"
    }
}
