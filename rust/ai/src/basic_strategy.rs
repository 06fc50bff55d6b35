//! Basic strategy chart for a multi-deck game with doubling after a split.
//! The soft doubles follow the hit-soft-17 chart: A,8 doubles against a 6.
//!
//! The chart is three constant tables indexed by player total (or pair
//! rank) and dealer up card. Cells that name a conditional play, such as
//! double-else-hit, are resolved against [`Permissions`] at lookup time.

use croupier_engine::cards::{Card, Rank};
use croupier_engine::hand::Hand;
use croupier_engine::player::Action;

use crate::Strategy;

/// The minimal view of a player hand the chart needs.
pub trait HandView {
    /// Best total, with one Ace promoted to eleven when that does not bust.
    fn total(&self) -> u8;
    fn is_soft(&self) -> bool;
    /// Rank of the pair when the hand is exactly two cards of equal rank.
    fn pair_rank(&self) -> Option<Rank>;
    fn card_count(&self) -> usize;
}

impl HandView for Hand {
    fn total(&self) -> u8 {
        self.value()
    }

    fn is_soft(&self) -> bool {
        Hand::is_soft(self)
    }

    fn pair_rank(&self) -> Option<Rank> {
        Hand::pair_rank(self)
    }

    fn card_count(&self) -> usize {
        self.cards().len()
    }
}

/// Which optional plays are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub double: bool,
    pub split: bool,
    pub surrender: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            double: true,
            split: true,
            surrender: false,
        }
    }
}

impl Permissions {
    /// Permissions implied by a legal-action list from the rules engine.
    pub fn from_actions(allowed: &[Action]) -> Self {
        Self {
            double: allowed.contains(&Action::Double),
            split: allowed.contains(&Action::Split),
            surrender: allowed.contains(&Action::Surrender),
        }
    }
}

/// One chart cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Hit,
    Stand,
    /// Double when permitted, otherwise hit
    DoubleOrHit,
    /// Double when permitted, otherwise stand
    DoubleOrStand,
    /// Surrender when permitted, otherwise hit
    SurrenderOrHit,
}

const H: Entry = Entry::Hit;
const S: Entry = Entry::Stand;
const DH: Entry = Entry::DoubleOrHit;
const DS: Entry = Entry::DoubleOrStand;
const RH: Entry = Entry::SurrenderOrHit;

const Y: bool = true;
const N: bool = false;

// Columns: dealer up card 2, 3, 4, 5, 6, 7, 8, 9, 10, A.

/// Hard totals 4..=21.
const HARD: [[Entry; 10]; 18] = [
    [H, H, H, H, H, H, H, H, H, H],          // 4
    [H, H, H, H, H, H, H, H, H, H],          // 5
    [H, H, H, H, H, H, H, H, H, H],          // 6
    [H, H, H, H, H, H, H, H, H, H],          // 7
    [H, H, H, H, H, H, H, H, H, H],          // 8
    [H, DH, DH, DH, DH, H, H, H, H, H],      // 9
    [DH, DH, DH, DH, DH, DH, DH, DH, H, H],  // 10
    [DH, DH, DH, DH, DH, DH, DH, DH, DH, H], // 11
    [H, H, S, S, S, H, H, H, H, H],          // 12
    [S, S, S, S, S, H, H, H, H, H],          // 13
    [S, S, S, S, S, H, H, H, H, H],          // 14
    [S, S, S, S, S, H, H, H, RH, H],         // 15
    [S, S, S, S, S, H, H, RH, RH, RH],       // 16
    [S, S, S, S, S, S, S, S, S, S],          // 17
    [S, S, S, S, S, S, S, S, S, S],          // 18
    [S, S, S, S, S, S, S, S, S, S],          // 19
    [S, S, S, S, S, S, S, S, S, S],          // 20
    [S, S, S, S, S, S, S, S, S, S],          // 21
];

/// Soft totals 12..=21 (an Ace counted as eleven).
const SOFT: [[Entry; 10]; 10] = [
    [H, H, H, H, H, H, H, H, H, H],      // A,A not split
    [H, H, H, DH, DH, H, H, H, H, H],    // A,2
    [H, H, H, DH, DH, H, H, H, H, H],    // A,3
    [H, H, DH, DH, DH, H, H, H, H, H],   // A,4
    [H, H, DH, DH, DH, H, H, H, H, H],   // A,5
    [H, DH, DH, DH, DH, H, H, H, H, H],  // A,6
    [S, DS, DS, DS, DS, S, S, H, H, H],  // A,7
    [S, S, S, S, DS, S, S, S, S, S],     // A,8
    [S, S, S, S, S, S, S, S, S, S],      // A,9
    [S, S, S, S, S, S, S, S, S, S],      // A,10
];

/// Whether to split a pair, by pair rank 2..=10 then Ace.
const PAIRS: [[bool; 10]; 10] = [
    [Y, Y, Y, Y, Y, Y, N, N, N, N], // 2,2
    [Y, Y, Y, Y, Y, Y, N, N, N, N], // 3,3
    [N, N, N, Y, Y, N, N, N, N, N], // 4,4
    [N, N, N, N, N, N, N, N, N, N], // 5,5
    [Y, Y, Y, Y, Y, N, N, N, N, N], // 6,6
    [Y, Y, Y, Y, Y, Y, N, N, N, N], // 7,7
    [Y, Y, Y, Y, Y, Y, Y, Y, Y, Y], // 8,8
    [Y, Y, Y, Y, Y, N, Y, Y, N, N], // 9,9
    [N, N, N, N, N, N, N, N, N, N], // 10,10
    [Y, Y, Y, Y, Y, Y, Y, Y, Y, Y], // A,A
];

/// Chart index for a rank: 2..=10 map to 0..=8, Ace to 9.
fn column(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 9,
        r => usize::from(r.blackjack_value()) - 2,
    }
}

/// Raw chart cell for a non-split decision.
pub fn chart_entry(total: u8, soft: bool, dealer_up: Rank) -> Entry {
    let col = column(dealer_up);
    if soft && (12..=21).contains(&total) {
        SOFT[usize::from(total - 12)][col]
    } else {
        let row = usize::from(total.clamp(4, 21) - 4);
        HARD[row][col]
    }
}

/// Whether the chart splits `pair` against `dealer_up`.
pub fn should_split(pair: Rank, dealer_up: Rank) -> bool {
    PAIRS[column(pair)][column(dealer_up)]
}

/// Chart decision with the default permissions (double and split allowed,
/// surrender not).
pub fn get_action(hand: &dyn HandView, dealer_up: Card) -> Action {
    get_action_with(hand, dealer_up, Permissions::default())
}

/// Chart decision, falling back to the alternative play whenever the
/// preferred one is not permitted or the hand has more than two cards.
pub fn get_action_with(hand: &dyn HandView, dealer_up: Card, perms: Permissions) -> Action {
    let total = hand.total();
    if total >= 21 {
        return Action::Stand;
    }
    let first_decision = hand.card_count() == 2;

    if first_decision && perms.split {
        if let Some(pair) = hand.pair_rank() {
            if should_split(pair, dealer_up.rank) {
                return Action::Split;
            }
        }
    }

    let can_double = first_decision && perms.double;
    match chart_entry(total, hand.is_soft(), dealer_up.rank) {
        Entry::Hit => Action::Hit,
        Entry::Stand => Action::Stand,
        Entry::DoubleOrHit if can_double => Action::Double,
        Entry::DoubleOrHit => Action::Hit,
        Entry::DoubleOrStand if can_double => Action::Double,
        Entry::DoubleOrStand => Action::Stand,
        Entry::SurrenderOrHit if first_decision && perms.surrender => Action::Surrender,
        Entry::SurrenderOrHit => Action::Hit,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl Strategy for BasicStrategy {
    fn decide(&self, hand: &dyn HandView, dealer_up: Card, allowed: &[Action]) -> Action {
        get_action_with(hand, dealer_up, Permissions::from_actions(allowed))
    }

    fn name(&self) -> &str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::cards::{Suit, all_ranks};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::with_cards(ranks.iter().map(|&r| Card::new(r, Suit::Clubs)).collect(), 1.0)
    }

    fn up(rank: Rank) -> Card {
        Card::new(rank, Suit::Hearts)
    }

    #[test]
    fn chart_is_total_over_every_two_card_hand() {
        let allowed = [
            Action::Hit,
            Action::Stand,
            Action::Double,
            Action::Split,
            Action::Surrender,
        ];
        for a in all_ranks() {
            for b in all_ranks() {
                for d in all_ranks() {
                    let h = hand(&[a, b]);
                    let action =
                        get_action_with(&h, up(d), Permissions::from_actions(&allowed));
                    assert!(allowed.contains(&action));
                }
            }
        }
    }

    #[test]
    fn hard_totals() {
        assert_eq!(get_action(&hand(&[Rank::Ten, Rank::Six]), up(Rank::Ten)), Action::Hit);
        assert_eq!(get_action(&hand(&[Rank::Ten, Rank::Six]), up(Rank::Six)), Action::Stand);
        assert_eq!(get_action(&hand(&[Rank::Ten, Rank::Two]), up(Rank::Two)), Action::Hit);
        assert_eq!(get_action(&hand(&[Rank::Ten, Rank::Two]), up(Rank::Four)), Action::Stand);
        assert_eq!(get_action(&hand(&[Rank::Six, Rank::Five]), up(Rank::Ten)), Action::Double);
        assert_eq!(get_action(&hand(&[Rank::Six, Rank::Five]), up(Rank::Ace)), Action::Hit);
        assert_eq!(get_action(&hand(&[Rank::Ten, Rank::Seven]), up(Rank::Ace)), Action::Stand);
    }

    #[test]
    fn soft_totals() {
        assert_eq!(get_action(&hand(&[Rank::Ace, Rank::Seven]), up(Rank::Two)), Action::Stand);
        assert_eq!(get_action(&hand(&[Rank::Ace, Rank::Seven]), up(Rank::Five)), Action::Double);
        assert_eq!(get_action(&hand(&[Rank::Ace, Rank::Seven]), up(Rank::Nine)), Action::Hit);
        assert_eq!(get_action(&hand(&[Rank::Ace, Rank::Six]), up(Rank::Seven)), Action::Hit);
    }

    #[test]
    fn soft_nineteen_doubles_only_against_six() {
        let a8 = hand(&[Rank::Ace, Rank::Eight]);
        assert_eq!(get_action(&a8, up(Rank::Six)), Action::Double);
        assert_eq!(get_action(&a8, up(Rank::Five)), Action::Stand);
        assert_eq!(get_action(&a8, up(Rank::Seven)), Action::Stand);
        let no_double = Permissions {
            double: false,
            ..Permissions::default()
        };
        assert_eq!(get_action_with(&a8, up(Rank::Six), no_double), Action::Stand);
    }

    #[test]
    fn three_card_hand_never_doubles() {
        let h = hand(&[Rank::Two, Rank::Three, Rank::Six]);
        assert_eq!(h.value(), 11);
        assert_eq!(get_action(&h, up(Rank::Six)), Action::Hit);

        let soft = hand(&[Rank::Ace, Rank::Two, Rank::Five]);
        assert_eq!(get_action(&soft, up(Rank::Four)), Action::Stand);
    }

    #[test]
    fn pairs() {
        assert_eq!(get_action(&hand(&[Rank::Ace, Rank::Ace]), up(Rank::Ace)), Action::Split);
        assert_eq!(get_action(&hand(&[Rank::Eight, Rank::Eight]), up(Rank::Ten)), Action::Split);
        assert_eq!(get_action(&hand(&[Rank::King, Rank::King]), up(Rank::Six)), Action::Stand);
        assert_eq!(get_action(&hand(&[Rank::Nine, Rank::Nine]), up(Rank::Seven)), Action::Stand);
        assert_eq!(get_action(&hand(&[Rank::Five, Rank::Five]), up(Rank::Six)), Action::Double);
    }

    #[test]
    fn split_falls_back_to_totals() {
        let no_split = Permissions {
            split: false,
            ..Permissions::default()
        };
        let aces = hand(&[Rank::Ace, Rank::Ace]);
        assert_eq!(get_action_with(&aces, up(Rank::Six), no_split), Action::Hit);
        let eights = hand(&[Rank::Eight, Rank::Eight]);
        assert_eq!(get_action_with(&eights, up(Rank::Six), no_split), Action::Stand);
    }

    #[test]
    fn surrender_only_when_permitted() {
        let h = hand(&[Rank::Ten, Rank::Six]);
        assert_eq!(get_action(&h, up(Rank::Ace)), Action::Hit);
        let with_surrender = Permissions {
            surrender: true,
            ..Permissions::default()
        };
        assert_eq!(get_action_with(&h, up(Rank::Ace), with_surrender), Action::Surrender);
        assert_eq!(get_action_with(&h, up(Rank::Eight), with_surrender), Action::Hit);
    }

    #[test]
    fn twenty_one_and_bust_stand() {
        assert_eq!(
            get_action(&hand(&[Rank::Seven, Rank::Seven, Rank::Seven]), up(Rank::Ten)),
            Action::Stand
        );
        assert_eq!(
            get_action(&hand(&[Rank::Ten, Rank::Nine, Rank::Five]), up(Rank::Ten)),
            Action::Stand
        );
    }

    #[test]
    fn double_not_offered_hits_instead() {
        let no_double = Permissions {
            double: false,
            ..Permissions::default()
        };
        let h = hand(&[Rank::Six, Rank::Five]);
        assert_eq!(get_action_with(&h, up(Rank::Six), no_double), Action::Hit);
    }
}
