//! Gambler and dealer hand representations.

use core::fmt;

use alloc::vec::Vec;

use crate::card::Card;
use crate::money::Money;
use crate::result::HandOutcome;

/// Low total and, when an ace can count as 11 without busting, the high total.
fn possible_totals(cards: &[Card]) -> (u8, Option<u8>) {
    let aces = cards.iter().filter(|c| c.is_ace()).count() as u8;
    let others = cards
        .iter()
        .filter(|c| !c.is_ace())
        .fold(0u8, |sum, c| sum.saturating_add(c.value()));

    if aces == 0 {
        return (others, None);
    }

    // Only one ace can be worth 11 without the hand busting.
    let low = others.saturating_add(aces);
    let high = low.saturating_add(10);
    if high > 21 { (low, None) } else { (low, Some(high)) }
}

fn final_total(cards: &[Card]) -> u8 {
    let (low, high) = possible_totals(cards);
    high.unwrap_or(low)
}

fn format_totals(cards: &[Card]) -> TotalDisplay {
    match possible_totals(cards) {
        (_, Some(21)) => TotalDisplay::Single(21),
        (low, Some(high)) => TotalDisplay::Either(low, high),
        (low, None) => TotalDisplay::Single(low),
    }
}

/// How a hand total is shown while the hand is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalDisplay {
    /// A single total.
    Single(u8),
    /// Soft hand: low or high.
    Either(u8, u8),
}

impl fmt::Display for TotalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(total) => write!(f, "{total}"),
            Self::Either(low, high) => write!(f, "{low} or {high}"),
        }
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandStatus {
    /// Dealt, not yet played.
    Pending,
    /// Being played.
    Playing,
    /// Stood.
    Stood,
    /// Doubled down.
    Doubled,
    /// Over 21.
    Busted,
    /// Natural 21.
    Blackjack,
    /// Surrendered.
    Surrendered,
    /// Resolved without an explicit status transition.
    Played,
}

impl HandStatus {
    /// Returns whether the hand can still change.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Playing => "Playing",
            Self::Stood => "Stood",
            Self::Doubled => "Doubled",
            Self::Busted => "Busted",
            Self::Blackjack => "Blackjack",
            Self::Surrendered => "Surrendered",
            Self::Played => "Played",
        }
    }
}

impl fmt::Display for HandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A gambler's hand, with its wagers and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamblerHand {
    cards: Vec<Card>,
    status: HandStatus,
    wager: Money,
    insurance: Money,
    earnings: Money,
    outcome: Option<HandOutcome>,
    hand_number: u8,
    lost_insurance: bool,
}

impl GamblerHand {
    /// Creates an empty hand with no wager.
    #[must_use]
    pub const fn new(hand_number: u8) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Pending,
            wager: Money::ZERO,
            insurance: Money::ZERO,
            earnings: Money::ZERO,
            outcome: None,
            hand_number,
            lost_insurance: false,
        }
    }

    /// Creates a hand holding the given cards.
    #[must_use]
    pub fn with_cards(hand_number: u8, cards: Vec<Card>) -> Self {
        let mut hand = Self::new(hand_number);
        hand.cards = cards;
        hand
    }

    /// Creates a hand whose only card stands for `total` points.
    #[must_use]
    pub fn from_total(hand_number: u8, total: u8) -> Self {
        Self::with_cards(hand_number, alloc::vec![Card::total(total)])
    }

    /// Returns the cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Replaces the cards with a single card standing for `total` points.
    pub fn replace_total(&mut self, total: u8) {
        self.cards.clear();
        self.cards.push(Card::total(total));
    }

    /// Adds a card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the 1-based hand number.
    #[must_use]
    pub const fn hand_number(&self) -> u8 {
        self.hand_number
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the outcome, once known.
    #[must_use]
    pub const fn outcome(&self) -> Option<HandOutcome> {
        self.outcome
    }

    /// Records the outcome. A `Pending` hand becomes `Played`.
    ///
    /// Returns `false` and changes nothing if an outcome was already recorded.
    pub const fn set_outcome(&mut self, outcome: HandOutcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        if matches!(self.status, HandStatus::Pending) {
            self.status = HandStatus::Played;
        }
        true
    }

    /// Returns the main wager.
    #[must_use]
    pub const fn wager(&self) -> Money {
        self.wager
    }

    pub(crate) fn add_wager(&mut self, amount: Money) {
        self.wager += amount;
    }

    /// Returns the insurance wager.
    #[must_use]
    pub const fn insurance(&self) -> Money {
        self.insurance
    }

    pub(crate) const fn set_insurance(&mut self, amount: Money) {
        self.insurance = amount;
    }

    /// Returns everything credited back to the bankroll for this hand.
    ///
    /// Includes the half stake returned on surrender, which is not an odds
    /// payout.
    #[must_use]
    pub const fn earnings(&self) -> Money {
        self.earnings
    }

    pub(crate) fn add_earnings(&mut self, amount: Money) {
        self.earnings += amount;
    }

    /// Returns whether an insurance wager was placed and lost.
    #[must_use]
    pub const fn lost_insurance(&self) -> bool {
        self.lost_insurance
    }

    pub(crate) const fn mark_lost_insurance(&mut self) {
        self.lost_insurance = true;
    }

    /// Net result in cents: earnings minus everything staked.
    #[must_use]
    pub fn net(&self) -> i64 {
        self.earnings.cents() as i64 - self.wager.cents() as i64 - self.insurance.cents() as i64
    }

    /// Low total and optional high total.
    #[must_use]
    pub fn possible_totals(&self) -> (u8, Option<u8>) {
        possible_totals(&self.cards)
    }

    /// The highest total not over 21 if there is one, otherwise the lowest.
    #[must_use]
    pub fn final_total(&self) -> u8 {
        final_total(&self.cards)
    }

    /// The total to show: both totals while open, the final total once done.
    #[must_use]
    pub fn total_display(&self) -> TotalDisplay {
        if self.status.is_open() {
            format_totals(&self.cards)
        } else {
            TotalDisplay::Single(self.final_total())
        }
    }

    /// Returns whether the hand totals 21.
    #[must_use]
    pub fn is_21(&self) -> bool {
        self.final_total() == 21
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.final_total() > 21
    }

    /// Returns whether an ace is being counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.possible_totals().1.is_some()
    }

    /// Returns whether the hand is two real cards of the same rank.
    #[must_use]
    pub fn is_splittable(&self) -> bool {
        self.cards.len() == 2
            && !self.cards[0].is_synthetic()
            && self.cards[0].rank() == self.cards[1].rank()
    }

    /// Returns whether no action has been taken on the hand yet.
    ///
    /// A hand reported as a single total counts as freshly dealt, as does a
    /// hand of two real cards.
    #[must_use]
    pub fn is_doubleable(&self) -> bool {
        match self.cards.as_slice() {
            [card] => card.is_synthetic(),
            [first, second] => !first.is_synthetic() && !second.is_synthetic(),
            _ => false,
        }
    }
}

/// The dealer's hand. Only the first card is visible until revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerHand {
    cards: Vec<Card>,
    status: HandStatus,
}

impl DealerHand {
    /// Creates a dealer hand showing `up_card`.
    #[must_use]
    pub fn new(up_card: Card) -> Self {
        Self {
            cards: alloc::vec![up_card],
            status: HandStatus::Pending,
        }
    }

    /// Adds a card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Drops every card but the up card.
    pub fn truncate_to_up_card(&mut self) {
        self.cards.truncate(1);
    }

    /// Returns all cards.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card.
    #[must_use]
    pub fn up_card(&self) -> Card {
        self.cards[0]
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the up card is an ace.
    #[must_use]
    pub fn is_showing_ace(&self) -> bool {
        self.up_card().is_ace()
    }

    /// Returns whether the up card is worth ten.
    #[must_use]
    pub fn is_showing_face_card(&self) -> bool {
        self.up_card().is_face_card()
    }

    /// Total of the visible card only.
    #[must_use]
    pub fn visible_total(&self) -> TotalDisplay {
        let up = self.up_card();
        if up.is_ace() {
            TotalDisplay::Either(1, 11)
        } else {
            TotalDisplay::Single(up.value())
        }
    }

    /// The highest total not over 21 if there is one, otherwise the lowest.
    #[must_use]
    pub fn final_total(&self) -> u8 {
        final_total(&self.cards)
    }

    /// The total to show once the hand is revealed.
    #[must_use]
    pub fn total_display(&self) -> TotalDisplay {
        if self.status.is_open() {
            format_totals(&self.cards)
        } else {
            TotalDisplay::Single(self.final_total())
        }
    }

    /// Returns whether the hand is exactly two real cards totalling 21.
    ///
    /// A hand completed with a remainder card never counts.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2
            && !self.cards.iter().any(Card::is_synthetic)
            && self.final_total() == 21
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.final_total() > 21
    }
}
