//! Gambler and dealer accounts.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{GameError, InsufficientBankrollError};
use crate::hand::{DealerHand, GamblerHand};
use crate::money::Money;
use crate::options::RoundingMode;

/// The gambler: a bankroll, a standing auto-wager, and the hands in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gambler {
    name: String,
    bankroll: Money,
    auto_wager: Money,
    hands: Vec<GamblerHand>,
}

impl Gambler {
    /// Creates a gambler with no hands.
    ///
    /// The auto-wager is not checked against the bankroll here; the
    /// controller clamps it before every turn.
    #[must_use]
    pub fn new(name: impl Into<String>, bankroll: Money, auto_wager: Money) -> Self {
        Self {
            name: name.into(),
            bankroll,
            auto_wager,
            hands: Vec::new(),
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free bankroll (not counting money on the table).
    #[must_use]
    pub const fn bankroll(&self) -> Money {
        self.bankroll
    }

    /// Returns the standing auto-wager.
    #[must_use]
    pub const fn auto_wager(&self) -> Money {
        self.auto_wager
    }

    /// Returns the hands in play.
    #[must_use]
    pub fn hands(&self) -> &[GamblerHand] {
        &self.hands
    }

    /// Returns the hands in play, mutably.
    pub fn hands_mut(&mut self) -> &mut [GamblerHand] {
        &mut self.hands
    }

    /// Adds a hand.
    pub fn add_hand(&mut self, hand: GamblerHand) {
        self.hands.push(hand);
    }

    /// Returns the hand dealt first.
    #[must_use]
    pub fn first_hand(&self) -> Option<&GamblerHand> {
        self.hands.first()
    }

    /// Returns the hand dealt first, mutably.
    pub fn first_hand_mut(&mut self) -> Option<&mut GamblerHand> {
        self.hands.first_mut()
    }

    /// Detaches every hand.
    pub fn discard_hands(&mut self) {
        self.hands.clear();
    }

    /// Returns whether the gambler has cashed out or run out of money.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.auto_wager.is_zero() || self.bankroll.is_zero()
    }

    /// Credits the bankroll.
    pub fn payout(&mut self, amount: Money) {
        self.bankroll += amount;
    }

    fn deduct(&mut self, amount: Money) -> Result<(), InsufficientBankrollError> {
        self.bankroll = self
            .bankroll
            .checked_sub(amount)
            .ok_or(InsufficientBankrollError {
                requested: amount,
                available: self.bankroll,
            })?;
        Ok(())
    }

    /// Returns whether the bankroll covers `amount`.
    #[must_use]
    pub fn can_place_wager(&self, amount: Money) -> bool {
        amount <= self.bankroll
    }

    /// Returns whether the bankroll covers the auto-wager.
    #[must_use]
    pub fn can_place_auto_wager(&self) -> bool {
        self.can_place_wager(self.auto_wager)
    }

    /// Sets a new auto-wager.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the auto-wager unchanged, if `amount`
    /// exceeds the bankroll.
    pub fn set_new_auto_wager(&mut self, amount: Money) -> Result<(), InsufficientBankrollError> {
        if !self.can_place_wager(amount) {
            return Err(InsufficientBankrollError {
                requested: amount,
                available: self.bankroll,
            });
        }
        self.auto_wager = amount;
        Ok(())
    }

    /// Sets the auto-wager to zero, which signals a cash-out.
    pub const fn zero_auto_wager(&mut self) {
        self.auto_wager = Money::ZERO;
    }

    /// Moves `amount` from the bankroll onto the hand at `index`. Additive, so
    /// it also serves for doubling down.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such hand or the bankroll cannot
    /// cover `amount`. Nothing changes on error.
    pub fn place_hand_wager(&mut self, amount: Money, index: usize) -> Result<(), GameError> {
        if index >= self.hands.len() {
            return Err(GameError::MissingHand("gambler"));
        }
        self.deduct(amount)?;
        self.hands[index].add_wager(amount);
        Ok(())
    }

    /// Places the auto-wager on the first hand.
    ///
    /// # Errors
    ///
    /// See [`Gambler::place_hand_wager`].
    pub fn place_auto_wager(&mut self) -> Result<(), GameError> {
        self.place_hand_wager(self.auto_wager, 0)
    }

    /// Insurance stake: half the first hand's wager.
    #[must_use]
    pub fn insurance_wager_amount(&self, rounding: RoundingMode) -> Money {
        self.first_hand()
            .map_or(Money::ZERO, |hand| hand.wager().half(rounding))
    }

    /// Returns whether the bankroll covers the insurance stake.
    #[must_use]
    pub fn can_place_insurance_wager(&self, rounding: RoundingMode) -> bool {
        self.first_hand().is_some() && self.can_place_wager(self.insurance_wager_amount(rounding))
    }

    /// Places the insurance stake on the first hand.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no hand or the bankroll cannot cover the
    /// stake. Nothing changes on error.
    pub fn place_insurance_wager(&mut self, rounding: RoundingMode) -> Result<Money, GameError> {
        if self.hands.is_empty() {
            return Err(GameError::MissingHand("gambler"));
        }
        let amount = self.insurance_wager_amount(rounding);
        self.deduct(amount)?;
        self.hands[0].set_insurance(amount);
        Ok(amount)
    }
}

/// The dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    name: String,
    hand: Option<DealerHand>,
}

impl Dealer {
    /// Creates a dealer with no hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::from("Dealer"),
            hand: None,
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the hand, if one is dealt.
    #[must_use]
    pub const fn hand(&self) -> Option<&DealerHand> {
        self.hand.as_ref()
    }

    /// Returns the hand mutably, if one is dealt.
    pub const fn hand_mut(&mut self) -> Option<&mut DealerHand> {
        self.hand.as_mut()
    }

    /// Replaces the hand.
    pub fn set_hand(&mut self, hand: DealerHand) {
        self.hand = Some(hand);
    }

    /// Returns the visible card.
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.hand.as_ref().map(DealerHand::up_card)
    }

    /// Returns whether the dealer is showing an ace.
    #[must_use]
    pub fn is_showing_ace(&self) -> bool {
        self.hand.as_ref().is_some_and(DealerHand::is_showing_ace)
    }

    /// Returns whether the dealer is showing a ten-valued card.
    #[must_use]
    pub fn is_showing_face_card(&self) -> bool {
        self.hand.as_ref().is_some_and(DealerHand::is_showing_face_card)
    }

    /// Detaches the hand.
    pub fn discard_hand(&mut self) {
        self.hand = None;
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}
