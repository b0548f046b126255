//! Decision strategies.
//!
//! A [`Strategy`] answers every choice point of a turn. It only returns
//! decisions; the controller applies them.

use core::fmt;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::GamblerHand;
use crate::money::Money;

pub mod table;

pub use table::{DefaultStaticStrategy, InsuranceStaticStrategy, StrategyTable, TableAction};

/// An action that can be taken on a gambler hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the current total.
    Stand,
    /// Double the wager and take exactly one more card.
    Double,
    /// Split a pair. Not supported by the controller.
    Split,
    /// Forfeit half the wager and end the hand.
    Surrender,
}

impl Action {
    /// Short code used on prompts.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Hit => 'h',
            Self::Stand => 's',
            Self::Double => 'd',
            Self::Split => 'p',
            Self::Surrender => 'u',
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "Hit",
            Self::Stand => "Stand",
            Self::Double => "Double",
            Self::Split => "Split",
            Self::Surrender => "Surrender",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The actions offered for a decision, in display order.
///
/// Always contains Hit and Stand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOptions {
    actions: Vec<Action>,
}

impl ActionOptions {
    /// Hit and Stand only.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            actions: alloc::vec![Action::Hit, Action::Stand],
        }
    }

    /// Adds an action if it is not already offered.
    pub fn offer(&mut self, action: Action) {
        if !self.contains(action) {
            self.actions.push(action);
        }
    }

    /// Stops offering `action`. Hit and Stand cannot be withdrawn.
    pub fn withdraw(&mut self, action: Action) {
        if !matches!(action, Action::Hit | Action::Stand) {
            self.actions.retain(|&a| a != action);
        }
    }

    /// Returns whether `action` is offered.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Looks an action up by its short code.
    #[must_use]
    pub fn by_code(&self, code: char) -> Option<Action> {
        let code = code.to_ascii_lowercase();
        self.actions.iter().copied().find(|a| a.code() == code)
    }

    /// Iterates `(code, action)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Action)> + '_ {
        self.actions.iter().map(|&a| (a.code(), a))
    }

    /// Number of offered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always `false`: Hit and Stand are always offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for ActionOptions {
    /// Formats as `Hit (h) , Stand (s)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (code, action)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" , ")?;
            }
            write!(f, "{action} ({code})")?;
        }
        Ok(())
    }
}

/// Source of every decision the gambler makes.
///
/// Implementations may keep their own state (a prompt, a table) but never
/// touch game objects directly.
pub trait Strategy {
    /// Whether to change the auto-wager (or cash out) before this turn.
    fn wants_to_change_wager(&mut self) -> bool;

    /// The new auto-wager. Zero cashes out.
    fn get_new_auto_wager(&mut self) -> Money;

    /// Whether to take even money on a blackjack against a dealer ace.
    fn wants_even_money(&mut self) -> bool;

    /// Whether to place an insurance wager against a dealer ace.
    fn wants_insurance(&mut self) -> bool;

    /// The action to take on `hand`. Must be one of `options`.
    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        dealer_up_card: &Card,
    ) -> Action;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn wants_to_change_wager(&mut self) -> bool {
        (**self).wants_to_change_wager()
    }

    fn get_new_auto_wager(&mut self) -> Money {
        (**self).get_new_auto_wager()
    }

    fn wants_even_money(&mut self) -> bool {
        (**self).wants_even_money()
    }

    fn wants_insurance(&mut self) -> bool {
        (**self).wants_insurance()
    }

    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        dealer_up_card: &Card,
    ) -> Action {
        (**self).get_hand_action(hand, options, dealer_up_card)
    }
}

impl<S: Strategy + ?Sized> Strategy for &mut S {
    fn wants_to_change_wager(&mut self) -> bool {
        (**self).wants_to_change_wager()
    }

    fn get_new_auto_wager(&mut self) -> Money {
        (**self).get_new_auto_wager()
    }

    fn wants_even_money(&mut self) -> bool {
        (**self).wants_even_money()
    }

    fn wants_insurance(&mut self) -> bool {
        (**self).wants_insurance()
    }

    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        dealer_up_card: &Card,
    ) -> Action {
        (**self).get_hand_action(hand, options, dealer_up_card)
    }
}
