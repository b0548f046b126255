//! Interfaces to the collaborators that feed the controller: the upstream
//! source of dealt cards and totals, and the status-override channel.

use core::fmt;

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::InputError;
use crate::hand::HandStatus;
use crate::result::HandOutcome;

/// Smallest gambler total accepted from the upstream source.
pub const MIN_TOTAL: u8 = 4;
/// Largest initial gambler total.
pub const MAX_INITIAL_TOTAL: u8 = 21;
/// Largest total after a hit or double (20 plus a ten).
pub const MAX_DRAWN_TOTAL: u8 = 30;

/// The upstream source of dealt cards and totals.
///
/// Returning `None` means the source is closed; the controller treats that
/// as fatal. Out-of-range values are rejected through
/// [`TableInput::rejected`] and requested again.
pub trait TableInput {
    /// The dealer's visible card.
    fn dealer_up_card(&mut self) -> Option<Card>;

    /// The dealer's concealed card, if the source can see it.
    ///
    /// Without it the dealer is never considered to hold blackjack.
    fn dealer_hole_card(&mut self) -> Option<Card> {
        None
    }

    /// The gambler's two dealt cards, if the source can see them.
    ///
    /// When present the hand is built from these cards and
    /// [`TableInput::initial_total`] is not requested.
    fn initial_cards(&mut self) -> Option<[Card; 2]> {
        None
    }

    /// The gambler's total after the deal.
    fn initial_total(&mut self) -> Option<u8>;

    /// The gambler's total after a hit.
    fn hit_total(&mut self) -> Option<u8>;

    /// The gambler's total after doubling down.
    fn double_total(&mut self) -> Option<u8>;

    /// The dealer's total after playing out.
    fn dealer_final_total(&mut self, up_card: &Card) -> Option<u8>;

    /// Called when a value was rejected, before it is requested again.
    fn rejected(&mut self, error: &InputError) {
        let _ = error;
    }
}

/// Checks a gambler total.
///
/// # Errors
///
/// Returns [`InputError::TotalOutOfRange`] outside `MIN_TOTAL..=max`.
pub const fn validate_total(total: u8, max: u8) -> Result<u8, InputError> {
    if total < MIN_TOTAL || total > max {
        return Err(InputError::TotalOutOfRange {
            total,
            min: MIN_TOTAL,
            max,
        });
    }
    Ok(total)
}

/// Checks a dealer final total against the up card.
///
/// # Errors
///
/// Returns [`InputError::DealerTotalBelowUpCard`] if the total is lower than
/// the up card's value.
pub const fn validate_dealer_total(total: u8, up_card: &Card) -> Result<u8, InputError> {
    if total < up_card.value() {
        return Err(InputError::DealerTotalBelowUpCard {
            total,
            up_card: up_card.value(),
        });
    }
    Ok(total)
}

/// An authoritative outcome asserted by an outside observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusToken {
    /// The table declared a blackjack.
    Blackjack,
    /// The table declared a push.
    Push,
    /// The table declared a win.
    Win,
    /// The table declared a bust.
    Bust,
    /// The table declared a surrender.
    Surrender,
}

impl StatusToken {
    /// Parses a token case-insensitively. Unknown text is no override.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        [
            ("BLACKJACK", Self::Blackjack),
            ("PUSH", Self::Push),
            ("WIN", Self::Win),
            ("BUST", Self::Bust),
            ("SURRENDER", Self::Surrender),
        ]
        .into_iter()
        .find(|(label, _)| text.eq_ignore_ascii_case(label))
        .map(|(_, token)| token)
    }

    /// Status and outcome applied to the gambler's first hand.
    #[must_use]
    pub const fn resolution(self) -> (HandStatus, HandOutcome) {
        match self {
            Self::Blackjack => (HandStatus::Blackjack, HandOutcome::Win),
            Self::Push => (HandStatus::Stood, HandOutcome::Push),
            Self::Win => (HandStatus::Stood, HandOutcome::Win),
            Self::Bust => (HandStatus::Busted, HandOutcome::Loss),
            Self::Surrender => (HandStatus::Surrendered, HandOutcome::Surrender),
        }
    }
}

impl fmt::Display for StatusToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Blackjack => "Blackjack",
            Self::Push => "Push",
            Self::Win => "Win",
            Self::Bust => "Bust",
            Self::Surrender => "Surrender",
        })
    }
}

/// Points in a turn where the status-override channel is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    /// Right after the turn starts, before the wager check.
    TurnStart,
    /// After the deal.
    AfterDeal,
    /// After blackjack and insurance resolution.
    AfterPreTurn,
    /// After each gambler action.
    AfterAction,
    /// After the gambler's turn, before the dealer plays.
    AfterGamblerTurn,
}

/// The status-override channel.
pub trait StatusSource {
    /// Returns a token if the table has declared an outcome.
    fn poll(&mut self, turn: u32, checkpoint: Checkpoint) -> Option<StatusToken>;
}

/// A channel that never overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOverride;

impl StatusSource for NoOverride {
    fn poll(&mut self, _turn: u32, _checkpoint: Checkpoint) -> Option<StatusToken> {
        None
    }
}

/// A channel that fires pre-arranged tokens at given turns and checkpoints.
///
/// Each entry fires once, at the first matching poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedStatus {
    pending: Vec<(u32, Checkpoint, StatusToken)>,
}

impl ScriptedStatus {
    /// Creates an empty script.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Fires `token` at `checkpoint` of `turn`.
    #[must_use]
    pub fn on(mut self, turn: u32, checkpoint: Checkpoint, token: StatusToken) -> Self {
        self.pending.push((turn, checkpoint, token));
        self
    }

    /// Returns whether every entry has fired.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

impl StatusSource for ScriptedStatus {
    fn poll(&mut self, turn: u32, checkpoint: Checkpoint) -> Option<StatusToken> {
        let index = self
            .pending
            .iter()
            .position(|&(t, c, _)| t == turn && c == checkpoint)?;
        Some(self.pending.remove(index).2)
    }
}
