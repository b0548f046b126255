//! Error types for game operations.

use alloc::string::{String, ToString};

use thiserror::Error;

use crate::money::Money;
use crate::strategy::Action;

/// A wager was requested that the gambler's bankroll cannot cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient bankroll: requested {requested}, available {available}")]
pub struct InsufficientBankrollError {
    /// The amount asked for.
    pub requested: Money,
    /// The bankroll at the time of the request.
    pub available: Money,
}

/// A value from the upstream input source was out of range.
///
/// These are never fatal: the controller asks for the value again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// A gambler total outside the accepted range.
    #[error("total {total} is outside {min}..={max}")]
    TotalOutOfRange {
        /// The value received.
        total: u8,
        /// Smallest accepted value.
        min: u8,
        /// Largest accepted value.
        max: u8,
    },
    /// A dealer final total below the up card's value.
    #[error("dealer total {total} is below the up card value {up_card}")]
    DealerTotalBelowUpCard {
        /// The value received.
        total: u8,
        /// Value of the dealer's up card.
        up_card: u8,
    },
    /// The up card was a synthetic card.
    #[error("dealer up card must be a real rank")]
    SyntheticUpCard,
}

/// A rank label could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card rank `{label}`")]
pub struct ParseRankError {
    label: String,
}

impl ParseRankError {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

/// A money amount could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid money amount `{input}`")]
pub struct ParseMoneyError {
    input: String,
}

impl ParseMoneyError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A custom strategy table could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyTableError {
    /// The header row is not `total,2,3,4,5,6,7,8,9,10,A`.
    #[error("table header must list dealer up cards 2 through A")]
    BadHeader,
    /// A row does not have one entry per dealer up card.
    #[error("row {row} has {found} entries, expected 11")]
    RowLength {
        /// 1-based line number.
        row: usize,
        /// Number of comma-separated fields found.
        found: usize,
    },
    /// A row's total is not a number the table can hold.
    #[error("row {row} has invalid total `{total}`")]
    BadTotal {
        /// 1-based line number.
        row: usize,
        /// The offending field.
        total: String,
    },
    /// A cell holds an unknown action code.
    #[error("row {row} has unknown action code `{code}`")]
    BadCode {
        /// 1-based line number.
        row: usize,
        /// The offending field.
        code: String,
    },
}

/// Fatal errors that abort the turn loop.
///
/// These indicate a broken collaborator or a controller invariant violation,
/// never an ordinary user mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The strategy chose an action that was not offered.
    #[error("hand {hand_number}: action {action:?} was not offered")]
    InvalidAction {
        /// The action returned by the strategy.
        action: Action,
        /// The hand being played.
        hand_number: u8,
    },
    /// The upstream input source has no more values.
    #[error("input source closed while waiting for {request}")]
    InputClosed {
        /// What was being requested.
        request: &'static str,
    },
    /// The upstream input source kept sending invalid values. Only raised
    /// when `GameOptions::input_retries` caps the attempts.
    #[error("{attempts} invalid values received for {request}")]
    InputRetriesExhausted {
        /// What was being requested.
        request: &'static str,
        /// Number of attempts made.
        attempts: u8,
    },
    /// The strategy kept asking for wagers the bankroll cannot cover, past
    /// the cap in `GameOptions::input_retries`.
    #[error("{attempts} unaffordable auto-wagers requested")]
    WagerRetriesExhausted {
        /// Number of attempts made.
        attempts: u8,
    },
    /// A hand the turn flow relies on does not exist.
    #[error("no {0} hand in play")]
    MissingHand(&'static str),
    /// A wager could not be placed.
    #[error(transparent)]
    Bankroll(#[from] InsufficientBankrollError),
}
