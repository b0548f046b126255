//! Hand outcomes and end-of-game results.

use core::fmt;

use crate::money::Money;

/// Final result of a gambler hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandOutcome {
    /// Hand beats the dealer.
    Win,
    /// Hand loses its wager.
    Loss,
    /// Tie; the wager is returned.
    Push,
    /// Half the wager was forfeited.
    Surrender,
    /// A blackjack against a dealer ace was paid 1:1 up front.
    EvenMoney,
    /// The dealer had blackjack and the insurance wager paid.
    InsuranceWin,
}

impl HandOutcome {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Push => "Push",
            Self::Surrender => "Surrender",
            Self::EvenMoney => "Even Money",
            Self::InsuranceWin => "Insurance Win",
        }
    }
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The gambler set their auto-wager to zero.
    CashedOut,
    /// The configured turn cap was reached.
    TurnCapReached,
    /// The bankroll ran out.
    OutOfMoney,
}

impl EndReason {
    /// Returns whether the gambler left with money on their own terms.
    #[must_use]
    pub const fn is_cashed_out(self) -> bool {
        matches!(self, Self::CashedOut | Self::TurnCapReached)
    }
}

/// Summary returned when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    /// Turns started, including a final turn abandoned by cashing out.
    pub turns: u32,
    /// Bankroll at the end of the game.
    pub bankroll: Money,
    /// Why the game ended.
    pub end: EndReason,
}

/// Result of a single call to `GameController::play_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn was dealt and settled.
    Settled {
        /// The turn number.
        turn: u32,
        /// Bankroll after settlement.
        bankroll: Money,
    },
    /// The gambler cashed out instead of playing the turn.
    CashedOut,
}
