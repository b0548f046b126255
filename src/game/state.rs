//! Turn phase types.

use core::fmt;

/// The phase of the turn the controller is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Between turns.
    Idle,
    /// Checking and adjusting the auto-wager.
    Wagering,
    /// Dealing the dealer up card and the gambler's first total.
    Dealing,
    /// Resolving blackjacks and insurance.
    PreTurn,
    /// Waiting for gambler actions.
    GamblerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Resolving outcomes and paying out.
    Settlement,
}

impl TurnPhase {
    /// What the table is waiting for in this phase.
    #[must_use]
    pub const fn pending_action(self) -> &'static str {
        match self {
            Self::Idle => "Waiting for the next turn",
            Self::Wagering => "Waiting for a wager",
            Self::Dealing => "Dealing",
            Self::PreTurn => "Checking for blackjack",
            Self::GamblerTurn => "Gambler to act",
            Self::DealerTurn => "Dealer to play",
            Self::Settlement => "Settling wagers",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pending_action())
    }
}

/// Whether a phase hands over to the next one or jumps to settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Settle,
    CashOut,
}
