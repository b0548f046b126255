//! Game configuration options.

use core::time::Duration;

use crate::money::Odds;

/// Rounding mode for sub-cent amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

/// Configuration options for a game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjauto::GameOptions;
///
/// let options = GameOptions::default()
///     .with_verbose(true)
///     .with_max_turns(Some(50))
///     .with_surrender(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Whether to render the table after every state change.
    pub verbose: bool,
    /// Stop after this many turns.
    pub max_turns: Option<u32>,
    /// Payout odds for a winning blackjack (or a winning 21).
    pub blackjack_pays: Odds,
    /// Payout odds for a winning insurance wager.
    pub insurance_pays: Odds,
    /// Whether surrender is offered on a hand's first decision.
    pub surrender: bool,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for half-wager amounts (insurance stake, surrender forfeit).
    pub rounding_half: RoundingMode,
    /// Attempts allowed per request before invalid values or rejected
    /// wagers become fatal. `None` asks until a valid value arrives.
    pub input_retries: Option<u8>,
    /// Pause between turns. Ignored without the `std` feature.
    pub turn_pause: Option<Duration>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            max_turns: None,
            blackjack_pays: Odds::THREE_TO_TWO,
            insurance_pays: Odds::TWO_TO_ONE,
            surrender: true,
            rounding_blackjack: RoundingMode::Down,
            rounding_half: RoundingMode::Down,
            input_retries: None,
            turn_pause: None,
        }
    }
}

impl GameOptions {
    /// Sets whether the table is rendered after every state change.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the turn cap.
    ///
    /// # Example
    ///
    /// ```
    /// use bjauto::GameOptions;
    ///
    /// let options = GameOptions::default().with_max_turns(Some(100));
    /// assert_eq!(options.max_turns, Some(100));
    /// ```
    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Sets the blackjack payout odds.
    ///
    /// # Example
    ///
    /// ```
    /// use bjauto::{GameOptions, Odds};
    ///
    /// let options = GameOptions::default().with_blackjack_pays(Odds::new(6, 5));
    /// assert_eq!(options.blackjack_pays, Odds::new(6, 5));
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, odds: Odds) -> Self {
        self.blackjack_pays = odds;
        self
    }

    /// Sets the insurance payout odds.
    #[must_use]
    pub const fn with_insurance_pays(mut self, odds: Odds) -> Self {
        self.insurance_pays = odds;
        self
    }

    /// Sets whether surrender is offered.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for half-wager amounts.
    #[must_use]
    pub const fn with_rounding_half(mut self, mode: RoundingMode) -> Self {
        self.rounding_half = mode;
        self
    }

    /// Caps the attempts per request. `None` retries without limit.
    ///
    /// # Example
    ///
    /// ```
    /// use bjauto::GameOptions;
    ///
    /// assert_eq!(GameOptions::default().input_retries, None);
    /// let options = GameOptions::default().with_input_retries(Some(5));
    /// assert_eq!(options.input_retries, Some(5));
    /// ```
    #[must_use]
    pub const fn with_input_retries(mut self, retries: Option<u8>) -> Self {
        self.input_retries = retries;
        self
    }

    /// Sets the pause between turns.
    #[must_use]
    pub const fn with_turn_pause(mut self, pause: Option<Duration>) -> Self {
        self.turn_pause = pause;
        self
    }
}
