//! A turn-driven blackjack table controller with optional `no_std` support.
//!
//! One gambler plays against the dealer. A [`GameController`] runs the turn
//! flow (wager check, deal, blackjack and insurance resolution, gambler
//! actions, dealer play, settlement) and leaves every decision to a
//! [`Strategy`] and every dealt value to a [`TableInput`]. Surrender,
//! insurance, even money, doubling down, and a standing auto-wager are
//! supported. A [`StatusSource`] can override the outcome of a turn at fixed
//! checkpoints.
//!
//! # Example
//!
//! ```
//! use bjauto::{
//!     Dealer, DefaultStaticStrategy, GameController, GameOptions, Gambler, MetricLog, Money,
//!     ShoeInput,
//! };
//!
//! let gambler = Gambler::new("Gambler", Money::from_dollars(200), Money::from_dollars(10));
//! let mut game = GameController::new(
//!     gambler,
//!     Dealer::new(),
//!     DefaultStaticStrategy::new(),
//!     ShoeInput::new(6, 7),
//!     GameOptions::default().with_max_turns(Some(25)),
//! );
//! let summary = game.play().unwrap();
//! let stats = game.metrics().summary();
//! assert_eq!(stats.final_bankroll, summary.bankroll);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod account;
pub mod card;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod console;
pub mod error;
pub mod game;
pub mod hand;
pub mod input;
pub mod metrics;
pub mod money;
pub mod options;
pub mod render;
pub mod result;
pub mod shoe;
pub mod strategy;

// Re-export main types
pub use account::{Dealer, Gambler};
pub use card::{Card, DECK_SIZE, Rank, Suit};
#[cfg(feature = "std")]
pub use console::{Console, ConsoleInput, ConsoleStatus, ConsoleStrategy};
pub use error::{
    GameError, InputError, InsufficientBankrollError, ParseMoneyError, ParseRankError,
    StrategyTableError,
};
pub use game::{GameController, TurnPhase};
pub use hand::{DealerHand, GamblerHand, HandStatus, TotalDisplay};
pub use input::{Checkpoint, NoOverride, ScriptedStatus, StatusSource, StatusToken, TableInput};
pub use metrics::{MetricLog, MetricSummary, MetricTracker};
pub use money::{Money, Odds};
pub use options::{GameOptions, RoundingMode};
#[cfg(feature = "std")]
pub use render::TextRenderer;
pub use render::{NoopRenderer, Render, TableView};
pub use result::{EndReason, GameSummary, HandOutcome, TurnOutcome};
pub use shoe::ShoeInput;
pub use strategy::{
    Action, ActionOptions, DefaultStaticStrategy, InsuranceStaticStrategy, Strategy,
    StrategyTable, TableAction,
};
