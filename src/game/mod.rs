//! The turn-based game controller.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, error, info, warn};

use crate::account::{Dealer, Gambler};
use crate::error::{GameError, InputError};
use crate::input::{Checkpoint, NoOverride, StatusSource, TableInput};
use crate::metrics::{MetricLog, MetricTracker};
use crate::options::GameOptions;
use crate::render::{NoopRenderer, Render, TableView};
use crate::result::{EndReason, GameSummary, TurnOutcome};
use crate::strategy::Strategy;

mod actions;
mod dealer;
mod pre_turn;
mod settle;
pub mod state;
mod status;
mod wager;

pub use state::TurnPhase;

use state::Flow;

/// Drives one gambler against the dealer, turn by turn.
///
/// Decisions come from the [`Strategy`], dealt values from the
/// [`TableInput`], and outcome overrides from the [`StatusSource`]. Every
/// settled turn is reported to the [`MetricTracker`]. When
/// [`GameOptions::verbose`] is set, the [`Render`] hook sees the table after
/// each state change.
pub struct GameController<S, I, O = NoOverride, M = MetricLog, R = NoopRenderer> {
    gambler: Gambler,
    dealer: Dealer,
    strategy: S,
    input: I,
    status: O,
    metrics: M,
    renderer: R,
    options: GameOptions,
    turn: u32,
    phase: TurnPhase,
    activity: Vec<String>,
    hide_dealer: bool,
}

impl<S, I> GameController<S, I> {
    /// Creates a controller with no status overrides, an in-memory metric
    /// log, and no renderer.
    ///
    /// # Example
    ///
    /// ```
    /// use bjauto::{DefaultStaticStrategy, Dealer, GameController, GameOptions, Gambler, Money, ShoeInput};
    ///
    /// let gambler = Gambler::new("Gambler", Money::from_dollars(100), Money::from_dollars(10));
    /// let mut game = GameController::new(
    ///     gambler,
    ///     Dealer::new(),
    ///     DefaultStaticStrategy::new(),
    ///     ShoeInput::new(6, 42),
    ///     GameOptions::default().with_max_turns(Some(20)),
    /// );
    /// let summary = game.play().unwrap();
    /// assert!(summary.turns <= 20);
    /// ```
    #[must_use]
    pub fn new(gambler: Gambler, dealer: Dealer, strategy: S, input: I, options: GameOptions) -> Self {
        Self {
            gambler,
            dealer,
            strategy,
            input,
            status: NoOverride,
            metrics: MetricLog::new(),
            renderer: NoopRenderer,
            options,
            turn: 0,
            phase: TurnPhase::Idle,
            activity: Vec::new(),
            hide_dealer: true,
        }
    }
}

impl<S, I, O, M, R> GameController<S, I, O, M, R> {
    /// Replaces the status-override channel.
    #[must_use]
    pub fn with_status_source<O2>(self, status: O2) -> GameController<S, I, O2, M, R> {
        GameController {
            gambler: self.gambler,
            dealer: self.dealer,
            strategy: self.strategy,
            input: self.input,
            status,
            metrics: self.metrics,
            renderer: self.renderer,
            options: self.options,
            turn: self.turn,
            phase: self.phase,
            activity: self.activity,
            hide_dealer: self.hide_dealer,
        }
    }

    /// Replaces the metric tracker.
    #[must_use]
    pub fn with_metrics<M2>(self, metrics: M2) -> GameController<S, I, O, M2, R> {
        GameController {
            gambler: self.gambler,
            dealer: self.dealer,
            strategy: self.strategy,
            input: self.input,
            status: self.status,
            metrics,
            renderer: self.renderer,
            options: self.options,
            turn: self.turn,
            phase: self.phase,
            activity: self.activity,
            hide_dealer: self.hide_dealer,
        }
    }

    /// Replaces the renderer.
    #[must_use]
    pub fn with_renderer<R2>(self, renderer: R2) -> GameController<S, I, O, M, R2> {
        GameController {
            gambler: self.gambler,
            dealer: self.dealer,
            strategy: self.strategy,
            input: self.input,
            status: self.status,
            metrics: self.metrics,
            renderer,
            options: self.options,
            turn: self.turn,
            phase: self.phase,
            activity: self.activity,
            hide_dealer: self.hide_dealer,
        }
    }

    /// Returns the gambler.
    #[must_use]
    pub const fn gambler(&self) -> &Gambler {
        &self.gambler
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the strategy.
    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Returns the input source.
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// Returns the metric tracker.
    #[must_use]
    pub const fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the number of turns started.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the activity log of the current (or last) turn.
    #[must_use]
    pub fn activity(&self) -> &[String] {
        &self.activity
    }

    /// Consumes the controller, returning the gambler and the metric tracker.
    pub fn into_parts(self) -> (Gambler, M) {
        (self.gambler, self.metrics)
    }
}

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Plays turns until the gambler is finished or the turn cap is reached.
    ///
    /// The starting bankroll is reported to the metric tracker first.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`GameError`]; the game cannot continue after
    /// one.
    pub fn play(&mut self) -> Result<GameSummary, GameError> {
        self.metrics.record_bankroll(self.gambler.bankroll());

        while self.play_condition() {
            if self.play_turn()? == TurnOutcome::CashedOut {
                break;
            }
            #[cfg(feature = "std")]
            if let Some(pause) = self.options.turn_pause {
                if self.play_condition() {
                    std::thread::sleep(pause);
                }
            }
        }

        let summary = GameSummary {
            turns: self.turn,
            bankroll: self.gambler.bankroll(),
            end: self.end_reason(),
        };
        info!(
            turns = summary.turns,
            bankroll = %summary.bankroll,
            end = ?summary.end,
            "game over"
        );
        self.renderer.game_over(&summary);
        Ok(summary)
    }

    /// Returns whether another turn should be played.
    #[must_use]
    pub fn play_condition(&self) -> bool {
        !self.gambler.is_finished() && self.options.max_turns.is_none_or(|max| self.turn < max)
    }

    fn end_reason(&self) -> EndReason {
        if self.gambler.bankroll().is_zero() {
            EndReason::OutOfMoney
        } else if self.gambler.auto_wager().is_zero() {
            EndReason::CashedOut
        } else {
            EndReason::TurnCapReached
        }
    }

    /// Plays a single turn, from the wager check to settlement.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`GameError`] if a collaborator breaks its contract.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, GameError> {
        self.turn += 1;
        self.activity.clear();
        self.hide_dealer = true;
        info!(turn = self.turn, bankroll = %self.gambler.bankroll(), "turn started");

        let result = self.run_turn();
        if let Err(err) = &result {
            error!(turn = self.turn, error = %err, "turn aborted");
        }
        result
    }

    fn run_turn(&mut self) -> Result<TurnOutcome, GameError> {
        self.enter_phase(TurnPhase::Wagering);
        if self.check_status(Checkpoint::TurnStart)? == Flow::Continue {
            if self.check_gambler_wager()? == Flow::CashOut {
                self.phase = TurnPhase::Idle;
                return Ok(TurnOutcome::CashedOut);
            }
            self.deal_to_settlement()?;
        }
        self.finish_turn()
    }

    fn deal_to_settlement(&mut self) -> Result<(), GameError> {
        self.deal()?;
        if self.check_status(Checkpoint::AfterDeal)? == Flow::Settle {
            return Ok(());
        }

        self.pre_turn()?;
        if self.check_status(Checkpoint::AfterPreTurn)? == Flow::Settle {
            return Ok(());
        }

        if self.gambler_turn()? == Flow::Settle {
            return Ok(());
        }
        if self.check_status(Checkpoint::AfterGamblerTurn)? == Flow::Settle {
            return Ok(());
        }

        self.dealer_turn()
    }

    fn finish_turn(&mut self) -> Result<TurnOutcome, GameError> {
        self.settle()?;

        for hand in self.gambler.hands() {
            self.metrics.record_gambler_hand(self.turn, hand);
        }
        self.metrics.record_dealer_hand(self.turn, self.dealer.hand());
        self.metrics.record_bankroll(self.gambler.bankroll());

        let bankroll = self.gambler.bankroll();
        info!(turn = self.turn, bankroll = %bankroll, "turn settled");

        self.gambler.discard_hands();
        self.dealer.discard_hand();
        self.phase = TurnPhase::Idle;

        Ok(TurnOutcome::Settled {
            turn: self.turn,
            bankroll,
        })
    }

    /// Moves to `phase` and shows the table.
    fn enter_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
        self.render();
    }

    /// Appends to the activity log and shows the table.
    fn log_activity(&mut self, message: String) {
        debug!(turn = self.turn, "{message}");
        self.activity.push(message);
        self.render();
    }

    fn render(&mut self) {
        if !self.options.verbose {
            return;
        }
        let view = TableView {
            turn: self.turn,
            phase: self.phase,
            gambler: &self.gambler,
            dealer: &self.dealer,
            activity: &self.activity,
            hide_dealer: self.hide_dealer,
        };
        self.renderer.render(&view);
    }

    /// Asks the input source until it returns a valid value or the
    /// configured retries run out.
    fn request<T>(
        &mut self,
        request: &'static str,
        mut next: impl FnMut(&mut I) -> Option<Result<T, InputError>>,
    ) -> Result<T, GameError> {
        let mut attempts: u8 = 0;
        loop {
            match next(&mut self.input) {
                None => return Err(GameError::InputClosed { request }),
                Some(Ok(value)) => return Ok(value),
                Some(Err(err)) => {
                    attempts = attempts.saturating_add(1);
                    warn!(turn = self.turn, request, attempts, error = %err, "invalid input");
                    if self.retries_exhausted(attempts) {
                        return Err(GameError::InputRetriesExhausted { request, attempts });
                    }
                    self.input.rejected(&err);
                }
            }
        }
    }

    /// Whether `attempts` failed attempts use up the configured retries.
    fn retries_exhausted(&self, attempts: u8) -> bool {
        self.options
            .input_retries
            .is_some_and(|retries| attempts >= retries.max(1))
    }
}
