use alloc::format;

use tracing::warn;

use crate::error::{GameError, InputError};
use crate::hand::{DealerHand, GamblerHand};
use crate::input::{MAX_INITIAL_TOTAL, StatusSource, TableInput, validate_total};
use crate::metrics::MetricTracker;
use crate::render::Render;
use crate::strategy::Strategy;

use super::{Flow, GameController, TurnPhase};

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Lowers the auto-wager to the bankroll if the bankroll cannot cover it.
    pub(super) fn clamp_auto_wager(&mut self) -> Result<(), GameError> {
        if self.gambler.can_place_auto_wager() {
            return Ok(());
        }
        let bankroll = self.gambler.bankroll();
        self.gambler.set_new_auto_wager(bankroll)?;
        self.log_activity(format!("Auto-wager lowered to the remaining bankroll of {bankroll}"));
        Ok(())
    }

    /// Makes sure the auto-wager can be placed and lets the strategy change
    /// it. Returns [`Flow::CashOut`] if the auto-wager ends up zero.
    pub(super) fn check_gambler_wager(&mut self) -> Result<Flow, GameError> {
        self.clamp_auto_wager()?;

        if self.strategy.wants_to_change_wager() {
            self.set_new_auto_wager()?;
        }

        if self.gambler.auto_wager().is_zero() {
            self.log_activity(format!("{} cashed out", self.gambler.name()));
            return Ok(Flow::CashOut);
        }
        Ok(Flow::Continue)
    }

    /// Asks the strategy for a new auto-wager until the bankroll covers it
    /// or the configured retries run out.
    fn set_new_auto_wager(&mut self) -> Result<(), GameError> {
        let mut attempts: u8 = 0;
        loop {
            let amount = self.strategy.get_new_auto_wager();
            match self.gambler.set_new_auto_wager(amount) {
                Ok(()) => {
                    self.log_activity(format!("Auto-wager set to {amount}"));
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        turn = self.turn,
                        requested = %err.requested,
                        available = %err.available,
                        "auto-wager rejected"
                    );
                    self.log_activity(format!("Auto-wager rejected: {err}"));
                    attempts = attempts.saturating_add(1);
                    if self.retries_exhausted(attempts) {
                        return Err(GameError::WagerRetriesExhausted { attempts });
                    }
                }
            }
        }
    }

    /// Deals the dealer's up card and the gambler's hand, then commits the
    /// auto-wager.
    pub(super) fn deal(&mut self) -> Result<(), GameError> {
        self.enter_phase(TurnPhase::Dealing);

        let up_card = self.request("dealer up card", |input| {
            input.dealer_up_card().map(|card| {
                if card.is_synthetic() {
                    Err(InputError::SyntheticUpCard)
                } else {
                    Ok(card)
                }
            })
        })?;
        let mut dealer_hand = DealerHand::new(up_card);
        if let Some(hole_card) = self.input.dealer_hole_card() {
            dealer_hand.add_card(hole_card);
        }
        self.dealer.set_hand(dealer_hand);
        self.log_activity(format!("Dealer shows {up_card}"));

        let hand = if let Some(cards) = self.input.initial_cards() {
            GamblerHand::with_cards(1, cards.to_vec())
        } else {
            let total = self.request("initial total", |input| {
                input
                    .initial_total()
                    .map(|total| validate_total(total, MAX_INITIAL_TOTAL))
            })?;
            GamblerHand::from_total(1, total)
        };
        let total = hand.total_display();
        self.gambler.add_hand(hand);
        self.gambler.place_auto_wager()?;
        self.log_activity(format!(
            "{} dealt {total} with a wager of {}",
            self.gambler.name(),
            self.gambler.auto_wager()
        ));
        Ok(())
    }
}
