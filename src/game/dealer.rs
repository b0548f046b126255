use alloc::format;

use crate::card::Card;
use crate::error::GameError;
use crate::hand::HandStatus;
use crate::input::{StatusSource, TableInput, validate_dealer_total};
use crate::metrics::MetricTracker;
use crate::render::Render;
use crate::strategy::Strategy;

use super::{GameController, TurnPhase};

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Returns whether a hand is still waiting on the dealer's total.
    fn dealer_must_play(&self) -> bool {
        self.gambler.hands().iter().any(|hand| {
            hand.outcome().is_none() && matches!(hand.status(), HandStatus::Stood | HandStatus::Doubled)
        })
    }

    /// Reveals the dealer's hand and, if any hand stood or doubled, asks for
    /// the dealer's final total.
    pub(super) fn dealer_turn(&mut self) -> Result<(), GameError> {
        self.hide_dealer = false;
        self.enter_phase(TurnPhase::DealerTurn);

        if !self.dealer_must_play() {
            return Ok(());
        }

        let up_card = self
            .dealer
            .up_card()
            .ok_or(GameError::MissingHand("dealer"))?;
        let total = self.request("dealer final total", |input| {
            input
                .dealer_final_total(&up_card)
                .map(|total| validate_dealer_total(total, &up_card))
        })?;

        let hand = self
            .dealer
            .hand_mut()
            .ok_or(GameError::MissingHand("dealer"))?;
        hand.truncate_to_up_card();
        hand.add_card(Card::remainder(&up_card, total));
        let status = if hand.is_busted() {
            HandStatus::Busted
        } else {
            HandStatus::Stood
        };
        hand.set_status(status);
        self.log_activity(format!("Dealer {status} with {total}"));
        Ok(())
    }
}
