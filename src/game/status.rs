use alloc::format;

use tracing::info;

use crate::card::Card;
use crate::error::GameError;
use crate::hand::{DealerHand, GamblerHand};
use crate::input::{Checkpoint, StatusSource, StatusToken, TableInput};
use crate::metrics::MetricTracker;
use crate::render::Render;
use crate::result::HandOutcome;
use crate::strategy::Strategy;

use super::{Flow, GameController};

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Polls the status-override channel. Returns [`Flow::Settle`] if an
    /// override was applied.
    pub(super) fn check_status(&mut self, checkpoint: Checkpoint) -> Result<Flow, GameError> {
        let Some(token) = self.status.poll(self.turn, checkpoint) else {
            return Ok(Flow::Continue);
        };
        info!(turn = self.turn, token = %token, checkpoint = ?checkpoint, "status override");
        self.apply_override(token)?;
        Ok(Flow::Settle)
    }

    /// Applies an override to the first hand, creating placeholder hands
    /// for either party if none were dealt yet.
    fn apply_override(&mut self, token: StatusToken) -> Result<(), GameError> {
        if self.dealer.hand().is_none() {
            self.dealer.set_hand(DealerHand::new(Card::placeholder()));
        }
        if self.gambler.hands().is_empty() {
            self.clamp_auto_wager()?;
            self.gambler.add_hand(GamblerHand::new(1));
            self.gambler.place_auto_wager()?;
            self.log_activity(format!(
                "Placeholder hand created with a wager of {}",
                self.gambler.auto_wager()
            ));
        }

        let (status, outcome) = token.resolution();
        let hand = self
            .gambler
            .first_hand_mut()
            .ok_or(GameError::MissingHand("gambler"))?;
        if hand.outcome().is_some() {
            self.log_activity(format!("Status override {token} ignored, hand already resolved"));
        } else if outcome == HandOutcome::Surrender {
            let forfeit = self.surrender_hand(0);
            self.log_activity(format!("Status override: {token}, {forfeit} forfeited"));
        } else {
            hand.set_outcome(outcome);
            hand.set_status(status);
            self.log_activity(format!("Status override: {token}"));
        }
        self.hide_dealer = false;
        Ok(())
    }
}
