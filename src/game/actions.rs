use alloc::format;

use crate::error::GameError;
use crate::hand::HandStatus;
use crate::input::{Checkpoint, MAX_DRAWN_TOTAL, StatusSource, TableInput, validate_total};
use crate::metrics::MetricTracker;
use crate::money::Money;
use crate::render::Render;
use crate::result::HandOutcome;
use crate::strategy::{Action, ActionOptions, Strategy};

use super::pre_turn::has_blackjack;
use super::{Flow, GameController, TurnPhase};

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Plays every pending hand. Returns [`Flow::Settle`] if a status
    /// override cut the turn short.
    pub(super) fn gambler_turn(&mut self) -> Result<Flow, GameError> {
        self.enter_phase(TurnPhase::GamblerTurn);

        while let Some(index) = self
            .gambler
            .hands()
            .iter()
            .position(|hand| hand.status() == HandStatus::Pending)
        {
            if self.play_hand(index)? == Flow::Settle {
                return Ok(Flow::Settle);
            }
        }
        Ok(Flow::Continue)
    }

    /// Actions offered on a hand's first decision.
    fn first_decision_options(&self, index: usize) -> ActionOptions {
        let mut options = ActionOptions::basic();
        let hand = &self.gambler.hands()[index];

        if hand.is_doubleable() && self.gambler.can_place_wager(hand.wager()) {
            options.offer(Action::Double);
        }
        if hand.is_splittable() {
            options.offer(Action::Split);
        }
        if self.options.surrender {
            options.offer(Action::Surrender);
        }
        options
    }

    fn play_hand(&mut self, index: usize) -> Result<Flow, GameError> {
        let up_card = self
            .dealer
            .up_card()
            .ok_or(GameError::MissingHand("dealer"))?;

        let hand = &mut self.gambler.hands_mut()[index];
        let number = hand.hand_number();
        if has_blackjack(hand) {
            hand.set_status(HandStatus::Blackjack);
            hand.set_outcome(HandOutcome::Win);
            self.log_activity(format!("Hand {number}: Blackjack"));
            return Ok(Flow::Continue);
        }
        hand.set_status(HandStatus::Playing);
        self.render();

        let mut options = self.first_decision_options(index);
        while self.gambler.hands()[index].status() == HandStatus::Playing {
            let hand = &self.gambler.hands()[index];
            let action = self.strategy.get_hand_action(hand, &options, &up_card);
            if !options.contains(action) {
                return Err(GameError::InvalidAction {
                    action,
                    hand_number: number,
                });
            }

            if !self.apply_action(index, action, &mut options)? {
                continue;
            }
            self.check_hand_total(index);
            options = ActionOptions::basic();

            if self.check_status(Checkpoint::AfterAction)? == Flow::Settle {
                return Ok(Flow::Settle);
            }
        }
        Ok(Flow::Continue)
    }

    /// Applies `action` to the hand at `index`. Returns `false` if the
    /// decision has to be made again.
    fn apply_action(
        &mut self,
        index: usize,
        action: Action,
        options: &mut ActionOptions,
    ) -> Result<bool, GameError> {
        let number = self.gambler.hands()[index].hand_number();
        match action {
            Action::Hit => {
                let total = self.request("hit total", |input| {
                    input
                        .hit_total()
                        .map(|total| validate_total(total, MAX_DRAWN_TOTAL))
                })?;
                self.gambler.hands_mut()[index].replace_total(total);
                self.log_activity(format!("Hand {number}: Hit, total is now {total}"));
            }
            Action::Stand => {
                self.gambler.hands_mut()[index].set_status(HandStatus::Stood);
                self.log_activity(format!("Hand {number}: Stand"));
            }
            Action::Double => {
                let wager = self.gambler.hands()[index].wager();
                self.gambler.place_hand_wager(wager, index)?;
                let total = self.request("double total", |input| {
                    input
                        .double_total()
                        .map(|total| validate_total(total, MAX_DRAWN_TOTAL))
                })?;
                let hand = &mut self.gambler.hands_mut()[index];
                hand.replace_total(total);
                hand.set_status(HandStatus::Doubled);
                self.log_activity(format!(
                    "Hand {number}: Double for another {wager}, total is now {total}"
                ));
            }
            Action::Surrender => {
                let forfeit = self.surrender_hand(index);
                self.log_activity(format!("Hand {number}: Surrender, {forfeit} forfeited"));
            }
            Action::Split => {
                self.log_activity(format!("Hand {number}: Split is not supported"));
                options.withdraw(Action::Split);
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns the unforfeited half of the wager and marks the hand
    /// surrendered. Returns the forfeited amount.
    pub(super) fn surrender_hand(&mut self, index: usize) -> Money {
        let wager = self.gambler.hands()[index].wager();
        let forfeit = wager.half(self.options.rounding_half);
        let refund = wager.saturating_sub(forfeit);

        self.gambler.payout(refund);
        let hand = &mut self.gambler.hands_mut()[index];
        hand.add_earnings(refund);
        hand.set_status(HandStatus::Surrendered);
        hand.set_outcome(HandOutcome::Surrender);
        forfeit
    }

    /// Stands any unresolved hand that reached 21, doubled or not, and busts
    /// a hand over 21.
    fn check_hand_total(&mut self, index: usize) {
        let hand = &mut self.gambler.hands_mut()[index];
        let number = hand.hand_number();
        let total = hand.final_total();

        if total > 21 {
            hand.set_status(HandStatus::Busted);
            hand.set_outcome(HandOutcome::Loss);
            self.log_activity(format!("Hand {number}: Busted with {total}"));
        } else if total == 21 && hand.outcome().is_none() {
            hand.set_status(HandStatus::Stood);
            self.log_activity(format!("Hand {number}: Stands on 21"));
        }
    }
}
