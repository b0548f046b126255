use alloc::format;
use alloc::string::String;

use crate::error::GameError;
use crate::hand::{DealerHand, GamblerHand, HandStatus};
use crate::input::{StatusSource, TableInput};
use crate::metrics::MetricTracker;
use crate::render::Render;
use crate::result::HandOutcome;
use crate::strategy::Strategy;

use super::{GameController, TurnPhase};

/// A freshly dealt hand totalling 21.
pub(super) fn has_blackjack(hand: &GamblerHand) -> bool {
    hand.is_doubleable() && hand.is_21()
}

impl<S, I, O, M, R> GameController<S, I, O, M, R>
where
    S: Strategy,
    I: TableInput,
    O: StatusSource,
    M: MetricTracker,
    R: Render,
{
    /// Resolves blackjacks and insurance before the gambler acts.
    ///
    /// Hands left without an outcome are played normally.
    pub(super) fn pre_turn(&mut self) -> Result<(), GameError> {
        self.enter_phase(TurnPhase::PreTurn);

        let gambler_blackjack = self
            .gambler
            .first_hand()
            .ok_or(GameError::MissingHand("gambler"))
            .map(has_blackjack)?;
        let dealer_blackjack = self.dealer.hand().is_some_and(DealerHand::is_blackjack);

        if self.dealer.is_showing_ace() {
            self.insurance(gambler_blackjack, dealer_blackjack)
        } else if self.dealer.is_showing_face_card() {
            if dealer_blackjack {
                self.reveal_dealer_blackjack()?;
                if gambler_blackjack {
                    self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::Push)
                } else {
                    self.resolve_first_hand(None, HandOutcome::Loss)
                }
            } else if gambler_blackjack {
                self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::Win)
            } else {
                Ok(())
            }
        } else if gambler_blackjack {
            self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::Win)
        } else {
            Ok(())
        }
    }

    /// The dealer shows an ace: even money for a blackjack, insurance
    /// otherwise.
    fn insurance(&mut self, gambler_blackjack: bool, dealer_blackjack: bool) -> Result<(), GameError> {
        if gambler_blackjack {
            if self.strategy.wants_even_money() {
                self.log_activity(String::from("Even money taken"));
                return self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::EvenMoney);
            }
            self.log_activity(String::from("Even money declined"));
            if dealer_blackjack {
                self.reveal_dealer_blackjack()?;
                return self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::Push);
            }
            return self.resolve_first_hand(Some(HandStatus::Blackjack), HandOutcome::Win);
        }

        let rounding = self.options.rounding_half;
        if self.gambler.can_place_insurance_wager(rounding) && self.strategy.wants_insurance() {
            let amount = self.gambler.place_insurance_wager(rounding)?;
            self.log_activity(format!("Insurance wager of {amount} placed"));

            if dealer_blackjack {
                self.reveal_dealer_blackjack()?;
                return self.resolve_first_hand(None, HandOutcome::InsuranceWin);
            }
            self.gambler
                .first_hand_mut()
                .ok_or(GameError::MissingHand("gambler"))?
                .mark_lost_insurance();
            self.log_activity(String::from("Dealer does not have blackjack, insurance lost"));
            return Ok(());
        }

        if dealer_blackjack {
            self.reveal_dealer_blackjack()?;
            return self.resolve_first_hand(None, HandOutcome::Loss);
        }
        Ok(())
    }

    fn reveal_dealer_blackjack(&mut self) -> Result<(), GameError> {
        self.dealer
            .hand_mut()
            .ok_or(GameError::MissingHand("dealer"))?
            .set_status(HandStatus::Blackjack);
        self.hide_dealer = false;
        self.log_activity(String::from("Dealer has blackjack"));
        Ok(())
    }

    /// Records an outcome on the first hand, optionally with a status.
    pub(super) fn resolve_first_hand(
        &mut self,
        status: Option<HandStatus>,
        outcome: HandOutcome,
    ) -> Result<(), GameError> {
        let hand = self
            .gambler
            .first_hand_mut()
            .ok_or(GameError::MissingHand("gambler"))?;
        if let Some(status) = status {
            hand.set_status(status);
        }
        hand.set_outcome(outcome);
        let number = hand.hand_number();
        self.log_activity(format!("Hand {number}: {outcome}"));
        Ok(())
    }
}
