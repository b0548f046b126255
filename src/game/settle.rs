use alloc::format;

use tracing::info;

use crate::error::GameError;
use crate::hand::{DealerHand, GamblerHand, HandStatus};
use crate::input::{StatusSource, TableInput};
use crate::metrics::MetricTracker;
use crate::money::{Money, Odds};
use crate::options::{GameOptions, RoundingMode};
use crate::render::Render;
use crate::result::HandOutcome;
use crate::strategy::Strategy;

use super::{GameController, TurnPhase};

/// Compares an unresolved hand against the dealer.
fn determine_outcome(hand: &GamblerHand, dealer: &DealerHand) -> HandOutcome {
    let total = hand.final_total();
    let dealer_total = dealer.final_total();

    if hand.is_busted() {
        HandOutcome::Loss
    } else if dealer.is_busted() || total > dealer_total {
        HandOutcome::Win
    } else if total == dealer_total {
        HandOutcome::Push
    } else {
        HandOutcome::Loss
    }
}

/// Everything credited back to the bankroll for a settled hand.
fn payout(hand: &GamblerHand, outcome: HandOutcome, options: &GameOptions) -> Money {
    let wager = hand.wager();
    match outcome {
        HandOutcome::Win => {
            let winnings = if hand.status() == HandStatus::Blackjack || hand.is_21() {
                wager.apply_odds(options.blackjack_pays, options.rounding_blackjack)
            } else {
                wager.apply_odds(Odds::EVEN, RoundingMode::Down)
            };
            winnings + wager
        }
        HandOutcome::EvenMoney => wager.apply_odds(Odds::EVEN, RoundingMode::Down) + wager,
        HandOutcome::Push => wager,
        HandOutcome::InsuranceWin => {
            let insurance = hand.insurance();
            insurance.apply_odds(options.insurance_pays, RoundingMode::Down) + insurance
        }
        HandOutcome::Loss | HandOutcome::Surrender => Money::ZERO,
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
    /// Resolves every hand still without an outcome and pays out.
    pub(super) fn settle(&mut self) -> Result<(), GameError> {
        self.hide_dealer = false;
        self.enter_phase(TurnPhase::Settlement);

        for index in 0..self.gambler.hands().len() {
            let hand = &mut self.gambler.hands_mut()[index];
            let outcome = match hand.outcome() {
                Some(outcome) => outcome,
                None => {
                    let dealer = self.dealer.hand().ok_or(GameError::MissingHand("dealer"))?;
                    let outcome = determine_outcome(hand, dealer);
                    hand.set_outcome(outcome);
                    outcome
                }
            };

            let amount = payout(hand, outcome, &self.options);
            hand.add_earnings(amount);
            let number = hand.hand_number();
            let earnings = hand.earnings();
            self.gambler.payout(amount);

            let message = match outcome {
                HandOutcome::Loss => format!("Hand {number}: Loss, wager forfeited"),
                HandOutcome::Surrender => {
                    format!("Hand {number}: Surrender, half the wager was returned")
                }
                _ => format!("Hand {number}: {outcome}, paid {amount}"),
            };
            self.log_activity(message);
            info!(
                turn = self.turn,
                hand = number,
                outcome = %outcome,
                earnings = %earnings,
                "hand settled"
            );
        }
        Ok(())
    }
}
