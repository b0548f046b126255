//! Per-turn metric tracking.

use alloc::vec::Vec;

use crate::hand::{DealerHand, GamblerHand, HandStatus};
use crate::money::Money;
use crate::result::HandOutcome;

/// Append-only sink for per-turn snapshots. Never feeds back into play.
pub trait MetricTracker {
    /// Records a settled gambler hand.
    fn record_gambler_hand(&mut self, turn: u32, hand: &GamblerHand);

    /// Records the dealer hand at the end of a turn.
    fn record_dealer_hand(&mut self, turn: u32, hand: Option<&DealerHand>);

    /// Records the bankroll. Called once before the first turn and once per
    /// settled turn.
    fn record_bankroll(&mut self, bankroll: Money);
}

impl<T: MetricTracker + ?Sized> MetricTracker for &mut T {
    fn record_gambler_hand(&mut self, turn: u32, hand: &GamblerHand) {
        (**self).record_gambler_hand(turn, hand);
    }

    fn record_dealer_hand(&mut self, turn: u32, hand: Option<&DealerHand>) {
        (**self).record_dealer_hand(turn, hand);
    }

    fn record_bankroll(&mut self, bankroll: Money) {
        (**self).record_bankroll(bankroll);
    }
}

/// Snapshot of a settled gambler hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandRecord {
    /// Turn number.
    pub turn: u32,
    /// Hand number within the turn.
    pub hand_number: u8,
    /// Final status.
    pub status: HandStatus,
    /// Outcome.
    pub outcome: Option<HandOutcome>,
    /// Main wager.
    pub wager: Money,
    /// Insurance wager.
    pub insurance: Money,
    /// Amount credited back, including a surrender refund.
    pub earnings: Money,
    /// Whether an insurance wager was lost.
    pub lost_insurance: bool,
    /// Final total.
    pub total: u8,
}

/// Snapshot of the dealer hand at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerRecord {
    /// Turn number.
    pub turn: u32,
    /// Final status, `None` if no hand was dealt.
    pub status: Option<HandStatus>,
    /// Final total.
    pub total: u8,
    /// Whether the dealer held blackjack.
    pub blackjack: bool,
}

/// Keeps every snapshot in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricLog {
    hands: Vec<HandRecord>,
    dealer: Vec<DealerRecord>,
    bankroll: Vec<Money>,
}

impl MetricLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hands: Vec::new(),
            dealer: Vec::new(),
            bankroll: Vec::new(),
        }
    }

    /// Gambler hand snapshots, in order.
    #[must_use]
    pub fn hands(&self) -> &[HandRecord] {
        &self.hands
    }

    /// Dealer hand snapshots, in order.
    #[must_use]
    pub fn dealer_hands(&self) -> &[DealerRecord] {
        &self.dealer
    }

    /// Bankroll after each turn, starting bankroll first.
    #[must_use]
    pub fn bankroll_progression(&self) -> &[Money] {
        &self.bankroll
    }

    /// Tallies the log.
    #[must_use]
    pub fn summary(&self) -> MetricSummary {
        let mut summary = MetricSummary::default();

        for hand in &self.hands {
            match hand.outcome {
                Some(HandOutcome::Win | HandOutcome::EvenMoney) => summary.wins += 1,
                Some(HandOutcome::Loss) => summary.losses += 1,
                Some(HandOutcome::Push) => summary.pushes += 1,
                Some(HandOutcome::Surrender) => summary.surrenders += 1,
                Some(HandOutcome::InsuranceWin) => summary.insurance_wins += 1,
                None => {}
            }
            if hand.lost_insurance {
                summary.insurance_losses += 1;
            }
            if hand.status == HandStatus::Blackjack {
                summary.gambler_blackjacks += 1;
            }
        }
        summary.dealer_blackjacks = self.dealer.iter().filter(|d| d.blackjack).count() as u32;

        if let (Some(&first), Some(&last)) = (self.bankroll.first(), self.bankroll.last()) {
            summary.starting_bankroll = first;
            summary.final_bankroll = last;
            summary.max_bankroll = self.bankroll.iter().copied().max().unwrap_or(first);
            summary.min_bankroll = self.bankroll.iter().copied().min().unwrap_or(first);
            let total: u64 = self.bankroll.iter().map(|m| m.cents()).sum();
            summary.average_bankroll = Money::from_cents(total / self.bankroll.len() as u64);
        }

        summary
    }
}

impl MetricTracker for MetricLog {
    fn record_gambler_hand(&mut self, turn: u32, hand: &GamblerHand) {
        self.hands.push(HandRecord {
            turn,
            hand_number: hand.hand_number(),
            status: hand.status(),
            outcome: hand.outcome(),
            wager: hand.wager(),
            insurance: hand.insurance(),
            earnings: hand.earnings(),
            lost_insurance: hand.lost_insurance(),
            total: hand.final_total(),
        });
    }

    fn record_dealer_hand(&mut self, turn: u32, hand: Option<&DealerHand>) {
        self.dealer.push(DealerRecord {
            turn,
            status: hand.map(DealerHand::status),
            total: hand.map_or(0, DealerHand::final_total),
            blackjack: hand.is_some_and(DealerHand::is_blackjack),
        });
    }

    fn record_bankroll(&mut self, bankroll: Money) {
        self.bankroll.push(bankroll);
    }
}

/// Totals over a [`MetricLog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricSummary {
    /// Hands won, including even money.
    pub wins: u32,
    /// Hands lost.
    pub losses: u32,
    /// Hands pushed.
    pub pushes: u32,
    /// Hands surrendered.
    pub surrenders: u32,
    /// Hands ended by a winning insurance wager.
    pub insurance_wins: u32,
    /// Insurance wagers lost. Not a hand outcome.
    pub insurance_losses: u32,
    /// Gambler blackjacks.
    pub gambler_blackjacks: u32,
    /// Dealer blackjacks.
    pub dealer_blackjacks: u32,
    /// First recorded bankroll.
    pub starting_bankroll: Money,
    /// Last recorded bankroll.
    pub final_bankroll: Money,
    /// Highest recorded bankroll.
    pub max_bankroll: Money,
    /// Lowest recorded bankroll.
    pub min_bankroll: Money,
    /// Mean recorded bankroll, rounded down to the cent.
    pub average_bankroll: Money,
}

impl MetricSummary {
    /// Hands with a final outcome.
    #[must_use]
    pub const fn total_hands(&self) -> u32 {
        self.wins + self.losses + self.pushes + self.surrenders + self.insurance_wins
    }

    /// Final minus starting bankroll, in cents.
    #[must_use]
    pub const fn net_winnings(&self) -> i64 {
        self.final_bankroll.cents() as i64 - self.starting_bankroll.cents() as i64
    }
}
