//! Presentation hook called by the controller after state changes.

use alloc::string::String;

use crate::account::{Dealer, Gambler};
use crate::game::TurnPhase;
use crate::result::GameSummary;

/// A read-only snapshot of the table.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    /// Current turn number.
    pub turn: u32,
    /// Current phase.
    pub phase: TurnPhase,
    /// The gambler.
    pub gambler: &'a Gambler,
    /// The dealer.
    pub dealer: &'a Dealer,
    /// This turn's activity log, oldest first.
    pub activity: &'a [String],
    /// Whether the dealer's hand is still concealed.
    pub hide_dealer: bool,
}

/// Receives the table after every state change when verbose output is on.
pub trait Render {
    /// Presents the current table.
    fn render(&mut self, view: &TableView<'_>);

    /// Presents the final summary.
    fn game_over(&mut self, summary: &GameSummary) {
        let _ = summary;
    }
}

impl<R: Render + ?Sized> Render for &mut R {
    fn render(&mut self, view: &TableView<'_>) {
        (**self).render(view);
    }

    fn game_over(&mut self, summary: &GameSummary) {
        (**self).game_over(summary);
    }
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopRenderer;

impl Render for NoopRenderer {
    fn render(&mut self, _view: &TableView<'_>) {}
}

#[cfg(feature = "std")]
pub use text::TextRenderer;

#[cfg(feature = "std")]
mod text {
    use std::io::{self, Write};

    use super::{Render, TableView};
    use crate::result::GameSummary;

    /// Writes the table as plain text.
    #[derive(Debug)]
    pub struct TextRenderer<W> {
        out: W,
    }

    impl<W: Write> TextRenderer<W> {
        /// Creates a renderer writing to `out`.
        pub const fn new(out: W) -> Self {
            Self { out }
        }

        /// Returns the writer.
        pub fn into_inner(self) -> W {
            self.out
        }

        fn write_view(&mut self, view: &TableView<'_>) -> io::Result<()> {
            let out = &mut self.out;
            let gambler = view.gambler;

            writeln!(out, "==================== TURN {} ====================", view.turn)?;
            writeln!(
                out,
                "{}  Bankroll: {}  Auto-wager: {}",
                gambler.name(),
                gambler.bankroll(),
                gambler.auto_wager()
            )?;

            writeln!(out, "{}:", view.dealer.name())?;
            match view.dealer.hand() {
                None => writeln!(out, "  (no hand)")?,
                Some(hand) if view.hide_dealer => {
                    writeln!(out, "  {}, [hidden]", hand.up_card())?;
                    writeln!(out, "  Showing: {}", hand.visible_total())?;
                }
                Some(hand) => {
                    for card in hand.cards() {
                        writeln!(out, "  {card}")?;
                    }
                    writeln!(out, "  Total: {}  ({})", hand.total_display(), hand.status())?;
                }
            }

            for hand in gambler.hands() {
                writeln!(
                    out,
                    "Hand {}: {}  ({})  Wager: {}",
                    hand.hand_number(),
                    hand.total_display(),
                    hand.status(),
                    hand.wager()
                )?;
                if !hand.insurance().is_zero() {
                    writeln!(out, "  Insurance: {}", hand.insurance())?;
                }
                if let Some(outcome) = hand.outcome() {
                    writeln!(out, "  Outcome: {outcome}  Earnings: {}", hand.earnings())?;
                }
            }

            writeln!(out, "ACTIVITY:")?;
            for entry in view.activity {
                writeln!(out, "  {entry}")?;
            }
            writeln!(out, "ACTION: {}", view.phase)?;
            out.flush()
        }
    }

    impl<W: Write> Render for TextRenderer<W> {
        fn render(&mut self, view: &TableView<'_>) {
            if let Err(error) = self.write_view(view) {
                tracing::warn!(%error, "failed to render table");
            }
        }

        fn game_over(&mut self, summary: &GameSummary) {
            let verdict = if summary.end.is_cashed_out() {
                "Cashed out"
            } else {
                "Out of money"
            };
            let written = writeln!(
                self.out,
                "GAME OVER after {} turns. {verdict} with {}.",
                summary.turns, summary.bankroll
            )
            .and_then(|()| self.out.flush());
            if let Err(error) = written {
                tracing::warn!(%error, "failed to render summary");
            }
        }
    }
}
