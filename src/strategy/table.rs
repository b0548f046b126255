//! Static lookup-table strategies.

use alloc::string::ToString;

use crate::card::Card;
use crate::error::StrategyTableError;
use crate::hand::GamblerHand;
use crate::money::Money;

use super::{Action, ActionOptions, Strategy};

/// A cell of a strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableAction {
    /// `H`: hit.
    Hit,
    /// `S`: stand.
    Stand,
    /// `D`: double if allowed, otherwise hit.
    DoubleOrHit,
    /// `Ds`: double if allowed, otherwise stand.
    DoubleOrStand,
    /// `R`: surrender if allowed, otherwise hit.
    SurrenderOrHit,
}

impl TableAction {
    /// Parses a table code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" | "h" => Some(Self::Hit),
            "S" | "s" => Some(Self::Stand),
            "D" | "d" => Some(Self::DoubleOrHit),
            "Ds" | "DS" | "ds" => Some(Self::DoubleOrStand),
            "R" | "r" | "Rh" | "RH" => Some(Self::SurrenderOrHit),
            _ => None,
        }
    }

    /// Table code.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Hit => "H",
            Self::Stand => "S",
            Self::DoubleOrHit => "D",
            Self::DoubleOrStand => "Ds",
            Self::SurrenderOrHit => "R",
        }
    }

    /// Picks the concrete action among what is offered.
    #[must_use]
    pub fn resolve(self, options: &ActionOptions) -> Action {
        match self {
            Self::Hit => Action::Hit,
            Self::Stand => Action::Stand,
            Self::DoubleOrHit if options.contains(Action::Double) => Action::Double,
            Self::DoubleOrHit => Action::Hit,
            Self::DoubleOrStand if options.contains(Action::Double) => Action::Double,
            Self::DoubleOrStand => Action::Stand,
            Self::SurrenderOrHit if options.contains(Action::Surrender) => Action::Surrender,
            Self::SurrenderOrHit => Action::Hit,
        }
    }
}

const H: TableAction = TableAction::Hit;
const S: TableAction = TableAction::Stand;
const D: TableAction = TableAction::DoubleOrHit;
const DS: TableAction = TableAction::DoubleOrStand;
const R: TableAction = TableAction::SurrenderOrHit;

const HARD_MIN: u8 = 4;
const SOFT_MIN: u8 = 13;
const COLUMNS: usize = 10;

type Row = [TableAction; COLUMNS];

// Columns: dealer up card 2, 3, 4, 5, 6, 7, 8, 9, 10, A.
const HARD: [Row; 18] = [
    [H, H, H, H, H, H, H, H, H, H], // 4
    [H, H, H, H, H, H, H, H, H, H], // 5
    [H, H, H, H, H, H, H, H, H, H], // 6
    [H, H, H, H, H, H, H, H, H, H], // 7
    [H, H, H, H, H, H, H, H, H, H], // 8
    [H, D, D, D, D, H, H, H, H, H], // 9
    [D, D, D, D, D, D, D, D, H, H], // 10
    [D, D, D, D, D, D, D, D, D, H], // 11
    [H, H, S, S, S, H, H, H, H, H], // 12
    [S, S, S, S, S, H, H, H, H, H], // 13
    [S, S, S, S, S, H, H, H, H, H], // 14
    [S, S, S, S, S, H, H, H, R, H], // 15
    [S, S, S, S, S, H, H, R, R, R], // 16
    [S, S, S, S, S, S, S, S, S, S], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
    [S, S, S, S, S, S, S, S, S, S], // 21
];

const SOFT: [Row; 9] = [
    [H, H, H, D, D, H, H, H, H, H],      // 13
    [H, H, H, D, D, H, H, H, H, H],      // 14
    [H, H, D, D, D, H, H, H, H, H],      // 15
    [H, H, D, D, D, H, H, H, H, H],      // 16
    [H, D, D, D, D, H, H, H, H, H],      // 17
    [S, DS, DS, DS, DS, S, S, H, H, H], // 18
    [S, S, S, S, S, S, S, S, S, S],      // 19
    [S, S, S, S, S, S, S, S, S, S],      // 20
    [S, S, S, S, S, S, S, S, S, S],      // 21
];

/// Decision table keyed by (gambler total, dealer up card, hard/soft).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    hard: [Row; 18],
    soft: [Row; 9],
}

impl Default for StrategyTable {
    /// Basic strategy for a multi-deck game where the dealer stands on soft 17.
    fn default() -> Self {
        Self {
            hard: HARD,
            soft: SOFT,
        }
    }
}

impl StrategyTable {
    /// Parses CSV grids shaped like `total,2,3,4,5,6,7,8,9,10,A`, one row per
    /// total. Hard rows cover 4 to 21, soft rows 13 to 21; rows that are not
    /// listed keep the basic-strategy entry.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad header, a short or long row, a total the
    /// table cannot hold, or an unknown code.
    pub fn parse(hard_csv: &str, soft_csv: &str) -> Result<Self, StrategyTableError> {
        let mut table = Self::default();
        parse_grid(hard_csv, HARD_MIN, &mut table.hard)?;
        parse_grid(soft_csv, SOFT_MIN, &mut table.soft)?;
        Ok(table)
    }

    /// Looks up the cell for a hand.
    ///
    /// Soft totals outside the soft grid fall back to the hard grid; hard
    /// totals are clamped into 4..=21.
    #[must_use]
    pub fn lookup(&self, total: u8, soft: bool, dealer_up: u8) -> TableAction {
        let column = usize::from(dealer_up.clamp(2, 11) - 2);
        if soft && (SOFT_MIN..=21).contains(&total) {
            return self.soft[usize::from(total - SOFT_MIN)][column];
        }
        let row = usize::from(total.clamp(HARD_MIN, 21) - HARD_MIN);
        self.hard[row][column]
    }

    /// Decides an action for `hand` among `options`.
    #[must_use]
    pub fn decide(&self, hand: &GamblerHand, options: &ActionOptions, up_card: &Card) -> Action {
        self.lookup(hand.final_total(), hand.is_soft(), up_card.table_index())
            .resolve(options)
    }
}

fn parse_grid<const N: usize>(
    csv: &str,
    min_total: u8,
    grid: &mut [Row; N],
) -> Result<(), StrategyTableError> {
    let mut lines = csv
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(());
    };
    let expected = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "A"];
    let mut header_fields = header.split(',').map(str::trim);
    let _ = header_fields.next();
    if !header_fields.eq(expected.iter().copied()) {
        return Err(StrategyTableError::BadHeader);
    }

    for (row, line) in lines {
        let fields: alloc::vec::Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != COLUMNS + 1 {
            return Err(StrategyTableError::RowLength {
                row,
                found: fields.len(),
            });
        }

        let index = fields[0]
            .parse::<u8>()
            .ok()
            .and_then(|total| total.checked_sub(min_total))
            .map(usize::from)
            .filter(|&index| index < N)
            .ok_or_else(|| StrategyTableError::BadTotal {
                row,
                total: fields[0].to_string(),
            })?;

        for (column, code) in fields[1..].iter().enumerate() {
            grid[index][column] =
                TableAction::from_code(code).ok_or_else(|| StrategyTableError::BadCode {
                    row,
                    code: (*code).to_string(),
                })?;
        }
    }

    Ok(())
}

/// Plays the basic-strategy table and never buys insurance or even money.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultStaticStrategy {
    table: StrategyTable,
}

impl DefaultStaticStrategy {
    /// Creates a strategy with the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strategy with a custom table.
    #[must_use]
    pub const fn with_table(table: StrategyTable) -> Self {
        Self { table }
    }

    /// Returns the table.
    #[must_use]
    pub const fn table(&self) -> &StrategyTable {
        &self.table
    }
}

impl Strategy for DefaultStaticStrategy {
    fn wants_to_change_wager(&mut self) -> bool {
        false
    }

    // Only asked after `wants_to_change_wager`, which never says yes.
    fn get_new_auto_wager(&mut self) -> Money {
        Money::ZERO
    }

    fn wants_even_money(&mut self) -> bool {
        false
    }

    fn wants_insurance(&mut self) -> bool {
        false
    }

    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        dealer_up_card: &Card,
    ) -> Action {
        self.table.decide(hand, options, dealer_up_card)
    }
}

/// Same table as [`DefaultStaticStrategy`], but always buys insurance
/// against a dealer ace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsuranceStaticStrategy {
    inner: DefaultStaticStrategy,
}

impl InsuranceStaticStrategy {
    /// Creates a strategy with the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strategy with a custom table.
    #[must_use]
    pub const fn with_table(table: StrategyTable) -> Self {
        Self {
            inner: DefaultStaticStrategy::with_table(table),
        }
    }
}

impl Strategy for InsuranceStaticStrategy {
    fn wants_to_change_wager(&mut self) -> bool {
        self.inner.wants_to_change_wager()
    }

    fn get_new_auto_wager(&mut self) -> Money {
        self.inner.get_new_auto_wager()
    }

    fn wants_even_money(&mut self) -> bool {
        self.inner.wants_even_money()
    }

    fn wants_insurance(&mut self) -> bool {
        true
    }

    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        dealer_up_card: &Card,
    ) -> Action {
        self.inner.get_hand_action(hand, options, dealer_up_card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn up(rank: Rank) -> Card {
        Card::new(Suit::Clubs, rank)
    }

    #[test]
    fn basic_table_cells() {
        let table = StrategyTable::default();
        assert_eq!(table.lookup(16, false, 10), TableAction::SurrenderOrHit);
        assert_eq!(table.lookup(16, false, 6), TableAction::Stand);
        assert_eq!(table.lookup(11, false, 11), TableAction::Hit);
        assert_eq!(table.lookup(18, true, 4), TableAction::DoubleOrStand);
        assert_eq!(table.lookup(2, false, 5), TableAction::Hit);
        assert_eq!(table.lookup(12, true, 5), TableAction::Stand);
    }

    #[test]
    fn resolves_against_offered_actions() {
        let mut options = ActionOptions::basic();
        assert_eq!(TableAction::DoubleOrHit.resolve(&options), Action::Hit);
        assert_eq!(TableAction::DoubleOrStand.resolve(&options), Action::Stand);
        assert_eq!(TableAction::SurrenderOrHit.resolve(&options), Action::Hit);

        options.offer(Action::Double);
        options.offer(Action::Surrender);
        assert_eq!(TableAction::DoubleOrHit.resolve(&options), Action::Double);
        assert_eq!(TableAction::SurrenderOrHit.resolve(&options), Action::Surrender);
    }

    #[test]
    fn strategies_decide_from_totals() {
        let mut strategy = DefaultStaticStrategy::new();
        let mut options = ActionOptions::basic();
        options.offer(Action::Double);

        let eleven = GamblerHand::from_total(1, 11);
        assert_eq!(
            strategy.get_hand_action(&eleven, &options, &up(Rank::Six)),
            Action::Double
        );
        let seventeen = GamblerHand::from_total(1, 17);
        assert_eq!(
            strategy.get_hand_action(&seventeen, &options, &up(Rank::Ace)),
            Action::Stand
        );
        assert!(!strategy.wants_insurance());
        assert!(InsuranceStaticStrategy::new().wants_insurance());
        assert!(!InsuranceStaticStrategy::new().wants_even_money());
    }

    #[test]
    fn parse_overrides_listed_rows() {
        let hard = "total,2,3,4,5,6,7,8,9,10,A\n16,S,S,S,S,S,S,S,S,S,S\n";
        let table = StrategyTable::parse(hard, "").unwrap();
        assert_eq!(table.lookup(16, false, 10), TableAction::Stand);
        assert_eq!(table.lookup(15, false, 10), TableAction::SurrenderOrHit);
    }

    #[test]
    fn parse_rejects_malformed_grids() {
        assert_eq!(
            StrategyTable::parse("total,2,3\n", ""),
            Err(StrategyTableError::BadHeader)
        );
        let header = "total,2,3,4,5,6,7,8,9,10,A\n";
        assert!(matches!(
            StrategyTable::parse(&alloc::format!("{header}16,S,S\n"), ""),
            Err(StrategyTableError::RowLength { row: 2, found: 3 })
        ));
        assert!(matches!(
            StrategyTable::parse("", &alloc::format!("{header}12,S,S,S,S,S,S,S,S,S,S\n")),
            Err(StrategyTableError::BadTotal { row: 2, .. })
        ));
        assert!(matches!(
            StrategyTable::parse(&alloc::format!("{header}16,S,S,S,S,S,S,S,S,S,X\n"), ""),
            Err(StrategyTableError::BadCode { row: 2, .. })
        ));
    }
}
