//! Fixed-point money amounts and payout odds.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use crate::error::ParseMoneyError;
use crate::options::RoundingMode;

/// A non-negative amount of money, stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole dollars, saturating at the largest
    /// representable amount.
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Returns whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtracts, returning `None` instead of going below zero.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtracts, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Half of the amount, with odd cents resolved by `mode`.
    #[must_use]
    pub const fn half(self, mode: RoundingMode) -> Self {
        self.apply_odds(Odds::new(1, 2), mode)
    }

    /// Winnings for this stake at the given odds, with sub-cent remainders
    /// resolved by `mode`. Saturates at the largest representable amount.
    #[must_use]
    pub const fn apply_odds(self, odds: Odds, mode: RoundingMode) -> Self {
        let numerator = self.0 as u128 * odds.antecedent as u128;
        let denominator = odds.consequent as u128;
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        let cents = match mode {
            RoundingMode::Down => quotient,
            RoundingMode::Up => {
                if remainder > 0 {
                    quotient + 1
                } else {
                    quotient
                }
            }
            RoundingMode::Nearest => {
                if remainder * 2 >= denominator {
                    quotient + 1
                } else {
                    quotient
                }
            }
        };
        if cents > u64::MAX as u128 {
            Self(u64::MAX)
        } else {
            Self(cents as u64)
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Formats as `$1,234.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;

        let mut groups = [0u64; 7];
        let mut count = 0;
        let mut rest = dollars;
        loop {
            groups[count] = rest % 1000;
            count += 1;
            rest /= 1000;
            if rest == 0 {
                break;
            }
        }

        f.write_str("$")?;
        write!(f, "{}", groups[count - 1])?;
        for group in groups[..count - 1].iter().rev() {
            write!(f, ",{group:03}")?;
        }
        write!(f, ".{cents:02}")
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `12`, `12.5`, `12.50`, `$1,012.50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let body = raw.strip_prefix('$').unwrap_or(raw);
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError::new(raw));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError::new(raw));
        }

        let mut dollars: u64 = 0;
        for b in whole.bytes() {
            match b {
                b',' => {}
                b'0'..=b'9' => {
                    dollars = dollars
                        .checked_mul(10)
                        .and_then(|d| d.checked_add(u64::from(b - b'0')))
                        .ok_or_else(|| ParseMoneyError::new(raw))?;
                }
                _ => return Err(ParseMoneyError::new(raw)),
            }
        }

        let mut cents: u64 = 0;
        for (i, b) in fraction.bytes().enumerate() {
            let digit = u64::from(b - b'0');
            cents += if i == 0 { digit * 10 } else { digit };
        }

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Self)
            .ok_or_else(|| ParseMoneyError::new(raw))
    }
}

/// Payout odds, `antecedent:consequent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Odds {
    /// Amount won per `consequent` staked.
    pub antecedent: u32,
    /// Stake unit.
    pub consequent: u32,
}

impl Odds {
    /// 1:1.
    pub const EVEN: Self = Self::new(1, 1);
    /// 3:2, the usual blackjack payout.
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    /// 2:1, the usual insurance payout.
    pub const TWO_TO_ONE: Self = Self::new(2, 1);

    /// Creates odds. A zero consequent is treated as 1.
    #[must_use]
    pub const fn new(antecedent: u32, consequent: u32) -> Self {
        Self {
            antecedent,
            consequent: if consequent == 0 { 1 } else { consequent },
        }
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.antecedent, self.consequent)
    }
}
