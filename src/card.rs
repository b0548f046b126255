//! Card types and rank parsing.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseRankError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
}

impl Suit {
    /// All four suits, in deck-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Clubs, Self::Diamonds];

    const fn name(self) -> &'static str {
        match self {
            Self::Spades => "Spades",
            Self::Hearts => "Hearts",
            Self::Clubs => "Clubs",
            Self::Diamonds => "Diamonds",
        }
    }
}

/// Card rank.
///
/// `Total` is not a real rank: it marks a synthetic card that stands for a
/// number of points reported by an upstream source rather than a dealt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Synthetic points card.
    Total,
}

impl Rank {
    /// The thirteen real ranks, in deck-building order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the blackjack value of a real rank. Aces count 11 here; the
    /// hand decides when to count them as 1.
    ///
    /// Returns 0 for [`Rank::Total`], whose value lives on the card.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Total => 0,
        }
    }

    /// Short label used on prompts and strategy tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Total => "Total",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::Jack => "Jack",
            Self::Queen => "Queen",
            Self::King => "King",
            other => other.label(),
        }
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    /// Parses a rank label such as `A`, `ace`, `7`, `10`, `T`, `q` or `King`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let rank = match label.to_ascii_uppercase().as_str() {
            "A" | "ACE" | "1" | "11" => Self::Ace,
            "2" => Self::Two,
            "3" => Self::Three,
            "4" => Self::Four,
            "5" => Self::Five,
            "6" => Self::Six,
            "7" => Self::Seven,
            "8" => Self::Eight,
            "9" => Self::Nine,
            "10" | "T" | "TEN" => Self::Ten,
            "J" | "JACK" => Self::Jack,
            "Q" | "QUEEN" => Self::Queen,
            "K" | "KING" => Self::King,
            _ => return Err(ParseRankError::new(label)),
        };
        Ok(rank)
    }
}

/// A playing card. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    value: u8,
}

impl Card {
    /// Creates a real card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            value: rank.value(),
        }
    }

    /// Creates a synthetic card standing for a whole hand total.
    #[must_use]
    pub const fn total(points: u8) -> Self {
        Self {
            suit: Suit::Spades,
            rank: Rank::Total,
            value: points,
        }
    }

    /// Creates the synthetic card that brings a dealer showing `up_card` to
    /// `final_total`.
    ///
    /// An ace up card is counted as 1 when the final total is over 21, so the
    /// resulting two-card hand evaluates to exactly `final_total`.
    #[must_use]
    pub const fn remainder(up_card: &Self, final_total: u8) -> Self {
        let counted = if up_card.is_ace() && final_total > 21 {
            1
        } else {
            up_card.value
        };
        Self::total(final_total.saturating_sub(counted))
    }

    /// The ten-valued card a dealer is given when a status override arrives
    /// before any card was dealt.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self::total(10)
    }

    /// Returns the suit.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the rank.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the blackjack value (2-11 for real cards).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    /// Returns whether the card is worth ten (a ten or a face card).
    #[must_use]
    pub const fn is_face_card(&self) -> bool {
        !self.is_ace() && self.value == 10
    }

    /// Returns whether the card is synthetic.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self.rank, Rank::Total)
    }

    /// Label used to index strategy tables: `A` for aces, the value otherwise.
    #[must_use]
    pub const fn table_index(&self) -> u8 {
        if self.is_ace() { 11 } else { self.value }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "Total: {}", self.value)
        } else {
            write!(f, "{} of {}", self.rank.name(), self.suit.name())
        }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_onto_values() {
        assert_eq!("a".parse::<Rank>().unwrap(), Rank::Ace);
        assert_eq!("Queen".parse::<Rank>().unwrap(), Rank::Queen);
        assert_eq!(" 10 ".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!(Rank::King.value(), 10);
        assert_eq!(Rank::Ace.value(), 11);
        assert!("Z".parse::<Rank>().is_err());
        assert!("".parse::<Rank>().is_err());
    }

    #[test]
    fn face_and_ace_detection() {
        assert!(Card::new(Suit::Clubs, Rank::King).is_face_card());
        assert!(Card::new(Suit::Clubs, Rank::Ten).is_face_card());
        assert!(!Card::new(Suit::Clubs, Rank::Ace).is_face_card());
        assert!(Card::new(Suit::Clubs, Rank::Ace).is_ace());
    }

    #[test]
    fn remainder_counts_busting_ace_as_one() {
        let ace = Card::new(Suit::Hearts, Rank::Ace);
        assert_eq!(Card::remainder(&ace, 17).value(), 6);
        assert_eq!(Card::remainder(&ace, 22).value(), 21);

        let six = Card::new(Suit::Hearts, Rank::Six);
        assert_eq!(Card::remainder(&six, 26).value(), 20);
    }
}
