//! A seeded multi-deck shoe that plays the upstream source for simulations.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::input::TableInput;

fn hand_value(cards: &[Card]) -> u8 {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    value
}

/// Deals real cards from shuffled decks and reports the totals the
/// controller asks for.
///
/// Each call to [`TableInput::dealer_up_card`] starts a round: two cards to
/// the gambler and two to the dealer, alternating. The dealer draws to 17 or
/// more when asked for a final total. An empty shoe is rebuilt and
/// reshuffled.
pub struct ShoeInput {
    decks: u8,
    cards: Vec<Card>,
    rng: ChaCha8Rng,
    gambler: Vec<Card>,
    dealer: Vec<Card>,
}

impl ShoeInput {
    /// Creates a shoe of `decks` decks (at least one) shuffled from `seed`.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let decks = decks.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::create_shoe(decks, &mut rng);
        Self {
            decks,
            cards,
            rng,
            gambler: Vec::new(),
            dealer: Vec::new(),
        }
    }

    fn create_shoe(decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(usize::from(decks) * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    /// Deals the next card, reshuffling a fresh shoe when empty.
    pub fn deal_card(&mut self) -> Card {
        if let Some(card) = self.cards.pop() {
            return card;
        }
        tracing::debug!(decks = self.decks, "reshuffling shoe");
        self.cards = Self::create_shoe(self.decks, &mut self.rng);
        // A freshly built shoe holds at least one deck.
        self.cards.pop().unwrap_or(Card::new(Suit::Spades, Rank::Ace))
    }

    /// Number of cards left before the next reshuffle.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// The gambler's cards this round.
    #[must_use]
    pub fn gambler_cards(&self) -> &[Card] {
        &self.gambler
    }

    /// The dealer's cards this round.
    #[must_use]
    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer
    }

    /// Replaces the undealt cards; the last element is dealt first.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    fn draw_to_gambler(&mut self) -> u8 {
        let card = self.deal_card();
        self.gambler.push(card);
        hand_value(&self.gambler)
    }
}

impl TableInput for ShoeInput {
    fn dealer_up_card(&mut self) -> Option<Card> {
        self.gambler.clear();
        self.dealer.clear();

        for _ in 0..2 {
            let card = self.deal_card();
            self.gambler.push(card);
            let card = self.deal_card();
            self.dealer.push(card);
        }

        self.dealer.first().copied()
    }

    fn dealer_hole_card(&mut self) -> Option<Card> {
        self.dealer.get(1).copied()
    }

    fn initial_cards(&mut self) -> Option<[Card; 2]> {
        match self.gambler.as_slice() {
            &[first, second] => Some([first, second]),
            _ => None,
        }
    }

    fn initial_total(&mut self) -> Option<u8> {
        Some(hand_value(&self.gambler))
    }

    fn hit_total(&mut self) -> Option<u8> {
        Some(self.draw_to_gambler())
    }

    fn double_total(&mut self) -> Option<u8> {
        Some(self.draw_to_gambler())
    }

    fn dealer_final_total(&mut self, _up_card: &Card) -> Option<u8> {
        while hand_value(&self.dealer) < 17 {
            let card = self.deal_card();
            self.dealer.push(card);
        }
        Some(hand_value(&self.dealer))
    }
}
