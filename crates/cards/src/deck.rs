// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub(crate) mod parallel;

/// Card parsing and conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The text is not a `<Rank><Suit>` pair like `AH` or `2c`.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// The card index is not in 0..52.
    #[error("invalid card index {0}")]
    InvalidIndex(u8),
}

/// A Poker card.
///
/// A card is identified by its index in 0..52 computed as `rank + 13 * suit`,
/// so that each suit owns a contiguous 13 bits range in a 52 bits card set:
///
/// ```text
///   +-------------+-------------+-------------+-------------+
///   |  diamonds   |   spades    |   hearts    |    clubs    |
///   +-------------+-------------+-------------+-------------+
///    51        39  38        26  25        13  12         0
/// ```
#[derive(Clone, Copy, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// The number of ranks in a suit.
    pub const RANKS: u8 = 13;

    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(rank as u8 + Self::RANKS * suit as u8)
    }

    /// Creates a card from its index in 0..52.
    pub fn from_index(index: u8) -> Result<Card, CardError> {
        if (index as usize) < Deck::SIZE {
            Ok(Self(index))
        } else {
            Err(CardError::InvalidIndex(index))
        }
    }

    /// This card unique index in 0..52.
    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// This card as a single bit in a 52 bits card set.
    #[inline]
    pub const fn bitmask(&self) -> u64 {
        1 << self.0
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.0 % Self::RANKS) as usize]
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.0 / Self::RANKS) as usize]
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Card::from_index(index)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => Rank::from_char(r).zip(Suit::from_char(s)),
            _ => None,
        };

        parsed
            .map(|(rank, suit)| Card::new(rank, suit))
            .ok_or_else(|| CardError::InvalidCard(text.to_string()))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Parses a whitespace separated list of cards like `"AH KD 2c"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CardError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    const CHARS: [char; 13] = [
        '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
    ];

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// Parses a rank character, case insensitive.
    pub fn from_char(c: char) -> Option<Rank> {
        let c = c.to_ascii_uppercase();
        Self::CHARS
            .iter()
            .position(|&r| r == c)
            .map(|pos| Self::ALL[pos])
    }

    /// This rank as a single bit in a 13 bits rank mask.
    #[inline]
    pub const fn bitmask(&self) -> u32 {
        1 << *self as u32
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::CHARS[*self as usize])
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Hearts suit.
    Hearts = 1,
    /// Spades suit.
    Spades = 2,
    /// Diamonds suit.
    Diamonds = 3,
}

impl Suit {
    const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

    const CHARS: [char; 4] = ['C', 'H', 'S', 'D'];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::ALL.into_iter()
    }

    /// Parses a suit character, case insensitive.
    pub fn from_char(c: char) -> Option<Suit> {
        let c = c.to_ascii_uppercase();
        Self::CHARS
            .iter()
            .position(|&s| s == c)
            .map(|pos| Self::ALL[pos])
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::CHARS[*self as usize])
    }
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck, `None` if the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// The cards left in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let n = self.cards.len();
        let mut h = [Card::default(); 7];

        for c1 in 0..n {
            h[0] = self.cards[c1];

            if k == 1 {
                f(&h[0..k]);
                continue;
            }

            for c2 in (c1 + 1)..n {
                h[1] = self.cards[c2];

                if k == 2 {
                    f(&h[0..k]);
                    continue;
                }

                for c3 in (c2 + 1)..n {
                    h[2] = self.cards[c3];

                    if k == 3 {
                        f(&h[0..k]);
                        continue;
                    }

                    for c4 in (c3 + 1)..n {
                        h[3] = self.cards[c4];

                        if k == 4 {
                            f(&h[0..k]);
                            continue;
                        }

                        for c5 in (c4 + 1)..n {
                            h[4] = self.cards[c5];

                            if k == 5 {
                                f(&h[0..k]);
                                continue;
                            }

                            for c6 in (c5 + 1)..n {
                                h[5] = self.cards[c6];

                                if k == 6 {
                                    f(&h[0..k]);
                                    continue;
                                }

                                for c7 in (c6 + 1)..n {
                                    h[6] = self.cards[c7];
                                    f(&h[0..k]);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
