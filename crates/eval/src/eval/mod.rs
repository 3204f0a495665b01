// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator works on rank masks: a hand is split into four 13 bits masks,
//! one per suit, with bit `i` set if the hand has a card of rank `i` in that
//! suit. A flush is found by counting the bits of each suit mask, repeated
//! ranks are found by intersecting the suit masks, i.e. a rank in the
//! intersection of any two masks is at least a pair, and the remaining work is
//! a few lookups in the [tables](crate::tables).
//!
//! The same procedure evaluates 5 and 7 cards hands and it returns the score
//! of the best 5 cards hand.
//!
//! It provides the checked [evaluate5] and [evaluate7] functions that validate
//! the number of cards and that there are no duplicates, and the unchecked
//! [Score::eval] and [Score::from_card_set] used in the equity hot loop.
use showdown_cards::Card;

use crate::{Error, Result, tables::tables};

mod score;
pub use score::{HandCategory, Score};

/// Evaluates a 5 cards hand.
pub fn evaluate5(cards: &[Card]) -> Result<Score> {
    hand_card_set(cards, 5).map(Score::from_card_set)
}

/// Evaluates a 7 cards hand, returns the score of the best 5 cards.
pub fn evaluate7(cards: &[Card]) -> Result<Score> {
    hand_card_set(cards, 7).map(Score::from_card_set)
}

/// Returns the category of a score.
pub fn category(score: Score) -> HandCategory {
    score.category()
}

fn hand_card_set(cards: &[Card], expected: usize) -> Result<u64> {
    if cards.len() != expected {
        return Err(Error::InvalidHandSize {
            len: cards.len(),
            expected,
        });
    }

    card_set(cards, 0)
}

/// Adds the cards to the `used` card set, fails on the first card that is
/// already in the set.
pub(crate) fn card_set(cards: &[Card], mut used: u64) -> Result<u64> {
    for card in cards {
        if used & card.bitmask() != 0 {
            return Err(Error::DuplicateCard(*card));
        }
        used |= card.bitmask();
    }

    Ok(used)
}

impl Score {
    /// Evaluates a 5 or 7 cards hand without validation.
    ///
    /// The cards must not contain duplicates.
    #[inline]
    pub fn eval(cards: &[Card]) -> Score {
        debug_assert!(cards.len() == 5 || cards.len() == 7);
        Self::from_card_set(cards.iter().fold(0, |set, c| set | c.bitmask()))
    }

    /// Evaluates a 52 bits card set with 5 or 7 cards, bit `i` is the card
    /// with index `i`.
    #[inline]
    pub fn from_card_set(set: u64) -> Score {
        const SUIT_BITS: u64 = Score::RANKS_MASK as u64;
        Self::from_suit_masks([
            (set & SUIT_BITS) as u32,
            ((set >> 13) & SUIT_BITS) as u32,
            ((set >> 26) & SUIT_BITS) as u32,
            ((set >> 39) & SUIT_BITS) as u32,
        ])
    }

    /// Evaluates four suit rank masks holding 5 or 7 cards in total.
    #[inline]
    pub fn from_suit_masks(suits: [u32; 4]) -> Score {
        let t = tables();
        let [c0, c1, c2, c3] = suits;

        // At most one suit can have 5 or more cards.
        let flush = suits
            .iter()
            .find(|&&s| t.nbits[s as usize] >= 5)
            .map_or(Score::default(), |&s| Score::from_value(t.flush[s as usize]));

        let combined = c0 | c1 | c2 | c3;
        let num_cards = t.nbits[c0 as usize]
            + t.nbits[c1 as usize]
            + t.nbits[c2 as usize]
            + t.nbits[c3 as usize];

        let ranks = if t.nbits[combined as usize] == num_cards {
            Score::from_value(t.unique[combined as usize])
        } else {
            Self::repeated_ranks(suits, combined)
        };

        flush.max(ranks)
    }

    /// Scores a hand with at least two cards of the same rank, ignoring flushes.
    fn repeated_ranks([c0, c1, c2, c3]: [u32; 4], combined: u32) -> Score {
        let t = tables();
        let high1 = |m: u32| t.high1[m as usize];

        let at_least2 = (c0 & c1) | (c0 & c2) | (c0 & c3) | (c1 & c2) | (c1 & c3) | (c2 & c3);
        let at_least3 = (c0 & c1 & c2) | (c0 & c1 & c3) | (c0 & c2 & c3) | (c1 & c2 & c3);
        let fours = c0 & c1 & c2 & c3;
        let pairs = at_least2 & !at_least3;
        let threes = at_least3 & !fours;

        if fours != 0 {
            return Score::new(
                HandCategory::FourOfAKind,
                t.low[fours as usize],
                high1(combined & !fours),
            );
        }

        if threes != 0 && (t.nbits[threes as usize] >= 2 || pairs != 0) {
            // With two trips the lower one plays as the pair.
            let trips = high1(threes);
            return Score::new(HandCategory::FullHouse, trips, high1(pairs | (threes & !trips)));
        }

        let straight = t.straight[combined as usize];
        if straight != 0 {
            return Score::new(HandCategory::Straight, 0, straight);
        }

        if threes != 0 {
            return Score::new(
                HandCategory::ThreeOfAKind,
                high1(threes),
                t.high2[(combined & !threes) as usize],
            );
        }

        if t.nbits[pairs as usize] >= 2 {
            // A third pair can play as the kicker.
            let top2 = t.high2[pairs as usize];
            return Score::new(HandCategory::TwoPair, top2, high1(combined & !top2));
        }

        if pairs != 0 {
            return Score::new(
                HandCategory::Pair,
                high1(pairs),
                t.high3[(combined & !pairs) as usize],
            );
        }

        Score::new(HandCategory::HighCard, 0, t.high5[combined as usize])
    }
}
