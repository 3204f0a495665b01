// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand score and category types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Hand categories from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// High card.
    HighCard = 0,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandCategory {
    /// All categories from the weakest to the strongest.
    pub const ALL: [HandCategory; 9] = {
        use HandCategory::*;
        [
            HighCard,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
    };
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };

        write!(f, "{name}")
    }
}

/// A hand score.
///
/// Scores are compared as integers, a higher score is a stronger hand. The
/// integer has the following layout:
///
/// ```text
///   +-----+---------------+---------------+
///   | ccc | ppppppppppppp | kkkkkkkkkkkkk |
///   +-----+---------------+---------------+
///    28 26 25           13 12            0
///   c = hand category id (high card=0, ..., straight flush=8)
///   p = primary ranks mask (the pair, trips, or quads rank)
///   k = kicker ranks mask
/// ```
///
/// Straights and flushes have no primary ranks, a straight kicker mask holds
/// only the straight high card bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Score(u32);

impl Score {
    /// Category bits offset.
    pub const CATEGORY_SHIFT: u32 = 26;

    /// Primary ranks bits offset.
    pub const PRIMARY_SHIFT: u32 = 13;

    /// A 13 bits ranks mask.
    pub const RANKS_MASK: u32 = (1 << 13) - 1;

    /// Creates a score from its parts.
    #[inline]
    pub fn new(category: HandCategory, primary: u32, kickers: u32) -> Score {
        debug_assert!(primary <= Self::RANKS_MASK, "primary=0x{primary:x}");
        debug_assert!(kickers <= Self::RANKS_MASK, "kickers=0x{kickers:x}");

        Score((category as u32) << Self::CATEGORY_SHIFT | primary << Self::PRIMARY_SHIFT | kickers)
    }

    #[inline]
    pub(crate) const fn from_value(value: u32) -> Score {
        Score(value)
    }

    /// The score integer value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        HandCategory::ALL[(self.0 >> Self::CATEGORY_SHIFT) as usize]
    }

    /// The primary ranks mask.
    pub fn primary(&self) -> u32 {
        (self.0 >> Self::PRIMARY_SHIFT) & Self::RANKS_MASK
    }

    /// The kicker ranks mask.
    pub fn kickers(&self) -> u32 {
        self.0 & Self::RANKS_MASK
    }
}

impl TryFrom<u32> for Score {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let category = value >> Self::CATEGORY_SHIFT;
        if (category as usize) < HandCategory::ALL.len() {
            Ok(Score(value))
        } else {
            Err(Error::InvalidScore(value))
        }
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08x})", self.category(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_parts() {
        let score = Score::new(HandCategory::FullHouse, 1 << 7, 1 << 12);
        assert_eq!(score.category(), HandCategory::FullHouse);
        assert_eq!(score.primary(), 1 << 7);
        assert_eq!(score.kickers(), 1 << 12);
        assert_eq!(score.value(), 6 << 26 | (1 << 7) << 13 | 1 << 12);
        assert_eq!(score.to_string(), "Full House (0x18101000)");
    }

    #[test]
    fn category_dominates() {
        let best_pair = Score::new(HandCategory::Pair, 1 << 12, Score::RANKS_MASK);
        let worst_two_pair = Score::new(HandCategory::TwoPair, 0b11, 1 << 2);
        assert!(best_pair < worst_two_pair);

        let weak_kickers = Score::new(HandCategory::Pair, 1 << 12, 0b111);
        assert!(weak_kickers < best_pair);

        for pair in HandCategory::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(
                Score::new(pair[0], Score::RANKS_MASK, Score::RANKS_MASK)
                    < Score::new(pair[1], 0, 0)
            );
        }
    }

    #[test]
    fn score_serde() {
        let score = Score::new(HandCategory::Straight, 0, 1 << 3);
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, (4u32 << 26 | 1 << 3).to_string());
        assert_eq!(serde_json::from_str::<Score>(&json).unwrap(), score);

        assert!(serde_json::from_str::<Score>(&(9u32 << 26).to_string()).is_err());
        assert_eq!(Score::try_from(9 << 26), Err(Error::InvalidScore(9 << 26)));
    }
}
