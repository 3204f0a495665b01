// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank mask lookup tables.
//!
//! Each table has one entry for every 13 bits rank mask, where bit `i` is set
//! if a card with rank `i` (deuce=0, ..., ace=12) is present. The tables are
//! built once on first use and are read only after that.
use log::debug;
use std::{sync::LazyLock, time::Instant};

use crate::eval::{HandCategory, Score};

/// Number of 13 bits rank masks.
pub const NUM_MASKS: usize = 1 << 13;

/// A table indexed by rank mask.
pub type Table = Box<[u32; NUM_MASKS]>;

/// Ace, deuce, trey, four, five.
const WHEEL: u32 = 0b1_0000_0000_1111;

/// The evaluator lookup tables.
pub struct Tables {
    /// The highest rank bit.
    pub high1: Table,
    /// The two highest rank bits, 0 if less than 2 bits.
    pub high2: Table,
    /// The three highest rank bits, 0 if less than 3 bits.
    pub high3: Table,
    /// The five highest rank bits, 0 if less than 5 bits.
    pub high5: Table,
    /// The lowest rank bit.
    pub low: Table,
    /// The high card bit of the highest straight, 0 if no straight.
    pub straight: Table,
    /// The number of ranks in the mask.
    pub nbits: Table,
    /// Flush or straight flush score for a single suit mask with 5+ bits.
    pub flush: Table,
    /// High card or straight score for a mask with no repeated ranks.
    pub unique: Table,
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

/// Returns the lookup tables, building them on first use.
#[inline]
pub fn tables() -> &'static Tables {
    &TABLES
}

/// Builds the lookup tables if they have not been built yet.
///
/// Calling this at startup moves the tables construction cost out of the
/// first evaluation.
pub fn init() {
    LazyLock::force(&TABLES);
}

/// Keeps the `n` highest set bits of `mask`, 0 if `mask` has less than `n` bits.
pub const fn highest(mask: u32, n: u32) -> u32 {
    let mut count = 0;
    let mut i = 13;
    while i > 0 {
        i -= 1;
        count += (mask >> i) & 1;
        if count == n {
            return (mask >> i) << i;
        }
    }

    0
}

/// Isolates the lowest set bit of `mask`.
pub const fn lowest(mask: u32) -> u32 {
    mask & mask.wrapping_neg()
}

/// Returns the high card bit of the highest straight in `mask`, 0 if none.
///
/// The wheel (A2345) is a five high straight.
pub const fn straight_high(mask: u32) -> u32 {
    let mut high = 0;
    if mask & WHEEL == WHEEL {
        high = 1 << 3;
    }

    // Higher windows overwrite lower ones.
    let mut low = 0;
    while low + 5 <= 13 {
        let window = 0b11111 << low;
        if mask & window == window {
            high = 1 << (low + 4);
        }
        low += 1;
    }

    high
}

impl Tables {
    fn build() -> Tables {
        let now = Instant::now();

        let zeroed = || Box::new([0u32; NUM_MASKS]);
        let mut t = Tables {
            high1: zeroed(),
            high2: zeroed(),
            high3: zeroed(),
            high5: zeroed(),
            low: zeroed(),
            straight: zeroed(),
            nbits: zeroed(),
            flush: zeroed(),
            unique: zeroed(),
        };

        for (idx, mask) in (0..NUM_MASKS as u32).enumerate() {
            let high5 = highest(mask, 5);
            let straight = straight_high(mask);

            t.high1[idx] = highest(mask, 1);
            t.high2[idx] = highest(mask, 2);
            t.high3[idx] = highest(mask, 3);
            t.high5[idx] = high5;
            t.low[idx] = lowest(mask);
            t.straight[idx] = straight;
            t.nbits[idx] = mask.count_ones();

            if straight != 0 {
                t.unique[idx] = Score::new(HandCategory::Straight, 0, straight).value();
                t.flush[idx] = Score::new(HandCategory::StraightFlush, 0, straight).value();
            } else {
                t.unique[idx] = high5;
                t.flush[idx] = Score::new(HandCategory::Flush, 0, high5).value();
            }
        }

        debug!(
            "Built {NUM_MASKS} entries lookup tables in {:.3}ms",
            now.elapsed().as_secs_f64() * 1000.0
        );

        t
    }
}
