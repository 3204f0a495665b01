// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td = "td".parse::<Card>().unwrap();
//! assert_eq!(ah.to_string(), "AH");
//! assert_eq!(td.index(), 8 + 13 * 3);
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and iterating cards in the deck.
//!
//! For example to iterate through all 5 cards hands:
//!
//! ```no_run
//! # use showdown_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
//!
//! Parallel iteration splits the k-subsets of the deck into contiguous ranges
//! and folds each range on its own scoped thread, the following example uses
//! 4 tasks to count all 7 cards hands with per task counters:
//!
//! ```no_run
//! # use std::ops::ControlFlow;
//! # use showdown_cards::Deck;
//! let counts = Deck::default().par_fold(
//!     4,
//!     7,
//!     || 0u64,
//!     |count, _hand| {
//!         *count += 1;
//!         ControlFlow::Continue(())
//!     },
//! );
//! assert_eq!(counts.iter().sum::<u64>(), 133_784_560);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, Deck, Rank, Suit, parse_cards};
pub use deck::parallel::nck;
