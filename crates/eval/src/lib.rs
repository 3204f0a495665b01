// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator.
//!
//! Poker hand evaluator for 5 and 7 cards hands and exhaustive heads-up
//! equity. The evaluator splits a hand into four 13 bits rank masks, one per
//! suit, and classifies it with a handful of bitwise operations and lookups
//! into tables indexed by rank mask. The resulting [Score] is an integer whose
//! natural order is the poker strength order:
//!
//! ```
//! # use showdown_eval::*;
//! let flush = parse_cards("2C 3C 5C 7C 9C").unwrap();
//! let straight = parse_cards("9D TC JC QH KS").unwrap();
//! let v1 = evaluate5(&flush).unwrap();
//! let v2 = evaluate5(&straight).unwrap();
//! assert!(v1 > v2);
//! assert_eq!(category(v1), HandCategory::Flush);
//! ```
//!
//! The [equity()] function enumerates every completion of the board and
//! returns the win, tie, and lose probabilities of the first hand, use an
//! [Enumerator] to configure the number of tasks or to cancel a long query:
//!
//! ```no_run
//! # use showdown_eval::*;
//! let aces = parse_cards("AH AS").unwrap();
//! let queens = parse_cards("QC QD").unwrap();
//! let res = equity(&aces, &queens, &[]).unwrap();
//! assert!((res.pwin - 0.8069).abs() < 1e-3);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod equity;
pub use equity::{CancelToken, Enumerator, EquityConfig, EquityCounts, EquityResult, equity};

pub mod error;
pub use error::{Error, Result};

pub mod eval;
pub use eval::{HandCategory, Score, category, evaluate5, evaluate7};

pub mod tables;

// Reexport cards types.
pub use showdown_cards::{Card, CardError, Deck, Rank, Suit, parse_cards};
