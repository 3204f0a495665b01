// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation and equity errors.
use showdown_cards::{Card, CardError};
use thiserror::Error;

/// Errors returned when validating evaluation and equity inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A card could not be parsed or converted.
    #[error(transparent)]
    InvalidCard(#[from] CardError),
    /// The same card appears more than once in the input.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// A hand has the wrong number of cards.
    #[error("invalid hand size {len}, expected {expected} cards")]
    InvalidHandSize {
        /// The number of cards passed.
        len: usize,
        /// The number of cards expected.
        expected: usize,
    },
    /// The board size is not 0, 3, 4, or 5.
    #[error("invalid community size {0}, expected 0, 3, 4, or 5 cards")]
    InvalidCommunity(usize),
    /// A player does not have exactly two hole cards.
    #[error("invalid hole cards size {0}, expected 2 cards")]
    InvalidHoleCards(usize),
    /// An integer that is not a valid score encoding.
    #[error("invalid score {0:#x}")]
    InvalidScore(u32),
    /// The query was cancelled before completion.
    #[error("equity enumeration cancelled")]
    Cancelled,
}

/// Result alias for evaluation and equity operations.
pub type Result<T> = std::result::Result<T, Error>;
