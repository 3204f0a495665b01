// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Heads-up equity by exhaustive enumeration.
//!
//! Given two hole cards for each player and 0, 3, 4, or 5 board cards, the
//! enumerator scores both players for every completion of the board drawn
//! from the unseen cards and counts wins, ties, and losses of the first
//! player. Completions are split across parallel tasks, each task keeps its
//! own counters and the counters are summed once all tasks are done.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use showdown_cards::{Card, Deck, nck};
use std::{
    cmp::Ordering,
    iter::Sum,
    ops::{Add, AddAssign, ControlFlow},
    sync::{
        Arc,
        atomic::{self, AtomicBool},
    },
    thread,
    time::Instant,
};

use crate::{Error, Result, Score, eval::card_set};

/// The number of board cards at showdown.
const BOARD_SIZE: usize = 5;

/// Equity enumeration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// The number of parallel tasks.
    pub num_tasks: usize,
    /// How many completions a task evaluates between cancellation checks.
    pub cancel_interval: usize,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            num_tasks: thread::available_parallelism().map_or(1, |n| n.get()),
            cancel_interval: 4096,
        }
    }
}

/// A token to cancel a running enumeration from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels all the enumerations using this token.
    pub fn cancel(&self) {
        self.0.store(true, atomic::Ordering::Relaxed);
    }

    /// Checks if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(atomic::Ordering::Relaxed)
    }
}

/// Wins, ties, and losses counters for the first player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityCounts {
    /// Completions won by the first player.
    pub wins: u64,
    /// Completions that split the pot.
    pub ties: u64,
    /// Completions lost by the first player.
    pub losses: u64,
}

impl EquityCounts {
    /// The total number of completions.
    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    #[inline]
    fn record(&mut self, first: Score, second: Score) {
        match first.cmp(&second) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.ties += 1,
        }
    }
}

impl Add for EquityCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        EquityCounts {
            wins: self.wins + rhs.wins,
            ties: self.ties + rhs.ties,
            losses: self.losses + rhs.losses,
        }
    }
}

impl AddAssign for EquityCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for EquityCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Win, tie, and lose probabilities for the first player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// Probability of winning.
    pub pwin: f64,
    /// Probability of splitting the pot.
    pub ptie: f64,
    /// Probability of losing.
    pub plose: f64,
    /// The counters the probabilities are computed from.
    pub counts: EquityCounts,
}

impl EquityResult {
    /// Computes the probabilities from the counters.
    pub fn from_counts(counts: EquityCounts) -> Self {
        let total = counts.total().max(1) as f64;
        Self {
            pwin: counts.wins as f64 / total,
            ptie: counts.ties as f64 / total,
            plose: counts.losses as f64 / total,
            counts,
        }
    }
}

/// Per task enumeration state.
struct TaskState {
    counts: EquityCounts,
    until_check: usize,
    cancelled: bool,
}

/// Heads-up equity enumerator.
#[derive(Debug, Clone, Default)]
pub struct Enumerator {
    config: EquityConfig,
    cancel: CancelToken,
}

impl Enumerator {
    /// Creates an enumerator with the given configuration.
    pub fn new(config: EquityConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::default(),
        }
    }

    /// Uses the given token to cancel this enumerator queries.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The token that cancels this enumerator queries.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The enumerator configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Computes the equity of `hole1` against `hole2` given the `community`
    /// cards.
    ///
    /// Returns [Error::Cancelled] if the cancel token is set while enumerating,
    /// a complete board is evaluated without checking the token.
    pub fn run(&self, hole1: &[Card], hole2: &[Card], community: &[Card]) -> Result<EquityResult> {
        for hole in [hole1, hole2] {
            if hole.len() != 2 {
                return Err(Error::InvalidHoleCards(hole.len()));
            }
        }

        if !matches!(community.len(), 0 | 3 | 4 | 5) {
            return Err(Error::InvalidCommunity(community.len()));
        }

        let board = card_set(community, 0)?;
        let hand1 = card_set(hole1, board)?;
        let used = card_set(hole2, hand1)?;
        let hand2 = board | (used & !hand1);

        if community.len() == BOARD_SIZE {
            let mut counts = EquityCounts::default();
            counts.record(Score::from_card_set(hand1), Score::from_card_set(hand2));
            return Ok(EquityResult::from_counts(counts));
        }

        let mut deck = Deck::default();
        for card in hole1.iter().chain(hole2).chain(community) {
            deck.remove(*card);
        }

        let k = BOARD_SIZE - community.len();
        let num_tasks = self.config.num_tasks.max(1);
        let cancel_interval = self.config.cancel_interval.max(1);

        debug!(
            "Enumerating {} completions of {} board cards with {num_tasks} tasks",
            nck(deck.count(), k),
            community.len(),
        );

        let now = Instant::now();
        let init = || TaskState {
            counts: EquityCounts::default(),
            until_check: 0,
            cancelled: false,
        };

        let tasks = deck.par_fold(num_tasks, k, init, |state, completion| {
            if state.until_check == 0 {
                if self.cancel.is_cancelled() {
                    state.cancelled = true;
                    return ControlFlow::Break(());
                }
                state.until_check = cancel_interval;
            }
            state.until_check -= 1;

            let cards = completion.iter().fold(0, |set, c| set | c.bitmask());
            state.counts.record(
                Score::from_card_set(hand1 | cards),
                Score::from_card_set(hand2 | cards),
            );

            ControlFlow::Continue(())
        });

        let cancelled = tasks.iter().any(|t| t.cancelled);
        let counts = tasks.into_iter().map(|t| t.counts).sum::<EquityCounts>();

        if cancelled {
            warn!(
                "Equity enumeration cancelled after {} completions",
                counts.total()
            );
            return Err(Error::Cancelled);
        }

        debug!(
            "Enumerated {} completions in {:.3}s wins={} ties={} losses={}",
            counts.total(),
            now.elapsed().as_secs_f64(),
            counts.wins,
            counts.ties,
            counts.losses,
        );

        Ok(EquityResult::from_counts(counts))
    }
}

/// Computes the equity of `hole1` against `hole2` given the `community`
/// cards using the default configuration.
pub fn equity(hole1: &[Card], hole2: &[Card], community: &[Card]) -> Result<EquityResult> {
    Enumerator::default().run(hole1, hole2, community)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_cards::parse_cards;

    fn headsup(h1: &str, h2: &str, board: &str) -> EquityResult {
        let h1 = parse_cards(h1).unwrap();
        let h2 = parse_cards(h2).unwrap();
        let board = parse_cards(board).unwrap();
        equity(&h1, &h2, &board).unwrap()
    }

    fn check(h1: &str, h2: &str, board: &str, pwin: f64, plose: f64) -> EquityResult {
        let res = headsup(h1, h2, board);
        assert!((res.pwin - pwin).abs() < 1e-3, "{h1} {h2} {board} {res:?}");
        assert!((res.plose - plose).abs() < 1e-3, "{h1} {h2} {board} {res:?}");
        assert!((res.pwin + res.ptie + res.plose - 1.0).abs() < 1e-12);
        res
    }

    #[test]
    fn preflop() {
        let res = check("AH AS", "QC QD", "", 0.8069, 0.1896);
        assert_eq!(res.counts.total(), 1_712_304);
    }

    // Each preflop query goes through 1.7M boards, slow in debug mode.
    #[test]
    #[ignore]
    fn preflop_more() {
        check("KC KD", "6H 6S", "", 0.7970, 0.2003);
        check("TD JD", "6H 2S", "", 0.6941, 0.2942);
    }

    #[test]
    fn flop() {
        let res = check("AH AS", "QC QD", "QH QS 2D", 0.0010, 0.9990);
        assert_eq!(
            res.counts,
            EquityCounts {
                wins: 1,
                ties: 0,
                losses: 989
            }
        );
    }

    #[test]
    fn turn() {
        let res = check("AH AS", "QC QD", "QH QS 2D AC", 0.0227, 0.9773);
        assert_eq!(res.counts.total(), 44);
        assert_eq!(res.counts.wins, 1);
    }

    #[test]
    fn turn_without_ties() {
        let res = check("AH KH", "7C 7D", "2H 9H JS TC", 0.4091, 0.5909);
        assert_eq!(
            res.counts,
            EquityCounts {
                wins: 18,
                ties: 0,
                losses: 26
            }
        );
        assert_eq!(res.ptie, 0.0);

        let res = headsup("AH KH", "7C 7D", "2H 9H JS KC");
        assert_eq!((res.counts.wins, res.counts.losses), (43, 1));
        assert_eq!(res.ptie, 0.0);
    }

    #[test]
    fn river() {
        let res = headsup("AH AS", "QC QD", "QH QS 2D AC 3C");
        assert_eq!((res.pwin, res.ptie, res.plose), (0.0, 0.0, 1.0));

        let res = headsup("AH AS", "QC QD", "KH 8S 2D 7C 3C");
        assert_eq!((res.pwin, res.ptie, res.plose), (1.0, 0.0, 0.0));

        // Both play the board.
        let res = headsup("2C 3C", "4D 5D", "TH JH QH KH AH");
        assert_eq!((res.pwin, res.ptie, res.plose), (0.0, 1.0, 0.0));
        assert_eq!(res.counts.total(), 1);
    }

    #[test]
    fn swapped_players() {
        let res = headsup("AH KH", "7C 7D", "2H 9H JS");
        let swapped = headsup("7C 7D", "AH KH", "2H 9H JS");
        assert_eq!(res.counts.wins, swapped.counts.losses);
        assert_eq!(res.counts.losses, swapped.counts.wins);
        assert_eq!(res.counts.ties, swapped.counts.ties);
        assert_eq!(res.counts.total(), 990);
    }

    #[test]
    fn ties() {
        // Same ranks, only a flush breaks the tie and both have the same draw.
        let res = headsup("AH KH", "AD KD", "2H 7D QC");
        assert!(res.ptie > 0.9);
        assert_eq!(res.counts.wins, 45);
        assert_eq!(res.counts.wins, res.counts.losses);
        assert!((res.pwin + res.ptie + res.plose - 1.0).abs() < 1e-12);
    }

    #[test]
    fn num_tasks_do_not_change_counts() {
        let h1 = parse_cards("8S 9S").unwrap();
        let h2 = parse_cards("AC KD").unwrap();
        let board = parse_cards("TS 2D 3S").unwrap();

        let expected = Enumerator::new(EquityConfig {
            num_tasks: 1,
            cancel_interval: 4096,
        })
        .run(&h1, &h2, &board)
        .unwrap();

        for (num_tasks, cancel_interval) in [(2, 1), (5, 7), (64, 0), (0, 100)] {
            let config = EquityConfig {
                num_tasks,
                cancel_interval,
            };
            let res = Enumerator::new(config).run(&h1, &h2, &board).unwrap();
            assert_eq!(res, expected);
        }

        let board = parse_cards("TS 2D 3S 4H").unwrap();
        let res = Enumerator::new(EquityConfig {
            num_tasks: 64,
            cancel_interval: 1,
        })
        .run(&h1, &h2, &board)
        .unwrap();
        assert_eq!(res.counts.total(), 44);
    }

    #[test]
    fn cancelled() {
        let h1 = parse_cards("AH AS").unwrap();
        let h2 = parse_cards("QC QD").unwrap();

        let enumerator = Enumerator::default();
        let token = enumerator.cancel_token();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(enumerator.run(&h1, &h2, &[]), Err(Error::Cancelled));

        let board = parse_cards("QH QS 2D").unwrap();
        assert_eq!(enumerator.run(&h1, &h2, &board), Err(Error::Cancelled));

        // A complete board has nothing to enumerate.
        let board = parse_cards("QH QS 2D AC 3C").unwrap();
        assert!(enumerator.run(&h1, &h2, &board).is_ok());

        // A token shared with another thread cancels every enumerator using it.
        let token = CancelToken::new();
        let config = EquityConfig {
            num_tasks: 2,
            cancel_interval: 16,
        };
        let first = Enumerator::new(config.clone()).with_cancel_token(token.clone());
        let second = Enumerator::new(config).with_cancel_token(token.clone());
        assert!(!second.cancel_token().is_cancelled());

        thread::spawn(move || token.cancel()).join().unwrap();
        assert!(first.cancel_token().is_cancelled());
        assert_eq!(first.run(&h1, &h2, &[]), Err(Error::Cancelled));
        assert_eq!(second.run(&h1, &h2, &board[..4]), Err(Error::Cancelled));
    }

    #[test]
    fn invalid_inputs() {
        let cards = parse_cards("AH AS QC QD 2C 3C 4C 5C 6C").unwrap();
        let (h1, h2) = (&cards[0..2], &cards[2..4]);

        assert_eq!(equity(&cards[0..1], h2, &[]), Err(Error::InvalidHoleCards(1)));
        assert_eq!(equity(h1, &cards[2..5], &[]), Err(Error::InvalidHoleCards(3)));

        for len in [1, 2] {
            assert_eq!(
                equity(h1, h2, &cards[4..4 + len]),
                Err(Error::InvalidCommunity(len))
            );
        }
        assert_eq!(equity(h1, h2, &cards[3..9]), Err(Error::InvalidCommunity(6)));

        // Duplicates between holes, hole and board, and on the board.
        assert_eq!(
            equity(h1, &cards[1..3], &[]),
            Err(Error::DuplicateCard(cards[1]))
        );
        assert_eq!(
            equity(h1, h2, &cards[1..4]),
            Err(Error::DuplicateCard(cards[1]))
        );
        let board = [cards[4], cards[5], cards[4]];
        assert_eq!(equity(h1, h2, &board), Err(Error::DuplicateCard(cards[4])));
    }

    #[test]
    fn config_defaults() {
        let config = serde_json::from_str::<EquityConfig>(r#"{"num_tasks": 3}"#).unwrap();
        assert_eq!(config.num_tasks, 3);
        assert_eq!(config.cancel_interval, 4096);
        assert!(EquityConfig::default().num_tasks >= 1);
    }

    #[test]
    fn counts_reduce() {
        let a = EquityCounts {
            wins: 1,
            ties: 2,
            losses: 3,
        };
        let b = EquityCounts {
            wins: 10,
            ties: 20,
            losses: 30,
        };

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
        assert_eq!([a, b].into_iter().sum::<EquityCounts>(), b + a);
        assert_eq!(c.total(), 66);

        let res = EquityResult::from_counts(c);
        assert_eq!(res.pwin, 11.0 / 66.0);
        assert_eq!(res.plose, 33.0 / 66.0);
        assert_eq!(res.ptie, 22.0 / 66.0);

        let res = EquityResult::from_counts(EquityCounts {
            wins: 8,
            ties: 0,
            losses: 36,
        });
        assert_eq!(res.ptie, 0.0);
        assert!(res.pwin >= 0.0 && res.plose <= 1.0);
    }
}
