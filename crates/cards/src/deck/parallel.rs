// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use std::{ops::ControlFlow, thread};

use super::{Card, Deck};

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u32; 8]; 52] {
    let mut t = [[0u32; 8]; 52];
    let mut n = 0;

    while n < 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= 7 && k <= n + 1 {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            let n_1 = n.saturating_sub(1);
            let k_1 = k.saturating_sub(1);
            t[n][k] = t[n_1][k_1] + t[n_1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; 8]; 52] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= 7, "k={k} must be 0 <= k <= 7");

    if n < k || n == 0 {
        0
    } else {
        NCKS[n - 1][k] as usize
    }
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
fn nth_ksubset(mut n: usize, k: usize) -> [usize; 7] {
    assert!(k <= 7);

    let mut out = [0; 7];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;

        n = n.saturating_sub(nck(c, k + 1));
    }

    out
}

/// Calls the given closure for count k-subsets starting from the nth ksubset,
/// stops early when the closure breaks.
fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    if count == 0 {
        return;
    }

    // Algorithm L from TAOCP 4a, c[0] and c[k + 2] are sentinels.
    let mut c = [0usize; 10];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut counter = 1;
    loop {
        if f(&c[1..=k]).is_break() {
            break;
        }

        counter += 1;
        if counter > count {
            break;
        }

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}

impl Deck {
    /// Parallel fold over each k-cards hand.
    ///
    /// The k-subsets of the deck are split into `num_tasks` contiguous ranges,
    /// each range is folded on its own thread into an accumulator created by
    /// `init`. The `f` closure can return [ControlFlow::Break] to stop its task
    /// early. Returns the tasks accumulators in task order.
    ///
    /// At most one thread per k-cards hand is spawned, tasks beyond the
    /// number of hands get an accumulator from `init` that is never folded.
    ///
    /// Panics if k is not 1 <= k <= 7 or if num_tasks is 0.
    pub fn par_fold<T, I, F>(&self, num_tasks: usize, k: usize, init: I, f: F) -> Vec<T>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) -> ControlFlow<()> + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        let num_hands = if k > n { 0 } else { nck(n, k) };
        let num_spawned = num_tasks.min(num_hands.max(1));
        let hands_per_task = num_hands.div_ceil(num_spawned);

        let mut accs = thread::scope(|s| {
            let handles = (0..num_spawned)
                .map(|task_id| {
                    let start = (task_id * hands_per_task).min(num_hands);
                    let count = hands_per_task.min(num_hands - start);
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut acc = init();
                        let mut h = [Card::default(); 7];
                        for_each_ksubset(n, k, start, count, |p| {
                            for (idx, &pos) in p.iter().enumerate() {
                                h[idx] = self.cards[pos];
                            }

                            f(&mut acc, &h[..k])
                        });
                        acc
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(acc) => acc,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<Vec<_>>()
        });

        accs.extend((num_spawned..num_tasks).map(|_| init()));
        accs
    }

    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The clousure takes an usize that is the task identifier (0..num_task)
    /// and a slice of cards of length k.
    ///
    /// Panics if k is not 1 <= k <= 7 or if num_tasks is 0.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        let next_id = std::sync::atomic::AtomicUsize::new(0);
        self.par_fold(
            num_tasks,
            k,
            || next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed),
            |task_id, hand| {
                f(*task_id, hand);
                ControlFlow::Continue(())
            },
        );
    }
}
