// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example par_eval_all7 -- --num-tasks 8
// ```
use clap::Parser;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use showdown_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// The number of parallel tasks.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=256))]
    num_tasks: u16,
}

fn main() {
    let cli = Cli::parse();
    tables::init();

    // Evaluate all 133M hands with per task counters to avoid contention.
    let num_tasks = cli.num_tasks as usize;
    let task_counters = (0..num_tasks)
        .map(|_| {
            HandCategory::ALL
                .iter()
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let now = Instant::now();
    Deck::default().par_for_each(num_tasks, 7, |task_id, hand| {
        let category = Score::eval(hand).category();
        task_counters[task_id][category as usize].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    // Aggregate counters.
    let agg = (0..HandCategory::ALL.len())
        .map(|c| {
            task_counters
                .iter()
                .map(|counters| counters[c].load(Ordering::Relaxed))
                .sum()
        })
        .collect::<Vec<u64>>();

    let total = agg.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in HandCategory::ALL {
        let label = format!("{category}:");
        println!("{label:<17}{}", agg[category as usize]);
    }
}
