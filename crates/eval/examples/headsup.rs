// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example headsup -- "AH AS" "QC QD"
// [2025-06-01T10:12:01.510Z INFO ] AH AS vs QC QD board -
// [2025-06-01T10:12:01.531Z INFO ] win 80.69% tie 0.35% lose 18.96% (1712304 boards)
// ```
use anyhow::{Result, bail};
use clap::Parser;
use log::{error, info};

use showdown_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// The first player hole cards, e.g. "AH AS".
    hole1: String,
    /// The second player hole cards, e.g. "QC QD".
    hole2: String,
    /// The board cards, e.g. "QH QS 2D".
    #[clap(default_value = "")]
    board: String,
    /// The number of parallel tasks, defaults to the number of cores.
    #[clap(long, short)]
    num_tasks: Option<usize>,
    /// Log the enumeration details.
    #[clap(long, short)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let hole1 = parse_cards(&cli.hole1)?;
    let hole2 = parse_cards(&cli.hole2)?;
    let board = parse_cards(&cli.board)?;

    if board.len() == 5 {
        for hole in [&hole1, &hole2] {
            let hand = hole.iter().chain(&board).copied().collect::<Vec<_>>();
            let score = evaluate7(&hand)?;
            info!("{} plays {}", cli_cards(hole), score.category());
        }
    }

    let mut config = EquityConfig::default();
    if let Some(num_tasks) = cli.num_tasks {
        if num_tasks == 0 {
            bail!("The number of tasks must be greater than 0");
        }
        config.num_tasks = num_tasks;
    }

    info!(
        "{} vs {} board {}",
        cli_cards(&hole1),
        cli_cards(&hole2),
        if board.is_empty() { "-".to_string() } else { cli_cards(&board) }
    );

    let res = Enumerator::new(config).run(&hole1, &hole2, &board)?;
    info!(
        "win {:.2}% tie {:.2}% lose {:.2}% ({} boards)",
        res.pwin * 100.0,
        res.ptie * 100.0,
        res.plose * 100.0,
        res.counts.total()
    );

    Ok(())
}

fn cli_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli) {
        error!("{e}");
    }
}
