//! gomoku-selfplay: the engine playing against itself.
//!
//! ## Usage
//!
//! - `gomoku-selfplay` - play one game with the default budget
//! - `gomoku-selfplay --budget 200 --seed 7` - a quicker, reproducible game
//! - `RUST_LOG=debug gomoku-selfplay` - include per-search diagnostics

use std::error::Error;

use clap::Parser;
use flexi_logger::Logger;
use log::info;

use gomoku_mcts::{Board, GameOutcome, Mcts, SearchConfig};

/// Self-play driver for the Gomoku MCTS engine
#[derive(Parser)]
#[command(name = "gomoku-selfplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Visits the best child must gain per move
    #[arg(long, default_value_t = 1000)]
    budget: u32,

    /// Seed for the rollout RNG
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many moves
    #[arg(long, default_value_t = 225)]
    max_moves: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str(&cli.log_level)?.start()?;

    let config = SearchConfig::default()
        .with_visit_budget(cli.budget)
        .with_seed(cli.seed);
    let mut mcts = Mcts::with_config(Board::new(), config);

    while mcts.board().stone_count() < cli.max_moves && !mcts.board().is_game_over() {
        let mover = mcts.board().current_player();
        mcts.search();

        let Some(chosen) = mcts.select_best_child() else {
            break;
        };
        info!(
            "{} plays {} ({} visits, win rate {:.3}, {} iterations)",
            mover,
            chosen.mv,
            chosen.visits,
            chosen.win_rate,
            mcts.stats().iterations
        );
    }

    let board = mcts.board();
    println!("{board}");
    match board.outcome() {
        Some(GameOutcome::Win(stone)) => {
            println!("{stone} wins after {} moves", board.stone_count())
        }
        Some(GameOutcome::Draw) => println!("Draw"),
        None => println!("Stopped after {} moves", board.stone_count()),
    }
    Ok(())
}
