//! Terminal front end: `sweeper [--width N] [--height N] [--hazards N] [--seed N] [--config FILE]`.
use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use sweeper_core::{BoardGenerator, RandomBoardGenerator};

mod notation;
mod render;
mod session;
mod settings;

use session::Session;
use settings::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = args.settings()?;
    let config = settings.game_config()?;
    let seed = settings.seed_or_random();
    log::debug!("seed: {}", seed);

    let board = RandomBoardGenerator::from_seed(seed).generate(config)?;
    let stdout = io::stdout();
    let clear_screen = !args.no_clear && stdout.is_terminal();
    let state = Session::new(board, io::stdin().lock(), stdout.lock())
        .with_clear_screen(clear_screen)
        .run()?;

    log::info!("Game finished: {:?}", state);
    Ok(())
}
