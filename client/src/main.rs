use std::{
    sync::{Arc, RwLock},
    thread,
};

use liblife::{Board, DEFAULT_ALIVE_PROBABILITY};
use ticker::TickerHost;

mod cli;
mod render;
mod ticker;

pub struct State {
    board: Board,
    ticker: Option<TickerHost>,
}

fn main() -> anyhow::Result<()> {
    let board = Board::new_random(24, 48, DEFAULT_ALIVE_PROBABILITY)?;

    let state_arc = Arc::new(RwLock::new(State {
        board,
        ticker: None,
    }));

    let cli_state_arc = state_arc.clone();
    thread::spawn(move || cli::run_cli(cli_state_arc));

    render::run(state_arc)
}
