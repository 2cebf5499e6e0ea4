mod sleeper;

use std::{
    io::{self, Write},
    sync::{Arc, RwLock},
    time::Duration,
};

use colored::Colorize;
use liblife::{Board, CellState};
use sleeper::Sleeper;

use crate::State;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Dead streak at which a cell has fully faded into the background.
const FADE_HORIZON: u32 = 8;

pub fn run(state_arc: Arc<RwLock<State>>) -> ! {
    // Hide the cursor and start from a blank screen.
    print!("\x1b[?25l\x1b[2J");

    let mut sleeper = Sleeper::new(FRAME_INTERVAL);

    loop {
        {
            let state = state_arc.read().unwrap();
            draw(&state.board);
        }

        sleeper.sleep();
    }
}

fn draw(board: &Board) {
    let (rows, cols) = board.dimensions();

    // Cursor home, then repaint in place to avoid flicker.
    let mut frame = String::from("\x1b[H");

    for (pos, cell) in board.enumerate_cells() {
        frame.push_str(&paint(cell.state()));

        if pos.col == cols - 1 {
            frame.push_str("\x1b[0K\n");
        }
    }

    frame.push_str(&format!(
        "{rows} rows | {cols} cols | generation {}\x1b[0K\n",
        board.generation()
    ));

    print!("{frame}");
    io::stdout().flush().unwrap();
}

fn paint(state: CellState) -> String {
    match state {
        CellState::Alive => "██".truecolor(235, 235, 235).to_string(),

        CellState::Dead(Some(streak)) => {
            let remaining = FADE_HORIZON.saturating_sub(streak);
            let level = (140 * remaining / FADE_HORIZON) as u8;
            "██".truecolor(level, level, level).to_string()
        }

        CellState::Dead(None) => "··".truecolor(45, 45, 45).to_string(),
    }
}
