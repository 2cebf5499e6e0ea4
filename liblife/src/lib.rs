pub use board::{Board, Cell, CellState, DEFAULT_ALIVE_PROBABILITY};
pub use error::BoardError;
pub use pos::Position;
pub use rule::Rule;

pub mod board;
pub mod error;
pub mod pos;
pub mod rule;
