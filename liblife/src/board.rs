use itertools::Itertools;

use super::error::BoardError;
use super::pos::Position;
use super::rule::Rule;

/// Aliveness probability used by [`Board::randomize`] when reseeding.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.5;

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// Committed per-cell state. `Dead` carries the number of consecutive
/// generations spent dead since last being alive (`None` if the cell has
/// never died), which renderers use to fade cells out. The streak plays no
/// part in rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Alive,
    Dead(Option<u32>),
}

impl Default for CellState {
    fn default() -> Self {
        CellState::Dead(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    state: CellState,
    next_alive: bool,
}

impl Cell {
    fn with_alive(alive: bool) -> Self {
        let state = if alive {
            CellState::Alive
        } else {
            CellState::Dead(None)
        };

        Self {
            state,
            next_alive: false,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.state, CellState::Alive)
    }

    pub fn dead_streak(&self) -> Option<u32> {
        match self.state {
            CellState::Alive => None,
            CellState::Dead(streak) => streak,
        }
    }

    /// Commit the staged `next_alive` value. A cell dying this instant gets
    /// streak 0; a cell staying dead ages its streak by one.
    fn evolve(&mut self) {
        self.state = if self.next_alive {
            CellState::Alive
        } else {
            match self.state {
                CellState::Alive => CellState::Dead(Some(0)),
                CellState::Dead(Some(streak)) => CellState::Dead(Some(streak + 1)),
                CellState::Dead(None) => CellState::Dead(None),
            }
        };
    }
}

/// A toroidal Game of Life grid, row-major in a flat `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    rule: Rule,
    generation: u64,
}

impl Board {
    /// All-dead board with the default rule.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimension { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            rule: Rule::default(),
            generation: 0,
        })
    }

    /// Board where each cell is independently alive with `alive_probability`.
    pub fn new_random(
        rows: usize,
        cols: usize,
        alive_probability: f64,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;

        for cell in &mut board.cells {
            *cell = Cell::with_alive(rand::random_bool(alive_probability));
        }

        Ok(board)
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    /// Advance exactly one generation.
    ///
    /// Two phases: first every cell's next state is staged from neighbor
    /// counts against the committed grid, then every cell commits. Neighbor
    /// counting never observes a state written during the same step.
    pub fn step(&mut self) {
        for index in 0..self.cells.len() {
            let pos = self.index_to_pos(index);
            let alive_neighbors = self.alive_neighbor_count(pos);
            let next_alive = self
                .rule
                .next_alive(self.cells[index].is_alive(), alive_neighbors);

            self.cells[index].next_alive = next_alive;
        }

        for cell in &mut self.cells {
            cell.evolve();
        }

        self.generation += 1;
    }

    /// Flip one cell's aliveness in place. A direct edit: no other cell is
    /// touched and the generation counter does not move.
    pub fn toggle<P>(&mut self, pos: P) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;

        let cell = &mut self.cells[index];
        cell.next_alive = !cell.is_alive();
        cell.evolve();

        Ok(())
    }

    /// Kill every cell and forget all dead streaks. No rule evaluation.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reseed every cell at [`DEFAULT_ALIVE_PROBABILITY`], optionally
    /// resizing the grid. Keeps the rule and the generation counter.
    pub fn randomize(
        &mut self,
        rows: Option<usize>,
        cols: Option<usize>,
    ) -> Result<(), BoardError> {
        let rows = rows.unwrap_or(self.rows);
        let cols = cols.unwrap_or(self.cols);

        let reseeded = Self::new_random(rows, cols, DEFAULT_ALIVE_PROBABILITY)?;

        self.rows = rows;
        self.cols = cols;
        self.cells = reseeded.cells;

        Ok(())
    }

    pub fn cell<P>(&self, pos: P) -> Result<&Cell, BoardError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        Ok(&self.cells[index])
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Position { row, col })
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), cell))
    }

    fn alive_neighbor_count(&self, pos: Position) -> usize {
        NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .filter(|rel_pos| {
                let row = (pos.row as isize + rel_pos[0]).rem_euclid(self.rows as isize) as usize;
                let col = (pos.col as isize + rel_pos[1]).rem_euclid(self.cols as isize) as usize;

                self.cells[col + row * self.cols].is_alive()
            })
            .count()
    }

    fn checked_index(&self, pos: Position) -> Result<usize, BoardError> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return Err(BoardError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(pos.col + pos.row * self.cols)
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_alive(rows: usize, cols: usize, alive: &[[usize; 2]]) -> Board {
        let mut board = Board::new(rows, cols).unwrap();
        for pos in alive {
            board.toggle(*pos).unwrap();
        }
        board
    }

    fn alive_positions(board: &Board) -> Vec<[usize; 2]> {
        board
            .enumerate_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos.into())
            .collect()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 5),
            Err(BoardError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert_eq!(
            Board::new(5, 0),
            Err(BoardError::InvalidDimension { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn toroidal_neighbor_count_wraps_all_edges() {
        let board = board_with_alive(3, 3, &[[0, 0]]);

        // (0, 0) wraps into every corner's and edge-adjacent cell's
        // neighborhood.
        assert_eq!(board.alive_neighbor_count(Position { row: 2, col: 2 }), 1);
        assert_eq!(board.alive_neighbor_count(Position { row: 2, col: 0 }), 1);
        assert_eq!(board.alive_neighbor_count(Position { row: 0, col: 2 }), 1);
        assert_eq!(board.alive_neighbor_count(Position { row: 1, col: 1 }), 1);
    }

    #[test]
    fn lone_center_cell_dies() {
        let mut board = board_with_alive(3, 3, &[[1, 1]]);

        board.step();

        assert!(alive_positions(&board).is_empty());
    }

    #[test]
    fn block_is_a_still_life() {
        let block = &[[1, 1], [1, 2], [2, 1], [2, 2]];
        let mut board = board_with_alive(5, 5, block);
        let initial = alive_positions(&board);

        for _ in 0..10 {
            board.step();
        }

        assert_eq!(alive_positions(&board), initial);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut board = board_with_alive(5, 5, &[[2, 1], [2, 2], [2, 3]]);

        board.step();
        assert_eq!(alive_positions(&board), vec![[1, 2], [2, 2], [3, 2]]);

        board.step();
        assert_eq!(alive_positions(&board), vec![[2, 1], [2, 2], [2, 3]]);
    }

    #[test]
    fn step_is_deterministic() {
        let seed = &[[0, 1], [1, 2], [2, 0], [2, 1], [2, 2]];
        let mut a = board_with_alive(6, 6, seed);
        let mut b = board_with_alive(6, 6, seed);

        for _ in 0..10 {
            a.step();
            b.step();
        }

        assert_eq!(a, b);
    }

    #[test]
    fn dead_streak_tracks_generations_since_death() {
        let mut board = board_with_alive(3, 3, &[[1, 1]]);

        board.step();
        assert_eq!(board.cell([1, 1]).unwrap().dead_streak(), Some(0));

        board.step();
        assert_eq!(board.cell([1, 1]).unwrap().dead_streak(), Some(1));

        board.step();
        assert_eq!(board.cell([1, 1]).unwrap().dead_streak(), Some(2));

        // Rebirth forgets the streak entirely.
        board.toggle([1, 1]).unwrap();
        assert!(board.cell([1, 1]).unwrap().is_alive());
        assert_eq!(board.cell([1, 1]).unwrap().dead_streak(), None);
    }

    #[test]
    fn never_alive_cells_have_no_streak() {
        let mut board = board_with_alive(3, 3, &[[1, 1]]);

        board.step();
        board.step();

        assert_eq!(board.cell([0, 0]).unwrap().state(), CellState::Dead(None));
    }

    #[test]
    fn toggle_affects_only_the_target_cell() {
        let mut board = board_with_alive(4, 4, &[[0, 0]]);

        board.toggle([2, 2]).unwrap();

        assert!(board.cell([2, 2]).unwrap().is_alive());
        assert_eq!(board.cell([2, 2]).unwrap().dead_streak(), None);
        assert_eq!(alive_positions(&board), vec![[0, 0], [2, 2]]);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn toggle_out_of_bounds_fails() {
        let mut board = Board::new(4, 6).unwrap();

        assert_eq!(
            board.toggle([4, 0]),
            Err(BoardError::OutOfBounds {
                row: 4,
                col: 0,
                rows: 4,
                cols: 6,
            })
        );
        assert!(board.toggle([0, 6]).is_err());
        assert!(board.cell([4, 6]).is_err());
    }

    #[test]
    fn clear_kills_everything_and_forgets_streaks() {
        let mut board = board_with_alive(4, 4, &[[0, 0], [1, 1], [2, 2]]);
        board.step();
        board.step();

        board.clear();

        let all_positions: Vec<_> = board.positions().collect();
        assert_eq!(all_positions.len(), 16);
        for pos in all_positions {
            assert_eq!(board.cell(pos).unwrap().state(), CellState::Dead(None));
        }
        assert_eq!(board.dimensions(), (4, 4));
    }

    #[test]
    fn step_increments_generation() {
        let mut board = Board::new(3, 3).unwrap();
        assert_eq!(board.generation(), 0);

        board.step();
        board.step();
        assert_eq!(board.generation(), 2);

        board.clear();
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn randomize_resizes_the_grid() {
        let mut board = Board::new(4, 4).unwrap();

        board.randomize(Some(6), Some(8)).unwrap();
        assert_eq!(board.dimensions(), (6, 8));

        assert_eq!(
            board.randomize(Some(0), None),
            Err(BoardError::InvalidDimension { rows: 0, cols: 8 })
        );
        assert_eq!(board.dimensions(), (6, 8));
    }

    #[test]
    fn randomized_cells_start_with_no_streak() {
        let board = Board::new_random(8, 8, DEFAULT_ALIVE_PROBABILITY).unwrap();

        for (_, cell) in board.enumerate_cells() {
            match cell.state() {
                CellState::Alive | CellState::Dead(None) => {}
                other => panic!("unexpected fresh cell state: {other:?}"),
            }
        }
    }
}
