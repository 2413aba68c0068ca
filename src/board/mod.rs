pub mod guard;
pub mod strategy;

use std::fmt::{Display, Formatter};

use itertools::iproduct;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::board::guard::PlacedMove;
use crate::min_max::Player;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum CellState {
    EMPTY,
    X,
    O,
}

impl CellState {
    pub fn symbol(self) -> char {
        match self {
            CellState::EMPTY => '.',
            CellState::X => 'X',
            CellState::O => 'O',
        }
    }
}

impl From<Player> for CellState {
    fn from(player: Player) -> Self {
        match player {
            Player::Max => CellState::O,
            Player::Min => CellState::X,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum BoardStatus {
    MaxWon,
    MinWon,
    Draw,
    Ongoing,
}

#[derive(EnumIter, Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Direction {
    Right,
    Down,
    DownRight,
    DownLeft,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct GameBoard {
    size: usize,
    cells: Vec<CellState>,
}

impl GameBoard {
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![CellState::EMPTY; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    // out of range is never free
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(CellState::EMPTY)
    }

    pub fn place(&mut self, row: usize, col: usize, mark: CellState) {
        debug_assert!(self.is_free(row, col), "cell ({}, {}) is not free", row, col);
        self.cells[row * self.size + col] = mark;
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] = CellState::EMPTY;
    }

    pub fn place_scoped(&mut self, position: Move, mark: CellState) -> PlacedMove<'_> {
        PlacedMove::new(self, position, mark)
    }

    pub fn free_cells(&self) -> impl Iterator<Item=Move> + '_ {
        iproduct!(0..self.size, 0..self.size)
            .filter(move |&(row, col)| self.is_free(row, col))
            .map(|(row, col)| Move::new(row, col))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != CellState::EMPTY)
    }

    fn offset(&self, row: usize, col: usize, direction: Direction, distance: usize) -> Option<(usize, usize)> {
        let (d_row, d_col) = direction.delta();
        let row = row as isize + d_row * distance as isize;
        let col = col as isize + d_col * distance as isize;
        let size = self.size as isize;
        if row < 0 || col < 0 || row >= size || col >= size {
            None
        } else {
            Some((row as usize, col as usize))
        }
    }

    pub fn ray(
        &self,
        row: usize,
        col: usize,
        direction: Direction,
        distances: std::ops::Range<usize>,
    ) -> impl Iterator<Item=CellState> + '_ {
        distances
            .filter_map(move |distance| self.offset(row, col, direction, distance))
            .map(move |(row, col)| self.cells[row * self.size + col])
    }

    fn has_run(&self, row: usize, col: usize, direction: Direction, run_length: usize, mark: CellState) -> bool {
        (0..run_length).all(|distance| {
            self.offset(row, col, direction, distance)
                .map_or(false, |(row, col)| self.cells[row * self.size + col] == mark)
        })
    }

    pub fn has_win(&self, run_length: usize, mark: CellState) -> bool {
        self.has_win_scanning(run_length, mark, Direction::iter())
    }

    pub fn has_win_scanning<D>(&self, run_length: usize, mark: CellState, directions: D) -> bool
        where D: IntoIterator<Item=Direction> + Clone
    {
        iproduct!(0..self.size, 0..self.size).any(|(row, col)| {
            directions.clone().into_iter().any(|direction| self.has_run(row, col, direction, run_length, mark))
        })
    }

    pub fn status(&self, run_length: usize) -> BoardStatus {
        if self.has_win(run_length, CellState::from(Player::Max)) {
            BoardStatus::MaxWon
        } else if self.has_win(run_length, CellState::from(Player::Min)) {
            BoardStatus::MinWon
        } else if self.is_full() {
            BoardStatus::Draw
        } else {
            BoardStatus::Ongoing
        }
    }
}

impl Display for GameBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.size.saturating_sub(1).to_string().len();
        write!(f, "{:>width$}", "", width = width)?;
        for col in 0..self.size {
            write!(f, " {:>width$}", col, width = width)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>width$}", row, width = width)?;
            for col in 0..self.size {
                write!(f, " {:>width$}", self.cells[row * self.size + col].symbol(), width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use itertools::iproduct;
    use rand::Rng;

    use super::*;

    pub fn board(rows: &[&str]) -> GameBoard {
        let mut board = GameBoard::new(rows.len());
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), rows.len(), "row {} is not {} wide", row, rows.len());
            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    '.' => {}
                    'X' => board.place(row, col, CellState::X),
                    'O' => board.place(row, col, CellState::O),
                    other => panic!("unknown cell symbol {:?}", other),
                }
            }
        }
        board
    }

    pub fn random_board<R: Rng>(rng: &mut R, size: usize) -> GameBoard {
        let mut board = GameBoard::new(size);
        for (row, col) in iproduct!(0..size, 0..size) {
            match rng.gen_range(0..3) {
                0 => board.place(row, col, CellState::X),
                1 => board.place(row, col, CellState::O),
                _ => {}
            }
        }
        board
    }

    // reachable by alternating play and not yet won, returns the side to move
    pub fn random_position<R: Rng>(rng: &mut R, size: usize, run_length: usize, moves: usize) -> (GameBoard, Player) {
        loop {
            let mut board = GameBoard::new(size);
            let mut side = Player::Min;
            let mut finished = false;
            for _ in 0..moves {
                let free = board.free_cells().collect::<Vec<_>>();
                let position = free[rng.gen_range(0..free.len())];
                board.place(position.row, position.col, CellState::from(side));
                if board.has_win(run_length, CellState::from(side)) {
                    finished = true;
                    break;
                }
                side = !side;
            }
            if !finished {
                return (board, side);
            }
        }
    }
}
