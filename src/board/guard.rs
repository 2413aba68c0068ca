use std::ops::{Deref, DerefMut};

use crate::board::{CellState, GameBoard, Move};

#[derive(Debug)]
pub struct PlacedMove<'a> {
    board: &'a mut GameBoard,
    position: Move,
}

impl<'a> PlacedMove<'a> {
    pub fn new(board: &'a mut GameBoard, position: Move, mark: CellState) -> Self {
        board.place(position.row, position.col, mark);
        Self { board, position }
    }
}

impl Deref for PlacedMove<'_> {
    type Target = GameBoard;

    fn deref(&self) -> &GameBoard {
        self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut GameBoard {
        self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        self.board.clear(self.position.row, self.position.col);
    }
}
