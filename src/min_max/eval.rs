use strum::IntoEnumIterator;

use crate::board::{CellState, Direction, GameBoard};

pub fn evaluate(board: &GameBoard, player: CellState, opponent: CellState, run_length: usize) -> i32 {
    let mut score = 0;
    for position in board.free_cells() {
        for direction in Direction::iter() {
            let (own, other) = board.ray(position.row, position.col, direction, 1..run_length)
                .fold((0, 0), |(own, other), cell| {
                    if cell == player {
                        (own + 1, other)
                    } else if cell == opponent {
                        (own, other + 1)
                    } else {
                        (own, other)
                    }
                });
            if other == 0 {
                score += own * own;
            }
            if own == 0 {
                score -= other * other;
            }
        }
    }
    score
}
