use crate::board::{CellState, GameBoard, Move};
use crate::board::guard::PlacedMove;
use crate::min_max::{Player, Strategy};
use crate::min_max::eval::evaluate;

// player is the maximizing side
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridStrategy {
    pub run_length: usize,
    pub player: CellState,
    pub opponent: CellState,
}

impl GridStrategy {
    pub fn new(run_length: usize, player: CellState, opponent: CellState) -> Self {
        Self { run_length, player, opponent }
    }

    pub fn mark_of(&self, player: Player) -> CellState {
        match player {
            Player::Max => self.player,
            Player::Min => self.opponent,
        }
    }
}

impl Strategy for GridStrategy {
    type State = GameBoard;
    type Move = Move;
    type Placed<'a> = PlacedMove<'a>;

    fn possible_moves(&self, state: &GameBoard) -> Vec<Move> {
        state.free_cells().collect()
    }

    fn has_won(&self, state: &GameBoard, player: Player) -> bool {
        state.has_win(self.run_length, self.mark_of(player))
    }

    fn score(&self, state: &GameBoard) -> i32 {
        evaluate(state, self.player, self.opponent, self.run_length)
    }

    fn do_move<'a>(&self, state: &'a mut GameBoard, min_max_move: Move, player: Player) -> PlacedMove<'a> {
        state.place_scoped(min_max_move, self.mark_of(player))
    }
}
