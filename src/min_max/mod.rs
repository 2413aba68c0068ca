pub mod eval;
pub mod stats;

use std::ops::{DerefMut, Not};
use std::time::{Duration, Instant};

use crate::min_max::stats::Stats;

pub const WIN_BASE: i32 = 1000;
pub const INFINITY: i32 = i32::MAX;
// full board without a run
pub const DRAW_SCORE: i32 = 0;

#[derive(Eq, PartialEq, Hash)]
#[derive(Debug, Copy, Clone)]
pub enum Player {
    Min,
    Max,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::Min => Player::Max,
            Player::Max => Player::Min,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ScoredMove<M> {
    pub score: i32,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: i32, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

// absolute cut-off, shared by every node of one search
#[derive(Debug, Copy, Clone)]
pub struct Deadline {
    start: Instant,
    at: Instant,
}

impl Deadline {
    pub fn new(start: Instant, budget: Duration) -> Self {
        Self { start, at: start + budget }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() > self.at
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

pub trait Strategy {
    type State;
    type Move: Copy;
    // the move stays on the state until this is dropped
    type Placed<'a>: DerefMut<Target=Self::State> where Self::State: 'a;

    fn possible_moves(&self, state: &Self::State) -> Vec<Self::Move>;
    fn has_won(&self, state: &Self::State, player: Player) -> bool;
    fn score(&self, state: &Self::State) -> i32;
    fn do_move<'a>(&self, state: &'a mut Self::State, min_max_move: Self::Move, player: Player) -> Self::Placed<'a>;
}

pub fn alpha_beta<STRATEGY: Strategy, S: Stats>(
    strategy: &STRATEGY,
    state: &mut STRATEGY::State,
    player: Player,
    remaining_levels: u8,
    mut alpha: i32,
    mut beta: i32,
    deadline: &Deadline,
    stats: &mut S,
) -> i32 {
    stats.record_node();
    // Max is checked first, a double win counts for Max
    if strategy.has_won(state, Player::Max) {
        stats.record_terminal();
        return WIN_BASE - i32::from(remaining_levels);
    }
    if strategy.has_won(state, Player::Min) {
        stats.record_terminal();
        return -WIN_BASE + i32::from(remaining_levels);
    }
    if remaining_levels == 0 || deadline.is_expired() {
        if remaining_levels != 0 {
            stats.record_deadline_cutoff();
        }
        stats.record_state_scored();
        return strategy.score(state);
    }

    let moves = strategy.possible_moves(state);
    if moves.is_empty() {
        stats.record_terminal();
        return DRAW_SCORE;
    }
    let mut best_score = match player {
        Player::Max => -INFINITY,
        Player::Min => INFINITY,
    };
    for m in moves {
        let score = {
            let mut placed = strategy.do_move(state, m, player);
            alpha_beta(strategy, &mut *placed, !player, remaining_levels - 1, alpha, beta, deadline, stats)
        };
        match player {
            Player::Max => {
                best_score = best_score.max(score);
                alpha = alpha.max(score);
            }
            Player::Min => {
                best_score = best_score.min(score);
                beta = beta.min(score);
            }
        }
        if beta <= alpha {
            stats.record_prune();
            return best_score;
        }
    }
    best_score
}
