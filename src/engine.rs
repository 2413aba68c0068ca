use std::time::{Duration, Instant};

use log::{debug, info};

use crate::board::{CellState, GameBoard, Move};
use crate::board::strategy::GridStrategy;
use crate::config::EngineConfig;
use crate::min_max::{alpha_beta, Deadline, INFINITY, Player, ScoredMove};
use crate::min_max::stats::SimpleStats;

pub fn find_winning_move(board: &mut GameBoard, run_length: usize, mark: CellState) -> Option<Move> {
    let candidates = board.free_cells().collect::<Vec<_>>();
    candidates.into_iter()
        .find(|&position| board.place_scoped(position, mark).has_win(run_length, mark))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Reason {
    Win,
    Block,
    Search { score: i32 },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveChoice {
    pub position: Move,
    pub reason: Reason,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    mark: CellState,
    opponent: CellState,
    pub stats: SimpleStats,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            mark: CellState::from(Player::Max),
            opponent: CellState::from(Player::Min),
            stats: SimpleStats::default(),
        }
    }

    pub fn choose_move_explained(&mut self, board: &mut GameBoard, run_length: usize) -> Option<MoveChoice> {
        let deadline = Deadline::new(Instant::now(), self.config.time_limit);
        self.stats = SimpleStats::default();

        if let Some(position) = find_winning_move(board, run_length, self.mark) {
            info!("winning move {} found in {}ms", position, deadline.elapsed().as_millis());
            return Some(MoveChoice { position, reason: Reason::Win, elapsed: deadline.elapsed() });
        }
        if let Some(position) = find_winning_move(board, run_length, self.opponent) {
            info!("blocking move {} found in {}ms", position, deadline.elapsed().as_millis());
            return Some(MoveChoice { position, reason: Reason::Block, elapsed: deadline.elapsed() });
        }

        let strategy = GridStrategy::new(run_length, self.mark, self.opponent);
        let mut best: Option<ScoredMove<Move>> = None;
        for position in board.free_cells().collect::<Vec<_>>() {
            let score = {
                let mut placed = board.place_scoped(position, self.mark);
                alpha_beta(
                    &strategy,
                    &mut *placed,
                    Player::Min,
                    self.config.depth,
                    -INFINITY,
                    INFINITY,
                    &deadline,
                    &mut self.stats,
                )
            };
            debug!("candidate {} scored {}", position, score);
            if best.as_ref().map_or(true, |best| score > best.score) {
                best = Some(ScoredMove::new(score, position));
            }
        }

        let best = best?;
        let elapsed = deadline.elapsed();
        info!("search chose {} with score {} in {}ms", best.min_max_move, best.score, elapsed.as_millis());
        debug!(
            "searched {} nodes: {} decided, {} scored, {} pruned, {} cut by the deadline",
            self.stats.node_count,
            self.stats.terminal_count,
            self.stats.state_scored_count,
            self.stats.prune_count,
            self.stats.deadline_cutoff_count,
        );
        Some(MoveChoice {
            position: best.min_max_move,
            reason: Reason::Search { score: best.score },
            elapsed,
        })
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::board::CellState::{O, X};
    use crate::board::{GameBoard, Move};
    use crate::board::fixtures::{board, random_board, random_position};
    use crate::config::EngineConfig;
    use crate::engine::{find_winning_move, Engine, Reason};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    #[test]
    fn finds_first_winning_cell() {
        let mut board = board(&["XX.", "...", "X.."]);
        // (0,2) completes the row before (1,0) completes the column
        assert_eq!(find_winning_move(&mut board, 3, X), Some(Move::new(0, 2)));
        assert_eq!(find_winning_move(&mut board, 3, O), None);
    }

    #[test]
    fn winning_move_search_leaves_board_untouched() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let mut board = random_board(&mut rng, 5);
            let before = board.clone();
            let run_length = rng.gen_range(2..=5);
            find_winning_move(&mut board, run_length, X);
            find_winning_move(&mut board, run_length, O);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn takes_immediate_win() {
        let mut board = board(&["OO.", "...", "X.X"]);
        let choice = engine().choose_move_explained(&mut board, 3).unwrap();
        assert_eq!(choice.position, Move::new(0, 2));
        assert_eq!(choice.reason, Reason::Win);
    }

    #[test]
    fn win_before_block() {
        let mut board = board(&["XX.", "OO.", "X.."]);
        let choice = engine().choose_move_explained(&mut board, 3).unwrap();
        assert_eq!(choice.position, Move::new(1, 2));
        assert_eq!(choice.reason, Reason::Win);
    }

    #[test]
    fn blocks_immediate_loss() {
        let mut board = board(&["XX.", ".O.", "..."]);
        let choice = engine().choose_move_explained(&mut board, 3).unwrap();
        assert_eq!(choice.position, Move::new(0, 2));
        assert_eq!(choice.reason, Reason::Block);
    }

    #[test]
    fn last_free_cell() {
        let mut board = board(&["XOX", "XOO", "OX."]);
        let choice = engine().choose_move_explained(&mut board, 3).unwrap();
        assert_eq!(choice.position, Move::new(2, 2));
        assert_eq!(choice.reason, Reason::Search { score: 0 });
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = board(&["XOX", "XOO", "OXX"]);
        assert_eq!(engine().choose_move_explained(&mut board, 3), None);
    }

    #[test]
    fn searched_move_is_free_and_board_restored() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut engine = Engine::new(EngineConfig { depth: 2, time_limit: Duration::from_millis(200) });
        for _ in 0..10 {
            let (mut board, _) = random_position(&mut rng, 5, 4, 6);
            let before = board.clone();
            let position = engine.choose_move_explained(&mut board, 4).unwrap().position;
            assert!(board.is_free(position.row, position.col));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn opens_on_empty_board() {
        let mut board = GameBoard::new(3);
        let mut engine = engine();
        let choice = engine.choose_move_explained(&mut board, 3).unwrap();
        assert!(matches!(choice.reason, Reason::Search { .. }));
        assert!(engine.stats.node_count > 0);
        assert!(board.free_cells().count() == 9);
    }

    #[test]
    fn zero_time_limit_still_moves() {
        let mut board = GameBoard::new(7);
        board.place(3, 3, X);
        let mut engine = Engine::new(EngineConfig { depth: 4, time_limit: Duration::ZERO });
        let choice = engine.choose_move_explained(&mut board, 4).unwrap();
        assert!(board.is_free(choice.position.row, choice.position.col));
        assert!(choice.elapsed < Duration::from_millis(500));
    }

    #[test]
    fn elapsed_is_reported() {
        let mut board = board(&["OO.", "...", "X.X"]);
        let choice = engine().choose_move_explained(&mut board, 3).unwrap();
        assert!(choice.elapsed <= Duration::from_millis(1000));

        let mut board = GameBoard::new(4);
        let config = EngineConfig { depth: 3, time_limit: Duration::from_millis(300) };
        let choice = Engine::new(config).choose_move_explained(&mut board, 3).unwrap();
        assert!(choice.elapsed < config.time_limit + Duration::from_millis(500));
    }
}
