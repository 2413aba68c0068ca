use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::board::{BoardStatus, CellState, GameBoard, Move};
use crate::config::{EngineConfig, GameConfig};
use crate::engine::Engine;
use crate::min_max::Player;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Won(Player),
    Draw,
}

pub struct Game<R, W> {
    config: GameConfig,
    board: GameBoard,
    engine: Engine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(config: GameConfig, engine_config: EngineConfig, input: R, output: W) -> Self {
        Self {
            config,
            board: GameBoard::new(config.size),
            engine: Engine::new(engine_config),
            input,
            output,
        }
    }

    pub fn play(&mut self) -> Result<Outcome> {
        let mut side = Player::Min;
        loop {
            write!(self.output, "{}", self.board)?;
            let mark = CellState::from(side);
            let position = match side {
                Player::Min => self.read_human_move()?,
                Player::Max => {
                    let choice = self.engine.choose_move_explained(&mut self.board, self.config.run_length)
                        .context("engine found no free cell")?;
                    debug!("engine picked {} ({:?}) after {}ms", choice.position, choice.reason, choice.elapsed.as_millis());
                    choice.position
                }
            };
            self.board.place(position.row, position.col, mark);
            info!("{} played {}", mark.symbol(), position);
            let outcome = match self.board.status(self.config.run_length) {
                BoardStatus::MaxWon => Outcome::Won(Player::Max),
                BoardStatus::MinWon => Outcome::Won(Player::Min),
                BoardStatus::Draw => Outcome::Draw,
                BoardStatus::Ongoing => {
                    side = !side;
                    continue;
                }
            };
            write!(self.output, "{}", self.board)?;
            match outcome {
                Outcome::Won(winner) => writeln!(self.output, "Player '{}' wins!", CellState::from(winner).symbol())?,
                Outcome::Draw => writeln!(self.output, "Draw! Nobody aligned {} marks.", self.config.run_length)?,
            }
            return Ok(outcome);
        }
    }

    fn read_human_move(&mut self) -> Result<Move> {
        let last = self.config.size - 1;
        loop {
            let row = prompt_number(&mut self.input, &mut self.output, &format!("Row (0-{}): ", last))?;
            let col = prompt_number(&mut self.input, &mut self.output, &format!("Column (0-{}): ", last))?;
            match (row, col) {
                (Some(row), Some(col)) if self.board.is_free(row, col) => return Ok(Move::new(row, col)),
                _ => writeln!(self.output, "That cell is not available, try again.")?,
            }
        }
    }
}

fn prompt_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<usize>> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input ended while waiting for a move");
    }
    Ok(line.trim().parse().ok())
}

pub fn prompt_game_config<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<GameConfig> {
    loop {
        let size = prompt_number(input, output, "Grid size: ")?;
        let run_length = prompt_number(input, output, "Marks in a row to win: ")?;
        match (size, run_length) {
            (Some(size), Some(run_length)) => match GameConfig::new(size, run_length) {
                Ok(config) => return Ok(config),
                Err(err) => writeln!(output, "{}", err)?,
            },
            _ => writeln!(output, "Please enter whole numbers.")?,
        }
    }
}
