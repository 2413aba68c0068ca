mod board;
mod config;
mod engine;
mod game;
mod min_max;

use std::io;

use anyhow::{bail, Context, Result};

use crate::config::{EngineConfig, GameConfig};
use crate::game::{prompt_game_config, Game, Outcome};

fn parse_args<I: Iterator<Item=String>>(mut args: I) -> Result<Option<GameConfig>> {
    let (size, run_length) = match (args.next(), args.next()) {
        (None, _) => return Ok(None),
        (Some(size), Some(run_length)) => (size, run_length),
        (Some(_), None) => bail!("usage: n-in-a-row [<size> <run_length>]"),
    };
    let size = size.parse().with_context(|| format!("invalid grid size {:?}", size))?;
    let run_length = run_length.parse().with_context(|| format!("invalid run length {:?}", run_length))?;
    Ok(Some(GameConfig::new(size, run_length)?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let engine_config = EngineConfig::from_env()?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let game_config = match parse_args(std::env::args().skip(1))? {
        Some(config) => config,
        None => prompt_game_config(&mut input, &mut output)?,
    };
    log::debug!("starting {:?} with {:?}", game_config, engine_config);

    match Game::new(game_config, engine_config, input, output).play()? {
        Outcome::Won(player) => log::info!("game over, {:?} won", player),
        Outcome::Draw => log::info!("game over, draw"),
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::config::GameConfig;
    use crate::parse_args;

    fn args(values: &[&str]) -> impl Iterator<Item=String> {
        values.iter().map(|value| value.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn dimensions_from_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), None);
        assert_eq!(parse_args(args(&["5", "4"])).unwrap(), Some(GameConfig { size: 5, run_length: 4 }));
        assert!(parse_args(args(&["5"])).is_err());
        assert!(parse_args(args(&["five", "4"])).is_err());
        assert!(parse_args(args(&["3", "4"])).is_err());
    }
}
