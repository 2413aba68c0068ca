use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEPTH_ENV: &str = "NROW_DEPTH";
pub const TIME_LIMIT_ENV: &str = "NROW_TIME_LIMIT_MS";

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("run length must be between 1 and {size}, got {run_length}")]
    InvalidRunLength { size: usize, run_length: usize },
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidEnv { name: &'static str, value: String, reason: String },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub run_length: usize,
}

impl GameConfig {
    pub fn new(size: usize, run_length: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidSize(size));
        }
        if run_length == 0 || run_length > size {
            return Err(ConfigError::InvalidRunLength { size, run_length });
        }
        Ok(Self { size, run_length })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EngineConfig {
    pub depth: u8,
    pub time_limit: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            time_limit: Duration::from_millis(1000),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&'static str) -> Option<String>
    {
        let mut config = Self::default();
        if let Some(depth) = parse_var::<u8, _>(&lookup, DEPTH_ENV)? {
            config.depth = depth;
        }
        if let Some(millis) = parse_var::<u64, _>(&lookup, TIME_LIMIT_ENV)? {
            config.time_limit = Duration::from_millis(millis);
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
    where T: FromStr,
          T::Err: ToString,
          F: Fn(&'static str) -> Option<String>
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidEnv { name, reason: err.to_string(), value }),
    }
}
