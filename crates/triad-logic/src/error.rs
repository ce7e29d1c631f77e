//! Tournament error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TournamentError>;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("unknown strategy index {index} (roster has {roster_len} entries)")]
    UnknownStrategy { index: usize, roster_len: usize },

    #[error("unknown strategy name: {0}")]
    UnknownStrategyName(String),

    #[error("invalid round range: min {min}, max {max} (need 1 <= min <= max)")]
    InvalidRoundConfig { min: u32, max: u32 },

    #[error("invalid tournament config: {0}")]
    Config(#[from] serde_json::Error),
}
