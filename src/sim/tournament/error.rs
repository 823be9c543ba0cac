use thiserror::Error;

use crate::league::{FieldError, League};
use crate::sim::errors::SimulationError;

/// Errors that can occur while configuring or running a tournament.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("no {0} field configured; both leagues are required")]
    MissingLeague(League),

    #[error("configuration validation error: {0}")]
    ValidationError(String),

    #[error("invalid league field: {0}")]
    Field(#[from] FieldError),

    #[error("trial {trial} failed: {source}")]
    TrialFailed {
        trial: usize,
        #[source]
        source: SimulationError,
    },

    #[error("failed to serialize results: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

/// Result type for tournament operations.
pub type Result<T> = std::result::Result<T, TournamentError>;
