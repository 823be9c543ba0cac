use serde::{Deserialize, Serialize};

use crate::sim::bracket::RoundFormats;

use super::error::{Result, TournamentError};

/// Configuration for a tournament run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Number of independent postseason trials.
    pub trials: usize,
    /// Host strength credit per game, as a percent of the combined
    /// strength in that game.
    pub home_advantage_pct: f64,
    /// Series format per round.
    pub formats: RoundFormats,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            trials: 1_000_000,
            home_advantage_pct: 5.0,
            formats: RoundFormats::default(),
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration before any trial runs.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(TournamentError::ValidationError(
                "trials must be greater than 0".to_string(),
            ));
        }
        if !self.home_advantage_pct.is_finite() {
            return Err(TournamentError::ValidationError(format!(
                "home_advantage_pct must be finite, got {}",
                self.home_advantage_pct
            )));
        }
        if self.home_advantage_pct < 0.0 {
            return Err(TournamentError::ValidationError(format!(
                "home_advantage_pct must be non-negative, got {}",
                self.home_advantage_pct
            )));
        }
        Ok(())
    }
}
