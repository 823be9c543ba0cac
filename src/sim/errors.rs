use thiserror::Error;

use crate::league::{League, Seed};

/// Errors raised while simulating games, series, or brackets.
///
/// Every variant is a hard failure: a trial that hits one of these is
/// aborted and the error surfaced, never recorded as a champion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// The win-ratio denominator would be zero or negative.
    #[error("combined strength must be positive, got home {home} + away {away}")]
    InvalidStrength { home: f64, away: f64 },

    /// A stage referenced a seed the bracket does not hold.
    #[error("{league} bracket has no live seed {seed}")]
    MissingSeed { league: League, seed: Seed },

    /// A pairing expected exactly one of two seeds to have survived the
    /// previous round.
    #[error("{league} bracket expected exactly one of seeds {a}/{b} alive, found {found}")]
    UnresolvedPairing {
        league: League,
        a: Seed,
        b: Seed,
        found: usize,
    },

    /// A stage expected a specific number of remaining teams.
    #[error("{league} bracket expected {expected} remaining teams, found {found}")]
    WrongSurvivorCount {
        league: League,
        expected: usize,
        found: usize,
    },

    /// A series ran its maximum games without either side clinching. This
    /// cannot happen for a well-formed best-of-N format.
    #[error("series reached {games} games without a clinch")]
    SeriesNotDecided { games: usize },
}
