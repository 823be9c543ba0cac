//! End-to-end season pipeline: project the regular season, seed the
//! postseason fields, and simulate the tournament.
//!
//! Each stage is also usable on its own; this module just wires the
//! default path together for callers that start from a schedule and
//! preseason ratings.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::event;

use crate::elo::{Projection, ProjectionError, ScheduledGame, SeasonProjector};
use crate::league::seeding::{Division, SeedingError, seed_league};
use crate::league::{League, LeagueField};
use crate::sim::tournament::{TournamentBuilder, TournamentError, TournamentResult};

/// Errors from any stage of the full pipeline.
#[derive(Debug, Error)]
pub enum FullSeasonError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Seeding(#[from] SeedingError),

    #[error(transparent)]
    Tournament(#[from] TournamentError),
}

/// A full season: a real schedule, preseason ratings, and the division
/// alignment, ready to be projected and played out.
#[derive(Debug, Clone)]
pub struct FullSeason {
    schedule: Vec<ScheduledGame>,
    preseason: BTreeMap<String, f64>,
    divisions: Vec<Division>,
}

impl FullSeason {
    pub fn new(
        schedule: Vec<ScheduledGame>,
        preseason: BTreeMap<String, f64>,
        divisions: Vec<Division>,
    ) -> FullSeason {
        FullSeason {
            schedule,
            preseason,
            divisions,
        }
    }

    /// Project the regular season: average wins and ratings over
    /// `trials` simulated seasons.
    pub fn project_regular_season(
        &self,
        trials: usize,
        seed: u64,
    ) -> Result<Projection, FullSeasonError> {
        let projector = SeasonProjector::new(self.schedule.clone(), self.preseason.clone())?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(projector.project(&mut rng, trials)?)
    }

    /// Seed both postseason fields from a projection.
    pub fn seed_postseason(
        &self,
        projection: &Projection,
    ) -> Result<(LeagueField, LeagueField), FullSeasonError> {
        let american = seed_league(League::American, &self.divisions, projection)?;
        let national = seed_league(League::National, &self.divisions, projection)?;
        Ok((american, national))
    }

    /// Run the whole pipeline: project, seed, simulate.
    ///
    /// The season projection and the tournament use seeds derived from
    /// `seed` so the two stages draw from independent streams while the
    /// whole run stays reproducible.
    pub fn simulate(
        &self,
        season_trials: usize,
        playoff_trials: usize,
        seed: u64,
    ) -> Result<TournamentResult, FullSeasonError> {
        event!(
            tracing::Level::INFO,
            season_trials,
            playoff_trials,
            "running full season pipeline"
        );
        let projection = self.project_regular_season(season_trials, seed)?;
        let (american, national) = self.seed_postseason(&projection)?;
        let result = TournamentBuilder::new()
            .field(american)
            .field(national)
            .trials(playoff_trials)
            .seed(seed.wrapping_add(1))
            .build()?
            .run()?;
        Ok(result)
    }
}
