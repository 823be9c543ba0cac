//! Elo-based regular-season projection.
//!
//! This is the upstream supplier for the tournament engine: replay a real
//! schedule with randomized game outcomes driven by running Elo ratings,
//! repeat many times, and average each team's final wins and rating. The
//! averages become the strength and record inputs of a seeded field (see
//! [`crate::league::seeding`]).

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::event;

/// Default rating for an unrated team.
pub const DEFAULT_RATING: f64 = 1500.0;

/// Default K-factor: how far one result moves a rating.
pub const K_FACTOR: f64 = 32.0;

/// Expected score of a rating against an opponent, on the standard
/// 400-point logistic curve. Symmetric: the two expectations sum to 1.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

/// Move a rating after one game. `outcome` is 1.0 for a win, 0.0 for a
/// loss.
pub fn bump(rating: f64, k: f64, outcome: f64, expected: f64) -> f64 {
    rating + k * (outcome - expected)
}

/// One game on the schedule. Scores are the real-life results, carried for
/// calibration against the simulated season; the projector itself decides
/// winners from ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub home: String,
    pub away: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Errors from building or running a season projection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("schedule references {team}, which has no preseason rating")]
    UnknownTeam { team: String },

    #[error("a projection needs at least one trial")]
    NoTrials,

    #[error("a projection needs a non-empty schedule")]
    EmptySchedule,
}

/// The outcome of one simulated season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutcome {
    /// Wins per team.
    pub wins: BTreeMap<String, u32>,
    /// Final rating per team.
    pub ratings: BTreeMap<String, f64>,
}

/// Averages over many simulated seasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Mean wins per team.
    pub wins: BTreeMap<String, f64>,
    /// Mean final rating per team.
    pub ratings: BTreeMap<String, f64>,
}

impl Projection {
    pub fn wins_for(&self, team: &str) -> Option<f64> {
        self.wins.get(team).copied()
    }

    pub fn rating_for(&self, team: &str) -> Option<f64> {
        self.ratings.get(team).copied()
    }
}

/// Replays a schedule with Elo-driven randomized outcomes.
#[derive(Debug, Clone)]
pub struct SeasonProjector {
    schedule: Vec<ScheduledGame>,
    preseason: BTreeMap<String, f64>,
    k: f64,
}

impl SeasonProjector {
    /// Build a projector. Every team on the schedule must have a preseason
    /// rating; a missing one is a configuration error, caught here rather
    /// than mid-season.
    pub fn new(
        schedule: Vec<ScheduledGame>,
        preseason: BTreeMap<String, f64>,
    ) -> Result<SeasonProjector, ProjectionError> {
        if schedule.is_empty() {
            return Err(ProjectionError::EmptySchedule);
        }
        for game in &schedule {
            for team in [&game.home, &game.away] {
                if !preseason.contains_key(team) {
                    return Err(ProjectionError::UnknownTeam { team: team.clone() });
                }
            }
        }
        Ok(SeasonProjector {
            schedule,
            preseason,
            k: K_FACTOR,
        })
    }

    /// Override the K-factor.
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn schedule(&self) -> &[ScheduledGame] {
        &self.schedule
    }

    /// Simulate one season.
    ///
    /// Each game is decided by one uniform draw against the home side's
    /// expected score computed from the *running* ratings, and both
    /// ratings move by the K-weighted surprise. Winners' ratings rise,
    /// losers' fall, and the two moves cancel.
    pub fn simulate_season<R: Rng>(&self, rng: &mut R) -> SeasonOutcome {
        let mut ratings = self.preseason.clone();
        let mut wins: BTreeMap<String, u32> =
            self.preseason.keys().map(|t| (t.clone(), 0)).collect();

        for game in &self.schedule {
            let home_rating = ratings[&game.home];
            let away_rating = ratings[&game.away];
            let home_expected = expected_score(home_rating, away_rating);
            let away_expected = expected_score(away_rating, home_rating);

            let r: f64 = rng.random();
            let home_won = r <= home_expected;

            let (home_outcome, away_outcome) = if home_won { (1.0, 0.0) } else { (0.0, 1.0) };
            let winner = if home_won { &game.home } else { &game.away };
            *wins.get_mut(winner).expect("teams validated at build") += 1;

            let new_home = bump(home_rating, self.k, home_outcome, home_expected);
            let new_away = bump(away_rating, self.k, away_outcome, away_expected);
            ratings.insert(game.home.clone(), new_home);
            ratings.insert(game.away.clone(), new_away);
        }

        SeasonOutcome { wins, ratings }
    }

    /// Simulate `trials` independent seasons and average wins and final
    /// ratings per team.
    pub fn project<R: Rng>(
        &self,
        rng: &mut R,
        trials: usize,
    ) -> Result<Projection, ProjectionError> {
        if trials == 0 {
            return Err(ProjectionError::NoTrials);
        }
        event!(
            tracing::Level::INFO,
            trials,
            games = self.schedule.len(),
            teams = self.preseason.len(),
            "projecting regular season"
        );

        let mut win_sums: BTreeMap<String, f64> =
            self.preseason.keys().map(|t| (t.clone(), 0.0)).collect();
        let mut rating_sums = win_sums.clone();

        for _ in 0..trials {
            let outcome = self.simulate_season(rng);
            for (team, w) in &outcome.wins {
                *win_sums.get_mut(team).expect("same key set") += f64::from(*w);
            }
            for (team, r) in &outcome.ratings {
                *rating_sums.get_mut(team).expect("same key set") += r;
            }
        }

        let n = trials as f64;
        Ok(Projection {
            wins: win_sums.into_iter().map(|(t, s)| (t, s / n)).collect(),
            ratings: rating_sums.into_iter().map(|(t, s)| (t, s / n)).collect(),
        })
    }
}
