//! Turn a season projection into a seeded postseason field.
//!
//! Three division winners take seeds 1-3 ordered by projected wins; the
//! three best remaining teams take seeds 4-6 as wild cards. The seeded
//! strength is the projected rating and the record metric is projected
//! wins. Every ordering tie-breaks on team name so seeding can never
//! depend on map iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elo::Projection;

use super::{FieldError, League, LeagueField, Seed, Strength, Team};

/// A division: a named group of team codes within one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub league: League,
    pub teams: Vec<String>,
}

impl Division {
    pub fn new(name: impl Into<String>, league: League, teams: Vec<String>) -> Division {
        Division {
            name: name.into(),
            league,
            teams,
        }
    }
}

/// Errors from deriving a seeded field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeedingError {
    #[error("{league} has {found} divisions, expected {expected}")]
    WrongDivisionCount {
        league: League,
        found: usize,
        expected: usize,
    },

    #[error("division {name} has no teams")]
    EmptyDivision { name: String },

    #[error("no projection entry for {team}")]
    MissingProjection { team: String },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Divisions per league in the modern alignment.
pub const DIVISIONS_PER_LEAGUE: usize = 3;
/// Wild-card berths per league.
pub const WILD_CARDS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    name: String,
    wins: f64,
    rating: f64,
}

/// Sort best-first: projected wins descending, team name ascending on
/// exact ties.
fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.wins
            .partial_cmp(&a.wins)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn candidate(team: &str, projection: &Projection) -> Result<Candidate, SeedingError> {
    let wins = projection
        .wins_for(team)
        .ok_or_else(|| SeedingError::MissingProjection {
            team: team.to_string(),
        })?;
    let rating = projection
        .rating_for(team)
        .ok_or_else(|| SeedingError::MissingProjection {
            team: team.to_string(),
        })?;
    Ok(Candidate {
        name: team.to_string(),
        wins,
        rating,
    })
}

/// Seed one league's postseason field from its divisions and a season
/// projection.
pub fn seed_league(
    league: League,
    divisions: &[Division],
    projection: &Projection,
) -> Result<LeagueField, SeedingError> {
    let league_divisions: Vec<&Division> =
        divisions.iter().filter(|d| d.league == league).collect();
    if league_divisions.len() != DIVISIONS_PER_LEAGUE {
        return Err(SeedingError::WrongDivisionCount {
            league,
            found: league_divisions.len(),
            expected: DIVISIONS_PER_LEAGUE,
        });
    }

    let mut winners: Vec<Candidate> = Vec::with_capacity(DIVISIONS_PER_LEAGUE);
    let mut rest: Vec<Candidate> = Vec::new();
    for division in league_divisions {
        if division.teams.is_empty() {
            return Err(SeedingError::EmptyDivision {
                name: division.name.clone(),
            });
        }
        let mut members: Vec<Candidate> = division
            .teams
            .iter()
            .map(|t| candidate(t, projection))
            .collect::<Result<_, _>>()?;
        rank(&mut members);
        let mut members = members.into_iter();
        winners.push(members.next().expect("division checked non-empty"));
        rest.extend(members);
    }

    rank(&mut winners);
    rank(&mut rest);

    let mut teams = BTreeMap::new();
    for (idx, c) in winners.iter().chain(rest.iter().take(WILD_CARDS)).enumerate() {
        let seed = Seed::new(idx as u8 + 1).expect("index + 1 is non-zero");
        teams.insert(
            seed,
            Team::new(c.name.clone(), Strength::flat(c.rating), c.wins),
        );
    }
    Ok(LeagueField::new(league, teams)?)
}
