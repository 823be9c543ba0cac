//! The shared, read-only data model for a postseason: leagues, seeds,
//! strength ratings, and the seeded field each league brings into the
//! tournament.
//!
//! Everything in this module is immutable once a simulation run starts.
//! Per-trial mutable state (which seeds are still alive) lives in
//! [`crate::sim::bracket`] so that no trial can leak eliminations into the
//! next one.

pub mod seeding;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two leagues. Each runs its own bracket until the world series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum League {
    American,
    National,
}

impl League {
    /// Both leagues, in a fixed order.
    pub const BOTH: [League; 2] = [League::American, League::National];

    pub fn abbrev(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            League::American => write!(f, "American League"),
            League::National => write!(f, "National League"),
        }
    }
}

/// A team's rank within its league for one tournament. Seed 1 is the best
/// record; pairings and home field are derived from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Seed(u8);

impl Seed {
    /// Create a seed. Seeds are 1-based; zero is not a seed.
    pub const fn new(rank: u8) -> Option<Seed> {
        if rank == 0 { None } else { Some(Seed(rank)) }
    }

    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from validating a strength rating.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrengthError {
    #[error("a strength rotation needs at least one value")]
    Empty,

    #[error("strength values must be non-negative, got {0}")]
    Negative(f64),

    #[error("strength values must be finite, got {0}")]
    NonFinite(f64),
}

/// A team's strength rating: one value per game slot, cycled by game index
/// within a series.
///
/// A single flat value is the common case (e.g. a projected Elo rating). A
/// multi-value rotation models a pitching staff, where game 1 of a series is
/// started by the ace, game 2 by the second starter, and so on, wrapping
/// around once the rotation is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strength {
    values: Vec<f64>,
}

impl Strength {
    /// A strength that is the same for every game.
    pub fn flat(value: f64) -> Strength {
        Strength {
            values: vec![value],
        }
    }

    /// A strength that rotates through `values` by game index.
    pub fn rotation(values: Vec<f64>) -> Strength {
        Strength { values }
    }

    /// The strength in effect for the given 0-based game index.
    pub fn for_game(&self, game_idx: usize) -> f64 {
        self.values[game_idx % self.values.len()]
    }

    /// Check that the rotation is non-empty and every value is a
    /// non-negative finite number.
    pub fn validate(&self) -> Result<(), StrengthError> {
        if self.values.is_empty() {
            return Err(StrengthError::Empty);
        }
        for &v in &self.values {
            if !v.is_finite() {
                return Err(StrengthError::NonFinite(v));
            }
            if v < 0.0 {
                return Err(StrengthError::Negative(v));
            }
        }
        Ok(())
    }
}

/// One tournament entrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Display name or team code.
    pub name: String,
    /// Per-game strength rating, consumed by the matchup model.
    pub strength: Strength,
    /// Regular-season record metric (e.g. projected wins). Only used to
    /// award world-series home field; never re-derived from strength.
    pub record_wins: f64,
}

impl Team {
    pub fn new(name: impl Into<String>, strength: Strength, record_wins: f64) -> Team {
        Team {
            name: name.into(),
            strength,
            record_wins,
        }
    }
}

/// A copyable reference to one entrant: its league and seed. Champion
/// tallies are keyed by this rather than by name so that a trial result is
/// a trivially cheap token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TeamRef {
    pub league: League,
    pub seed: Seed,
}

impl TeamRef {
    pub fn new(league: League, seed: Seed) -> TeamRef {
        TeamRef { league, seed }
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} No. {}", self.league.abbrev(), self.seed)
    }
}

/// Errors from constructing a [`LeagueField`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("{league} field has {found} teams, needs at least {min}")]
    TooFewTeams {
        league: League,
        found: usize,
        min: usize,
    },

    #[error("{league} field has {found} teams, supports at most {max}")]
    TooManyTeams {
        league: League,
        found: usize,
        max: usize,
    },

    #[error("{league} field is missing seed {seed}; seeds must be 1..={count}")]
    MissingSeed {
        league: League,
        seed: Seed,
        count: usize,
    },

    #[error("invalid strength for {team}: {source}")]
    InvalidStrength {
        team: String,
        source: StrengthError,
    },

    #[error("record metric for {team} must be finite, got {value}")]
    NonFiniteRecord { team: String, value: f64 },
}

/// The smallest field the bracket supports: seeds 1 and 2 plus at least one
/// wild-card pairing member.
pub const MIN_FIELD: usize = 4;
/// The full modern field: three division winners and three wild cards.
pub const MAX_FIELD: usize = 6;

/// The seeded entrants of one league, validated on construction and shared
/// read-only across every trial.
///
/// Seeds must be exactly `1..=n` for `4 <= n <= 6`. Fields smaller than six
/// leave wild-card pairings partnerless; the bracket engine treats those
/// seeds as byes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueField {
    league: League,
    teams: BTreeMap<Seed, Team>,
}

impl LeagueField {
    pub fn new(league: League, teams: BTreeMap<Seed, Team>) -> Result<LeagueField, FieldError> {
        let count = teams.len();
        if count < MIN_FIELD {
            return Err(FieldError::TooFewTeams {
                league,
                found: count,
                min: MIN_FIELD,
            });
        }
        if count > MAX_FIELD {
            return Err(FieldError::TooManyTeams {
                league,
                found: count,
                max: MAX_FIELD,
            });
        }
        for rank in 1..=count as u8 {
            let seed = Seed::new(rank).expect("rank is non-zero");
            if !teams.contains_key(&seed) {
                return Err(FieldError::MissingSeed {
                    league,
                    seed,
                    count,
                });
            }
        }
        for team in teams.values() {
            team.strength
                .validate()
                .map_err(|source| FieldError::InvalidStrength {
                    team: team.name.clone(),
                    source,
                })?;
            if !team.record_wins.is_finite() {
                return Err(FieldError::NonFiniteRecord {
                    team: team.name.clone(),
                    value: team.record_wins,
                });
            }
        }
        Ok(LeagueField { league, teams })
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team(&self, seed: Seed) -> Option<&Team> {
        self.teams.get(&seed)
    }

    /// Seeds in ascending order.
    pub fn seeds(&self) -> impl Iterator<Item = Seed> + '_ {
        self.teams.keys().copied()
    }

    /// `(seed, team)` pairs in ascending seed order.
    pub fn entries(&self) -> impl Iterator<Item = (Seed, &Team)> {
        self.teams.iter().map(|(s, t)| (*s, t))
    }
}

/// Convenience for building a field from `(name, strength, record)` rows
/// already ordered best-to-worst; row `i` becomes seed `i + 1`.
pub fn field_from_ranked(
    league: League,
    ranked: Vec<(String, Strength, f64)>,
) -> Result<LeagueField, FieldError> {
    let teams = ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (name, strength, record))| {
            let seed = Seed::new(idx as u8 + 1).expect("index + 1 is non-zero");
            (seed, Team::new(name, strength, record))
        })
        .collect();
    LeagueField::new(league, teams)
}
