//! The postseason bracket: wild card, division series, league
//! championship, world series.
//!
//! The seeded fields are immutable and shared across trials; all per-trial
//! state lives in a [`LiveBracket`], which is just an "alive" seed set over
//! a field. Elimination removes a seed from the set and nothing else, so
//! running a trial can never corrupt the inputs of the next one.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::event;

use crate::league::{League, LeagueField, Seed, TeamRef};

use super::errors::SimulationError;
use super::series::{SeriesFormat, SeriesSide, run_series};

/// Series format per round. Defaults to the modern postseason shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFormats {
    pub wild_card: SeriesFormat,
    pub division: SeriesFormat,
    pub championship: SeriesFormat,
    pub world_series: SeriesFormat,
}

impl Default for RoundFormats {
    fn default() -> Self {
        RoundFormats {
            wild_card: SeriesFormat::BestOf3,
            division: SeriesFormat::BestOf5,
            championship: SeriesFormat::BestOf7,
            world_series: SeriesFormat::BestOf7,
        }
    }
}

/// Per-trial bracket state for one league: the shared field plus the set of
/// seeds still alive.
#[derive(Debug, Clone)]
pub struct LiveBracket<'a> {
    field: &'a LeagueField,
    active: BTreeSet<Seed>,
}

impl<'a> LiveBracket<'a> {
    /// A fresh bracket with every seeded team alive.
    pub fn new(field: &'a LeagueField) -> LiveBracket<'a> {
        LiveBracket {
            field,
            active: field.seeds().collect(),
        }
    }

    pub fn league(&self) -> League {
        self.field.league()
    }

    pub fn is_alive(&self, seed: Seed) -> bool {
        self.active.contains(&seed)
    }

    pub fn remaining(&self) -> usize {
        self.active.len()
    }

    fn eliminate(&mut self, seed: Seed) {
        self.active.remove(&seed);
    }

    /// The series side for a live seed.
    fn side(&self, seed: Seed) -> Result<SeriesSide<'a>, SimulationError> {
        let team = self
            .field
            .team(seed)
            .filter(|_| self.is_alive(seed))
            .ok_or(SimulationError::MissingSeed {
                league: self.league(),
                seed,
            })?;
        Ok(SeriesSide {
            team: TeamRef::new(self.league(), seed),
            strength: &team.strength,
        })
    }

    /// Exactly one of `a`/`b` must have survived the previous round; which
    /// one decides the pairing for this round.
    fn survivor_of(&self, a: Seed, b: Seed) -> Result<Seed, SimulationError> {
        match (self.is_alive(a), self.is_alive(b)) {
            (true, false) => Ok(a),
            (false, true) => Ok(b),
            (alive_a, alive_b) => Err(SimulationError::UnresolvedPairing {
                league: self.league(),
                a,
                b,
                found: usize::from(alive_a) + usize::from(alive_b),
            }),
        }
    }

    /// The single remaining seed.
    fn survivor(&self) -> Result<Seed, SimulationError> {
        let mut it = self.active.iter();
        match (it.next(), it.next()) {
            (Some(&seed), None) => Ok(seed),
            _ => Err(SimulationError::WrongSurvivorCount {
                league: self.league(),
                expected: 1,
                found: self.remaining(),
            }),
        }
    }
}

const fn seed(rank: u8) -> Seed {
    match Seed::new(rank) {
        Some(s) => s,
        None => panic!("seed rank must be non-zero"),
    }
}

/// Wild-card pairings: better seed first, so it is the designated home side.
const WILD_CARD_PAIRS: [(Seed, Seed); 2] = [(seed(3), seed(6)), (seed(4), seed(5))];

/// Play one series between two live seeds and eliminate the loser. The
/// lower-numbered (better) seed is the designated home side.
fn play_round_series<R: Rng>(
    rng: &mut R,
    bracket: &mut LiveBracket<'_>,
    format: SeriesFormat,
    a: Seed,
    b: Seed,
    home_advantage_pct: f64,
) -> Result<(), SimulationError> {
    let (home_seed, away_seed) = if a < b { (a, b) } else { (b, a) };
    let outcome = run_series(
        rng,
        format,
        bracket.side(home_seed)?,
        bracket.side(away_seed)?,
        home_advantage_pct,
    )?;
    event!(
        tracing::Level::TRACE,
        league = %bracket.league().abbrev(),
        home = %home_seed,
        away = %away_seed,
        eliminated = %outcome.eliminated.seed,
        games = outcome.games_played(),
        "series resolved"
    );
    bracket.eliminate(outcome.eliminated.seed);
    Ok(())
}

/// Run one league's bracket to its pennant winner.
///
/// Wild card: 3v6 and 4v5, best-of-3. A pairing whose partner seed is not
/// in the field at all is a bye for the seed that is present (a five-team
/// field sends seed 3 straight to the division series). Seeds 1 and 2
/// always sit the round out.
///
/// Division series: seed 1 meets whichever of 4/5 survived, seed 2 meets
/// whichever of 3/6 survived, best-of-5. Championship: the last two seeds,
/// best-of-7.
pub fn run_league_bracket<R: Rng>(
    rng: &mut R,
    field: &LeagueField,
    formats: &RoundFormats,
    home_advantage_pct: f64,
) -> Result<Seed, SimulationError> {
    let mut bracket = LiveBracket::new(field);

    // Wild-card round.
    for (hi, lo) in WILD_CARD_PAIRS {
        match (bracket.is_alive(hi), bracket.is_alive(lo)) {
            (true, true) => {
                play_round_series(rng, &mut bracket, formats.wild_card, hi, lo, home_advantage_pct)?
            }
            (true, false) | (false, true) => {
                event!(
                    tracing::Level::TRACE,
                    league = %bracket.league().abbrev(),
                    pair = ?(hi, lo),
                    "wild-card bye"
                );
            }
            (false, false) => {}
        }
    }

    // Division series. The opponent depends on who won the wild card.
    let one = seed(1);
    let two = seed(2);
    let d1 = bracket.survivor_of(seed(4), seed(5))?;
    play_round_series(rng, &mut bracket, formats.division, one, d1, home_advantage_pct)?;
    let d2 = bracket.survivor_of(seed(3), seed(6))?;
    play_round_series(rng, &mut bracket, formats.division, two, d2, home_advantage_pct)?;

    // League championship between the last two.
    if bracket.remaining() != 2 {
        return Err(SimulationError::WrongSurvivorCount {
            league: bracket.league(),
            expected: 2,
            found: bracket.remaining(),
        });
    }
    let mut remaining = bracket.active.iter().copied();
    let hi = remaining.next().expect("two seeds remain");
    let lo = remaining.next().expect("two seeds remain");
    play_round_series(rng, &mut bracket, formats.championship, hi, lo, home_advantage_pct)?;

    bracket.survivor()
}

/// Run one complete postseason: both league brackets, then the world
/// series. Returns the champion.
///
/// World-series home field goes to the pennant winner with the better
/// record metric. On an exact tie the American League survivor is home;
/// the tie-break is fixed so results never depend on evaluation order.
pub fn run_postseason<R: Rng>(
    rng: &mut R,
    american: &LeagueField,
    national: &LeagueField,
    formats: &RoundFormats,
    home_advantage_pct: f64,
) -> Result<TeamRef, SimulationError> {
    let al_seed = run_league_bracket(rng, american, formats, home_advantage_pct)?;
    let nl_seed = run_league_bracket(rng, national, formats, home_advantage_pct)?;

    let al_team = american
        .team(al_seed)
        .ok_or(SimulationError::MissingSeed {
            league: League::American,
            seed: al_seed,
        })?;
    let nl_team = national
        .team(nl_seed)
        .ok_or(SimulationError::MissingSeed {
            league: League::National,
            seed: nl_seed,
        })?;

    let al_side = SeriesSide {
        team: TeamRef::new(League::American, al_seed),
        strength: &al_team.strength,
    };
    let nl_side = SeriesSide {
        team: TeamRef::new(League::National, nl_seed),
        strength: &nl_team.strength,
    };

    let (home, away) = if nl_team.record_wins > al_team.record_wins {
        (nl_side, al_side)
    } else {
        (al_side, nl_side)
    };

    let outcome = run_series(rng, formats.world_series, home, away, home_advantage_pct)?;
    let champion = if outcome.eliminated == home.team {
        away.team
    } else {
        home.team
    };
    event!(
        tracing::Level::DEBUG,
        champion = %champion,
        games = outcome.games_played(),
        "world series resolved"
    );
    Ok(champion)
}
