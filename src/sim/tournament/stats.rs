use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::league::{League, LeagueField, Seed, TeamRef};

/// Championship odds for one entrant after a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOdds {
    pub name: String,
    pub league: League,
    pub seed: Seed,
    /// Championships won across all trials.
    pub wins: usize,
    /// Win percentage over all trials, rounded to 2 decimal places.
    pub pct: f64,
}

/// Running champion tally, updated after every trial so an interrupted run
/// still holds a coherent partial aggregate.
#[derive(Debug, Clone, Default)]
pub struct ChampionTally {
    counts: BTreeMap<TeamRef, usize>,
}

impl ChampionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, champion: TeamRef) {
        *self.counts.entry(champion).or_insert(0) += 1;
    }

    pub fn count(&self, team: TeamRef) -> usize {
        self.counts.get(&team).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Resolve the tally into per-team odds. Every entrant of both fields
    /// gets a row, including teams that never won. Rows are ordered by
    /// wins descending; ties fall back to league/seed order so the output
    /// never depends on map iteration accidents.
    pub fn build(&self, trials: usize, american: &LeagueField, national: &LeagueField) -> Vec<TeamOdds> {
        let mut odds: Vec<TeamOdds> = [american, national]
            .iter()
            .flat_map(|field| {
                field.entries().map(|(seed, team)| {
                    let team_ref = TeamRef::new(field.league(), seed);
                    let wins = self.count(team_ref);
                    TeamOdds {
                        name: team.name.clone(),
                        league: field.league(),
                        seed,
                        wins,
                        pct: win_pct(wins, trials),
                    }
                })
            })
            .collect();
        odds.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.league.cmp(&b.league))
                .then(a.seed.cmp(&b.seed))
        });
        odds
    }
}

/// Win percentage rounded to 2 decimal places.
pub(crate) fn win_pct(wins: usize, trials: usize) -> f64 {
    let pct = wins as f64 / trials as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Rebuild a champion tally from a raw per-trial champion sequence.
///
/// Feeding a result's raw sequence back through this reproduces its odds
/// exactly; it is the same fold the runner applies trial by trial.
pub fn retally(champions: &[TeamRef]) -> ChampionTally {
    let mut tally = ChampionTally::new();
    for &champ in champions {
        tally.record(champ);
    }
    tally
}
