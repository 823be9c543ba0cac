//! Best-of-N series resolution.
//!
//! A series is a short state machine: play games in a fixed home/away
//! order, append each game's loser to a log, and stop the moment one side's
//! loss count reaches the clinch threshold. The same loop covers every
//! round; only the format differs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::league::{Strength, TeamRef};

use super::errors::SimulationError;
use super::matchup::{GameWinner, play_game};

/// A series format: how many games at most, and who hosts which game.
///
/// Hosting follows the real postseason conventions. The designated home
/// side (the better seed, or the better record in the world series) hosts:
///
/// - best-of-3: every game (seeds 1-2 don't travel in a wild-card round),
/// - best-of-5: games 1, 2, and 5 (2-2-1),
/// - best-of-7: games 1, 2, 6, and 7 (2-3-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesFormat {
    BestOf3,
    BestOf5,
    BestOf7,
}

impl SeriesFormat {
    /// The most games the series can run.
    pub const fn max_games(self) -> usize {
        match self {
            SeriesFormat::BestOf3 => 3,
            SeriesFormat::BestOf5 => 5,
            SeriesFormat::BestOf7 => 7,
        }
    }

    /// Losses that eliminate a side: `ceil((max + 1) / 2)`.
    pub const fn clinch(self) -> usize {
        (self.max_games() + 1) / 2
    }

    /// Does the designated home side host the given 0-based game?
    pub const fn home_hosts(self, game_idx: usize) -> bool {
        match self {
            SeriesFormat::BestOf3 => true,
            SeriesFormat::BestOf5 => matches!(game_idx, 0 | 1 | 4),
            SeriesFormat::BestOf7 => matches!(game_idx, 0 | 1 | 5 | 6),
        }
    }
}

/// One side of a series: who it is and what strength it brings per game.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSide<'a> {
    pub team: TeamRef,
    pub strength: &'a Strength,
}

/// The ordered per-game losers of one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesLog {
    losers: Vec<TeamRef>,
}

impl SeriesLog {
    fn record(&mut self, loser: TeamRef) {
        self.losers.push(loser);
    }

    pub fn games_played(&self) -> usize {
        self.losers.len()
    }

    pub fn losses(&self, side: TeamRef) -> usize {
        self.losers.iter().filter(|&&l| l == side).count()
    }

    /// The most frequent loser so far and its loss count. Ties go to the
    /// side that lost first, which never matters at a clinch check: only
    /// one side can reach the threshold.
    pub fn mode(&self) -> Option<(TeamRef, usize)> {
        let first = *self.losers.first()?;
        let mut best = (first, self.losses(first));
        for &l in &self.losers {
            let count = self.losses(l);
            if count > best.1 {
                best = (l, count);
            }
        }
        Some(best)
    }

    pub fn losers(&self) -> &[TeamRef] {
        &self.losers
    }
}

/// A resolved series: who was eliminated and how every game went.
#[derive(Debug, Clone)]
pub struct SeriesOutcome {
    pub eliminated: TeamRef,
    pub log: SeriesLog,
}

impl SeriesOutcome {
    pub fn games_played(&self) -> usize {
        self.log.games_played()
    }
}

/// Run a series to elimination.
///
/// `home` is the designated home side; the format's hosting pattern decides
/// who actually hosts each game. Per-game strengths come from each side's
/// rotation at the current game index, so a three-man rotation lines up
/// with games 1-3 and wraps for games 4+.
///
/// After every game the loss tally is checked: as soon as the most frequent
/// loser's count equals the clinch threshold, the series ends without
/// simulating the remaining games.
pub fn run_series<R: Rng>(
    rng: &mut R,
    format: SeriesFormat,
    home: SeriesSide<'_>,
    away: SeriesSide<'_>,
    home_advantage_pct: f64,
) -> Result<SeriesOutcome, SimulationError> {
    let mut log = SeriesLog::default();
    for game_idx in 0..format.max_games() {
        let (host, visitor) = if format.home_hosts(game_idx) {
            (home, away)
        } else {
            (away, home)
        };

        let winner = play_game(
            rng,
            host.strength.for_game(game_idx),
            visitor.strength.for_game(game_idx),
            home_advantage_pct,
        )?;
        let loser = match winner {
            GameWinner::Home => visitor.team,
            GameWinner::Away => host.team,
        };
        log.record(loser);

        if let Some((side, losses)) = log.mode() {
            if losses == format.clinch() {
                return Ok(SeriesOutcome {
                    eliminated: side,
                    log,
                });
            }
        }
    }
    Err(SimulationError::SeriesNotDecided {
        games: format.max_games(),
    })
}
