use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::event;

use crate::league::LeagueField;
use crate::sim::bracket::run_postseason;

use super::config::TournamentConfig;
use super::error::{Result, TournamentError};
use super::result::TournamentResult;
use super::stats::ChampionTally;

/// A configured tournament, ready to run.
///
/// Construct via [`TournamentBuilder`](super::TournamentBuilder). The
/// fields are immutable; every trial simulates over fresh bracket state,
/// so the tournament can be run repeatedly (a seeded run is exactly
/// repeatable).
#[derive(Debug, Clone)]
pub struct Tournament {
    config: TournamentConfig,
    american: LeagueField,
    national: LeagueField,
}

impl Tournament {
    pub(crate) fn new(
        config: TournamentConfig,
        american: LeagueField,
        national: LeagueField,
    ) -> Self {
        Tournament {
            config,
            american,
            national,
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn american(&self) -> &LeagueField {
        &self.american
    }

    pub fn national(&self) -> &LeagueField {
        &self.national
    }

    /// Run every trial and aggregate the champions.
    ///
    /// The tally is folded trial-by-trial, so interrupting between trials
    /// can never leave a half-counted aggregate. A trial that fails aborts
    /// the run with the error; no partial champion is ever recorded, since
    /// that would bias the estimated distribution.
    pub fn run(&self) -> Result<TournamentResult> {
        event!(
            tracing::Level::INFO,
            trials = self.config.trials,
            home_advantage_pct = self.config.home_advantage_pct,
            "starting postseason simulation"
        );

        let seed = self.config.seed.unwrap_or_else(|| rand::random::<u64>());
        let mut rng = StdRng::seed_from_u64(seed);
        event!(tracing::Level::DEBUG, seed, "simulation rng seeded");

        self.run_with_rng(&mut rng)
    }

    /// Run with a caller-supplied RNG. Exposed so callers driving several
    /// simulations can share one seeded stream.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<TournamentResult> {
        let trials = self.config.trials;
        let mut tally = ChampionTally::new();
        let mut champions = Vec::with_capacity(trials);

        let log_interval = (trials / 10).max(1);
        for trial in 0..trials {
            if trial > 0 && trial % log_interval == 0 {
                event!(
                    tracing::Level::DEBUG,
                    trial,
                    trials,
                    percent = 100.0 * trial as f64 / trials as f64,
                    "simulation progress"
                );
            }
            let champion = run_postseason(
                rng,
                &self.american,
                &self.national,
                &self.config.formats,
                self.config.home_advantage_pct,
            )
            .map_err(|source| TournamentError::TrialFailed { trial, source })?;
            tally.record(champion);
            champions.push(champion);
        }

        let odds = tally.build(trials, &self.american, &self.national);
        event!(
            tracing::Level::INFO,
            trials,
            leader = odds.first().map(|o| o.name.as_str()).unwrap_or(""),
            "postseason simulation complete"
        );

        Ok(TournamentResult::new(
            self.config.clone(),
            self.american.clone(),
            self.national.clone(),
            champions,
            odds,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::league::{League, LeagueField, Seed, Strength, TeamRef, field_from_ranked};
    use crate::sim::tournament::TournamentBuilder;

    use super::*;

    fn graded_field(league: League) -> LeagueField {
        // The concrete scenario: strengths 100 down to 50 by seed.
        let ranked = (0..6)
            .map(|i| {
                (
                    format!("{}-{}", league.abbrev(), i + 1),
                    Strength::flat(100.0 - 10.0 * i as f64),
                    100.0 - i as f64,
                )
            })
            .collect();
        field_from_ranked(league, ranked).unwrap()
    }

    fn graded_tournament(trials: usize, seed: u64) -> Tournament {
        TournamentBuilder::new()
            .field(graded_field(League::American))
            .field(graded_field(League::National))
            .trials(trials)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_produces_one_champion_per_trial() {
        let result = graded_tournament(500, 42).run().unwrap();
        assert_eq!(result.champions().len(), 500);
        let total_wins: usize = result.odds().iter().map(|o| o.wins).sum();
        assert_eq!(total_wins, 500);
    }

    #[test_log::test]
    fn test_seeded_runs_are_identical() {
        let first = graded_tournament(2_000, 7).run().unwrap();
        let second = graded_tournament(2_000, 7).run().unwrap();
        assert_eq!(first.champions(), second.champions());
        assert_eq!(first.odds(), second.odds());
    }

    #[test]
    fn test_trials_do_not_leak_state() {
        // Back-to-back runs of the same tournament instance must match a
        // fresh instance exactly: nothing a trial does may survive it.
        let tournament = graded_tournament(1_000, 99);
        let first = tournament.run().unwrap();
        let second = tournament.run().unwrap();
        assert_eq!(first.champions(), second.champions());
        assert_eq!(tournament.american(), &graded_field(League::American));
        assert_eq!(tournament.national(), &graded_field(League::National));
    }

    #[test]
    fn test_stronger_seeds_win_more_often() {
        // Monotonic strength/seed relationship on the graded scenario:
        // with 100 vs 50 endpoints the ordering is decisive at this trial
        // count despite sampling noise.
        let result = graded_tournament(50_000, 42).run().unwrap();

        for league in League::BOTH {
            let wins_by_seed: Vec<usize> = (1..=6)
                .map(|rank| {
                    let team = TeamRef::new(league, Seed::new(rank).unwrap());
                    result
                        .odds()
                        .iter()
                        .find(|o| o.league == team.league && o.seed == team.seed)
                        .map(|o| o.wins)
                        .unwrap_or(0)
                })
                .collect();
            for pair in wins_by_seed.windows(2) {
                assert!(
                    pair[0] > pair[1],
                    "{league} wins by seed not monotonic: {wins_by_seed:?}"
                );
            }
        }

        // The top seeds outpace every other single seed.
        let leader = &result.odds()[0];
        assert_eq!(leader.seed, Seed::new(1).unwrap());
    }

    #[test]
    fn test_failed_trial_aborts_without_recording() {
        // Two all-zero-strength fields pass construction (zero is a legal
        // rating) but every game has a zero combined strength, so the very
        // first trial must surface the arithmetic error.
        let flat_zero = |league: League| {
            let ranked = (0..6)
                .map(|i| (format!("{}-{}", league.abbrev(), i + 1), Strength::flat(0.0), 80.0))
                .collect();
            field_from_ranked(league, ranked).unwrap()
        };
        let tournament = TournamentBuilder::new()
            .field(flat_zero(League::American))
            .field(flat_zero(League::National))
            .trials(10)
            .seed(1)
            .build()
            .unwrap();
        let err = tournament.run().unwrap_err();
        assert!(matches!(
            err,
            TournamentError::TrialFailed { trial: 0, .. }
        ));
    }

    #[test]
    fn test_run_with_shared_rng_advances_the_stream() {
        let tournament = graded_tournament(200, 0);
        let mut rng = StdRng::seed_from_u64(123);
        let first = tournament.run_with_rng(&mut rng).unwrap();
        let second = tournament.run_with_rng(&mut rng).unwrap();
        // Same stream, consumed sequentially: the two result sets are
        // almost surely different sequences.
        assert_ne!(first.champions(), second.champions());
    }
}
