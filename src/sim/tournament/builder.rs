use crate::league::{League, LeagueField};
use crate::sim::bracket::RoundFormats;
use crate::sim::series::SeriesFormat;

use super::config::TournamentConfig;
use super::error::{Result, TournamentError};
use super::runner::Tournament;

/// Builder for [`Tournament`] instances.
///
/// Both league fields are required; everything else has a default. All
/// validation happens in [`build`](TournamentBuilder::build), before any
/// trial runs.
#[derive(Debug, Default)]
pub struct TournamentBuilder {
    american: Option<LeagueField>,
    national: Option<LeagueField>,
    trials: Option<usize>,
    home_advantage_pct: Option<f64>,
    formats: Option<RoundFormats>,
    seed: Option<u64>,
}

impl TournamentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a league field; it slots into its own league. Adding a second
    /// field for the same league replaces the first.
    pub fn field(mut self, field: LeagueField) -> Self {
        match field.league() {
            League::American => self.american = Some(field),
            League::National => self.national = Some(field),
        }
        self
    }

    /// Set the number of independent trials.
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Set the home advantage, as a percent of combined per-game strength.
    pub fn home_advantage_pct(mut self, pct: f64) -> Self {
        self.home_advantage_pct = Some(pct);
        self
    }

    /// Override all round formats at once.
    pub fn formats(mut self, formats: RoundFormats) -> Self {
        self.formats = Some(formats);
        self
    }

    /// Override only the world-series format.
    pub fn world_series_format(mut self, format: SeriesFormat) -> Self {
        let mut formats = self.formats.unwrap_or_default();
        formats.world_series = format;
        self.formats = Some(formats);
        self
    }

    /// Set the RNG seed for a reproducible run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the tournament.
    pub fn build(self) -> Result<Tournament> {
        let american = self
            .american
            .ok_or(TournamentError::MissingLeague(League::American))?;
        let national = self
            .national
            .ok_or(TournamentError::MissingLeague(League::National))?;

        let defaults = TournamentConfig::default();
        let config = TournamentConfig {
            trials: self.trials.unwrap_or(defaults.trials),
            home_advantage_pct: self
                .home_advantage_pct
                .unwrap_or(defaults.home_advantage_pct),
            formats: self.formats.unwrap_or(defaults.formats),
            seed: self.seed,
        };
        config.validate()?;

        Ok(Tournament::new(config, american, national))
    }
}

#[cfg(test)]
mod tests {
    use crate::league::{Strength, field_from_ranked};

    use super::*;

    fn sample_field(league: League) -> LeagueField {
        let ranked = (0..6)
            .map(|i| {
                (
                    format!("{}-{}", league.abbrev(), i + 1),
                    Strength::flat(100.0 - i as f64),
                    90.0 - i as f64,
                )
            })
            .collect();
        field_from_ranked(league, ranked).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let tournament = TournamentBuilder::new()
            .field(sample_field(League::American))
            .field(sample_field(League::National))
            .build()
            .unwrap();
        let config = tournament.config();
        assert_eq!(config.trials, 1_000_000);
        assert_eq!(config.home_advantage_pct, 5.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_requires_both_leagues() {
        let err = TournamentBuilder::new()
            .field(sample_field(League::American))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TournamentError::MissingLeague(League::National)
        ));

        let err = TournamentBuilder::new().build().unwrap_err();
        assert!(matches!(
            err,
            TournamentError::MissingLeague(League::American)
        ));
    }

    #[test]
    fn test_builder_rejects_zero_trials() {
        let err = TournamentBuilder::new()
            .field(sample_field(League::American))
            .field(sample_field(League::National))
            .trials(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TournamentError::ValidationError(_)));
    }

    #[test]
    fn test_builder_world_series_override() {
        let tournament = TournamentBuilder::new()
            .field(sample_field(League::American))
            .field(sample_field(League::National))
            .world_series_format(SeriesFormat::BestOf5)
            .build()
            .unwrap();
        let formats = tournament.config().formats;
        assert_eq!(formats.world_series, SeriesFormat::BestOf5);
        // The other rounds keep their defaults.
        assert_eq!(formats.wild_card, SeriesFormat::BestOf3);
        assert_eq!(formats.championship, SeriesFormat::BestOf7);
    }
}
