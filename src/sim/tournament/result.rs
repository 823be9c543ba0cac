use crate::league::{League, LeagueField, TeamRef};

use super::config::TournamentConfig;
use super::error::Result;
use super::stats::{TeamOdds, retally};

/// The outcome of a tournament run: per-team championship odds plus the
/// raw per-trial champion sequence for external statistical checks.
#[derive(Debug, Clone)]
pub struct TournamentResult {
    config: TournamentConfig,
    american: LeagueField,
    national: LeagueField,
    champions: Vec<TeamRef>,
    odds: Vec<TeamOdds>,
}

impl TournamentResult {
    pub(crate) fn new(
        config: TournamentConfig,
        american: LeagueField,
        national: LeagueField,
        champions: Vec<TeamRef>,
        odds: Vec<TeamOdds>,
    ) -> Self {
        TournamentResult {
            config,
            american,
            national,
            champions,
            odds,
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn trials(&self) -> usize {
        self.champions.len()
    }

    pub fn field(&self, league: League) -> &LeagueField {
        match league {
            League::American => &self.american,
            League::National => &self.national,
        }
    }

    /// The raw champion of every trial, in trial order. Suitable for
    /// confidence-interval or goodness-of-fit checks by callers.
    pub fn champions(&self) -> &[TeamRef] {
        &self.champions
    }

    /// Per-team odds, ordered by wins descending.
    pub fn odds(&self) -> &[TeamOdds] {
        &self.odds
    }

    /// Odds for a team by name.
    pub fn odds_for(&self, name: &str) -> Option<&TeamOdds> {
        self.odds.iter().find(|o| o.name == name)
    }

    /// Rebuild the odds from the raw champion sequence. Aggregation is a
    /// pure fold over that sequence, so this always reproduces
    /// [`odds`](TournamentResult::odds) exactly.
    pub fn retally(&self) -> Vec<TeamOdds> {
        retally(&self.champions).build(self.trials(), &self.american, &self.national)
    }

    /// Plain-text report: one row per team with a proportional bar.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Postseason Simulation: {} Trials\n\n",
            self.trials()
        ));
        for odds in &self.odds {
            let bar = "#".repeat(odds.pct.round() as usize);
            out.push_str(&format!(
                "Team: {:<22}   Win %: {:>6.2}  |{}\n",
                odds.name, odds.pct, bar
            ));
        }
        out
    }

    /// Markdown report with the run configuration and an odds table.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Championship Odds\n\n");

        out.push_str("## Configuration\n\n");
        out.push_str(&format!("- **Trials**: {}\n", self.trials()));
        out.push_str(&format!(
            "- **Home Advantage**: {}%\n",
            self.config.home_advantage_pct
        ));
        out.push_str(&format!(
            "- **Formats**: wild card {:?}, division {:?}, championship {:?}, world series {:?}\n",
            self.config.formats.wild_card,
            self.config.formats.division,
            self.config.formats.championship,
            self.config.formats.world_series
        ));
        if let Some(seed) = self.config.seed {
            out.push_str(&format!("- **Random Seed**: {seed}\n"));
        }
        out.push('\n');

        out.push_str("## Odds\n\n");
        out.push_str("| Rank | Team | League | Seed | Wins | Win % |\n");
        out.push_str("|------|------|--------|------|------|-------|\n");
        for (rank, odds) in self.odds.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {:.2} |\n",
                rank + 1,
                odds.name,
                odds.league.abbrev(),
                odds.seed,
                odds.wins,
                odds.pct
            ));
        }
        out
    }

    /// The odds serialized as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.odds)?)
    }
}
