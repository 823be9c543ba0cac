//! Monte Carlo tournament runs: many independent postseasons, tallied into
//! championship odds.
//!
//! # Example
//!
//! ```ignore
//! use pennant::league::{League, Strength, field_from_ranked};
//! use pennant::sim::tournament::TournamentBuilder;
//!
//! let al = field_from_ranked(League::American, al_rows)?;
//! let nl = field_from_ranked(League::National, nl_rows)?;
//!
//! let tournament = TournamentBuilder::new()
//!     .field(al)
//!     .field(nl)
//!     .trials(100_000)
//!     .seed(42)
//!     .build()?;
//!
//! let result = tournament.run()?;
//! for odds in result.odds() {
//!     println!("{}: {:.2}%", odds.name, odds.pct);
//! }
//! println!("{}", result.to_text());
//! ```

mod builder;
mod config;
mod error;
mod result;
mod runner;
mod stats;

pub use builder::TournamentBuilder;
pub use config::TournamentConfig;
pub use error::{Result, TournamentError};
pub use result::TournamentResult;
pub use runner::Tournament;
pub use stats::{ChampionTally, TeamOdds, retally};
