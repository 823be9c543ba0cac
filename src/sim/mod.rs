//! The tournament simulation engine: the matchup model, the best-of-N
//! series state machine, the two-league elimination bracket, and the
//! trial-aggregation layer in [`tournament`].
//!
//! Everything here is plain synchronous computation over a caller-supplied
//! [`rand::Rng`]; seed the RNG to make any run reproducible.

pub mod bracket;
pub mod errors;
pub mod matchup;
pub mod series;
pub mod tournament;

pub use bracket::{LiveBracket, RoundFormats, run_league_bracket, run_postseason};
pub use errors::SimulationError;
pub use matchup::{GameWinner, home_win_ratio, play_game};
pub use series::{SeriesFormat, SeriesLog, SeriesOutcome, SeriesSide, run_series};
