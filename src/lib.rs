//! A library for Monte Carlo simulation of MLB-style postseasons.
//!
//! The core is a tournament engine: a probabilistic single-game model
//! ([`sim::matchup`]), a best-of-N series state machine ([`sim::series`]),
//! a two-league elimination bracket ([`sim::bracket`]), and a trial
//! aggregation layer ([`sim::tournament`]) that turns many independent
//! postseasons into per-team championship odds.
//!
//! Upstream of the engine, [`elo`] projects a regular season from a real
//! schedule and preseason ratings, [`league::seeding`] turns the
//! projection into seeded fields, and [`ingest`] parses the tabular
//! inputs both need. [`season`] wires the default
//! project-seed-simulate pipeline together.
//!
//! # Example
//!
//! ```
//! use pennant::league::{League, Strength, field_from_ranked};
//! use pennant::sim::tournament::TournamentBuilder;
//!
//! let field = |league: League| {
//!     let rows = (0..6)
//!         .map(|i| {
//!             (
//!                 format!("{}-{}", league.abbrev(), i + 1),
//!                 Strength::flat(100.0 - 10.0 * i as f64),
//!                 95.0 - i as f64,
//!             )
//!         })
//!         .collect();
//!     field_from_ranked(league, rows).unwrap()
//! };
//!
//! let result = TournamentBuilder::new()
//!     .field(field(League::American))
//!     .field(field(League::National))
//!     .trials(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // One champion per trial, resolved to per-team odds.
//! assert_eq!(result.champions().len(), 10_000);
//! println!("{}", result.to_text());
//! ```
//!
//! All randomness flows through a caller-seedable RNG, so any run can be
//! reproduced exactly.

pub mod elo;
pub mod ingest;
pub mod league;
pub mod season;
pub mod sim;
