//! # Tournament Desk
//!
//! Bookkeeping for a small two-group football tournament: team registry,
//! group draw, round-robin fixtures, results, standings and awards.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, matches, player stats, standings rows)
//! - **calculate**: Pure fixture, standings and award computations
//! - **storage**: JSONL persistence behind the `TournamentStore` trait
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
