//! Core data models for the tournament desk.

mod award;
mod fixture;
mod player_stat;
mod standings;
mod team;

pub use award::*;
pub use fixture::*;
pub use player_stat::*;
pub use standings::*;
pub use team::*;
