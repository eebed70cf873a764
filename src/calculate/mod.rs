//! Tournament calculation engine.
//!
//! Pure functions over in-memory record collections:
//! - Round-robin fixture generation
//! - Points tables (standings)
//! - Award leaderboards (golden boot, golden glove, finalists)
//! - Bookkeeping edits that return updated collections

mod awards;
mod bookkeeping;
mod fixtures;
mod standings;

pub use awards::*;
pub use bookkeeping::*;
pub use fixtures::*;
pub use standings::*;

use thiserror::Error;

/// Errors surfaced by the calculation layer. Neither is fatal: validation
/// errors ask the caller to re-prompt, empty-data errors mean "no data yet".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No data yet: {0}")]
    EmptyData(String),
}

impl CalcError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CalcError::Validation(msg.into())
    }

    pub fn empty(msg: impl Into<String>) -> Self {
        CalcError::EmptyData(msg.into())
    }
}
