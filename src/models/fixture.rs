//! Match model: a single fixture between two teams.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sequential match identifier, starting at 1 for a generated schedule.
pub type MatchId = u32;

/// Tournament group a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    Final,
}

impl Group {
    /// The round-robin groups, in display order.
    pub const STAGES: [Group; 2] = [Group::A, Group::B];

    pub fn label(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::Final => "Final",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown group: {0}")]
pub struct ParseGroupError(pub String);

impl FromStr for Group {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "group a" => Ok(Group::A),
            "b" | "group b" => Ok(Group::B),
            "final" => Ok(Group::Final),
            other => Err(ParseGroupError(other.to_string())),
        }
    }
}

/// A scheduled match.
///
/// Scores are only meaningful once `played` is set; standings ignore
/// unplayed matches whatever their scores say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub group: Group,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub played: bool,
}

impl Match {
    /// Create an unplayed match with zeroed scores.
    pub fn new(
        id: MatchId,
        group: Group,
        home_team: String,
        away_team: String,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            id,
            group,
            date,
            time,
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            played: false,
        }
    }

    /// Set the final score and mark the match as played.
    pub fn with_result(mut self, home_score: u32, away_score: u32) -> Self {
        self.home_score = home_score;
        self.away_score = away_score;
        self.played = true;
        self
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Scores from `team`'s point of view as `(mine, opponent's)`.
    pub fn score_for(&self, team: &str) -> Option<(u32, u32)> {
        if self.home_team == team {
            Some((self.home_score, self.away_score))
        } else if self.away_team == team {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }
}

/// Field-level edit of a match. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub played: Option<bool>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        self == &MatchUpdate::default()
    }

    pub fn apply(&self, m: &mut Match) {
        if let Some(date) = self.date {
            m.date = date;
        }
        if let Some(time) = self.time {
            m.time = time;
        }
        if let Some(score) = self.home_score {
            m.home_score = score;
        }
        if let Some(score) = self.away_score {
            m.away_score = score;
        }
        if let Some(played) = self.played {
            m.played = played;
        }
    }
}
