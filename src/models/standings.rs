//! Derived points-table rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Points for a win.
pub const POINTS_FOR_WIN: u32 = 3;

/// Points for a draw.
pub const POINTS_FOR_DRAW: u32 = 1;

/// One team's line in a points table. Never stored; rebuilt on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
    pub points: u32,
}

impl StandingsRow {
    /// Empty row for a team that has not played yet.
    pub fn new(team: String) -> Self {
        Self {
            team,
            ..Default::default()
        }
    }

    /// Fold one played result into the row. Totals saturate rather than
    /// wrap on absurd persisted scores.
    pub fn record(&mut self, mine: u32, theirs: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(mine);
        self.goals_against = self.goals_against.saturating_add(theirs);
        self.goal_diff = self.goals_for as i64 - self.goals_against as i64;

        match mine.cmp(&theirs) {
            Ordering::Greater => {
                self.won = self.won.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_WIN);
            }
            Ordering::Equal => {
                self.drawn = self.drawn.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_DRAW);
            }
            Ordering::Less => {
                self.lost = self.lost.saturating_add(1);
            }
        }
    }

    /// Table order: points, then goal difference, then goals scored, all
    /// descending.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.goal_diff.cmp(&self.goal_diff))
            .then_with(|| other.goals_for.cmp(&self.goals_for))
    }
}
