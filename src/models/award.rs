//! Award leaderboard models.

use serde::{Deserialize, Serialize};

use super::{Group, StandingsRow};

/// A player's summed tally for one statistic (goals or saves).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub player_name: String,
    pub team: String,
    pub total: u32,
}

/// A group winner going through to the final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finalist {
    pub group: Group,
    pub team: String,
    pub row: StandingsRow,
}
