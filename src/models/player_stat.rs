//! Player statistic rows.

use serde::{Deserialize, Serialize};

/// One recorded contribution by a player.
///
/// Rows are appended, never updated in place. Several rows for the same
/// (player, team) are summed when leaderboards are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player_name: String,
    pub team: String,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub saves: u32,
}

impl PlayerStat {
    pub fn new(player_name: String, team: String) -> Self {
        Self {
            player_name,
            team,
            goals: 0,
            saves: 0,
        }
    }

    pub fn with_goals(mut self, goals: u32) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_saves(mut self, saves: u32) -> Self {
        self.saves = saves;
        self
    }

    /// Grouping key used when summing rows.
    pub fn key(&self) -> (&str, &str) {
        (&self.player_name, &self.team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_stat_builder() {
        let stat = PlayerStat::new("Salah".into(), "Reds".into())
            .with_goals(2)
            .with_saves(0);

        assert_eq!(stat.goals, 2);
        assert_eq!(stat.saves, 0);
        assert_eq!(stat.key(), ("Salah", "Reds"));
    }

    #[test]
    fn test_player_stat_missing_saves_defaults() {
        let json = r#"{"player_name":"X","team":"A","goals":3}"#;
        let stat: PlayerStat = serde_json::from_str(json).unwrap();

        assert_eq!(stat.goals, 3);
        assert_eq!(stat.saves, 0);
    }
}
