//! Persistence connector for the tournament's record collections.
//!
//! The calculation layer never talks to disk; callers load a [`Snapshot`],
//! run pure functions over it and save whole collections back. Saves are
//! last-write-wins.

use std::sync::Mutex;

use chrono::NaiveTime;
use tracing::{debug, info, warn};

use super::{
    match_from_row, player_stat_from_row, EntityType, JsonlReader, JsonlWriter, MatchRow,
    PlayerStatRow, StorageConfig, StorageError,
};
use crate::models::{Match, PlayerStat, TeamEntry};

/// Everything the tournament keeps, as plain collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub teams: Vec<TeamEntry>,
    pub matches: Vec<Match>,
    pub player_stats: Vec<PlayerStat>,
}

/// Load/save boundary. Implementations must treat an empty or missing
/// backing store as empty collections.
pub trait TournamentStore: Send + Sync {
    fn load(&self) -> Result<Snapshot, StorageError>;

    fn save_teams(&self, teams: &[TeamEntry]) -> Result<(), StorageError>;

    fn save_matches(&self, matches: &[Match]) -> Result<(), StorageError>;

    fn save_player_stats(&self, stats: &[PlayerStat]) -> Result<(), StorageError>;

    /// Record one more player stat row without rewriting the table.
    fn append_player_stat(&self, stat: &PlayerStat) -> Result<(), StorageError>;

    /// Load, degrading to empty collections when the store is unreadable.
    fn load_or_empty(&self) -> Snapshot {
        match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to load tournament data, starting empty: {}", e);
                Snapshot::default()
            }
        }
    }
}

/// JSONL-backed store under `data_dir/tournament/`.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
    default_time: NaiveTime,
}

impl JsonlStore {
    /// `default_time` fills in matches persisted without a kickoff time.
    pub fn new(config: StorageConfig, default_time: NaiveTime) -> Self {
        Self {
            config,
            default_time,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn read_matches(&self) -> Result<Vec<Match>, StorageError> {
        let rows = JsonlReader::<MatchRow>::for_entity(&self.config, EntityType::Match).read_all()?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match match_from_row(row, self.default_time) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!("Skipping match row: {}", e);
                    None
                }
            })
            .collect())
    }

    fn read_player_stats(&self) -> Result<Vec<PlayerStat>, StorageError> {
        let rows = JsonlReader::<PlayerStatRow>::for_entity(&self.config, EntityType::PlayerStat)
            .read_all()?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match player_stat_from_row(row) {
                Ok(stat) => Some(stat),
                Err(e) => {
                    warn!("Skipping player stat row: {}", e);
                    None
                }
            })
            .collect())
    }
}

impl TournamentStore for JsonlStore {
    fn load(&self) -> Result<Snapshot, StorageError> {
        let teams = JsonlReader::<TeamEntry>::for_entity(&self.config, EntityType::Team).read_all()?;
        let matches = self.read_matches()?;
        let player_stats = self.read_player_stats()?;

        debug!(
            "Loaded {} teams, {} matches, {} player stats",
            teams.len(),
            matches.len(),
            player_stats.len()
        );
        Ok(Snapshot {
            teams,
            matches,
            player_stats,
        })
    }

    fn save_teams(&self, teams: &[TeamEntry]) -> Result<(), StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Team).write_all(teams)?;
        Ok(())
    }

    fn save_matches(&self, matches: &[Match]) -> Result<(), StorageError> {
        let rows: Vec<MatchRow> = matches.iter().map(MatchRow::from).collect();
        JsonlWriter::for_entity(&self.config, EntityType::Match).write_all(&rows)?;
        Ok(())
    }

    fn save_player_stats(&self, stats: &[PlayerStat]) -> Result<(), StorageError> {
        let rows: Vec<PlayerStatRow> = stats.iter().map(PlayerStatRow::from).collect();
        JsonlWriter::for_entity(&self.config, EntityType::PlayerStat).write_all(&rows)?;
        Ok(())
    }

    fn append_player_stat(&self, stat: &PlayerStat) -> Result<(), StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::PlayerStat)
            .append(&PlayerStatRow::from(stat))?;
        info!("Recorded stat for {} ({})", stat.player_name, stat.team);
        Ok(())
    }
}

/// In-process store, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TournamentStore for MemoryStore {
    fn load(&self) -> Result<Snapshot, StorageError> {
        Ok(self.lock().clone())
    }

    fn save_teams(&self, teams: &[TeamEntry]) -> Result<(), StorageError> {
        self.lock().teams = teams.to_vec();
        Ok(())
    }

    fn save_matches(&self, matches: &[Match]) -> Result<(), StorageError> {
        self.lock().matches = matches.to_vec();
        Ok(())
    }

    fn save_player_stats(&self, stats: &[PlayerStat]) -> Result<(), StorageError> {
        self.lock().player_stats = stats.to_vec();
        Ok(())
    }

    fn append_player_stat(&self, stat: &PlayerStat) -> Result<(), StorageError> {
        self.lock().player_stats.push(stat.clone());
        Ok(())
    }
}
