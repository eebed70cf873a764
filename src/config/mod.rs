//! Configuration loading and validation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{FixturePolicy, DEFAULT_TOP_SCORERS};
use crate::storage::parse_time;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tournament rules and scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Shared password unlocking the admin operations
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Teams required before groups can be drawn
    #[serde(default = "default_max_teams")]
    pub max_teams: usize,

    /// Teams drawn into group A; the rest go to group B
    #[serde(default = "default_group_a_size")]
    pub group_a_size: usize,

    /// Days the generated fixtures are spread over
    #[serde(default = "default_fixture_window_days")]
    pub fixture_window_days: u32,

    /// Kickoff time for generated matches (HH:MM)
    #[serde(default = "default_kickoff_time")]
    pub kickoff_time: String,

    /// Golden boot leaderboard size
    #[serde(default = "default_top_scorers_limit")]
    pub top_scorers_limit: usize,
}

fn default_name() -> String {
    "Tournament".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_max_teams() -> usize {
    7
}

fn default_group_a_size() -> usize {
    4
}

fn default_fixture_window_days() -> u32 {
    4
}

fn default_kickoff_time() -> String {
    "18:00".to_string()
}

fn default_top_scorers_limit() -> usize {
    DEFAULT_TOP_SCORERS
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            admin_password: default_admin_password(),
            max_teams: default_max_teams(),
            group_a_size: default_group_a_size(),
            fixture_window_days: default_fixture_window_days(),
            kickoff_time: default_kickoff_time(),
            top_scorers_limit: default_top_scorers_limit(),
        }
    }
}

impl TournamentConfig {
    /// Parsed kickoff time. Falls back to the policy default if the value
    /// was never validated.
    pub fn kickoff(&self) -> NaiveTime {
        parse_time(&self.kickoff_time).unwrap_or_else(|| FixturePolicy::default().kickoff)
    }

    pub fn fixture_policy(&self) -> FixturePolicy {
        FixturePolicy {
            window_days: self.fixture_window_days,
            kickoff: self.kickoff(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tournament: TournamentConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            tournament: TournamentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let t = &self.tournament;
        if t.admin_password.is_empty() {
            return Err(ConfigError::ValidationError(
                "Admin password must not be empty".to_string(),
            ));
        }

        if t.fixture_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "Fixture window must be at least 1 day".to_string(),
            ));
        }

        if t.max_teams < 4 {
            return Err(ConfigError::ValidationError(
                "At least 4 teams are needed for two groups".to_string(),
            ));
        }

        if t.group_a_size < 2 || t.group_a_size + 2 > t.max_teams {
            return Err(ConfigError::ValidationError(format!(
                "Group A size {} leaves fewer than 2 teams in a group of {}",
                t.group_a_size, t.max_teams
            )));
        }

        if parse_time(&t.kickoff_time).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "Kickoff time '{}' is not HH:MM",
                t.kickoff_time
            )));
        }

        Ok(())
    }
}
