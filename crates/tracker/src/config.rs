//! Tracker configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid configuration JSON
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the habit tracker.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory holding the habit store
    pub storage_path: PathBuf,
    /// Shortest accepted password
    pub min_password_len: usize,
    /// Months shown by the trend chart
    pub trend_months: u32,
    /// Habits per ranking in the monthly report
    pub report_top_n: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".habits"),
            min_password_len: 6,
            trend_months: habit_progress::DEFAULT_TREND_MONTHS,
            report_top_n: habit_progress::REPORT_TOP_N,
        }
    }
}

impl TrackerConfig {
    /// Load from a JSON file; a missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
