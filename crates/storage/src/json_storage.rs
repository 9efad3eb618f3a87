//! JSON file storage implementation.
//!
//! Stores one JSON file per habit under `habits/` and keeps a small per-habit
//! meta marker (version + updated_at) under `meta/habits/`.

use std::path::{Path, PathBuf};

use habit_core::{Habit, HabitId};
use tokio::fs;
use tracing::{debug, info};

use super::trait_::sort_habits;
use super::{Result, Storage};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage rooted at `root`, creating the directories it needs.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("habits")).await?;
        fs::create_dir_all(root.join("meta").join("habits")).await?;
        info!("Opened habit storage at {}", root.display());

        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn habit_path(&self, id: HabitId) -> PathBuf {
        self.root.join("habits").join(format!("{}.json", id))
    }

    fn meta_path(&self, id: HabitId) -> PathBuf {
        self.root
            .join("meta")
            .join("habits")
            .join(format!("{}.meta.json", id))
    }

    /// Number of times a habit has been saved, 0 if never.
    pub async fn version(&self, id: HabitId) -> Result<u64> {
        match fs::read_to_string(self.meta_path(id)).await {
            Ok(s) => {
                let json: serde_json::Value = serde_json::from_str(&s)?;
                Ok(json.get("version").and_then(|v| v.as_u64()).unwrap_or(0))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Read and increment per-habit version, return new version.
    async fn bump_version(&self, id: HabitId) -> Result<u64> {
        let version = self.version(id).await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(self.meta_path(id), serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_habit(&mut self, habit: &Habit) -> Result<()> {
        let json = serde_json::to_string_pretty(habit)?;
        fs::write(self.habit_path(habit.id), json.as_bytes()).await?;

        let version = self.bump_version(habit.id).await?;
        debug!(id = %habit.id, version, "saved habit");
        Ok(())
    }

    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>> {
        read_json(&self.habit_path(id)).await
    }

    async fn list_habits(&self, owner: &str) -> Result<Vec<Habit>> {
        let mut habits: Vec<Habit> = list_dir(&self.root.join("habits"))
            .await?
            .into_iter()
            .filter(|h: &Habit| h.owner == owner)
            .collect();
        sort_habits(&mut habits);
        Ok(habits)
    }

    async fn delete_habit(&mut self, id: HabitId) -> Result<()> {
        for path in [self.habit_path(id), self.meta_path(id)] {
            fs::remove_file(path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        debug!(id = %id, "deleted habit");
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping unreadable {}: {}", entry.path().display(), e),
        }
    }
    Ok(items)
}
