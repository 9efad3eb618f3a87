//! Storage trait abstraction.

use async_trait::async_trait;
use habit_core::{Habit, HabitId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage abstraction for habit records.
///
/// Plain CRUD; callers serialize their own writes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Save a habit (create or update).
    async fn save_habit(&mut self, habit: &Habit) -> Result<()>;

    /// Load a habit by ID.
    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>>;

    /// List the habits of one owner, oldest first.
    async fn list_habits(&self, owner: &str) -> Result<Vec<Habit>>;

    /// Delete a habit. Deleting a missing habit is not an error.
    async fn delete_habit(&mut self, id: HabitId) -> Result<()>;

}

/// Sort habits into display order.
pub(crate) fn sort_habits(habits: &mut [Habit]) {
    habits.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
