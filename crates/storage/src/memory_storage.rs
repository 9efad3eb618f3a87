//! In-memory storage, for tests and ephemeral sessions.

use std::collections::HashMap;

use habit_core::{Habit, HabitId};

use super::trait_::sort_habits;
use super::{Result, Storage};

/// Storage that keeps habits in a map and forgets them on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    habits: HashMap<HabitId, Habit>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored habits across all owners.
    pub fn len(&self) -> usize {
        self.habits.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_habit(&mut self, habit: &Habit) -> Result<()> {
        self.habits.insert(habit.id, habit.clone());
        Ok(())
    }

    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>> {
        Ok(self.habits.get(&id).cloned())
    }

    async fn list_habits(&self, owner: &str) -> Result<Vec<Habit>> {
        let mut habits: Vec<Habit> = self
            .habits
            .values()
            .filter(|h| h.owner == owner)
            .cloned()
            .collect();
        sort_habits(&mut habits);
        Ok(habits)
    }

    async fn delete_habit(&mut self, id: HabitId) -> Result<()> {
        self.habits.remove(&id);
        Ok(())
    }
}
