//! Unique identifiers for habit tracker entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(Ulid);

impl HabitId {
    /// Generate a new HabitId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for HabitId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
