//! Habit drafts - the editable fields of a habit with explicit defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::habit::Habit;
use crate::id::HabitId;
use crate::weekday::DayOfWeek;
use crate::Time;

/// Emoji used when none is chosen.
pub const DEFAULT_EMOJI: &str = "😊";

/// Time slot used when none is chosen.
pub const DEFAULT_TIME_SLOT: &str = "09:00";

/// Shortest goal accepted; a one-day goal puts "Start" and "Halfway" on the same day.
pub const MIN_GOAL_DAYS: u32 = 2;

/// User-editable habit fields.
///
/// Every optional field carries its default here so a partially filled form
/// deserializes into a complete value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitDraft {
    /// Habit title (required)
    pub title: String,

    /// Display emoji
    pub emoji: String,

    /// Free-form description
    pub description: String,

    /// Planned times of day
    pub time_slots: Vec<String>,

    /// Active weekdays
    pub selected_days: Vec<DayOfWeek>,

    /// Fixed goal length, `None` for no specific duration
    pub goal_days: Option<u32>,

    /// Descriptive category
    pub category: String,

    /// Expected benefit
    pub benefit: String,

    /// Descriptive frequency
    pub frequency: String,
}

impl Default for HabitDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            emoji: DEFAULT_EMOJI.to_string(),
            description: String::new(),
            time_slots: vec![DEFAULT_TIME_SLOT.to_string()],
            selected_days: Vec::new(),
            goal_days: None,
            category: String::new(),
            benefit: String::new(),
            frequency: String::new(),
        }
    }
}

impl HabitDraft {
    /// Start a draft with a title and defaults for everything else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the fields a habit cannot be saved without.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::EmptyTitle);
        }

        match self.goal_days {
            Some(goal) if goal < MIN_GOAL_DAYS => Err(CoreError::InvalidGoal(goal)),
            _ => Ok(()),
        }
    }

    /// Build a fresh habit: empty records, zero streak, tracking from `now`.
    pub fn into_habit(self, owner: impl Into<String>, now: Time) -> Result<Habit> {
        self.validate()?;
        Ok(Habit {
            id: HabitId::new(),
            owner: owner.into(),
            title: self.title,
            emoji: self.emoji,
            description: self.description,
            time_slots: self.time_slots,
            selected_days: self.selected_days,
            daily_records: BTreeMap::new(),
            streak_days: 0,
            goal_days: self.goal_days,
            start_date: now,
            category: self.category,
            benefit: self.benefit,
            frequency: self.frequency,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the editable fields of an existing habit.
    ///
    /// Identity, start date, streak counter and daily records are kept.
    pub fn apply_to(self, habit: &mut Habit, now: Time) -> Result<()> {
        self.validate()?;
        habit.title = self.title;
        habit.emoji = self.emoji;
        habit.description = self.description;
        habit.time_slots = self.time_slots;
        habit.selected_days = self.selected_days;
        habit.goal_days = self.goal_days;
        habit.category = self.category;
        habit.benefit = self.benefit;
        habit.frequency = self.frequency;
        habit.updated_at = now;
        Ok(())
    }
}

impl From<&Habit> for HabitDraft {
    fn from(habit: &Habit) -> Self {
        Self {
            title: habit.title.clone(),
            emoji: habit.emoji.clone(),
            description: habit.description.clone(),
            time_slots: habit.time_slots.clone(),
            selected_days: habit.selected_days.clone(),
            goal_days: habit.goal_days,
            category: habit.category.clone(),
            benefit: habit.benefit.clone(),
            frequency: habit.frequency.clone(),
        }
    }
}
