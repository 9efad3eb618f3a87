//! Habit model - one tracked behavior with its schedule and daily record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::HabitId;
use crate::weekday::DayOfWeek;
use crate::Time;

/// A habit the user tracks day by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: HabitId,

    /// Email of the user owning this habit
    #[serde(default)]
    pub owner: String,

    /// Habit title
    pub title: String,

    /// Display emoji
    pub emoji: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Times of day the habit is planned for, `HH:MM`
    #[serde(default)]
    pub time_slots: Vec<String>,

    /// Weekdays on which the habit is active
    #[serde(default)]
    pub selected_days: Vec<DayOfWeek>,

    /// Per-day completion flags; a missing key means no record
    #[serde(default)]
    pub daily_records: BTreeMap<NaiveDate, bool>,

    /// Counter bumped by every successful completion toggle
    #[serde(default)]
    pub streak_days: u32,

    /// Target number of successful days; `None` for a life-long habit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_days: Option<u32>,

    /// When tracking began
    pub start_date: Time,

    /// Descriptive category
    #[serde(default)]
    pub category: String,

    /// Expected benefit
    #[serde(default)]
    pub benefit: String,

    /// Descriptive frequency (daily, weekly, ...)
    #[serde(default)]
    pub frequency: String,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Habit {
    /// Create an empty habit starting now.
    pub fn new(owner: impl Into<String>, title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: HabitId::new(),
            owner: owner.into(),
            title: title.into(),
            emoji: crate::draft::DEFAULT_EMOJI.to_string(),
            description: String::new(),
            time_slots: vec![crate::draft::DEFAULT_TIME_SLOT.to_string()],
            selected_days: Vec::new(),
            daily_records: BTreeMap::new(),
            streak_days: 0,
            goal_days: None,
            start_date: now,
            category: String::new(),
            benefit: String::new(),
            frequency: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the active weekdays.
    pub fn with_days(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.selected_days = days.into_iter().collect();
        self
    }

    /// Set a fixed goal length.
    pub fn with_goal(mut self, goal_days: u32) -> Self {
        self.goal_days = Some(goal_days);
        self
    }

    /// Set the tracking start.
    pub fn with_start(mut self, start: Time) -> Self {
        self.start_date = start;
        self
    }

    /// Write one day's record, replacing any previous value for that date.
    pub fn record(&mut self, date: NaiveDate, completed: bool) {
        self.daily_records.insert(date, completed);
    }

    /// Raw record for a date.
    pub fn record_on(&self, date: NaiveDate) -> Option<bool> {
        self.daily_records.get(&date).copied()
    }

    /// Whether the habit has a fixed-duration goal.
    pub fn is_open_ended(&self) -> bool {
        !matches!(self.goal_days, Some(g) if g > 0)
    }
}

/// The state of a single calendar day for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayStatus {
    /// Record exists and is `true`
    Completed,
    /// Record exists and is `false`
    Missed,
    /// No record for that day
    Unrecorded,
}

impl DayStatus {
    /// Map a raw record lookup to a status.
    pub fn from_record(record: Option<bool>) -> Self {
        match record {
            Some(true) => DayStatus::Completed,
            Some(false) => DayStatus::Missed,
            None => DayStatus::Unrecorded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_habit_is_empty() {
        let habit = Habit::new("a@b.c", "Read");
        assert!(habit.daily_records.is_empty());
        assert_eq!(habit.streak_days, 0);
        assert!(habit.is_open_ended());
    }

    #[test]
    fn test_new_habit_matches_draft_defaults() {
        let habit = Habit::new("a@b.c", "Read");
        let draft = crate::HabitDraft::new("Read");
        assert_eq!(habit.emoji, draft.emoji);
        assert_eq!(habit.time_slots, draft.time_slots);
        assert_eq!(habit.time_slots, vec!["09:00".to_string()]);
    }

    #[test]
    fn test_record_overwrites_same_day() {
        let mut habit = Habit::new("a@b.c", "Read");
        habit.record(date(2024, 3, 1), false);
        habit.record(date(2024, 3, 1), true);
        assert_eq!(habit.daily_records.len(), 1);
        assert_eq!(habit.record_on(date(2024, 3, 1)), Some(true));
        assert_eq!(habit.record_on(date(2024, 3, 2)), None);
    }

    #[test]
    fn test_day_status_from_record() {
        assert_eq!(DayStatus::from_record(Some(true)), DayStatus::Completed);
        assert_eq!(DayStatus::from_record(Some(false)), DayStatus::Missed);
        assert_eq!(DayStatus::from_record(None), DayStatus::Unrecorded);
    }

    #[test]
    fn test_zero_goal_counts_as_open_ended() {
        let mut habit = Habit::new("a@b.c", "Read");
        habit.goal_days = Some(0);
        assert!(habit.is_open_ended());
        assert!(!habit.with_goal(30).is_open_ended());
    }

    #[test]
    fn test_json_uses_iso_date_keys() {
        let mut habit = Habit::new("a@b.c", "Read").with_days([DayOfWeek::Monday]);
        habit.record(date(2024, 3, 1), true);
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["daily_records"]["2024-03-01"], serde_json::json!(true));
        assert_eq!(json["selected_days"][0], serde_json::json!("Monday"));
        assert!(json.get("goal_days").is_none());

        let back: Habit = serde_json::from_value(json).unwrap();
        assert_eq!(back, habit);
    }

    #[test]
    fn test_malformed_date_key_is_rejected() {
        let mut json = serde_json::to_value(Habit::new("a@b.c", "Read")).unwrap();
        json["daily_records"] = serde_json::json!({ "2024-13-45": true });
        assert!(serde_json::from_value::<Habit>(json).is_err());
    }
}
