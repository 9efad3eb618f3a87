//! Habit tracker core data models.
//!
//! This crate defines the habit record, its schedule and the editable
//! draft used to create and edit habits.

#![warn(missing_docs)]

mod id;
mod error;
mod weekday;
mod habit;
mod draft;
mod template;

pub use id::HabitId;
pub use error::{CoreError, Result};
pub use weekday::DayOfWeek;
pub use habit::{Habit, DayStatus};
pub use draft::{HabitDraft, DEFAULT_EMOJI, DEFAULT_TIME_SLOT, MIN_GOAL_DAYS};
pub use template::{Template, templates, template};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
