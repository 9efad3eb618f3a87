//! Habit tracking service.
//!
//! Session handling, configuration and the habit mutations (create, edit,
//! delete, completion toggle) on top of a [`habit_storage::Storage`].

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod manager;

pub use config::{ConfigError, TrackerConfig};
pub use context::{AuthError, Session, User};
pub use manager::{HabitTracker, Result, ToggleOutcome, TrackerError};
