//! Errors raised while building or parsing core model values.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing habit model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Weekday name did not match any of the seven days
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    /// Habit title was empty or whitespace
    #[error("Habit title must not be empty")]
    EmptyTitle,

    /// Goal length below the two-day minimum
    #[error("Goal days must be at least 2, got {0}")]
    InvalidGoal(u32),

    /// No preset template with this id
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}
