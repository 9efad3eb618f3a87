//! Milestone timeline and per-habit detail views.

use chrono::{Duration, NaiveDate};
use habit_core::{Habit, Time};
use serde::Serialize;

use crate::calculator::{
    elapsed_days, fraction_for, milestones_for, missed_since_start, remaining_for, total_counts,
};

/// A milestone together with whether it has been passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineMilestone {
    /// Successful days needed
    pub days: u32,
    /// Display label
    pub label: &'static str,
    /// Reached; the zero-day start marker never counts as reached
    pub reached: bool,
}

/// Everything the progress bar of one habit displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitTimeline {
    /// Successful days the bar is drawn for
    pub success_days: u32,
    /// Missed days shown next to it
    pub missed_days: u32,
    /// Goal length, if any
    pub goal_days: Option<u32>,
    /// Markers, left to right
    pub milestones: Vec<TimelineMilestone>,
    /// Bar fill in `[0, 1]`
    pub progress: f64,
    /// Days left to the goal, `None` for open-ended habits
    pub days_remaining: Option<u32>,
}

impl HabitTimeline {
    /// Build a timeline from explicit success and miss figures.
    pub fn new(success_days: u32, missed_days: u32, goal_days: Option<u32>) -> Self {
        let milestones = milestones_for(goal_days)
            .into_iter()
            .map(|m| TimelineMilestone {
                days: m.days,
                label: m.label,
                reached: m.days != 0 && success_days >= m.days,
            })
            .collect();

        Self {
            success_days,
            missed_days,
            goal_days,
            milestones,
            progress: fraction_for(success_days, goal_days),
            days_remaining: remaining_for(success_days, goal_days),
        }
    }

    /// Timeline of the habit list: counts come straight from the records.
    pub fn from_records(habit: &Habit) -> Self {
        let counts = total_counts(habit);
        Self::new(counts.successes, counts.misses, habit.goal_days)
    }

    /// Timeline of the detail view: stored counter and the estimate derived from it.
    pub fn from_streak(habit: &Habit, as_of: Time) -> Self {
        Self::new(
            habit.streak_days,
            missed_since_start(habit, as_of),
            habit.goal_days,
        )
    }

    /// The goal exists and has been met.
    pub fn goal_achieved(&self) -> bool {
        self.days_remaining == Some(0)
    }

    /// Missed days reported as delaying an unmet goal.
    pub fn delayed_days(&self) -> Option<u32> {
        match self.days_remaining {
            Some(remaining) if remaining > 0 && self.missed_days > 0 => Some(self.missed_days),
            _ => None,
        }
    }

    /// Progress as a percentage.
    pub fn percent(&self) -> f64 {
        self.progress * 100.0
    }
}

/// Figures shown in a habit's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitDetails {
    /// Days since tracking began
    pub total_days: u32,
    /// Stored success counter
    pub success_days: u32,
    /// `total_days - success_days`, floored at 0
    pub missed_days: u32,
    /// Start date plus goal length
    pub target_completion: Option<NaiveDate>,
    /// Progress bar for the figures above
    pub timeline: HabitTimeline,
}

impl HabitDetails {
    /// Compute the detail view as of a moment.
    pub fn new(habit: &Habit, as_of: Time) -> Self {
        let timeline = HabitTimeline::from_streak(habit, as_of);
        Self {
            total_days: elapsed_days(habit, as_of),
            success_days: timeline.success_days,
            missed_days: timeline.missed_days,
            target_completion: target_completion(habit),
            timeline,
        }
    }
}

/// Date the goal would be reached with no missed day.
pub fn target_completion(habit: &Habit) -> Option<NaiveDate> {
    let goal = habit.goal_days.filter(|g| *g > 0)?;
    habit
        .start_date
        .checked_add_signed(Duration::days(i64::from(goal)))
        .map(|t| t.date_naive())
}
