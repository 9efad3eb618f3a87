//! Monthly report and daily summary across all habits.

use chrono::NaiveDate;
use habit_core::{DayOfWeek, DayStatus, Habit, HabitId};
use serde::Serialize;
use tracing::debug;

use crate::calculator::{counts_for, day_status, in_month, is_active_on, DayCounts};

/// Habits listed in each ranking of the report.
pub const REPORT_TOP_N: usize = 3;

/// A habit's success rate within the reported month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitRate {
    /// Habit id
    pub habit_id: HabitId,
    /// Habit title
    pub title: String,
    /// Habit emoji
    pub emoji: String,
    /// Success rate in `[0, 1]`
    pub success_rate: f64,
}

/// Aggregate results of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// Reported year
    pub year: i32,
    /// Reported month, 1-12
    pub month: u32,
    /// Completed and missed days summed over all habits
    pub totals: DayCounts,
    /// Overall score out of 10
    pub overall_score: u32,
    /// Highest success rates first
    pub best: Vec<HabitRate>,
    /// Lowest success rates first
    pub needs_improvement: Vec<HabitRate>,
}

impl MonthlyReport {
    /// Encouragement for the overall score.
    pub fn message(&self) -> &'static str {
        score_message(self.overall_score)
    }
}

/// Report for `month` of `year` with the default ranking size.
pub fn monthly_report(habits: &[Habit], month: u32, year: i32) -> MonthlyReport {
    monthly_report_with(habits, month, year, REPORT_TOP_N)
}

/// Report for `month` of `year`, listing up to `top_n` habits per ranking.
pub fn monthly_report_with(habits: &[Habit], month: u32, year: i32, top_n: usize) -> MonthlyReport {
    let mut totals = DayCounts::default();
    let mut ranked: Vec<HabitRate> = habits
        .iter()
        .map(|habit| {
            let counts = counts_for(habit, in_month(year, month));
            totals += counts;
            HabitRate {
                habit_id: habit.id,
                title: habit.title.clone(),
                emoji: habit.emoji.clone(),
                success_rate: counts.success_rate(),
            }
        })
        .collect();

    // Stable, so ties keep input order
    ranked.sort_by(|a, b| b.success_rate.total_cmp(&a.success_rate));

    let overall_score = (totals.success_rate() * 10.0).round() as u32;
    debug!(year, month, score = overall_score, "monthly report");

    MonthlyReport {
        year,
        month,
        totals,
        overall_score,
        best: ranked.iter().take(top_n).cloned().collect(),
        needs_improvement: ranked.iter().rev().take(top_n).cloned().collect(),
    }
}

/// Encouragement shown with a monthly score.
pub fn score_message(score: u32) -> &'static str {
    match score {
        9.. => "Exceptional month! You're crushing your goals! 🌟",
        7..=8 => "Great progress! Keep up the momentum! 💪",
        5..=6 => "Steady progress. Room for improvement! 🎯",
        3..=4 => "Keep pushing! Small steps lead to big changes. 🌱",
        _ => "Don't give up! Every day is a new opportunity. ✨",
    }
}

/// What is scheduled and done on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// The day
    pub date: NaiveDate,
    /// Its weekday
    pub weekday: DayOfWeek,
    /// Habits active on that weekday
    pub scheduled: Vec<HabitId>,
    /// Scheduled habits recorded as completed that day
    pub completed: usize,
    /// Scheduled habits not yet completed that day
    pub remaining: usize,
}

/// Summarize the habits scheduled on `date`.
pub fn day_summary(habits: &[Habit], date: NaiveDate) -> DaySummary {
    let weekday = DayOfWeek::of(date);
    let scheduled: Vec<&Habit> = habits.iter().filter(|h| is_active_on(h, weekday)).collect();
    let completed = scheduled
        .iter()
        .filter(|h| day_status(h, date) == DayStatus::Completed)
        .count();

    DaySummary {
        date,
        weekday,
        remaining: scheduled.len() - completed,
        completed,
        scheduled: scheduled.iter().map(|h| h.id).collect(),
    }
}
