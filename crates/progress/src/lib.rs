//! Habit progress computation.
//!
//! Turns a sparse per-day completion record into success/miss counts,
//! milestone progress, monthly trends and reports. All functions are pure
//! and recomputed on demand.

#![warn(missing_docs)]

pub mod calculator;
pub mod timeline;
pub mod trend;
pub mod report;

pub use calculator::{
    counts_for, day_status, days_remaining, elapsed_days, fraction_for, in_month, is_active_on,
    milestone_set, milestones_for, missed_since_start, progress_fraction, recorded_misses,
    remaining_for, successes, total_counts, DayCounts, Milestone, OPEN_ENDED_MILESTONES,
};
pub use timeline::{target_completion, HabitDetails, HabitTimeline, TimelineMilestone};
pub use trend::{
    color_for, monthly_trend, recent_months, TrendPoint, TrendSeries, DEFAULT_TREND_MONTHS,
    PALETTE,
};
pub use report::{
    day_summary, monthly_report, monthly_report_with, score_message, DaySummary, HabitRate,
    MonthlyReport, REPORT_TOP_N,
};
