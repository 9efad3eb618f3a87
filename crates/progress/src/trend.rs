//! Monthly success-rate series for the multi-habit line chart.

use chrono::{Datelike, NaiveDate};
use habit_core::{Habit, HabitId};
use serde::Serialize;
use tracing::debug;

use crate::calculator::{counts_for, in_month};

/// Fixed habit colors, assigned by list position.
pub const PALETTE: [&str; 10] = [
    "#FF8C00", // Dark Orange
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#FF5252", // Red
    "#00BCD4", // Cyan
    "#795548", // Brown
    "#607D8B", // Blue Grey
    "#FFC107", // Amber
    "#673AB7", // Deep Purple
];

/// Months shown on the chart by default.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Color for the habit at `index` in the displayed list.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One month on a habit's series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Success rate within the month, `[0, 1]`
    pub success_rate: f64,
}

/// The series of one habit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    /// Habit the series belongs to
    pub habit_id: HabitId,
    /// Legend label
    pub title: String,
    /// Line color
    pub color: &'static str,
    /// Points, oldest month first
    pub points: Vec<TrendPoint>,
}

/// `(year, month)` pairs for the `months_back` months ending with the month of
/// `as_of`, oldest first.
pub fn recent_months(as_of: NaiveDate, months_back: u32) -> Vec<(i32, u32)> {
    let current = as_of.year() * 12 + as_of.month0() as i32;
    (0..months_back as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

/// Per-habit monthly success rates, one series per habit in input order.
pub fn monthly_trend(habits: &[Habit], as_of: NaiveDate, months_back: u32) -> Vec<TrendSeries> {
    let months = recent_months(as_of, months_back);
    debug!(habits = habits.len(), months = months.len(), "computing monthly trend");

    habits
        .iter()
        .enumerate()
        .map(|(index, habit)| TrendSeries {
            habit_id: habit.id,
            title: habit.title.clone(),
            color: color_for(index),
            points: months
                .iter()
                .map(|&(year, month)| TrendPoint {
                    year,
                    month,
                    success_rate: counts_for(habit, in_month(year, month)).success_rate(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_recent_months_cross_year() {
        let months = recent_months(date(2024, 2, 15), 6);
        assert_eq!(
            months,
            vec![(2023, 9), (2023, 10), (2023, 11), (2023, 12), (2024, 1), (2024, 2)]
        );
        assert!(recent_months(date(2024, 2, 15), 0).is_empty());
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(color_for(0), "#FF8C00");
        assert_eq!(color_for(9), "#673AB7");
        assert_eq!(color_for(10), color_for(0));
        assert_eq!(color_for(23), color_for(3));
    }

    #[test]
    fn test_colors_follow_position() {
        // Scenario E
        let habits = vec![
            Habit::new("a@b.c", "One"),
            Habit::new("a@b.c", "Two"),
            Habit::new("a@b.c", "Three"),
        ];
        let as_of = date(2024, 3, 10);
        let first = monthly_trend(&habits, as_of, DEFAULT_TREND_MONTHS);
        let second = monthly_trend(&habits, as_of, DEFAULT_TREND_MONTHS);

        let colors: Vec<_> = first.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![PALETTE[0], PALETTE[1], PALETTE[2]]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_monthly_rates() {
        let mut habit = Habit::new("a@b.c", "Run");
        habit.record(date(2024, 1, 3), true);
        habit.record(date(2024, 1, 4), false);
        habit.record(date(2024, 1, 5), false);
        habit.record(date(2024, 1, 6), true);
        habit.record(date(2024, 3, 1), true);

        let series = monthly_trend(&[habit], date(2024, 3, 20), 3);
        assert_eq!(series.len(), 1);
        let rates: Vec<_> = series[0]
            .points
            .iter()
            .map(|p| (p.month, p.success_rate))
            .collect();
        assert_eq!(rates, vec![(1, 0.5), (2, 0.0), (3, 1.0)]);
    }
}
