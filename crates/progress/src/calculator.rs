//! Day- and period-level statistics derived from a habit's record.
//!
//! Every function here is pure: it reads a [`Habit`] and returns plain values.
//! Nothing is cached, callers recompute on every render.

use chrono::{Datelike, NaiveDate};
use habit_core::{DayOfWeek, DayStatus, Habit, Time};
use serde::Serialize;

/// Counts of completed and missed days among some set of dates.
///
/// Unrecorded days never contribute to either side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayCounts {
    /// Days recorded as completed
    pub successes: u32,
    /// Days recorded as missed
    pub misses: u32,
}

impl DayCounts {
    /// Recorded days, the denominator of the success rate.
    pub fn total(&self) -> u32 {
        self.successes + self.misses
    }

    /// Fraction of recorded days that were completed, in `[0, 1]`.
    ///
    /// Zero when nothing was recorded.
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.successes as f64 / total as f64,
        }
    }

    /// Success rate as a percentage.
    pub fn percent(&self) -> f64 {
        self.success_rate() * 100.0
    }
}

impl std::ops::Add for DayCounts {
    type Output = DayCounts;

    fn add(self, other: DayCounts) -> DayCounts {
        DayCounts {
            successes: self.successes + other.successes,
            misses: self.misses + other.misses,
        }
    }
}

impl std::ops::AddAssign for DayCounts {
    fn add_assign(&mut self, other: DayCounts) {
        *self = *self + other;
    }
}

/// A labelled point on the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Successful days needed to reach it
    pub days: u32,
    /// Display label
    pub label: &'static str,
}

/// Milestones of a habit without a fixed goal.
pub const OPEN_ENDED_MILESTONES: [Milestone; 3] = [
    Milestone { days: 10, label: "On Track" },
    Milestone { days: 21, label: "New Habit" },
    Milestone { days: 200, label: "For Life" },
];

/// Progress of an open-ended habit once a threshold is reached, highest first.
const OPEN_ENDED_LADDER: [(u32, f64); 3] = [(200, 1.0), (21, 0.6), (10, 0.3)];

/// Successful days covered by the initial linear ramp.
const RAMP_DAYS: u32 = 10;

/// Progress reached at the end of the ramp.
const RAMP_FRACTION: f64 = 0.3;

/// Whether the habit is scheduled on this weekday.
pub fn is_active_on(habit: &Habit, day: DayOfWeek) -> bool {
    habit.selected_days.contains(&day)
}

/// Status of a single date.
pub fn day_status(habit: &Habit, date: NaiveDate) -> DayStatus {
    DayStatus::from_record(habit.record_on(date))
}

/// Count completed and missed records among dates accepted by `predicate`.
pub fn counts_for<P>(habit: &Habit, predicate: P) -> DayCounts
where
    P: Fn(NaiveDate) -> bool,
{
    habit
        .daily_records
        .iter()
        .filter(|(date, _)| predicate(**date))
        .fold(DayCounts::default(), |mut acc, (_, completed)| {
            if *completed {
                acc.successes += 1;
            } else {
                acc.misses += 1;
            }
            acc
        })
}

/// Counts over the whole history.
pub fn total_counts(habit: &Habit) -> DayCounts {
    counts_for(habit, |_| true)
}

/// Predicate matching dates in calendar `month` (1-12) of `year`.
pub fn in_month(year: i32, month: u32) -> impl Fn(NaiveDate) -> bool {
    move |date| date.year() == year && date.month() == month
}

/// Completed days in the whole history.
///
/// This is the derived count; it can differ from the stored `streak_days`.
pub fn successes(habit: &Habit) -> u32 {
    total_counts(habit).successes
}

/// Missed days actually recorded in the whole history.
///
/// The list and timeline views show this figure.
pub fn recorded_misses(habit: &Habit) -> u32 {
    total_counts(habit).misses
}

/// Whole days between the habit's start and `as_of`, never negative.
pub fn elapsed_days(habit: &Habit, as_of: Time) -> u32 {
    let days = (as_of - habit.start_date).num_days();
    u32::try_from(days).unwrap_or(0)
}

/// Missed days estimated from the stored counter: `elapsed - streak_days`.
///
/// The detail view shows this figure. It is not a count of missed records and
/// can disagree with [`recorded_misses`] for the same habit.
pub fn missed_since_start(habit: &Habit, as_of: Time) -> u32 {
    elapsed_days(habit, as_of).saturating_sub(habit.streak_days)
}

/// Milestones for a goal length, ascending by days.
///
/// Strictly ascending unless the goal is a single day, where "Start" and
/// "Halfway" both sit at day 0.
pub fn milestones_for(goal_days: Option<u32>) -> [Milestone; 3] {
    match goal_days {
        Some(goal) if goal > 0 => [
            Milestone { days: 0, label: "Start" },
            Milestone { days: goal / 2, label: "Halfway" },
            Milestone { days: goal, label: "Goal" },
        ],
        _ => OPEN_ENDED_MILESTONES,
    }
}

/// Milestones shown on a habit's progress bar, ascending by days.
pub fn milestone_set(habit: &Habit) -> [Milestone; 3] {
    milestones_for(habit.goal_days)
}

/// Progress in `[0, 1]` for a number of successful days.
///
/// With a goal this is linear and capped at 1. Without one it follows the
/// milestone ladder: a ramp to 0.3 over the first ten days, then flat steps.
pub fn fraction_for(success_days: u32, goal_days: Option<u32>) -> f64 {
    match goal_days {
        Some(goal) if goal > 0 => (success_days as f64 / goal as f64).min(1.0),
        _ => OPEN_ENDED_LADDER
            .iter()
            .find(|(threshold, _)| success_days >= *threshold)
            .map(|(_, fraction)| *fraction)
            .unwrap_or(success_days as f64 / RAMP_DAYS as f64 * RAMP_FRACTION),
    }
}

/// Progress of a habit, counting completed records.
pub fn progress_fraction(habit: &Habit) -> f64 {
    fraction_for(successes(habit), habit.goal_days)
}

/// Days still needed to reach the goal for a number of successful days.
pub fn remaining_for(success_days: u32, goal_days: Option<u32>) -> Option<u32> {
    match goal_days {
        Some(goal) if goal > 0 => Some(goal.saturating_sub(success_days)),
        _ => None,
    }
}

/// Days still needed to reach the goal; `None` for open-ended habits.
pub fn days_remaining(habit: &Habit) -> Option<u32> {
    remaining_for(successes(habit), habit.goal_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit_with(records: &[(NaiveDate, bool)]) -> Habit {
        let mut habit = Habit::new("test@example.com", "Test habit");
        for (d, completed) in records {
            habit.record(*d, *completed);
        }
        habit
    }

    fn with_successes(n: u32) -> Habit {
        let start = date(2024, 1, 1);
        let records: Vec<_> = (0..n)
            .map(|i| (start + Duration::days(i as i64), true))
            .collect();
        habit_with(&records)
    }

    #[test]
    fn test_is_active_on() {
        let habit = Habit::new("a@b.c", "Gym").with_days([DayOfWeek::Monday, DayOfWeek::Friday]);
        assert!(is_active_on(&habit, DayOfWeek::Monday));
        assert!(!is_active_on(&habit, DayOfWeek::Tuesday));

        let never = Habit::new("a@b.c", "Nothing");
        assert!(DayOfWeek::ALL.iter().all(|d| !is_active_on(&never, *d)));
    }

    #[test]
    fn test_day_status_three_states() {
        let habit = habit_with(&[(date(2024, 3, 1), true), (date(2024, 3, 2), false)]);
        assert_eq!(day_status(&habit, date(2024, 3, 1)), DayStatus::Completed);
        assert_eq!(day_status(&habit, date(2024, 3, 2)), DayStatus::Missed);
        assert_eq!(day_status(&habit, date(2024, 3, 3)), DayStatus::Unrecorded);
    }

    #[test]
    fn test_counts_for_month_and_rate() {
        // Scenario C
        let habit = habit_with(&[(date(2024, 3, 1), true), (date(2024, 3, 2), false)]);
        let counts = counts_for(&habit, in_month(2024, 3));
        assert_eq!(counts, DayCounts { successes: 1, misses: 1 });
        assert_eq!(counts.percent(), 50.0);
    }

    #[test]
    fn test_counts_respect_predicate() {
        let habit = habit_with(&[
            (date(2024, 2, 28), true),
            (date(2024, 3, 1), true),
            (date(2024, 3, 5), false),
            (date(2023, 3, 9), false),
        ]);
        let march = counts_for(&habit, in_month(2024, 3));
        assert_eq!(march, DayCounts { successes: 1, misses: 1 });
        assert!(march.total() as usize <= habit.daily_records.len());

        let all = total_counts(&habit);
        assert_eq!(all.total() as usize, habit.daily_records.len());
    }

    #[test]
    fn test_empty_rate_is_zero() {
        let counts = counts_for(&habit_with(&[]), |_| true);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.success_rate(), 0.0);
    }

    #[test]
    fn test_elapsed_days_floors() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let habit = Habit::new("a@b.c", "Read").with_start(start);

        let as_of = Utc.with_ymd_and_hms(2024, 3, 4, 17, 59, 0).unwrap();
        assert_eq!(elapsed_days(&habit, as_of), 2);

        let as_of = Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap();
        assert_eq!(elapsed_days(&habit, as_of), 3);

        let before = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(elapsed_days(&habit, before), 0);
    }

    #[test]
    fn test_missed_since_start_uses_stored_counter() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut habit = Habit::new("a@b.c", "Read").with_start(start);
        habit.streak_days = 4;
        // One explicit miss recorded, but the counter-based figure ignores it
        habit.record(date(2024, 3, 2), false);

        let as_of = start + Duration::days(10);
        assert_eq!(missed_since_start(&habit, as_of), 6);
        assert_eq!(recorded_misses(&habit), 1);

        habit.streak_days = 40;
        assert_eq!(missed_since_start(&habit, as_of), 0);
    }

    #[test]
    fn test_milestones_goal_based() {
        let habit = Habit::new("a@b.c", "Read").with_goal(90);
        let m = milestone_set(&habit);
        assert_eq!(m.map(|m| m.days), [0, 45, 90]);
        assert_eq!(m.map(|m| m.label), ["Start", "Halfway", "Goal"]);

        let odd = milestones_for(Some(7));
        assert_eq!(odd.map(|m| m.days), [0, 3, 7]);
    }

    #[test]
    fn test_milestones_open_ended() {
        let habit = Habit::new("a@b.c", "Read");
        let m = milestone_set(&habit);
        assert_eq!(m.map(|m| m.days), [10, 21, 200]);
        assert_eq!(m.map(|m| m.label), ["On Track", "New Habit", "For Life"]);
    }

    #[test]
    fn test_milestones_strictly_ascending() {
        let goals = std::iter::once(None).chain((habit_core::MIN_GOAL_DAYS..=400).map(Some));
        for goal in goals {
            let m = milestones_for(goal);
            assert!(m.windows(2).all(|w| w[0].days < w[1].days), "{:?}", goal);
        }
    }

    #[test]
    fn test_one_day_goal_collapses_halfway() {
        // Drafts reject it, but stored data may still carry a one-day goal
        let m = milestones_for(Some(1));
        assert_eq!(m.map(|m| m.days), [0, 0, 1]);
        assert_eq!(m.map(|m| m.label), ["Start", "Halfway", "Goal"]);
    }

    #[test]
    fn test_open_ended_ladder() {
        assert_eq!(fraction_for(0, None), 0.0);
        assert!((fraction_for(5, None) - 0.15).abs() < 1e-9);
        assert_eq!(fraction_for(10, None), 0.3);
        assert_eq!(fraction_for(20, None), 0.3);
        assert_eq!(fraction_for(21, None), 0.6);
        assert_eq!(fraction_for(199, None), 0.6);
        assert_eq!(fraction_for(200, None), 1.0);
        assert_eq!(fraction_for(500, None), 1.0);
    }

    #[test]
    fn test_progress_monotonic() {
        for goal in [None, Some(1), Some(10), Some(90)] {
            let mut last = 0.0;
            for n in 0..=250 {
                let f = fraction_for(n, goal);
                assert!(f >= last, "goal {:?} dropped at {}", goal, n);
                assert!((0.0..=1.0).contains(&f));
                last = f;
            }
        }
    }

    #[test]
    fn test_scenario_a_empty_goal() {
        let habit = habit_with(&[]).with_goal(90);
        assert_eq!(successes(&habit), 0);
        assert_eq!(progress_fraction(&habit), 0.0);
        assert_eq!(days_remaining(&habit), Some(90));
    }

    #[test]
    fn test_scenario_b_ten_days_open_ended() {
        let habit = with_successes(10);
        assert_eq!(counts_for(&habit, in_month(2024, 1)).percent(), 100.0);
        assert_eq!(progress_fraction(&habit), 0.3);
        assert_eq!(days_remaining(&habit), None);
    }

    #[test]
    fn test_scenario_d_over_goal() {
        let habit = with_successes(12).with_goal(10);
        assert_eq!(progress_fraction(&habit), 1.0);
        assert_eq!(days_remaining(&habit), Some(0));
    }

    #[test]
    fn test_progress_counts_records_not_streak() {
        let mut habit = with_successes(3).with_goal(10);
        habit.streak_days = 9;
        assert!((progress_fraction(&habit) - 0.3).abs() < 1e-9);
        assert_eq!(days_remaining(&habit), Some(7));
    }

    #[test]
    fn test_days_remaining_reaches_zero() {
        assert_eq!(remaining_for(9, Some(10)), Some(1));
        assert_eq!(remaining_for(10, Some(10)), Some(0));
        assert_eq!(remaining_for(11, Some(10)), Some(0));
        assert_eq!(remaining_for(11, Some(0)), None);
        assert_eq!(remaining_for(11, None), None);
    }
}
