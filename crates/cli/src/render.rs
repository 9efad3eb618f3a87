//! Text and JSON output for the CLI commands.

use anyhow::Result;
use chrono::NaiveDate;
use habit_core::{DayStatus, Habit};
use habit_progress::{
    day_status, is_active_on, DaySummary, HabitDetails, HabitTimeline, MonthlyReport, TrendSeries,
};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `value` as JSON when requested, otherwise run the text renderer.
pub fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce()) -> Result<()> {
    if json {
        print_json(value)
    } else {
        text();
        Ok(())
    }
}

pub fn print_templates() {
    for template in habit_core::templates() {
        println!("{} - {}", template.id, template.title);
        println!("  {}", template.description);
        for draft in &template.habits {
            println!("    {} {}", draft.emoji, draft.title);
        }
    }
}

fn status_mark(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Completed => "[x]",
        DayStatus::Missed => "[-]",
        DayStatus::Unrecorded => "[ ]",
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

fn print_timeline(timeline: &HabitTimeline) {
    println!(
        "  {} {:.0}%",
        progress_bar(timeline.progress, 30),
        timeline.percent()
    );
    let markers: Vec<String> = timeline
        .milestones
        .iter()
        .map(|m| {
            if m.reached {
                format!("*{}", m.label)
            } else {
                m.label.to_string()
            }
        })
        .collect();
    println!("  Milestones: {}", markers.join(" | "));

    match timeline.days_remaining {
        Some(0) => println!("  Goal achieved"),
        Some(days) => println!("  {} days to goal", days),
        None => {}
    }
    if let Some(delayed) = timeline.delayed_days() {
        println!("  {} days delayed", delayed);
    }
}

pub fn print_habit_list(habits: &[Habit], today: NaiveDate) {
    if habits.is_empty() {
        println!("No habits yet");
        return;
    }

    let weekday = habit_core::DayOfWeek::of(today);
    for habit in habits {
        let mark = if is_active_on(habit, weekday) {
            status_mark(day_status(habit, today))
        } else {
            "   "
        };
        println!("{} {} {} ({})", mark, habit.emoji, habit.title, habit.id);

        let timeline = HabitTimeline::from_records(habit);
        println!(
            "  {} days completed, {} missed",
            timeline.success_days, timeline.missed_days
        );
        print_timeline(&timeline);
    }
}

pub fn print_details(habit: &Habit, details: &HabitDetails) {
    println!("{} {}", habit.emoji, habit.title);
    if !habit.description.is_empty() {
        println!("{}", habit.description);
    }
    let days: Vec<&str> = habit.selected_days.iter().map(|d| d.short()).collect();
    println!("Days: {}", days.join(", "));
    if !habit.time_slots.is_empty() {
        println!("Time: {}", habit.time_slots.join(", "));
    }
    println!("Started: {}", habit.start_date.date_naive());
    match details.target_completion {
        Some(date) => println!("Target completion: {}", date),
        None => println!("Target completion: open-ended"),
    }
    println!();
    println!("Total days:   {}", details.total_days);
    println!("Success days: {}", details.success_days);
    println!("Missed days:  {}", details.missed_days);
    print_timeline(&details.timeline);
}

pub fn print_day(habits: &[Habit], summary: &DaySummary) {
    println!("{} ({})", summary.date, summary.weekday);
    println!(
        "{} scheduled, {} completed, {} remaining",
        summary.scheduled.len(),
        summary.completed,
        summary.remaining
    );
    for id in &summary.scheduled {
        if let Some(habit) = habits.iter().find(|h| h.id == *id) {
            let times = habit.time_slots.join(", ");
            println!(
                "  {} {} {} {}",
                status_mark(day_status(habit, summary.date)),
                times,
                habit.emoji,
                habit.title
            );
        }
    }
}

pub fn print_report(report: &MonthlyReport) {
    println!("Report for {}-{:02}", report.year, report.month);
    println!(
        "Completed: {}  Missed: {}  Score: {}/10",
        report.totals.successes, report.totals.misses, report.overall_score
    );
    println!("{}", report.message());

    if !report.best.is_empty() {
        println!();
        println!("Best performing:");
        for rate in &report.best {
            println!("  {} {} {:.0}%", rate.emoji, rate.title, rate.success_rate * 100.0);
        }
    }
    if !report.needs_improvement.is_empty() {
        println!("Needs improvement:");
        for rate in &report.needs_improvement {
            println!("  {} {} {:.0}%", rate.emoji, rate.title, rate.success_rate * 100.0);
        }
    }
}

pub fn print_trend(series: &[TrendSeries]) {
    for line in series {
        println!("{} ({})", line.title, line.color);
        for point in &line.points {
            println!(
                "  {}-{:02} {:>3.0}% {}",
                point.year,
                point.month,
                point.success_rate * 100.0,
                progress_bar(point.success_rate, 20)
            );
        }
    }
}
