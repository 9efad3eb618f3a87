//! Habit tracker CLI.

mod render;

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use habit_core::{DayOfWeek, HabitDraft, HabitId};
use habit_progress::{HabitDetails, HabitTimeline};
use habit_storage::JsonStorage;
use habit_tracker::{HabitTracker, TrackerConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "habit")]
#[command(about = "Track daily habits, streaks and monthly progress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON)
    #[arg(short, long, default_value = "habits.json")]
    config: std::path::PathBuf,

    /// Storage directory, overrides the config file
    #[arg(short, long)]
    storage: Option<std::path::PathBuf>,

    /// Account email
    #[arg(short, long, env = "HABIT_USER")]
    user: Option<String>,

    /// Account password
    #[arg(short, long, env = "HABIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new habit
    Add(HabitArgs),
    /// Edit an existing habit
    Edit {
        /// Habit ID
        id: HabitId,
        #[command(flatten)]
        fields: HabitArgs,
        /// Remove the goal, making the habit open-ended
        #[arg(long, conflicts_with = "goal")]
        no_goal: bool,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: HabitId,
    },
    /// List habits with their progress
    List,
    /// Show habit details
    Show {
        /// Habit ID
        id: HabitId,
    },
    /// Mark a day as completed
    Done {
        /// Habit ID
        id: HabitId,
        /// Day to mark, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark a day as missed
    Miss {
        /// Habit ID
        id: HabitId,
        /// Day to mark, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show habits scheduled for a day
    Today {
        /// Day to show, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Monthly report
    Report {
        /// Month (1-12), defaults to the current month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Monthly success-rate trend per habit
    Trend {
        /// Last month shown, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List preset templates
    Templates,
    /// Create the habits of a preset template
    UseTemplate {
        /// Template ID
        id: String,
    },
}

/// Habit fields settable from the command line.
#[derive(Args)]
struct HabitArgs {
    /// Habit title
    #[arg(long)]
    title: Option<String>,
    /// Display emoji
    #[arg(long)]
    emoji: Option<String>,
    /// Description
    #[arg(long)]
    description: Option<String>,
    /// Scheduled days, comma separated (e.g. mon,wed,fri)
    #[arg(long, value_delimiter = ',')]
    days: Option<Vec<DayOfWeek>>,
    /// Goal length in days
    #[arg(long)]
    goal: Option<u32>,
    /// Time slots, comma separated HH:MM
    #[arg(long, value_delimiter = ',')]
    time: Option<Vec<String>>,
    /// Category
    #[arg(long)]
    category: Option<String>,
    /// Expected benefit
    #[arg(long)]
    benefit: Option<String>,
    /// Frequency label
    #[arg(long)]
    frequency: Option<String>,
}

impl HabitArgs {
    /// Overlay the given fields on a draft.
    fn apply(self, draft: &mut HabitDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(emoji) = self.emoji {
            draft.emoji = emoji;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(days) = self.days {
            draft.selected_days = days;
        }
        if let Some(goal) = self.goal {
            draft.goal_days = Some(goal);
        }
        if let Some(time) = self.time {
            draft.time_slots = time;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(benefit) = self.benefit {
            draft.benefit = benefit;
        }
        if let Some(frequency) = self.frequency {
            draft.frequency = frequency;
        }
    }
}

impl Cli {
    /// Email and password for commands that need a signed-in session.
    fn credentials(&self) -> Result<(String, String)> {
        let user = self
            .user
            .clone()
            .ok_or_else(|| anyhow!("--user (or HABIT_USER) is required"))?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| anyhow!("--password (or HABIT_PASSWORD) is required"))?;
        Ok((user, password))
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    // Templates are static; no session or storage needed
    if let Commands::Templates = cli.command {
        render::print_templates();
        return Ok(());
    }
    let (user, password) = cli.credentials()?;

    let mut config = TrackerConfig::load(&cli.config).await?;
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }
    debug!(?config, "loaded configuration");

    let storage = JsonStorage::new(&config.storage_path).await?;
    let mut tracker = HabitTracker::new(storage, config);
    tracker.sign_in(&user, &password).await?;
    let json = cli.json;

    match cli.command {
        Commands::Add(fields) => {
            let title = fields
                .title
                .clone()
                .ok_or_else(|| anyhow!("--title is required"))?;
            let mut draft = HabitDraft::new(title);
            fields.apply(&mut draft);
            let habit = tracker.create(draft).await?;
            render::emit(json, &habit, || println!("Added habit: {} - {}", habit.id, habit.title))?;
        }
        Commands::Edit { id, fields, no_goal } => {
            let mut draft = HabitDraft::from(tracker.get(id)?);
            fields.apply(&mut draft);
            if no_goal {
                draft.goal_days = None;
            }
            let habit = tracker.edit(id, draft).await?;
            render::emit(json, &habit, || println!("Updated habit: {} - {}", habit.id, habit.title))?;
        }
        Commands::Delete { id } => {
            tracker.delete(id).await?;
            println!("Deleted habit {}", id);
        }
        Commands::List => {
            let habits = tracker.habits()?;
            if json {
                let rows: Vec<_> = habits
                    .iter()
                    .map(|h| serde_json::json!({ "habit": h, "timeline": HabitTimeline::from_records(h) }))
                    .collect();
                render::print_json(&rows)?;
            } else {
                render::print_habit_list(habits, today());
            }
        }
        Commands::Show { id } => {
            let habit = tracker.get(id)?;
            let details = HabitDetails::new(habit, Utc::now());
            render::emit(json, &details, || render::print_details(habit, &details))?;
        }
        Commands::Done { id, date } => {
            let outcome = tracker.toggle_completion(id, true, date.unwrap_or_else(today)).await?;
            render::emit(json, &outcome, || println!("{}", outcome.message))?;
        }
        Commands::Miss { id, date } => {
            let outcome = tracker.toggle_completion(id, false, date.unwrap_or_else(today)).await?;
            render::emit(json, &outcome, || println!("{}", outcome.message))?;
        }
        Commands::Today { date } => {
            let summary = tracker.day_summary(date.unwrap_or_else(today))?;
            render::emit(json, &summary, || render::print_day(tracker.habits().unwrap_or(&[]), &summary))?;
        }
        Commands::Report { month, year } => {
            let now = today();
            let report = tracker.monthly_report(
                month.unwrap_or_else(|| now.month()),
                year.unwrap_or_else(|| now.year()),
            )?;
            render::emit(json, &report, || render::print_report(&report))?;
        }
        Commands::Trend { date } => {
            let series = tracker.trend(date.unwrap_or_else(today))?;
            render::emit(json, &series, || render::print_trend(&series))?;
        }
        Commands::Templates => render::print_templates(),
        Commands::UseTemplate { id } => {
            let created = tracker.create_from_template(&id).await?;
            info!("Template {} added {} habits", id, created.len());
            render::emit(json, &created, || {
                for habit in &created {
                    println!("Added habit: {} - {}", habit.id, habit.title);
                }
            })?;
        }
    }

    Ok(())
}
