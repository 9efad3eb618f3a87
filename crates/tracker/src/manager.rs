//! Habit tracking service: the mutations behind the user's actions.

use chrono::{NaiveDate, Utc};
use habit_core::{CoreError, DayOfWeek, Habit, HabitDraft, HabitId};
use habit_progress::{DaySummary, MonthlyReport, TrendSeries};
use habit_storage::{Storage, StorageError};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::context::{AuthError, Session, User};

/// Result alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors from tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Operation needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Authentication failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No habit with this id belongs to the user
    #[error("Habit not found: {0}")]
    NotFound(HabitId),

    /// The habit is not scheduled on that day
    #[error("'{title}' is not scheduled on {day}")]
    NotScheduled {
        /// Habit title
        title: String,
        /// Weekday of the attempted toggle
        day: DayOfWeek,
    },

    /// Invalid habit data
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What a completion toggle did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleOutcome {
    /// The habit after the update
    pub habit: Habit,
    /// Whether the day was marked completed
    pub success: bool,
    /// Feedback for the user
    pub message: String,
}

/// Habit tracker bound to a store and a session.
pub struct HabitTracker<S: Storage> {
    storage: S,
    session: Session,
    config: TrackerConfig,
}

impl<S: Storage> HabitTracker<S> {
    /// Create a tracker with nobody signed in.
    pub fn new(storage: S, config: TrackerConfig) -> Self {
        Self {
            storage,
            session: Session::signed_out(config.min_password_len),
            config,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Sign in and load the user's habits.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self.session.sign_in(email, password)?.clone();
        self.load_habits(&user).await?;
        info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// Register and load the (usually empty) habit list.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self.session.sign_up(email, password)?.clone();
        self.load_habits(&user).await?;
        info!("Signed up as {}", user.email);
        Ok(user)
    }

    /// Sign out, dropping the loaded habits.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.session.user() {
            info!("Signed out {}", user.email);
        }
        self.session.sign_out();
    }

    async fn load_habits(&mut self, user: &User) -> Result<()> {
        let habits = match self.storage.list_habits(&user.email).await {
            Ok(habits) => habits,
            Err(e) => {
                self.session.sign_out();
                return Err(e.into());
            }
        };
        debug!(count = habits.len(), "loaded habits");
        *self.session.habits_mut() = habits;
        Ok(())
    }

    fn owner(&self) -> Result<String> {
        self.session
            .user()
            .map(|u| u.email.clone())
            .ok_or(TrackerError::NotSignedIn)
    }

    fn position(&self, id: HabitId) -> Result<usize> {
        if !self.session.is_signed_in() {
            return Err(TrackerError::NotSignedIn);
        }
        self.session
            .habits()
            .iter()
            .position(|h| h.id == id)
            .ok_or(TrackerError::NotFound(id))
    }

    /// The user's habits in display order.
    pub fn habits(&self) -> Result<&[Habit]> {
        if !self.session.is_signed_in() {
            return Err(TrackerError::NotSignedIn);
        }
        Ok(self.session.habits())
    }

    /// One of the user's habits.
    pub fn get(&self, id: HabitId) -> Result<&Habit> {
        let index = self.position(id)?;
        Ok(&self.session.habits()[index])
    }

    /// Create a habit from a draft.
    pub async fn create(&mut self, draft: HabitDraft) -> Result<Habit> {
        let owner = self.owner()?;
        let habit = draft.into_habit(owner, Utc::now())?;
        self.storage.save_habit(&habit).await?;
        self.session.habits_mut().push(habit.clone());
        info!("Created habit {} ({})", habit.title, habit.id);
        Ok(habit)
    }

    /// Create every habit of a preset template.
    pub async fn create_from_template(&mut self, template_id: &str) -> Result<Vec<Habit>> {
        let template = habit_core::template(template_id)?;
        let mut created = Vec::with_capacity(template.habits.len());
        for draft in template.habits {
            created.push(self.create(draft).await?);
        }
        Ok(created)
    }

    /// Replace the editable fields of a habit, keeping its progress.
    pub async fn edit(&mut self, id: HabitId, draft: HabitDraft) -> Result<Habit> {
        let index = self.position(id)?;
        let mut habit = self.session.habits()[index].clone();
        draft.apply_to(&mut habit, Utc::now())?;
        self.storage.save_habit(&habit).await?;
        self.session.habits_mut()[index] = habit.clone();
        info!("Updated habit {}", habit.id);
        Ok(habit)
    }

    /// Remove a habit. Nothing else refers to it.
    pub async fn delete(&mut self, id: HabitId) -> Result<()> {
        let index = self.position(id)?;
        self.storage.delete_habit(id).await?;
        let removed = self.session.habits_mut().remove(index);
        info!("Deleted habit {} ({})", removed.title, id);
        Ok(())
    }

    /// Mark `today` as completed or missed.
    ///
    /// Only allowed on the habit's scheduled weekdays. A success also bumps the
    /// stored streak counter, every time it is recorded, even if the day was
    /// already marked completed.
    pub async fn toggle_completion(
        &mut self,
        id: HabitId,
        success: bool,
        today: NaiveDate,
    ) -> Result<ToggleOutcome> {
        let index = self.position(id)?;
        let mut habit = self.session.habits()[index].clone();

        let day = DayOfWeek::of(today);
        if !habit_progress::is_active_on(&habit, day) {
            return Err(TrackerError::NotScheduled {
                title: habit.title,
                day,
            });
        }

        habit.record(today, success);
        if success {
            habit.streak_days += 1;
        }
        habit.updated_at = Utc::now();

        self.storage.save_habit(&habit).await?;
        self.session.habits_mut()[index] = habit.clone();
        debug!(id = %id, %today, success, streak = habit.streak_days, "toggled completion");

        let message = if success {
            format!("Great job! {} days completed!", habit.streak_days)
        } else {
            format!(
                "Missed day recorded. {} total missed days",
                habit_progress::recorded_misses(&habit)
            )
        };

        Ok(ToggleOutcome {
            habit,
            success,
            message,
        })
    }

    /// Monthly report over the user's habits.
    pub fn monthly_report(&self, month: u32, year: i32) -> Result<MonthlyReport> {
        Ok(habit_progress::monthly_report_with(
            self.habits()?,
            month,
            year,
            self.config.report_top_n,
        ))
    }

    /// Success-rate series for the configured number of months up to `as_of`.
    pub fn trend(&self, as_of: NaiveDate) -> Result<Vec<TrendSeries>> {
        Ok(habit_progress::monthly_trend(
            self.habits()?,
            as_of,
            self.config.trend_months,
        ))
    }

    /// Habits scheduled on `date` and how many are done.
    pub fn day_summary(&self, date: NaiveDate) -> Result<DaySummary> {
        Ok(habit_progress::day_summary(self.habits()?, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_storage::MemoryStorage;

    // 2024-03-01 was a Friday
    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    async fn signed_in() -> HabitTracker<MemoryStorage> {
        let mut tracker = HabitTracker::new(MemoryStorage::new(), TrackerConfig::default());
        tracker.sign_in("me@example.com", "secret1").await.unwrap();
        tracker
    }

    fn friday_draft(title: &str) -> HabitDraft {
        let mut draft = HabitDraft::new(title);
        draft.selected_days = vec![DayOfWeek::Friday];
        draft
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let mut tracker = HabitTracker::new(MemoryStorage::new(), TrackerConfig::default());
        assert!(matches!(tracker.habits(), Err(TrackerError::NotSignedIn)));
        assert!(matches!(
            tracker.create(HabitDraft::new("Walk")).await,
            Err(TrackerError::NotSignedIn)
        ));
        assert!(matches!(
            tracker.sign_in("me@example.com", "123").await,
            Err(TrackerError::Auth(AuthError::WeakPassword(6)))
        ));
    }

    #[tokio::test]
    async fn test_create_edit_delete() {
        let mut tracker = signed_in().await;
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();
        assert_eq!(habit.owner, "me@example.com");
        assert_eq!(tracker.habits().unwrap().len(), 1);

        let mut draft = HabitDraft::from(&habit);
        draft.title = "Long walk".to_string();
        let edited = tracker.edit(habit.id, draft).await.unwrap();
        assert_eq!(edited.id, habit.id);
        assert_eq!(tracker.get(habit.id).unwrap().title, "Long walk");

        tracker.delete(habit.id).await.unwrap();
        assert!(tracker.habits().unwrap().is_empty());
        assert!(matches!(tracker.get(habit.id), Err(TrackerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_draft_rejected() {
        let mut tracker = signed_in().await;
        assert!(matches!(
            tracker.create(HabitDraft::new("")).await,
            Err(TrackerError::Core(CoreError::EmptyTitle))
        ));
    }

    #[tokio::test]
    async fn test_toggle_success_bumps_streak() {
        let mut tracker = signed_in().await;
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();

        let outcome = tracker.toggle_completion(habit.id, true, friday()).await.unwrap();
        assert_eq!(outcome.habit.streak_days, 1);
        assert_eq!(outcome.habit.record_on(friday()), Some(true));
        assert_eq!(outcome.message, "Great job! 1 days completed!");

        // Re-marking the same day counts again
        let again = tracker.toggle_completion(habit.id, true, friday()).await.unwrap();
        assert_eq!(again.habit.streak_days, 2);
        assert_eq!(habit_progress::successes(&again.habit), 1);
    }

    #[tokio::test]
    async fn test_toggle_miss_keeps_streak() {
        let mut tracker = signed_in().await;
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();

        let outcome = tracker.toggle_completion(habit.id, false, friday()).await.unwrap();
        assert_eq!(outcome.habit.streak_days, 0);
        assert_eq!(outcome.habit.record_on(friday()), Some(false));
        assert_eq!(outcome.message, "Missed day recorded. 1 total missed days");
    }

    #[tokio::test]
    async fn test_toggle_rejects_unscheduled_day() {
        let mut tracker = signed_in().await;
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();
        let saturday = friday().succ_opt().unwrap();

        let err = tracker.toggle_completion(habit.id, true, saturday).await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::NotScheduled { day: DayOfWeek::Saturday, .. }
        ));
        assert!(tracker.get(habit.id).unwrap().daily_records.is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_and_back_in_reloads() {
        let mut tracker = signed_in().await;
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();
        tracker.toggle_completion(habit.id, true, friday()).await.unwrap();

        tracker.sign_out();
        assert!(matches!(tracker.habits(), Err(TrackerError::NotSignedIn)));

        tracker.sign_in("other@example.com", "secret1").await.unwrap();
        assert!(tracker.habits().unwrap().is_empty());

        tracker.sign_in("me@example.com", "secret1").await.unwrap();
        let reloaded = tracker.get(habit.id).unwrap();
        assert_eq!(reloaded.streak_days, 1);
    }

    #[tokio::test]
    async fn test_template_and_stats() {
        let mut tracker = signed_in().await;
        let created = tracker.create_from_template("personal-development").await.unwrap();
        assert_eq!(created.len(), 2);

        // Personal development habits run Monday to Friday
        for habit in &created {
            tracker.toggle_completion(habit.id, true, friday()).await.unwrap();
        }

        let summary = tracker.day_summary(friday()).unwrap();
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.remaining, 0);

        let report = tracker.monthly_report(3, 2024).unwrap();
        assert_eq!(report.overall_score, 10);

        let trend = tracker.trend(friday()).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].points.len(), 6);
    }

    #[tokio::test]
    async fn test_persists_to_json_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = habit_storage::JsonStorage::new(dir.path()).await.unwrap();
        let mut tracker = HabitTracker::new(storage, TrackerConfig::default());
        tracker.sign_in("me@example.com", "secret1").await.unwrap();
        let habit = tracker.create(friday_draft("Walk")).await.unwrap();
        tracker.toggle_completion(habit.id, false, friday()).await.unwrap();
        let next_friday = friday() + chrono::Duration::days(7);
        tracker.toggle_completion(habit.id, true, next_friday).await.unwrap();

        let storage = habit_storage::JsonStorage::new(dir.path()).await.unwrap();
        let mut reopened = HabitTracker::new(storage, TrackerConfig::default());
        reopened.sign_in("me@example.com", "secret1").await.unwrap();
        let stored = reopened.get(habit.id).unwrap();
        assert_eq!(stored.record_on(friday()), Some(false));
        // The record and the counter are written together
        assert_eq!(stored.record_on(next_friday), Some(true));
        assert_eq!(stored.streak_days, 1);
    }
}
