//! Session context: who is signed in and the habits they own.
//!
//! A `Session` is created signed out, filled on sign-in and emptied on
//! sign-out. It is passed explicitly to whatever needs it.

use habit_core::Habit;
use serde::{Deserialize, Serialize};

/// Errors from the (mock) authentication step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email is empty or has no `@`
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// Password is too short
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email, also the owner key of habits
    pub email: String,
}

/// The signed-in user and their loaded habit collection.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<User>,
    habits: Vec<Habit>,
    min_password_len: usize,
}

impl Session {
    /// A session nobody is signed into.
    pub fn signed_out(min_password_len: usize) -> Self {
        Self {
            user: None,
            habits: Vec::new(),
            min_password_len,
        }
    }

    /// Check credentials and mark the user signed in.
    ///
    /// Credentials are only validated for shape; there is no account lookup.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < self.min_password_len {
            return Err(AuthError::WeakPassword(self.min_password_len));
        }
        self.habits.clear();
        Ok(self.user.insert(User {
            email: email.to_string(),
        }))
    }

    /// Register a new user. Same rules as signing in.
    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        self.sign_in(email, password)
    }

    /// Forget the user and their habits.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.habits.clear();
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The loaded habits, in display order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub(crate) fn habits_mut(&mut self) -> &mut Vec<Habit> {
        &mut self.habits
    }
}
