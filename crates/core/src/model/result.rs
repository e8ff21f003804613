use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed questions seen ({total})")]
    CountMismatch { correct: u32, total: u32 },
}

/// Final score of one quiz attempt.
///
/// Produced once, when the session reaches `Complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    correct_count: u32,
    total_questions_seen: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionResult {
    /// # Errors
    ///
    /// Returns `SessionResultError::CountMismatch` if more answers were correct
    /// than questions were seen, or `InvalidTimeRange` if the timestamps are reversed.
    pub fn new(
        correct_count: u32,
        total_questions_seen: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionResultError> {
        if completed_at < started_at {
            return Err(SessionResultError::InvalidTimeRange);
        }
        if correct_count > total_questions_seen {
            return Err(SessionResultError::CountMismatch {
                correct: correct_count,
                total: total_questions_seen,
            });
        }
        Ok(Self {
            correct_count,
            total_questions_seen,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions_seen(&self) -> u32 {
        self.total_questions_seen
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// True when no question was ever available ("no quiz available").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions_seen == 0
    }

    /// Fraction of questions answered correctly, `0.0` for an empty session.
    #[must_use]
    pub fn score_ratio(&self) -> f64 {
        if self.total_questions_seen == 0 {
            return 0.0;
        }
        f64::from(self.correct_count) / f64::from(self.total_questions_seen)
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quiz Score: {}/{}",
            self.correct_count, self.total_questions_seen
        )
    }
}
