use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::model::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("time per question must be > 0")]
    InvalidTimePerQuestion,

    #[error("feedback duration must be > 0")]
    InvalidFeedbackDuration,

    #[error("explanation duration must be > 0")]
    InvalidExplanationDuration,

    #[error("at least one difficulty tier is required")]
    NoTiers,

    #[error("difficulty tier listed twice: {0}")]
    DuplicateTier(Difficulty),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tuning knobs for a quiz session.
///
/// Defaults:
/// - 10 seconds per question
/// - 2 seconds of feedback when the question has an explanation
/// - 0.5 seconds of feedback otherwise
/// - 1 hint per session
/// - tiers played in the order easy, medium, hard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    time_per_question: Duration,
    explanation_duration: Duration,
    feedback_duration: Duration,
    hints_per_session: u32,
    tiers: Vec<Difficulty>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_per_question: Duration::from_secs(10),
            explanation_duration: Duration::from_secs(2),
            feedback_duration: Duration::from_millis(500),
            hints_per_session: 1,
            tiers: Difficulty::standard_tiers(),
        }
    }
}

impl QuizSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` if any duration is zero or the tier list is
    /// empty or contains duplicates.
    pub fn new(
        time_per_question: Duration,
        explanation_duration: Duration,
        feedback_duration: Duration,
        hints_per_session: u32,
        tiers: Vec<Difficulty>,
    ) -> Result<Self, QuizSettingsError> {
        if time_per_question.is_zero() {
            return Err(QuizSettingsError::InvalidTimePerQuestion);
        }
        if explanation_duration.is_zero() {
            return Err(QuizSettingsError::InvalidExplanationDuration);
        }
        if feedback_duration.is_zero() {
            return Err(QuizSettingsError::InvalidFeedbackDuration);
        }
        validate_tiers(&tiers)?;

        Ok(Self {
            time_per_question,
            explanation_duration,
            feedback_duration,
            hints_per_session,
            tiers,
        })
    }

    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidTimePerQuestion` for a zero duration.
    pub fn with_time_per_question(mut self, value: Duration) -> Result<Self, QuizSettingsError> {
        if value.is_zero() {
            return Err(QuizSettingsError::InvalidTimePerQuestion);
        }
        self.time_per_question = value;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidExplanationDuration` for a zero duration.
    pub fn with_explanation_duration(
        mut self,
        value: Duration,
    ) -> Result<Self, QuizSettingsError> {
        if value.is_zero() {
            return Err(QuizSettingsError::InvalidExplanationDuration);
        }
        self.explanation_duration = value;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidFeedbackDuration` for a zero duration.
    pub fn with_feedback_duration(mut self, value: Duration) -> Result<Self, QuizSettingsError> {
        if value.is_zero() {
            return Err(QuizSettingsError::InvalidFeedbackDuration);
        }
        self.feedback_duration = value;
        Ok(self)
    }

    #[must_use]
    pub fn with_hints_per_session(mut self, value: u32) -> Self {
        self.hints_per_session = value;
        self
    }

    /// # Errors
    ///
    /// Returns `QuizSettingsError` if `tiers` is empty or repeats a tier.
    pub fn with_tiers(mut self, tiers: Vec<Difficulty>) -> Result<Self, QuizSettingsError> {
        validate_tiers(&tiers)?;
        self.tiers = tiers;
        Ok(self)
    }

    #[must_use]
    pub fn time_per_question(&self) -> Duration {
        self.time_per_question
    }

    #[must_use]
    pub fn explanation_duration(&self) -> Duration {
        self.explanation_duration
    }

    #[must_use]
    pub fn feedback_duration(&self) -> Duration {
        self.feedback_duration
    }

    #[must_use]
    pub fn hints_per_session(&self) -> u32 {
        self.hints_per_session
    }

    /// Tiers in the order they are played.
    #[must_use]
    pub fn tiers(&self) -> &[Difficulty] {
        &self.tiers
    }

    /// How long feedback stays up for a question with or without an explanation.
    #[must_use]
    pub fn feedback_hold(&self, has_explanation: bool) -> Duration {
        if has_explanation {
            self.explanation_duration
        } else {
            self.feedback_duration
        }
    }
}

fn validate_tiers(tiers: &[Difficulty]) -> Result<(), QuizSettingsError> {
    if tiers.is_empty() {
        return Err(QuizSettingsError::NoTiers);
    }
    let mut seen = HashSet::with_capacity(tiers.len());
    for tier in tiers {
        if !seen.insert(tier) {
            return Err(QuizSettingsError::DuplicateTier(tier.clone()));
        }
    }
    Ok(())
}
