use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("correct option cannot be empty")]
    EmptyCorrectOption,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Correctness is decided by value: the chosen label must equal
/// `correct_option`. Options may repeat and are never assumed unique.
/// A `correct_option` that matches none of the options is accepted here and
/// surfaces as an integrity fault when the question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option: String,
    explanation: String,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the prompt is blank,
    /// `QuestionError::TooFewOptions` for fewer than two options, and
    /// `QuestionError::EmptyCorrectOption` if the declared answer is blank.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_owned();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        let correct_option = correct_option.into();
        if correct_option.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectOption);
        }

        Ok(Self {
            text,
            options,
            correct_option,
            explanation: explanation.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in authored order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    /// Explanation shown after answering, or `None` when the author left it blank.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        if self.explanation.is_empty() {
            None
        } else {
            Some(&self.explanation)
        }
    }

    /// Returns true when `label` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, label: &str) -> bool {
        self.correct_option == label
    }

    /// Returns true when at least one option carries the correct value.
    #[must_use]
    pub fn has_matching_option(&self) -> bool {
        self.options.iter().any(|option| self.is_correct(option))
    }
}
