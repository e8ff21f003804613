use quiz_core::model::{Difficulty, Question, QuestionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::repository::{InMemoryQuestionBank, QuestionBank};

/// Errors surfaced while loading a question bank file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of one question.
///
/// Field names follow the bank file format (`question`, `options`, `answer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// Convert the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record fails question validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.question, self.options, self.answer, self.explanation)
    }
}

#[derive(Debug, Deserialize)]
struct BankFile {
    #[serde(default)]
    questions: BTreeMap<String, Vec<QuestionRecord>>,
}

/// Question bank backed by a JSON document of the form
/// `{ "questions": { "<tier>": [ { "question", "options", "answer", "explanation" } ] } }`.
///
/// Records that fail validation are skipped with a warning; the rest of the
/// file stays usable. Tier keys that are not valid difficulty names are dropped
/// the same way.
#[derive(Debug, Clone, Default)]
pub struct JsonQuestionBank {
    inner: InMemoryQuestionBank,
    skipped: usize,
}

impl JsonQuestionBank {
    /// Load a bank from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be read and
    /// `BankError::Parse` if it is not a valid bank document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let bank = Self::from_json_str(&raw)?;
        info!(path = %path.display(), skipped = bank.skipped, "question bank loaded");
        Ok(bank)
    }

    /// Parse a bank from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` if the document is not a valid bank.
    pub fn from_json_str(raw: &str) -> Result<Self, BankError> {
        let file: BankFile = serde_json::from_str(raw)?;
        let mut inner = InMemoryQuestionBank::new();
        let mut skipped = 0_usize;

        for (key, records) in file.questions {
            let difficulty = match Difficulty::new(&key) {
                Ok(d) => d,
                Err(err) => {
                    warn!(tier = %key, error = %err, "skipping tier with invalid name");
                    skipped += records.len();
                    continue;
                }
            };

            let mut questions = Vec::with_capacity(records.len());
            for (index, record) in records.into_iter().enumerate() {
                match record.into_question() {
                    Ok(question) => questions.push(question),
                    Err(err) => {
                        warn!(tier = %difficulty, index, error = %err, "skipping invalid question");
                        skipped += 1;
                    }
                }
            }

            if let Some(first) = questions.first() {
                debug!(tier = %difficulty, count = questions.len(), first = first.text(), "tier loaded");
            }
            for question in questions {
                inner.push(difficulty.clone(), question);
            }
        }

        Ok(Self { inner, skipped })
    }

    /// Number of records dropped during loading.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn difficulties(&self) -> Vec<Difficulty> {
        self.inner.difficulties()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl QuestionBank for JsonQuestionBank {
    fn get_questions(&self, difficulty: &Difficulty) -> Vec<Question> {
        self.inner.get_questions(difficulty)
    }

    fn count(&self, difficulty: &Difficulty) -> usize {
        self.inner.count(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "questions": {
            "easy": [
                { "question": "2 + 2?", "options": ["3", "4", "5", "22"], "answer": "4",
                  "explanation": "Basic addition." },
                { "question": "Sky colour?", "options": ["blue", "green"], "answer": "blue" }
            ],
            "Hard": [
                { "question": "Broken", "options": ["only"], "answer": "only" }
            ]
        }
    }"#;

    #[test]
    fn parses_tiers_and_optional_explanation() {
        let bank = JsonQuestionBank::from_json_str(SAMPLE).unwrap();
        let easy = bank.get_questions(&Difficulty::easy());
        assert_eq!(easy.len(), 2);
        assert_eq!(easy[0].explanation(), Some("Basic addition."));
        assert_eq!(easy[1].explanation(), None);
    }

    #[test]
    fn invalid_records_are_skipped_and_keys_normalized() {
        let bank = JsonQuestionBank::from_json_str(SAMPLE).unwrap();
        assert_eq!(bank.skipped(), 1);
        assert!(bank.get_questions(&Difficulty::hard()).is_empty());
        assert!(bank.get_questions(&Difficulty::medium()).is_empty());
    }

    #[test]
    fn missing_questions_key_is_an_empty_bank() {
        let bank = JsonQuestionBank::from_json_str("{}").unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = JsonQuestionBank::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }
}
