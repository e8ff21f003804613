use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DifficultyError {
    #[error("difficulty name cannot be empty")]
    Empty,

    #[error("difficulty name contains whitespace: {0:?}")]
    Whitespace(String),
}

/// Name of a difficulty tier, e.g. `easy`.
///
/// Names are normalized to lowercase. The progression order is not a property
/// of the name itself; it comes from `QuizSettings::tiers`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Difficulty(String);

impl Difficulty {
    /// Creates a tier name.
    ///
    /// # Errors
    ///
    /// Returns `DifficultyError` if the name is blank or contains inner whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DifficultyError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DifficultyError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DifficultyError::Whitespace(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    #[must_use]
    pub fn easy() -> Self {
        Self("easy".into())
    }

    #[must_use]
    pub fn medium() -> Self {
        Self("medium".into())
    }

    #[must_use]
    pub fn hard() -> Self {
        Self("hard".into())
    }

    /// The built-in progression: easy, medium, hard.
    #[must_use]
    pub fn standard_tiers() -> Vec<Self> {
        vec![Self::easy(), Self::medium(), Self::hard()]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Difficulty({})", self.0)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Difficulty {
    type Error = DifficultyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}
