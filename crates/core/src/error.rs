use thiserror::Error;

use crate::model::{DifficultyError, QuestionError, QuizSettingsError, SessionResultError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    SessionResult(#[from] SessionResultError),
}
