mod answer;
mod difficulty;
mod question;
mod result;
mod settings;

pub use answer::AnswerEvent;
pub use difficulty::{Difficulty, DifficultyError};
pub use question::{Question, QuestionError};
pub use result::{SessionResult, SessionResultError};
pub use settings::{QuizSettings, QuizSettingsError};
