#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quiz::{
    FeedbackView, HintAllowance, OptionSlot, Phase, QuestionView, QuizCommand, QuizDriver,
    QuizEngine, QuizEvent, QuizHandle, QuizProgress, QuizService, RoundShuffler, RunningQuiz,
};
