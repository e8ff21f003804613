mod driver;
mod engine;
mod hint;
mod progress;
mod service;
mod shuffle;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use driver::{QuizCommand, QuizDriver, QuizHandle, RunningQuiz};
pub use engine::{Phase, QuizEngine};
pub use hint::HintAllowance;
pub use progress::QuizProgress;
pub use service::QuizService;
pub use shuffle::RoundShuffler;
pub use view::{FeedbackView, OptionSlot, QuestionView, QuizEvent};
