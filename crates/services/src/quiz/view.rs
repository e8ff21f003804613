use serde::Serialize;
use std::time::Duration;

use quiz_core::model::{Difficulty, SessionResult};

/// One answer option of the active question, keyed by its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSlot {
    pub label: String,
    pub visible: bool,
}

impl OptionSlot {
    #[must_use]
    pub fn visible(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: true,
        }
    }
}

/// What a renderer needs to show while the player can answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub tier: Difficulty,
    /// 1-based position within the tier.
    pub position: usize,
    pub tier_len: usize,
    pub question_text: String,
    pub options: Vec<OptionSlot>,
    pub time_remaining: Duration,
    /// `time_remaining` rounded up, as a countdown label shows it.
    pub seconds_left: u64,
    pub hint_available: bool,
    pub hints_remaining: u32,
}

impl QuestionView {
    /// Labels the player can still pick, in display order.
    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|slot| slot.visible)
            .map(|slot| slot.label.as_str())
    }
}

/// What a renderer needs to show between answering and the next question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    /// `None` when the timer ran out.
    pub chosen: Option<String>,
    pub chosen_is_correct: bool,
    pub timed_out: bool,
    pub correct_option_label: String,
    pub explanation_text: Option<String>,
    /// The declared answer matched none of the options.
    pub integrity_fault: bool,
    /// How long this feedback stays up.
    pub hold: Duration,
}

/// Everything the engine reports back to its host, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    TierStarted { tier: Difficulty, questions: usize },
    TierSkipped(Difficulty),
    QuestionShown(QuestionView),
    /// `hidden` indexes into `options`, which is the full updated slot list.
    HintApplied {
        hidden: Vec<usize>,
        options: Vec<OptionSlot>,
        hints_remaining: u32,
    },
    FeedbackShown(FeedbackView),
    Completed(SessionResult),
    Abandoned,
}
