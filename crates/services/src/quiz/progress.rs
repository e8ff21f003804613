use quiz_core::model::Difficulty;

use super::engine::Phase;

/// Aggregated view of quiz progress, useful for status lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub phase: Phase,
    pub tier: Option<Difficulty>,
    /// 1-based position of the current question inside its tier, 0 when no round is active.
    pub tier_position: usize,
    pub tier_len: usize,
    pub answered: u32,
    pub correct: u32,
    pub hints_remaining: u32,
}
