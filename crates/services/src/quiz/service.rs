use std::path::Path;
use std::sync::Arc;

use quiz_core::model::{Difficulty, QuizSettings};
use storage::{JsonQuestionBank, QuestionBank};
use tracing::warn;

use super::engine::QuizEngine;
use super::shuffle::RoundShuffler;
use super::view::QuizEvent;
use crate::Clock;
use crate::error::QuizError;

/// Starts quiz sessions against a shared question bank.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    bank: Arc<dyn QuestionBank>,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<dyn QuestionBank>, settings: QuizSettings) -> Self {
        Self {
            clock,
            bank,
            settings,
            seed: None,
        }
    }

    /// Build a service over a JSON bank file.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` if the file cannot be read or parsed.
    pub fn from_bank_file(
        clock: Clock,
        path: impl AsRef<Path>,
        settings: QuizSettings,
    ) -> Result<Self, QuizError> {
        let bank = JsonQuestionBank::from_path(path)?;
        if bank.is_empty() {
            warn!("question bank has no questions");
        }
        let unplayed: Vec<Difficulty> = bank
            .difficulties()
            .into_iter()
            .filter(|tier| !settings.tiers().contains(tier))
            .collect();
        if !unplayed.is_empty() {
            warn!(tiers = ?unplayed, "bank tiers outside the configured order are never asked");
        }
        Ok(Self::new(clock, Arc::new(bank), settings))
    }

    /// Fix the shuffle seed so every session plays in the same order.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a new session. The returned events describe its initial state.
    #[must_use]
    pub fn start_session(&self) -> (QuizEngine, Vec<QuizEvent>) {
        let shuffler = self
            .seed
            .map_or_else(RoundShuffler::new, RoundShuffler::with_seed);
        QuizEngine::start(
            Arc::clone(&self.bank),
            self.settings.clone(),
            self.clock,
            shuffler,
        )
    }

    /// Question count per configured tier, in play order.
    #[must_use]
    pub fn tier_counts(&self) -> Vec<(Difficulty, usize)> {
        self.settings
            .tiers()
            .iter()
            .map(|tier| (tier.clone(), self.bank.count(tier)))
            .collect()
    }

    /// Total questions a full session would ask.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.tier_counts().iter().map(|(_, count)| count).sum()
    }
}
