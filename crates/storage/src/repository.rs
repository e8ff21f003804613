use quiz_core::model::{Difficulty, Question};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only source of questions, keyed by difficulty tier.
///
/// A tier with no data is reported as an empty list, never as an error:
/// the engine treats an empty tier as "skip".
pub trait QuestionBank: Send + Sync {
    /// Questions for `difficulty` in authored order.
    fn get_questions(&self, difficulty: &Difficulty) -> Vec<Question>;

    /// Number of questions stored for `difficulty`.
    fn count(&self, difficulty: &Difficulty) -> usize {
        self.get_questions(difficulty).len()
    }
}

impl<T: QuestionBank + ?Sized> QuestionBank for Arc<T> {
    fn get_questions(&self, difficulty: &Difficulty) -> Vec<Question> {
        (**self).get_questions(difficulty)
    }

    fn count(&self, difficulty: &Difficulty) -> usize {
        (**self).count(difficulty)
    }
}

/// Simple in-memory bank, handy for tests and for banks built in code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionBank {
    tiers: HashMap<Difficulty, Vec<Question>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the questions of a tier.
    #[must_use]
    pub fn with_tier(mut self, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        self.tiers.insert(difficulty, questions);
        self
    }

    /// Append one question to a tier, creating the tier if needed.
    pub fn push(&mut self, difficulty: Difficulty, question: Question) {
        self.tiers.entry(difficulty).or_default().push(question);
    }

    /// Tier names present in the bank, sorted by name.
    #[must_use]
    pub fn difficulties(&self) -> Vec<Difficulty> {
        let mut names: Vec<_> = self.tiers.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }
}

impl QuestionBank for InMemoryQuestionBank {
    fn get_questions(&self, difficulty: &Difficulty) -> Vec<Question> {
        self.tiers.get(difficulty).cloned().unwrap_or_default()
    }

    fn count(&self, difficulty: &Difficulty) -> usize {
        self.tiers.get(difficulty).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question::new(text, vec!["a".into(), "b".into()], "a", "").unwrap()
    }

    #[test]
    fn missing_tier_is_empty_not_error() {
        let bank = InMemoryQuestionBank::new().with_tier(Difficulty::easy(), vec![question("Q1")]);
        assert!(bank.get_questions(&Difficulty::hard()).is_empty());
        assert_eq!(bank.count(&Difficulty::hard()), 0);
        assert_eq!(bank.count(&Difficulty::easy()), 1);
    }

    #[test]
    fn push_keeps_authored_order() {
        let mut bank = InMemoryQuestionBank::new();
        bank.push(Difficulty::medium(), question("first"));
        bank.push(Difficulty::medium(), question("second"));

        let texts: Vec<_> = bank
            .get_questions(&Difficulty::medium())
            .iter()
            .map(|q| q.text().to_owned())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(bank.difficulties(), vec![Difficulty::medium()]);
    }

    #[test]
    fn shared_bank_delegates_through_arc() {
        let bank: Arc<dyn QuestionBank> =
            Arc::new(InMemoryQuestionBank::new().with_tier(Difficulty::easy(), vec![question("Q")]));
        assert_eq!(bank.count(&Difficulty::easy()), 1);
    }
}
