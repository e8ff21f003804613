use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use quiz_core::model::Question;

/// Randomizes question order within a round and option order within a question.
///
/// Both use `SliceRandom::shuffle` (Fisher-Yates), so every ordering is equally
/// likely. Empty and single-element inputs come back unchanged.
pub struct RoundShuffler {
    rng: StdRng,
}

impl RoundShuffler {
    /// Shuffler seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic shuffler for tests and replayable sessions.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn shuffle_questions(&mut self, mut questions: Vec<Question>) -> Vec<Question> {
        questions.as_mut_slice().shuffle(&mut self.rng);
        questions
    }

    /// Option labels of `question` in a fresh random order.
    #[must_use]
    pub fn shuffle_options(&mut self, question: &Question) -> Vec<String> {
        let mut labels = question.options().to_vec();
        labels.as_mut_slice().shuffle(&mut self.rng);
        labels
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for RoundShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RoundShuffler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundShuffler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn question(options: &[&str]) -> Question {
        Question::new(
            "Q",
            options.iter().map(|s| (*s).to_owned()).collect(),
            options[0],
            "",
        )
        .unwrap()
    }

    fn counts(labels: &[String]) -> HashMap<&str, usize> {
        let mut map = HashMap::new();
        for label in labels {
            *map.entry(label.as_str()).or_default() += 1;
        }
        map
    }

    #[test]
    fn options_are_a_permutation_including_duplicates() {
        let q = question(&["a", "b", "b", "c", "d"]);
        let mut shuffler = RoundShuffler::with_seed(7);
        for _ in 0..50 {
            let shuffled = shuffler.shuffle_options(&q);
            assert_eq!(shuffled.len(), 5);
            assert_eq!(counts(&shuffled), counts(q.options()));
        }
    }

    #[test]
    fn short_question_lists_are_unchanged() {
        let mut shuffler = RoundShuffler::with_seed(1);
        assert!(shuffler.shuffle_questions(Vec::new()).is_empty());

        let single = vec![question(&["x", "y"])];
        assert_eq!(shuffler.shuffle_questions(single.clone()), single);
    }

    #[test]
    fn question_order_is_a_permutation() {
        let questions: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|label| {
                Question::new(format!("Q{label}"), vec!["1".into(), "2".into()], "1", "").unwrap()
            })
            .collect();
        let mut shuffler = RoundShuffler::with_seed(99);
        let mut shuffled = shuffler.shuffle_questions(questions.clone());
        shuffled.sort_by(|a, b| a.text().cmp(b.text()));
        assert_eq!(shuffled, questions);
    }

    #[test]
    fn every_ordering_of_three_shows_up() {
        let q = question(&["a", "b", "c"]);
        let mut shuffler = RoundShuffler::with_seed(2024);
        let mut seen = HashMap::new();
        for _ in 0..600 {
            *seen.entry(shuffler.shuffle_options(&q).join("")).or_insert(0_u32) += 1;
        }
        assert_eq!(seen.len(), 6);
        assert!(seen.values().all(|&n| n > 50));
    }

    #[test]
    fn same_seed_same_order() {
        let q = question(&["a", "b", "c", "d", "e", "f"]);
        let first = RoundShuffler::with_seed(5).shuffle_options(&q);
        let second = RoundShuffler::with_seed(5).shuffle_options(&q);
        assert_eq!(first, second);
    }
}
