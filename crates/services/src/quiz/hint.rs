use rand::Rng;
use rand::seq::SliceRandom;

use super::view::OptionSlot;

/// Distractors removed by a single hint when enough are visible.
const HINT_REMOVES: usize = 2;

/// Session-wide hint budget.
///
/// Hints are not refilled between questions; once spent they stay spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintAllowance {
    remaining: u32,
}

impl HintAllowance {
    #[must_use]
    pub fn new(hints: u32) -> Self {
        Self { remaining: hints }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }

    /// Spend one hint. Returns false when none were left.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Indices of the options a hint hides.
    ///
    /// Candidates are visible options whose label differs from `correct`.
    /// With three or more candidates two are drawn uniformly at random;
    /// with fewer, every candidate is returned. The correct option is never
    /// picked. Indices are returned in ascending order.
    pub fn pick_hint_targets<R: Rng + ?Sized>(
        options: &[OptionSlot],
        correct: &str,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut candidates: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.visible && slot.label != correct)
            .map(|(index, _)| index)
            .collect();

        if candidates.len() > HINT_REMOVES {
            candidates.as_mut_slice().shuffle(rng);
            candidates.truncate(HINT_REMOVES);
            candidates.sort_unstable();
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn slots(labels: &[&str]) -> Vec<OptionSlot> {
        labels.iter().map(|l| OptionSlot::visible(*l)).collect()
    }

    #[test]
    fn removes_two_of_three_distractors() {
        let options = slots(&["wrong1", "right", "wrong2", "wrong3"]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let picked = HintAllowance::pick_hint_targets(&options, "right", &mut rng);
            assert_eq!(picked.len(), 2);
            assert!(!picked.contains(&1));
        }
    }

    #[test]
    fn removes_all_when_two_or_fewer_distractors() {
        let mut rng = StdRng::seed_from_u64(3);
        let two = slots(&["right", "wrong1", "wrong2"]);
        assert_eq!(HintAllowance::pick_hint_targets(&two, "right", &mut rng), vec![1, 2]);

        let one = slots(&["wrong", "right"]);
        assert_eq!(HintAllowance::pick_hint_targets(&one, "right", &mut rng), vec![0]);
    }

    #[test]
    fn ignores_hidden_options() {
        let mut options = slots(&["a", "b", "c", "right"]);
        options[0].visible = false;
        let mut rng = StdRng::seed_from_u64(11);
        let picked = HintAllowance::pick_hint_targets(&options, "right", &mut rng);
        assert_eq!(picked, vec![1, 2]);
    }

    #[test]
    fn never_targets_duplicated_correct_label() {
        let options = slots(&["right", "x", "right", "y", "z"]);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let picked = HintAllowance::pick_hint_targets(&options, "right", &mut rng);
            assert!(picked.iter().all(|&i| options[i].label != "right"));
        }
    }

    #[test]
    fn every_pair_is_reachable() {
        let options = slots(&["right", "a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut pairs = std::collections::HashSet::new();
        for _ in 0..200 {
            pairs.insert(HintAllowance::pick_hint_targets(&options, "right", &mut rng));
        }
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn consume_stops_at_zero() {
        let mut hints = HintAllowance::new(1);
        assert!(hints.is_available());
        assert!(hints.consume());
        assert!(!hints.is_available());
        assert!(!hints.consume());
        assert_eq!(hints.remaining(), 0);
    }
}
