use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordItem;

/// Pick up to `count` words from `catalog` in random order, without
/// replacement. The returned order is the session's presentation order.
pub fn select_words<R: Rng + ?Sized>(
    catalog: &[WordItem],
    count: usize,
    rng: &mut R,
) -> Vec<WordItem> {
    if catalog.is_empty() || count == 0 {
        return Vec::new();
    }
    let mut shuffled = catalog.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn catalog(n: usize) -> Vec<WordItem> {
        (0..n)
            .map(|i| WordItem::new(&format!("word{i}"), &format!("meaning {i}")))
            .collect()
    }

    #[test]
    fn length_is_min_of_count_and_catalog() {
        let mut rng = SmallRng::seed_from_u64(7);
        let words = catalog(6);
        assert_eq!(select_words(&words, 4, &mut rng).len(), 4);
        assert_eq!(select_words(&words, 6, &mut rng).len(), 6);
        assert_eq!(select_words(&words, 50, &mut rng).len(), 6);
    }

    #[test]
    fn selection_is_a_duplicate_free_subset() {
        let words = catalog(20);
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = select_words(&words, 10, &mut rng);
            let unique: HashSet<&str> = picked.iter().map(|w| w.word.as_str()).collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|w| words.contains(w)));
        }
    }

    #[test]
    fn empty_inputs_yield_empty_selection() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(select_words(&[], 10, &mut rng).is_empty());
        assert!(select_words(&catalog(3), 0, &mut rng).is_empty());
    }

    #[test]
    fn catalog_is_not_mutated() {
        let words = catalog(8);
        let before = words.clone();
        let mut rng = SmallRng::seed_from_u64(3);
        let _ = select_words(&words, 5, &mut rng);
        assert_eq!(words, before);
    }

    #[test]
    fn same_seed_same_order() {
        let words = catalog(12);
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(
            select_words(&words, 12, &mut a),
            select_words(&words, 12, &mut b)
        );
    }
}
