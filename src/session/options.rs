use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordItem;

pub const DEFAULT_DISTRACTOR_COUNT: usize = 3;

/// Build a shuffled multiple-choice set: `correct` plus up to
/// `distractor_count` other words from `pool`. Pool entries sharing the
/// correct word's identity are never used as distractors, so a small pool
/// simply yields fewer options.
pub fn generate_options<R: Rng + ?Sized>(
    correct: &WordItem,
    pool: &[WordItem],
    distractor_count: usize,
    rng: &mut R,
) -> Vec<WordItem> {
    let mut distractors: Vec<&WordItem> = pool.iter().filter(|w| !w.same_word(correct)).collect();
    distractors.shuffle(rng);
    distractors.truncate(distractor_count);

    let mut options: Vec<WordItem> = distractors.into_iter().cloned().collect();
    options.push(correct.clone());
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn pool(words: &[&str]) -> Vec<WordItem> {
        words
            .iter()
            .map(|w| WordItem::new(w, &format!("a {w}")))
            .collect()
    }

    #[test]
    fn contains_correct_exactly_once() {
        let words = pool(&["cat", "dog", "bird", "fish", "cow", "hen"]);
        for seed in 0..30 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let options = generate_options(&words[2], &words, 3, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| o.word == "bird").count(), 1);
        }
    }

    #[test]
    fn small_pool_yields_fewer_options() {
        let mut rng = SmallRng::seed_from_u64(9);
        let words = pool(&["cat", "dog"]);
        let options = generate_options(&words[0], &words, 3, &mut rng);
        assert_eq!(options.len(), 2);

        let single = pool(&["cat"]);
        let options = generate_options(&single[0], &single, 3, &mut rng);
        assert_eq!(options, single);
    }

    #[test]
    fn size_follows_pool_and_distractor_count() {
        let words = pool(&["a", "b", "c", "d", "e"]);
        for k in 0..7 {
            let mut rng = SmallRng::seed_from_u64(k as u64);
            let options = generate_options(&words[0], &words, k, &mut rng);
            assert_eq!(options.len(), k.min(words.len() - 1) + 1);
        }
    }

    #[test]
    fn duplicates_of_correct_word_are_not_distractors() {
        let mut words = pool(&["cat", "dog", "bird"]);
        words.push(WordItem::new("cat", "another cat"));
        let mut rng = SmallRng::seed_from_u64(4);
        let options = generate_options(&words[0], &words, 3, &mut rng);
        assert_eq!(options.iter().filter(|o| o.word == "cat").count(), 1);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn empty_pool_still_offers_the_answer() {
        let mut rng = SmallRng::seed_from_u64(0);
        let correct = WordItem::new("sun", "the star");
        let options = generate_options(&correct, &[], DEFAULT_DISTRACTOR_COUNT, &mut rng);
        assert_eq!(options, vec![correct]);
    }
}
