use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

use crate::catalog::WordItem;
use crate::config::Config;
use crate::engine::progress::ProgressStore;
use crate::session::SessionError;
use crate::session::options::{DEFAULT_DISTRACTOR_COUNT, generate_options};
use crate::session::question::{AnswerEvaluator, OptionId, QuestionState, SessionItem};
use crate::session::selector::select_words;
use crate::store::PersistenceError;

/// Knobs that vary between study modes.
#[derive(Clone, Copy, Debug)]
pub struct SessionSettings {
    pub max_attempts: u32,
    pub distractor_count: usize,
    pub regenerate_options_on_retry: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            distractor_count: DEFAULT_DISTRACTOR_COUNT,
            regenerate_options_on_retry: false,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            distractor_count: config.distractor_count,
            regenerate_options_on_retry: config.regenerate_options_on_retry,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordCounts {
    pub review_count: u32,
    pub correct_count: u32,
}

/// Result of one submission.
#[derive(Debug)]
pub struct AnswerOutcome {
    pub state: QuestionState,
    pub correct_answer: WordItem,
    pub updated_counts: WordCounts,
    /// The question resolved correctly; the caller should move on without
    /// waiting for the learner.
    pub auto_advance: bool,
    /// Progress was updated in memory but could not be written out.
    pub persist_error: Option<PersistenceError>,
}

#[derive(Debug)]
pub enum Advance<'a> {
    Next(&'a SessionItem),
    Complete,
}

/// One bounded run through a random subset of the catalog.
pub struct Session {
    items: Vec<SessionItem>,
    current: usize,
    total_correct: u32,
    total_attempts: u32,
    started_at: DateTime<Utc>,
    settings: SessionSettings,
}

impl Session {
    pub fn start<R: Rng + ?Sized>(
        catalog: &[WordItem],
        count: usize,
        settings: SessionSettings,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let words = select_words(catalog, count, rng);
        // Distractors come from the session's own words.
        let items = words
            .iter()
            .map(|word| {
                let options = generate_options(word, &words, settings.distractor_count, &mut *rng);
                SessionItem::new(word.clone(), options)
            })
            .collect();

        Self {
            items,
            current: 0,
            total_correct: 0,
            total_attempts: 0,
            started_at,
            settings,
        }
    }

    /// True when there was nothing to study.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.items.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<&SessionItem> {
        self.items.get(self.current)
    }

    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.current)
    }

    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Judge `choice` for the current question and record the review.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        choice: OptionId,
        progress: &mut ProgressStore,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<AnswerOutcome, SessionError> {
        let evaluator = AnswerEvaluator {
            max_attempts: self.settings.max_attempts,
            regenerate_options_on_retry: self.settings.regenerate_options_on_retry,
        };
        let index = self.current;
        let item = self.items.get_mut(index).ok_or(SessionError::Finished)?;
        let correct = evaluator.evaluate(item, choice)?;
        let state = item.state;
        let word = item.word.clone();

        self.total_attempts = self.total_attempts.saturating_add(1);
        if correct {
            self.total_correct = self.total_correct.saturating_add(1);
        }

        let persist_error = progress.record_review(&word.word, correct, today).err();

        if state == QuestionState::Retry && evaluator.regenerate_options_on_retry {
            let pool: Vec<WordItem> = self.items.iter().map(|i| i.word.clone()).collect();
            let options = generate_options(&word, &pool, self.settings.distractor_count, rng);
            let item = &mut self.items[index];
            item.options = options;
            item.selection = None;
        }

        log::debug!(
            "question {} ({:?}) -> {state:?} after {} attempt(s)",
            index + 1,
            word.word,
            self.items[index].attempts
        );

        Ok(AnswerOutcome {
            state,
            updated_counts: WordCounts {
                review_count: progress.review_count(&word.word),
                correct_count: progress.correct_count(&word.word),
            },
            correct_answer: word,
            auto_advance: state == QuestionState::ResolvedCorrect,
            persist_error,
        })
    }

    /// Move past a resolved question.
    pub fn advance(&mut self) -> Result<Advance<'_>, SessionError> {
        let item = self.items.get(self.current).ok_or(SessionError::Finished)?;
        if !item.state.is_resolved() {
            return Err(SessionError::Unresolved);
        }
        self.current += 1;
        Ok(match self.items.get(self.current) {
            Some(next) => Advance::Next(next),
            None => Advance::Complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::clock::fixed_now;
    use crate::engine::progress::tests::MemoryPersistence;

    fn catalog() -> Vec<WordItem> {
        ["cat", "dog", "bird", "fish", "cow"]
            .iter()
            .map(|w| WordItem::new(w, &format!("a {w}")))
            .collect()
    }

    fn wrong_id(item: &SessionItem) -> OptionId {
        let answer = item.answer_id().unwrap();
        OptionId(if answer.0 == 0 { 1 } else { 0 })
    }

    fn setup(settings: SessionSettings) -> (Session, ProgressStore, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(11);
        let session = Session::start(&catalog(), 4, settings, fixed_now(), &mut rng);
        let store = ProgressStore::load(Box::new(MemoryPersistence::default()));
        (session, store, rng)
    }

    #[test]
    fn start_builds_items_with_options() {
        let (session, _, _) = setup(SessionSettings::default());
        assert_eq!(session.len(), 4);
        assert!(!session.is_complete());
        for item in session.items() {
            assert_eq!(item.options.len(), 4);
            assert!(item.answer_id().is_some());
            assert_eq!(item.state, QuestionState::Pending);
        }
    }

    #[test]
    fn correct_answer_counts_and_auto_advances() {
        let (mut session, mut store, mut rng) = setup(SessionSettings::default());
        let today = fixed_now().date_naive();
        let answer = session.current_item().unwrap().answer_id().unwrap();

        let outcome = session.submit(answer, &mut store, today, &mut rng).unwrap();
        assert_eq!(outcome.state, QuestionState::ResolvedCorrect);
        assert!(outcome.auto_advance);
        assert!(outcome.persist_error.is_none());
        assert_eq!(
            outcome.updated_counts,
            WordCounts {
                review_count: 1,
                correct_count: 1
            }
        );
        assert_eq!(session.total_correct(), 1);
        assert_eq!(session.total_attempts(), 1);
    }

    #[test]
    fn wrong_answers_record_every_submission() {
        let (mut session, mut store, mut rng) = setup(SessionSettings::default());
        let today = fixed_now().date_naive();
        let wrong = wrong_id(session.current_item().unwrap());
        let options_before = session.current_item().unwrap().options.clone();

        let first = session.submit(wrong, &mut store, today, &mut rng).unwrap();
        assert_eq!(first.state, QuestionState::Retry);
        assert!(!first.auto_advance);
        assert_eq!(session.current_item().unwrap().options, options_before);
        assert_eq!(session.advance().unwrap_err(), SessionError::Unresolved);

        let second = session.submit(wrong, &mut store, today, &mut rng).unwrap();
        assert_eq!(second.state, QuestionState::ResolvedIncorrect);
        assert_eq!(
            second.updated_counts,
            WordCounts {
                review_count: 2,
                correct_count: 0
            }
        );
        assert_eq!(session.total_attempts(), 2);
        assert_eq!(session.total_correct(), 0);
    }

    #[test]
    fn regenerates_options_on_retry_when_enabled() {
        let settings = SessionSettings {
            max_attempts: 3,
            regenerate_options_on_retry: true,
            ..Default::default()
        };
        let (mut session, mut store, mut rng) = setup(settings);
        let today = fixed_now().date_naive();
        let wrong = wrong_id(session.current_item().unwrap());

        session.submit(wrong, &mut store, today, &mut rng).unwrap();
        let item = session.current_item().unwrap();
        assert_eq!(item.state, QuestionState::Retry);
        assert!(item.selection.is_none());
        assert_eq!(item.options.len(), 4);
        assert!(item.answer_id().is_some());
    }

    #[test]
    fn advance_walks_to_completion() {
        let (mut session, mut store, mut rng) = setup(SessionSettings::default());
        let today = fixed_now().date_naive();
        for i in 0..4 {
            let answer = session.current_item().unwrap().answer_id().unwrap();
            session.submit(answer, &mut store, today, &mut rng).unwrap();
            match session.advance().unwrap() {
                Advance::Next(_) => assert!(i < 3),
                Advance::Complete => assert_eq!(i, 3),
            }
        }
        assert!(session.is_complete());
        assert_eq!(session.remaining(), 0);
        assert!(session.current_item().is_none());
        let answer = OptionId(0);
        assert!(matches!(
            session.submit(answer, &mut store, today, &mut rng),
            Err(SessionError::Finished)
        ));
        assert!(matches!(session.advance(), Err(SessionError::Finished)));
    }

    #[test]
    fn empty_catalog_gives_empty_session() {
        let mut rng = SmallRng::seed_from_u64(2);
        let session = Session::start(&[], 10, SessionSettings::default(), fixed_now(), &mut rng);
        assert!(session.is_empty());
        assert!(session.is_complete());
        assert!(session.current_item().is_none());
    }

    #[test]
    fn two_word_catalog_gives_two_options() {
        let mut rng = SmallRng::seed_from_u64(5);
        let words = vec![WordItem::new("sun", "star"), WordItem::new("moon", "satellite")];
        let session = Session::start(&words, 10, SessionSettings::default(), fixed_now(), &mut rng);
        assert_eq!(session.len(), 2);
        assert!(session.items().iter().all(|i| i.options.len() == 2));
    }
}
