use crate::catalog::WordItem;
use crate::session::SessionError;

/// Position of an option within a question's option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OptionId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionState {
    /// No answer submitted yet.
    Pending,
    /// A wrong answer was given and attempts remain.
    Retry,
    ResolvedCorrect,
    /// Attempts exhausted; the answer is revealed and the caller advances.
    ResolvedIncorrect,
}

impl QuestionState {
    pub fn is_resolved(self) -> bool {
        matches!(
            self,
            QuestionState::ResolvedCorrect | QuestionState::ResolvedIncorrect
        )
    }

    pub fn accepts_answer(self) -> bool {
        !self.is_resolved()
    }
}

#[derive(Clone, Debug)]
pub struct SessionItem {
    pub word: WordItem,
    pub attempts: u32,
    pub state: QuestionState,
    pub options: Vec<WordItem>,
    pub selection: Option<OptionId>,
}

impl SessionItem {
    pub fn new(word: WordItem, options: Vec<WordItem>) -> Self {
        Self {
            word,
            attempts: 0,
            state: QuestionState::Pending,
            options,
            selection: None,
        }
    }

    pub fn selected_option(&self) -> Option<&WordItem> {
        self.selection.and_then(|OptionId(i)| self.options.get(i))
    }

    /// Option index of the correct answer.
    pub fn answer_id(&self) -> Option<OptionId> {
        self.options
            .iter()
            .position(|o| o.same_word(&self.word))
            .map(OptionId)
    }
}

/// Judges submissions against a question and drives its state.
#[derive(Clone, Copy, Debug)]
pub struct AnswerEvaluator {
    pub max_attempts: u32,
    pub regenerate_options_on_retry: bool,
}

impl Default for AnswerEvaluator {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            regenerate_options_on_retry: false,
        }
    }
}

impl AnswerEvaluator {
    /// Apply one submission to `item`, returning whether it was correct.
    /// An id outside the option list counts as a wrong answer.
    pub fn evaluate(&self, item: &mut SessionItem, choice: OptionId) -> Result<bool, SessionError> {
        if item.state.is_resolved() {
            return Err(SessionError::AlreadyResolved);
        }

        item.selection = Some(choice);
        item.attempts = item.attempts.saturating_add(1);

        let correct = item
            .options
            .get(choice.0)
            .is_some_and(|o| o.same_word(&item.word));

        item.state = if correct {
            QuestionState::ResolvedCorrect
        } else if item.attempts >= self.max_attempts.max(1) {
            QuestionState::ResolvedIncorrect
        } else {
            QuestionState::Retry
        };

        Ok(correct)
    }
}
