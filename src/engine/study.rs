use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::WordItem;
use crate::clock::Clock;
use crate::engine::progress::ProgressStore;
use crate::session::SessionError;
use crate::session::question::OptionId;
use crate::session::study::{Advance, AnswerOutcome, Session, SessionSettings};
use crate::session::summary::SessionSummary;

/// Entry point for a front end: owns the progress store, the random source
/// and the clock, and runs sessions against them.
pub struct StudyEngine {
    progress: ProgressStore,
    settings: SessionSettings,
    clock: Clock,
    rng: SmallRng,
}

impl StudyEngine {
    pub fn new(progress: ProgressStore, settings: SessionSettings) -> Self {
        Self {
            progress,
            settings,
            clock: Clock::System,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    /// Start a session over at most `count` random words. An empty catalog or
    /// a zero count produces an empty session, which callers present as
    /// "nothing to study".
    pub fn start_session(&mut self, catalog: &[WordItem], count: usize) -> Session {
        let session = Session::start(
            catalog,
            count,
            self.settings,
            self.clock.now(),
            &mut self.rng,
        );
        if session.is_empty() {
            log::info!("no words available for a session");
        } else {
            log::info!(
                "started session with {} of {} word(s)",
                session.len(),
                catalog.len()
            );
        }
        session
    }

    pub fn submit_answer(
        &mut self,
        session: &mut Session,
        choice: OptionId,
    ) -> Result<AnswerOutcome, SessionError> {
        let today = self.clock.today();
        session.submit(choice, &mut self.progress, today, &mut self.rng)
    }

    pub fn advance<'s>(&self, session: &'s mut Session) -> Result<Advance<'s>, SessionError> {
        session.advance()
    }

    pub fn review_count(&self, word: &str) -> u32 {
        self.progress.review_count(word)
    }

    /// Summarize a session whose questions have all been answered.
    pub fn finish_session(&self, session: Session) -> Result<SessionSummary, SessionError> {
        if !session.is_complete() {
            return Err(SessionError::NotComplete {
                remaining: session.remaining(),
            });
        }
        let summary = SessionSummary::from_session(&session, self.clock.now());
        log::info!(
            "finished session: {} word(s), {}/{} correct",
            summary.word_count,
            summary.total_correct,
            summary.total_attempts
        );
        Ok(summary)
    }
}
