use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::study::Session;

/// End-of-session report. Handed to the caller, who decides whether to keep it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub date_completed: DateTime<Utc>,
    pub word_count: usize,
    pub total_correct: u32,
    pub total_attempts: u32,
    #[serde(default)]
    pub duration_secs: u64,
}

impl SessionSummary {
    pub fn from_session(session: &Session, completed_at: DateTime<Utc>) -> Self {
        let duration_secs = (completed_at - session.started_at()).num_seconds().max(0) as u64;
        Self {
            date_completed: completed_at,
            word_count: session.len(),
            total_correct: session.total_correct(),
            total_attempts: session.total_attempts(),
            duration_secs,
        }
    }

    /// Share of submissions that were correct, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            return 100.0;
        }
        (self.total_correct as f64 / self.total_attempts as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn duration_mins(&self) -> u64 {
        self.duration_secs / 60
    }
}
