use serde::{Deserialize, Serialize};

use crate::session::summary::SessionSummary;

const SCHEMA_VERSION: u32 = 1;

/// Completed session summaries, kept by the front end rather than the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionHistoryData {
    pub schema_version: u32,
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

impl Default for SessionHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sessions: Vec::new(),
        }
    }
}

impl SessionHistoryData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
