pub mod json_store;
pub mod schema;

use thiserror::Error;

use crate::engine::progress::ProgressRecord;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("progress file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backing resource for progress records. Each call is a whole-collection
/// read or a whole-collection overwrite; no handle is kept between calls.
pub trait ProgressPersistence {
    fn load_records(&self) -> Result<Vec<ProgressRecord>, PersistenceError>;
    fn save_records(&self, records: &[ProgressRecord]) -> Result<(), PersistenceError>;
}
