pub mod progress;
pub mod study;

pub use progress::{ProgressRecord, ProgressStore, ReviewMark};
pub use study::StudyEngine;
