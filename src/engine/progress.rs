use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{PersistenceError, ProgressPersistence};

/// Familiarity tag a learner can attach to a word. Never set by the engine
/// itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewMark {
    #[default]
    Unmarked,
    Familiar,
    Shaky,
    Forgotten,
}

impl ReviewMark {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewMark::Unmarked => "unmarked",
            ReviewMark::Familiar => "familiar",
            ReviewMark::Shaky => "shaky",
            ReviewMark::Forgotten => "forgotten",
        }
    }
}

// Older files wrote arbitrary strings ("no"); anything unknown reads as unmarked.
impl From<String> for ReviewMark {
    fn from(value: String) -> Self {
        match value.as_str() {
            "familiar" => ReviewMark::Familiar,
            "shaky" => ReviewMark::Shaky,
            "forgotten" => ReviewMark::Forgotten,
            _ => ReviewMark::Unmarked,
        }
    }
}

impl From<ReviewMark> for String {
    fn from(mark: ReviewMark) -> Self {
        mark.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub text: String,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, alias = "corectCount")]
    pub correct_count: u32,
    #[serde(default)]
    pub state: ReviewMark,
    #[serde(default)]
    pub last_reviewed_date: Option<NaiveDate>,
}

impl ProgressRecord {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            review_count: 0,
            correct_count: 0,
            state: ReviewMark::Unmarked,
            last_reviewed_date: None,
        }
    }
}

/// Per-word study statistics, keyed by the word's exact text.
///
/// Every mutation is followed by a whole-collection save. A failed save keeps
/// the in-memory change and hands the error back to the caller.
pub struct ProgressStore {
    records: HashMap<String, ProgressRecord>,
    persistence: Box<dyn ProgressPersistence>,
}

impl ProgressStore {
    /// Load records from `persistence`. A missing or unreadable resource
    /// yields an empty store.
    pub fn load(persistence: Box<dyn ProgressPersistence>) -> Self {
        let loaded = match persistence.load_records() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("progress records could not be loaded, starting empty: {e}");
                Vec::new()
            }
        };

        let mut records = HashMap::with_capacity(loaded.len());
        for record in loaded {
            // Later duplicates win, matching a last-writer-wins file.
            records.insert(record.text.clone(), record);
        }

        Self {
            records,
            persistence,
        }
    }

    pub fn review_count(&self, word: &str) -> u32 {
        self.records.get(word).map(|r| r.review_count).unwrap_or(0)
    }

    pub fn correct_count(&self, word: &str) -> u32 {
        self.records.get(word).map(|r| r.correct_count).unwrap_or(0)
    }

    pub fn record(&self, word: &str) -> Option<&ProgressRecord> {
        self.records.get(word)
    }

    /// All records ordered by word text.
    pub fn records(&self) -> Vec<&ProgressRecord> {
        let mut all: Vec<&ProgressRecord> = self.records.values().collect();
        all.sort_by(|a, b| a.text.cmp(&b.text));
        all
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count one answered submission for `word`, then persist.
    pub fn record_review(
        &mut self,
        word: &str,
        correct: bool,
        today: NaiveDate,
    ) -> Result<(), PersistenceError> {
        let record = self
            .records
            .entry(word.to_string())
            .or_insert_with(|| ProgressRecord::new(word));
        record.review_count = record.review_count.saturating_add(1);
        if correct {
            record.correct_count = record.correct_count.saturating_add(1);
        }
        record.last_reviewed_date = Some(today);
        log::debug!(
            "recorded review of {word:?}: correct={correct} reviews={} correct_total={}",
            record.review_count,
            record.correct_count
        );
        self.save()
    }

    pub fn set_mark(
        &mut self,
        word: &str,
        mark: ReviewMark,
        today: NaiveDate,
    ) -> Result<(), PersistenceError> {
        let record = self
            .records
            .entry(word.to_string())
            .or_insert_with(|| ProgressRecord::new(word));
        record.state = mark;
        record.last_reviewed_date = Some(today);
        self.save()
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        let records: Vec<ProgressRecord> = self.records().into_iter().cloned().collect();
        self.persistence.save_records(&records).inspect_err(|e| {
            log::warn!("failed to save progress records: {e}");
        })
    }
}
