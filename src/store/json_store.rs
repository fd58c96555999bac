use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::engine::progress::ProgressRecord;
use crate::store::schema::SessionHistoryData;
use crate::store::{PersistenceError, ProgressPersistence};

const PROGRESS_FILE: &str = "progress.json";
const HISTORY_FILE: &str = "session_history.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordsworld");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("ignoring unreadable {}: {e}", path.display());
                    T::default()
                }),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    /// Write to a sibling `.tmp` file and rename it over the target.
    fn save<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<(), PersistenceError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_session_history(&self) -> SessionHistoryData {
        let data: SessionHistoryData = self.load(HISTORY_FILE);
        if data.needs_reset() {
            log::warn!(
                "session history schema {} is not supported, starting fresh",
                data.schema_version
            );
            return SessionHistoryData::default();
        }
        data
    }

    pub fn save_session_history(&self, data: &SessionHistoryData) -> Result<(), PersistenceError> {
        self.save(HISTORY_FILE, data)
    }
}

impl ProgressPersistence for JsonStore {
    fn load_records(&self) -> Result<Vec<ProgressRecord>, PersistenceError> {
        let path = self.file_path(PROGRESS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_records(&self, records: &[ProgressRecord]) -> Result<(), PersistenceError> {
        self.save(PROGRESS_FILE, records)
    }
}
