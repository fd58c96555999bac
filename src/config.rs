use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_session_word_count")]
    pub session_word_count: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_distractor_count")]
    pub distractor_count: usize,
    #[serde(default = "default_regenerate_options_on_retry")]
    pub regenerate_options_on_retry: bool,
    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub data_dir: Option<String>,
}

fn default_session_word_count() -> usize {
    10
}
fn default_max_attempts() -> u32 {
    2
}
fn default_distractor_count() -> usize {
    3
}
fn default_regenerate_options_on_retry() -> bool {
    false
}
fn default_auto_advance_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_word_count: default_session_word_count(),
            max_attempts: default_max_attempts(),
            distractor_count: default_distractor_count(),
            regenerate_options_on_retry: default_regenerate_options_on_retry(),
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            catalog_path: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordsworld")
            .join("config.toml")
    }

    /// Clamp numeric settings into usable ranges. Call after deserializing
    /// and after applying command-line overrides.
    pub fn validate(&mut self) {
        self.session_word_count = self.session_word_count.clamp(1, 50);
        self.max_attempts = self.max_attempts.clamp(1, 5);
        self.distractor_count = self.distractor_count.clamp(1, 8);
        self.auto_advance_delay_ms = self.auto_advance_delay_ms.min(10_000);
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(PathBuf::from)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(PathBuf::from)
    }
}
