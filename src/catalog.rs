use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const WORDS_BUILTIN: &str = include_str!("../assets/words.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One study item. `word` is the identity used to key progress records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordItem {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

impl WordItem {
    pub fn new(word: &str, meaning: &str) -> Self {
        Self {
            word: word.to_string(),
            meaning: meaning.to_string(),
            image_name: None,
        }
    }

    pub fn with_image(mut self, image_name: &str) -> Self {
        self.image_name = Some(image_name.to_string());
        self
    }

    pub fn same_word(&self, other: &WordItem) -> bool {
        self.word == other.word
    }
}

#[derive(Clone, Debug, Default)]
pub struct WordCatalog {
    words: Vec<WordItem>,
}

impl WordCatalog {
    pub fn new(words: Vec<WordItem>) -> Self {
        Self { words }
    }

    /// Catalog compiled into the binary, used when no catalog path is configured.
    pub fn builtin() -> Self {
        Self::from_json_str(WORDS_BUILTIN).unwrap_or_default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let words: Vec<WordItem> = serde_json::from_str(json)?;
        Ok(Self { words })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn words(&self) -> &[WordItem] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
