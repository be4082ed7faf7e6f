// File: src/dictionary.rs
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Sample vocabulary with usage weights, used when no dictionary file is given.
const BUILTIN_WORDS: &[(&str, u64)] = &[
    ("algorithm", 156), ("algorithms", 89), ("autocomplete", 234), ("automate", 67),
    ("automation", 145), ("artificial intelligence", 176), ("interface", 134),
    ("interactive", 167), ("data", 289), ("database", 178), ("structure", 156),
    ("search", 245), ("binary", 167), ("tree", 198), ("graph", 145), ("node", 234),
    ("network", 189), ("neural", 156), ("machine", 198), ("learning", 223), ("deep", 145),
    ("model", 178), ("performance", 189), ("efficiency", 156), ("google", 500),
    ("engine", 300), ("system", 350), ("design", 400), ("computer", 200), ("science", 250),
    ("technology", 300), ("frontend", 150), ("backend", 150), ("developer", 180),
    ("engineer", 220), ("react", 400), ("typescript", 350), ("javascript", 300),
    ("tailwind", 200), ("framer", 150), ("motion", 150), ("threejs", 120),
    ("visualizer", 100),
];

#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryFile {
    Table(BTreeMap<String, u64>),
    List(Vec<DictionaryEntry>),
}

#[derive(Deserialize)]
struct DictionaryEntry {
    word: String,
    #[serde(default = "default_frequency")]
    frequency: u64,
}

fn default_frequency() -> u64 {
    1
}

/// An ordered list of `(word, frequency)` pairs to seed an engine with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, u64)>,
}

impl Dictionary {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_WORDS.iter().map(|&(w, f)| (w.to_string(), f)))
    }

    /// Blank words are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(word, frequency)| {
                let word = word.into();
                if word.trim().is_empty() {
                    warn!(frequency, "skipping blank dictionary entry");
                    None
                } else {
                    Some((word, frequency))
                }
            })
            .collect();
        Self { entries }
    }

    /// Accepts `{"word": frequency, ...}` or `[{"word": ..., "frequency": ...}, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        Ok(match file {
            DictionaryFile::Table(table) => Self::from_entries(table),
            DictionaryFile::List(list) => Self::from_entries(list.into_iter().map(|e| (e.word, e.frequency))),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| EngineError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(w, f)| (w.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
