// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A completion returned by the trie: the stored word and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: u64,
}

/// A BK-tree hit: the stored word and its edit distance from the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub word: String,
    pub distance: usize,
}

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// The query is a prefix of the word.
    Prefix,
    /// The word is within the fuzzy radius of the query.
    Correction,
}

/// A ranked suggestion handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub word: String,
    pub frequency: u64,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Ranking key only, higher is better.
    pub score: f64,
}

/// How `Trie::insert` treats a word that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyPolicy {
    /// The latest insertion's frequency replaces the stored one.
    #[default]
    Overwrite,
    /// Frequencies of repeated insertions are summed (saturating).
    Accumulate,
}

impl FrequencyPolicy {
    pub fn apply(self, stored: u64, incoming: u64) -> u64 {
        match self {
            FrequencyPolicy::Overwrite => incoming,
            FrequencyPolicy::Accumulate => stored.saturating_add(incoming),
        }
    }
}

/// The part of a prefix that could be walked from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodePath {
    pub path: Vec<char>,
    pub nodes_traversed: usize,
}
