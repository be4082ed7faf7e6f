// src/lib.rs

pub mod config;
pub mod core;
pub mod dictionary;
pub mod error;
pub mod fuzzy;
pub mod spellcheck;

pub use crate::config::{EngineConfig, SpellCheckConfig};
pub use crate::core::engine::SuggestionEngine;
pub use crate::core::queue::{PriorityQueue, Prioritized};
pub use crate::core::trie::Trie;
pub use crate::core::types::{FrequencyPolicy, FuzzyMatch, SuggestionKind, SuggestionResult, WordFrequency};
pub use crate::dictionary::Dictionary;
pub use crate::error::{EngineError, Result};
pub use crate::fuzzy::bktree::BkTree;
pub use crate::fuzzy::distance::{damerau_levenshtein, levenshtein};
