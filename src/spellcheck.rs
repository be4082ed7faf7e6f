// File: src/spellcheck.rs
//! Whole-text spell checking on top of the engine's trie and BK-tree.

use crate::config::SpellCheckConfig;
use crate::core::trie::Trie;
use crate::fuzzy::bktree::BkTree;
use crate::fuzzy::distance::damerau_levenshtein;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:\b)[a-z]+(?-u:\b)").expect("static pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_distance(distance: usize) -> Self {
        match distance {
            1 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub word: String,
    pub distance: usize,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckResult {
    pub word: String,
    pub is_correct: bool,
    pub suggestions: Vec<Correction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckReport {
    pub results: Vec<SpellCheckResult>,
    /// Distinct words examined.
    pub total_words: usize,
    pub errors_found: usize,
}

/// Borrowed view over an engine's indexes; see `SuggestionEngine::spell_checker`.
pub struct SpellChecker<'a> {
    trie: &'a Trie,
    bk_tree: &'a BkTree,
    config: &'a SpellCheckConfig,
}

impl<'a> SpellChecker<'a> {
    pub fn new(trie: &'a Trie, bk_tree: &'a BkTree, config: &'a SpellCheckConfig) -> Self {
        Self { trie, bk_tree, config }
    }

    pub fn check_text(&self, text: &str) -> SpellCheckReport {
        let results: Vec<SpellCheckResult> = unique_words(text)
            .into_iter()
            .map(|word| {
                if self.trie.contains(&word) {
                    SpellCheckResult { word, is_correct: true, suggestions: Vec::new() }
                } else {
                    let suggestions = self.suggest_word(&word);
                    SpellCheckResult { word, is_correct: false, suggestions }
                }
            })
            .collect();

        let errors_found = results.iter().filter(|r| !r.is_correct).count();
        debug!(total = results.len(), errors_found, "text checked");
        SpellCheckReport { total_words: results.len(), errors_found, results }
    }

    /// Known words within the configured distance of `word` (excluding itself),
    /// closest first, then most frequent, then alphabetical.
    pub fn suggest_word(&self, word: &str) -> Vec<Correction> {
        let word = word.to_lowercase();
        let radius = self.config.max_distance;

        let mut candidates: Vec<(String, usize)> = if self.config.transpositions {
            // a swap costs 2 under Levenshtein, so widen then re-measure
            self.bk_tree
                .search(&word, radius.saturating_mul(2))
                .into_iter()
                .map(|m| {
                    let d = damerau_levenshtein(&word, &m.word);
                    (m.word, d)
                })
                .filter(|&(_, d)| d <= radius)
                .collect()
        } else {
            self.bk_tree.search(&word, radius).into_iter().map(|m| (m.word, m.distance)).collect()
        };
        candidates.retain(|&(_, d)| d > 0);

        candidates.sort_by(|(wa, da), (wb, db)| {
            let fa = self.trie.frequency(wa).unwrap_or(0);
            let fb = self.trie.frequency(wb).unwrap_or(0);
            da.cmp(db).then_with(|| fb.cmp(&fa)).then_with(|| wa.cmp(wb))
        });
        candidates.truncate(self.config.max_suggestions);

        candidates
            .into_iter()
            .map(|(word, distance)| Correction { word, distance, confidence: Confidence::from_distance(distance) })
            .collect()
    }
}

/// Lowercased ASCII words of `text`, first occurrence order, no repeats.
pub fn unique_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Replaces every whole-word, case-insensitive occurrence of `original`.
pub fn apply_correction(text: &str, original: &str, correction: &str) -> String {
    if original.is_empty() {
        return text.to_string();
    }
    let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(original));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, regex::NoExpand(correction)).into_owned(),
        Err(_) => text.to_string(),
    }
}
