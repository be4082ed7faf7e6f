use crate::config::EngineConfig;
use crate::core::queue::PriorityQueue;
use crate::core::trie::Trie;
use crate::core::types::{SuggestionKind, SuggestionResult, WordFrequency};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::fuzzy::bktree::BkTree;
use crate::spellcheck::SpellChecker;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// Frequency assumed for a fuzzy hit the trie has no weight for.
const FALLBACK_FREQUENCY: u64 = 1;

/// Score descending; on equal scores prefix matches first, then by word.
fn by_rank(a: &SuggestionResult, b: &SuggestionResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| kind_order(a.kind).cmp(&kind_order(b.kind)))
        .then_with(|| a.word.cmp(&b.word))
}

fn kind_order(kind: SuggestionKind) -> u8 {
    match kind {
        SuggestionKind::Prefix => 0,
        SuggestionKind::Correction => 1,
    }
}

/// Autocomplete plus spell correction over one vocabulary.
///
/// The trie answers prefix queries, the BK-tree answers fuzzy ones; both are
/// merged through a max-score `PriorityQueue`. Build it once, then share it
/// read-only: every query method takes `&self`.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    trie: Trie,
    bk_tree: BkTree,
    config: EngineConfig,
}

impl SuggestionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    pub fn from_dictionary(dictionary: &Dictionary, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(config)?.populated(dictionary))
    }

    /// Engine over the built-in sample vocabulary with default tuning.
    pub fn with_builtin_dictionary() -> Self {
        // the default config always validates
        Self::empty(EngineConfig::default()).populated(&Dictionary::builtin())
    }

    fn empty(config: EngineConfig) -> Self {
        Self { trie: Trie::with_policy(config.frequency_policy), bk_tree: BkTree::new(), config }
    }

    fn populated(mut self, dictionary: &Dictionary) -> Self {
        for (word, frequency) in dictionary.iter() {
            self.insert(word, frequency);
        }
        info!(
            words = self.word_count(),
            trie_nodes = self.trie.node_count(),
            bk_nodes = self.bk_tree.len(),
            "suggestion engine built"
        );
        self
    }

    pub fn insert(&mut self, word: &str, frequency: u64) {
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return;
        }
        self.trie.insert(&normalized, frequency);
        self.bk_tree.insert(&normalized);
    }

    /// Ranked prefix completions and fuzzy corrections for `query`, at most
    /// `max_results` of them.
    pub fn get_suggestions(&self, query: &str) -> Vec<SuggestionResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let prefix_matches = self.trie.search(&query);
        let fuzzy_matches = if query.chars().count() >= self.config.min_fuzzy_query_len {
            self.bk_tree.search(&query, self.config.max_edit_distance)
        } else {
            Vec::new()
        };

        let mut pq = PriorityQueue::with_comparator(by_rank);
        let mut seen = HashSet::with_capacity(prefix_matches.len() + fuzzy_matches.len());

        for WordFrequency { word, frequency } in prefix_matches {
            seen.insert(word.clone());
            pq.push(SuggestionResult {
                score: self.prefix_score(frequency),
                word,
                frequency,
                kind: SuggestionKind::Prefix,
            });
        }

        for fuzzy in fuzzy_matches {
            if !seen.insert(fuzzy.word.clone()) {
                continue;
            }
            let frequency = self.trie.frequency(&fuzzy.word).unwrap_or(FALLBACK_FREQUENCY);
            pq.push(SuggestionResult {
                score: self.prefix_score(frequency) - fuzzy.distance as f64 * self.config.distance_penalty,
                word: fuzzy.word,
                frequency,
                kind: SuggestionKind::Correction,
            });
        }

        let candidates = pq.len();
        let results = pq.pop_up_to(self.config.max_results);
        debug!(query = %query, candidates, returned = results.len(), "suggestions ranked");
        results
    }

    /// Prefix completions only, capped at `completion_limit`.
    pub fn complete(&self, prefix: &str) -> Vec<WordFrequency> {
        self.trie.search_top_k(prefix.trim(), self.config.completion_limit)
    }

    pub fn spell_checker(&self) -> SpellChecker<'_> {
        SpellChecker::new(&self.trie, &self.bk_tree, &self.config.spell)
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn bk_tree(&self) -> &BkTree {
        &self.bk_tree
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn word_count(&self) -> usize {
        self.trie.word_count()
    }

    fn prefix_score(&self, frequency: u64) -> f64 {
        frequency as f64 / self.config.prefix_score_divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(words: &[(&str, u64)]) -> SuggestionEngine {
        let dict = Dictionary::from_entries(words.iter().map(|&(w, f)| (w, f)));
        SuggestionEngine::from_dictionary(&dict, EngineConfig::default()).unwrap()
    }

    #[test]
    fn prefix_scores_are_frequency_over_ten() {
        let engine = engine_with(&[("graph", 145), ("grape", 20)]);
        let results = engine.get_suggestions("gra");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "graph");
        assert_eq!(results[0].kind, SuggestionKind::Prefix);
        assert_eq!(results[0].score, 14.5);
    }

    #[test]
    fn corrections_are_penalized_per_edit() {
        let engine = engine_with(&[("algorithm", 156)]);
        let results = engine.get_suggestions("algoritm");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, SuggestionKind::Correction);
        assert_eq!(results[0].frequency, 156);
        assert!((results[0].score - (15.6 - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn short_queries_skip_fuzzy_pass() {
        let engine = engine_with(&[("tree", 198), ("trie", 5)]);
        // "tx" is two chars: no corrections even though "tree" is close
        assert!(engine.get_suggestions("tx").is_empty());
        assert!(!engine.get_suggestions("trx").is_empty());
    }

    #[test]
    fn prefix_match_wins_over_correction_for_same_word() {
        let engine = engine_with(&[("node", 234), ("nodes", 50)]);
        let results = engine.get_suggestions("node");
        let nodes: Vec<_> = results.iter().filter(|r| r.word == "nodes").collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind, SuggestionKind::Prefix);
    }

    #[test]
    fn blank_query_yields_nothing() {
        let engine = SuggestionEngine::with_builtin_dictionary();
        assert!(engine.get_suggestions("   ").is_empty());
        assert!(engine.get_suggestions("").is_empty());
    }

    #[test]
    fn query_is_normalized() {
        let engine = SuggestionEngine::with_builtin_dictionary();
        assert_eq!(engine.get_suggestions("  GOO "), engine.get_suggestions("goo"));
    }

    #[test]
    fn accumulate_policy_flows_from_config() {
        let config = EngineConfig { frequency_policy: crate::core::types::FrequencyPolicy::Accumulate, ..EngineConfig::default() };
        let mut engine = SuggestionEngine::new(config).unwrap();
        engine.insert("tree", 3);
        engine.insert("Tree", 4);
        assert_eq!(engine.trie().frequency("tree"), Some(7));
        assert_eq!(engine.bk_tree().len(), 1);
    }

    #[test]
    fn complete_is_capped() {
        let engine = SuggestionEngine::with_builtin_dictionary();
        let completions = engine.complete("a");
        assert!(completions.len() <= engine.config().completion_limit);
        assert_eq!(completions[0].word, "autocomplete");
    }

    #[test]
    fn builtin_constructor_matches_explicit_build() {
        let builtin = SuggestionEngine::with_builtin_dictionary();
        let explicit = SuggestionEngine::from_dictionary(&Dictionary::builtin(), EngineConfig::default()).unwrap();
        assert_eq!(builtin.word_count(), explicit.word_count());
        assert_eq!(builtin.trie().node_count(), explicit.trie().node_count());
        assert_eq!(builtin.bk_tree().len(), explicit.bk_tree().len());
        assert_eq!(builtin.config(), explicit.config());
        for query in ["alg", "algoritm", "grph", "tree"] {
            assert_eq!(builtin.get_suggestions(query), explicit.get_suggestions(query), "{query}");
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig { max_results: 0, ..EngineConfig::default() };
        assert!(SuggestionEngine::new(config).is_err());
    }
}
