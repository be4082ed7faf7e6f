// --- File: src/core/trie.rs
use crate::core::queue::PriorityQueue;
use crate::core::types::{FrequencyPolicy, NodePath, WordFrequency};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Approximate bytes per node used by `memory_usage`.
const APPROX_NODE_BYTES: usize = 100;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct TrieNode {
    children: HashMap<char, usize>,
    /// The full lowercased word, present iff this node ends an inserted word.
    word: Option<String>,
    frequency: u64,
    /// Upper bound on every frequency stored in this node's subtree.
    max_freq_in_subtree: u64,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), word: None, frequency: 0, max_freq_in_subtree: 0 }
    }

    fn is_end_of_word(&self) -> bool {
        self.word.is_some()
    }
}

/// Frequency-weighted prefix tree over lowercased words.
///
/// Nodes live in an arena and are never removed; `word_count` always equals
/// the number of nodes that end a word.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    word_count: usize,
    policy: FrequencyPolicy,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency descending, then word ascending.
fn rank(a: &WordFrequency, b: &WordFrequency) -> Ordering {
    b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word))
}

impl Trie {
    pub fn new() -> Self {
        Self::with_policy(FrequencyPolicy::default())
    }

    pub fn with_policy(policy: FrequencyPolicy) -> Self {
        Self { nodes: vec![TrieNode::new()], word_count: 0, policy }
    }

    pub fn policy(&self) -> FrequencyPolicy {
        self.policy
    }

    /// Inserts `word` (lowercased) with the given frequency. Empty words are ignored.
    /// O(k) where k is the word length.
    pub fn insert(&mut self, word: &str, frequency: u64) {
        if word.is_empty() {
            return;
        }
        let normalized = word.to_lowercase();

        let mut node_idx = ROOT;
        let mut path = vec![ROOT];
        for c in normalized.chars() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&c) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(TrieNode::new());
                self.nodes[node_idx].children.insert(c, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
            path.push(node_idx);
        }

        let node = &mut self.nodes[node_idx];
        let stored = if node.is_end_of_word() {
            self.policy.apply(node.frequency, frequency)
        } else {
            self.word_count += 1;
            frequency
        };
        node.frequency = stored;
        node.word = Some(normalized);

        // Propagate the bound up the path. An overwrite that lowers a
        // frequency leaves a stale but still valid upper bound.
        for &idx in path.iter().rev() {
            let node = &mut self.nodes[idx];
            if node.max_freq_in_subtree >= stored {
                break;
            }
            node.max_freq_in_subtree = stored;
        }
    }

    /// All words starting with `prefix`, frequency descending then word ascending.
    /// An empty or unknown prefix yields an empty list.
    pub fn search(&self, prefix: &str) -> Vec<WordFrequency> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if let Some(word) = &node.word {
                results.push(WordFrequency { word: word.clone(), frequency: node.frequency });
            }
            stack.extend(node.children.values().copied());
        }

        results.sort_by(rank);
        results
    }

    /// The first `k` entries of `search(prefix)`, skipping subtrees whose
    /// frequency bound cannot beat the current k-th best.
    pub fn search_top_k(&self, prefix: &str, k: usize) -> Vec<WordFrequency> {
        if k == 0 {
            return Vec::new();
        }
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        // Worst-ranked candidate on top so it can be evicted.
        let mut heap = PriorityQueue::with_comparator(|a: &WordFrequency, b: &WordFrequency| rank(b, a));
        self.dfs_top_k(start, k, &mut heap);

        let mut results = heap.pop_up_to(k);
        results.reverse();
        results
    }

    fn dfs_top_k(&self, node_idx: usize, k: usize, heap: &mut PriorityQueue<WordFrequency>) {
        let node = &self.nodes[node_idx];
        if let Some(word) = &node.word {
            let candidate = WordFrequency { word: word.clone(), frequency: node.frequency };
            if heap.len() < k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| rank(&candidate, worst) == Ordering::Less) {
                heap.pop();
                heap.push(candidate);
            }
        }

        for &child_idx in node.children.values() {
            // Equal frequencies may still win on the word tie-break.
            let bound = self.nodes[child_idx].max_freq_in_subtree;
            let worth_visiting = heap.len() < k || heap.peek().is_some_and(|worst| bound >= worst.frequency);
            if worth_visiting {
                self.dfs_top_k(child_idx, k, heap);
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(|idx| self.nodes[idx].is_end_of_word())
    }

    /// Stored frequency of an exact word.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        let node = &self.nodes[self.find_node(word)?];
        node.is_end_of_word().then_some(node.frequency)
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Total nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn memory_usage(&self) -> usize {
        self.node_count() * APPROX_NODE_BYTES
    }

    /// Walks `prefix` from the root as far as it matches.
    pub fn node_path(&self, prefix: &str) -> NodePath {
        let mut path = Vec::new();
        let mut node_idx = ROOT;
        for c in prefix.to_lowercase().chars() {
            match self.nodes[node_idx].children.get(&c) {
                Some(&next_idx) => {
                    path.push(c);
                    node_idx = next_idx;
                }
                None => break,
            }
        }
        NodePath { nodes_traversed: path.len(), path }
    }

    fn find_node(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        let mut node_idx = ROOT;
        for c in key.to_lowercase().chars() {
            node_idx = *self.nodes[node_idx].children.get(&c)?;
        }
        Some(node_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wf(word: &str, frequency: u64) -> WordFrequency {
        WordFrequency { word: word.to_string(), frequency }
    }

    fn sample() -> Trie {
        let mut trie = Trie::new();
        for (w, f) in [("apple", 10), ("apply", 5), ("app", 5), ("apt", 7), ("banana", 3)] {
            trie.insert(w, f);
        }
        trie
    }

    #[test]
    fn search_ranks_by_frequency_then_word() {
        let mut trie = Trie::new();
        trie.insert("apple", 10);
        trie.insert("apply", 5);
        assert_eq!(trie.search("app"), vec![wf("apple", 10), wf("apply", 5)]);

        let trie = sample();
        assert_eq!(trie.search("ap"), vec![wf("apple", 10), wf("apt", 7), wf("app", 5), wf("apply", 5)]);
    }

    #[test]
    fn search_includes_prefix_node_itself() {
        let trie = sample();
        let words: Vec<_> = trie.search("app").into_iter().map(|r| r.word).collect();
        assert!(words.contains(&"app".to_string()));
    }

    #[test]
    fn missing_or_empty_prefix_yields_nothing() {
        let trie = sample();
        assert!(trie.search("xyz").is_empty());
        assert!(trie.search("").is_empty());
    }

    #[test]
    fn insert_is_case_insensitive() {
        let mut trie = Trie::new();
        trie.insert("Hello", 4);
        assert!(trie.contains("hello"));
        assert!(trie.contains("HELLO"));
        assert_eq!(trie.search("HE"), vec![wf("hello", 4)]);
    }

    #[test]
    fn contains_requires_whole_word() {
        let trie = sample();
        assert!(trie.contains("apple"));
        assert!(!trie.contains("appl"));
        assert!(!trie.contains(""));
    }

    #[test]
    fn word_count_tracks_distinct_words() {
        let mut trie = Trie::new();
        trie.insert("cat", 1);
        trie.insert("cat", 9);
        trie.insert("cats", 2);
        trie.insert("", 5);
        assert_eq!(trie.word_count(), 2);
    }

    #[test]
    fn overwrite_policy_keeps_last_frequency() {
        let mut trie = Trie::new();
        trie.insert("cat", 4);
        trie.insert("cat", 2);
        assert_eq!(trie.frequency("cat"), Some(2));
    }

    #[test]
    fn accumulate_policy_sums_frequencies() {
        let mut trie = Trie::with_policy(FrequencyPolicy::Accumulate);
        trie.insert("cat", 4);
        trie.insert("cat", 2);
        assert_eq!(trie.frequency("cat"), Some(6));
        assert_eq!(trie.word_count(), 1);
    }

    #[test]
    fn top_k_matches_truncated_search() {
        let mut trie = sample();
        // lower a frequency so the subtree bound goes stale
        trie.insert("apple", 1);
        for k in 0..7 {
            let full = trie.search("a");
            let expected: Vec<_> = full.into_iter().take(k).collect();
            assert_eq!(trie.search_top_k("a", k), expected, "k = {k}");
        }
    }

    #[test]
    fn top_k_breaks_frequency_ties_by_word() {
        let mut trie = Trie::new();
        for w in ["zeta", "beta", "alpha", "delta"] {
            trie.insert(w, 1);
        }
        trie.insert("gamma", 1);
        let top: Vec<_> = trie.search_top_k("a", 1).into_iter().map(|r| r.word).collect();
        assert_eq!(top, vec!["alpha"]);
        let words: Vec<_> = trie.search_top_k("", 3).into_iter().map(|r| r.word).collect();
        assert!(words.is_empty());
    }

    #[test]
    fn node_path_stops_at_first_mismatch() {
        let trie = sample();
        let path = trie.node_path("apz");
        assert_eq!(path.path, vec!['a', 'p']);
        assert_eq!(path.nodes_traversed, 2);
        assert_eq!(trie.node_path("").nodes_traversed, 0);
    }

    #[test]
    fn node_count_and_memory_estimate() {
        let mut trie = Trie::new();
        assert_eq!(trie.node_count(), 1);
        trie.insert("ab", 1);
        trie.insert("ac", 1);
        assert_eq!(trie.node_count(), 4);
        assert_eq!(trie.memory_usage(), 400);
    }
}
