// File: src/fuzzy/bktree.rs
use crate::core::types::FuzzyMatch;
use crate::fuzzy::distance::levenshtein;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct BkNode {
    word: String,
    /// Edge distance -> child index. The edge value is always the exact
    /// Levenshtein distance between this node's word and the child's word.
    children: HashMap<usize, usize>,
}

impl BkNode {
    fn new(word: &str) -> Self {
        Self { word: word.to_string(), children: HashMap::new() }
    }
}

/// Burkhard-Keller tree over Levenshtein distance for bounded-radius lookup.
///
/// Slot 0 is the root once the tree is non-empty. No deletion, no rebalancing.
#[derive(Debug, Clone, Default)]
pub struct BkTree {
    nodes: Vec<BkNode>,
}

impl BkTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `word` lowercased, returning `false` if an equal word (distance 0)
    /// is already stored.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.to_lowercase();
        if self.nodes.is_empty() {
            self.nodes.push(BkNode::new(&word));
            return true;
        }

        let mut node_idx = 0;
        loop {
            let d = levenshtein(&word, &self.nodes[node_idx].word);
            if d == 0 {
                return false;
            }
            match self.nodes[node_idx].children.get(&d) {
                Some(&child_idx) => node_idx = child_idx,
                None => {
                    let new_idx = self.nodes.len();
                    self.nodes.push(BkNode::new(&word));
                    self.nodes[node_idx].children.insert(d, new_idx);
                    return true;
                }
            }
        }
    }

    /// Every stored word within `max_distance` of `query`, in traversal order.
    ///
    /// Only children whose edge distance lies in `[d - r, d + r]` are visited;
    /// by the triangle inequality no match can hide anywhere else.
    pub fn search(&self, query: &str, max_distance: usize) -> Vec<FuzzyMatch> {
        let mut results = Vec::new();
        if self.nodes.is_empty() {
            return results;
        }

        let mut candidates = vec![0];
        while let Some(idx) = candidates.pop() {
            let node = &self.nodes[idx];
            let d = levenshtein(query, &node.word);
            if d <= max_distance {
                results.push(FuzzyMatch { word: node.word.clone(), distance: d });
            }

            let low = d.saturating_sub(max_distance);
            let high = d.saturating_add(max_distance);
            candidates.extend(
                node.children
                    .iter()
                    .filter(|(edge, _)| (low..=high).contains(*edge))
                    .map(|(_, &child_idx)| child_idx),
            );
        }
        results
    }

    pub fn contains(&self, word: &str) -> bool {
        !self.search(word, 0).is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut deepest = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.nodes[idx].children.values().map(|&child| (child, depth + 1)));
        }
        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_words(mut matches: Vec<FuzzyMatch>) -> Vec<(String, usize)> {
        matches.sort_by(|a, b| a.word.cmp(&b.word));
        matches.into_iter().map(|m| (m.word, m.distance)).collect()
    }

    #[test]
    fn finds_single_correction() {
        let mut tree = BkTree::new();
        tree.insert("algorithm");
        tree.insert("alphabet");
        assert_eq!(tree.search("algoritm", 1), vec![FuzzyMatch { word: "algorithm".into(), distance: 1 }]);
    }

    #[test]
    fn empty_tree_returns_nothing() {
        let tree = BkTree::new();
        assert!(tree.search("anything", 3).is_empty());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = BkTree::new();
        assert!(tree.insert("tree"));
        assert!(tree.insert("trees"));
        assert!(!tree.insert("tree"));
        assert!(!tree.insert("TREE"));
        assert_eq!(tree.len(), 2);
        assert_eq!(sorted_words(tree.search("tree", 1)), vec![("tree".into(), 0), ("trees".into(), 1)]);
    }

    #[test]
    fn stores_words_lowercased() {
        let mut tree = BkTree::new();
        assert!(tree.insert("Apple"));
        assert!(tree.insert("APPLY"));
        assert_eq!(tree.search("apple", 0), vec![FuzzyMatch { word: "apple".into(), distance: 0 }]);
        assert_eq!(sorted_words(tree.search("APPL", 1)), vec![("apple".into(), 1), ("apply".into(), 1)]);
    }

    #[test]
    fn equal_edge_distances_share_a_subtree() {
        // "bat", "cot" and "hat" are all one edit from "cat"
        let mut tree = BkTree::new();
        for w in ["cat", "bat", "cot", "hat", "dog"] {
            tree.insert(w);
        }
        assert_eq!(tree.len(), 5);
        assert!(tree.depth() >= 3);
        assert_eq!(
            sorted_words(tree.search("cat", 1)),
            vec![("bat".into(), 1), ("cat".into(), 0), ("cot".into(), 1), ("hat".into(), 1)]
        );
    }

    #[test]
    fn radius_zero_is_exact_lookup() {
        let mut tree = BkTree::new();
        for w in ["node", "nodes", "code"] {
            tree.insert(w);
        }
        assert!(tree.contains("node"));
        assert!(!tree.contains("mode"));
    }

    #[test]
    fn matches_brute_force_scan() {
        let words = [
            "search", "binary", "tree", "graph", "node", "network", "neural", "machine", "learning",
            "deep", "model", "data", "database", "structure", "design", "engine", "engineer",
        ];
        let mut tree = BkTree::new();
        for w in words {
            tree.insert(w);
        }
        for query in ["serch", "grape", "mode", "engin", "datum", "x"] {
            for radius in 0..4 {
                let mut expected: Vec<_> = words
                    .iter()
                    .map(|w| (w.to_string(), levenshtein(query, w)))
                    .filter(|(_, d)| *d <= radius)
                    .collect();
                expected.sort();
                assert_eq!(sorted_words(tree.search(query, radius)), expected, "{query} r={radius}");
            }
        }
    }
}
