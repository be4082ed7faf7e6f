// src/core/mod.rs
pub mod engine;
pub mod queue;
pub mod trie;
pub mod types;
