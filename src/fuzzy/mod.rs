// src/fuzzy/mod.rs
pub mod bktree;
pub mod distance;
