// File: src/config.rs
use crate::core::types::FrequencyPolicy;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning for `SuggestionEngine`. `Default` reproduces the reference ranking:
/// eight results, fuzzy radius 2 for queries of three or more chars, and
/// `frequency / 10 - distance * 10` scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_results: usize,
    pub max_edit_distance: usize,
    /// Queries shorter than this (in chars) skip the fuzzy pass.
    pub min_fuzzy_query_len: usize,
    pub prefix_score_divisor: f64,
    pub distance_penalty: f64,
    pub frequency_policy: FrequencyPolicy,
    /// Cap for `SuggestionEngine::complete`.
    pub completion_limit: usize,
    pub spell: SpellCheckConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 8,
            max_edit_distance: 2,
            min_fuzzy_query_len: 3,
            prefix_score_divisor: 10.0,
            distance_penalty: 10.0,
            frequency_policy: FrequencyPolicy::Overwrite,
            completion_limit: 10,
            spell: SpellCheckConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCheckConfig {
    pub max_distance: usize,
    pub max_suggestions: usize,
    /// Count an adjacent swap as one edit.
    pub transpositions: bool,
}

impl Default for SpellCheckConfig {
    fn default() -> Self {
        Self { max_distance: 2, max_suggestions: 5, transpositions: false }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(EngineError::InvalidArgument("max_results must be at least 1".into()));
        }
        if self.completion_limit == 0 {
            return Err(EngineError::InvalidArgument("completion_limit must be at least 1".into()));
        }
        if !self.prefix_score_divisor.is_finite() || self.prefix_score_divisor <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "prefix_score_divisor must be a positive number, got {}",
                self.prefix_score_divisor
            )));
        }
        if !self.distance_penalty.is_finite() || self.distance_penalty < 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "distance_penalty must be a non-negative number, got {}",
                self.distance_penalty
            )));
        }
        if self.spell.max_suggestions == 0 {
            return Err(EngineError::InvalidArgument("spell.max_suggestions must be at least 1".into()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| EngineError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }
}
