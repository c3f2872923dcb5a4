//! Parser configuration
//!
//! Loaded from JSON by the driver; every field has a default so partial
//! files are fine.

use cppexpr_common::CompilerError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a single parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of expressions, type-ids, template argument lists,
    /// declarators and braced lists combined
    pub max_depth: usize,
    /// Cache cast-expression results per token position
    pub memoize: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            memoize: true,
        }
    }
}

impl ParserConfig {
    pub fn from_json(text: &str) -> Result<Self, CompilerError> {
        let config: ParserConfig = serde_json::from_str(text)
            .map_err(|e| CompilerError::config_error(format!("invalid parser configuration: {e}")))?;
        Ok(config.validated())
    }

    /// Load parser configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Clamp settings that would make every parse fail
    pub fn validated(mut self) -> Self {
        if self.max_depth == 0 {
            warn!("max_depth of 0 rejects every expression, using 1");
            self.max_depth = 1;
        }
        if !self.memoize {
            warn!("memoization disabled; ambiguous inputs may take exponential time");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ParserConfig::from_json(r#"{ "max_depth": 32 }"#).unwrap();
        assert_eq!(config.max_depth, 32);
        assert!(config.memoize);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        let config = ParserConfig::from_json(r#"{ "max_depth": 0, "memoize": false }"#).unwrap();
        assert_eq!(config.max_depth, 1);
        assert!(!config.memoize);
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let err = ParserConfig::from_json("{ max_depth: }").unwrap_err();
        assert!(matches!(err, CompilerError::ConfigError { .. }));
    }
}
