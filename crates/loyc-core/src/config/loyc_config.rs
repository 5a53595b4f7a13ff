//! Configuration types

use crate::error::LoycError;
use crate::node::{DEFAULT_HASH_DEPTH, Node};
use crate::result::Result;
use crate::trivia::TriviaOptions;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoycConfig {
    pub hashing: HashingConfiguration,
    pub trivia: TriviaConfiguration,
    pub rewrite: RewriteConfiguration,
}

impl LoycConfig {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| LoycError::config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LoycError::config_error(e.to_string()))
    }

    /// Reject values the algorithms cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.hashing.depth > 16 {
            return Err(LoycError::config_error(format!(
                "hashing.depth must be at most 16, got {}",
                self.hashing.depth
            )));
        }
        if self.rewrite.max_expansions == 0 {
            return Err(LoycError::config_error(
                "rewrite.max_expansions must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// `[hashing]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashingConfiguration {
    /// Recursion budget for structural hashing
    pub depth: u32,
}

impl HashingConfiguration {
    /// Structural hash of `node` with the configured budget
    pub fn hash(&self, node: &Node) -> u64 {
        if self.depth == DEFAULT_HASH_DEPTH {
            return node.structural_hash();
        }
        node.hash_with_depth(self.depth)
    }
}

impl Default for HashingConfiguration {
    fn default() -> Self {
        Self {
            depth: DEFAULT_HASH_DEPTH,
        }
    }
}

/// `[trivia]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriviaConfiguration {
    /// Mark calls without trivia inside as one-liners
    pub mark_one_liners: bool,
    /// Let a blank line end the trailing part of a trivia run
    pub split_on_blank_line: bool,
}

impl Default for TriviaConfiguration {
    fn default() -> Self {
        Self {
            mark_one_liners: true,
            split_on_blank_line: true,
        }
    }
}

impl From<&TriviaConfiguration> for TriviaOptions {
    fn from(config: &TriviaConfiguration) -> Self {
        TriviaOptions {
            mark_one_liners: config.mark_one_liners,
            split_on_blank_line: config.split_on_blank_line,
        }
    }
}

/// `[rewrite]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfiguration {
    /// Maximum number of rule applications per run
    pub max_expansions: usize,
    /// Also rewrite inside attributes
    pub process_attributes: bool,
}

impl Default for RewriteConfiguration {
    fn default() -> Self {
        Self {
            max_expansions: 1000,
            process_attributes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoycConfig::default();
        assert_eq!(config.hashing.depth, 3);
        assert!(config.trivia.mark_one_liners);
        assert!(config.trivia.split_on_blank_line);
        assert_eq!(config.rewrite.max_expansions, 1000);
        assert!(config.rewrite.process_attributes);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = LoycConfig::from_toml("[rewrite]\nmax_expansions = 10\n")
            .expect("valid config");
        assert_eq!(config.rewrite.max_expansions, 10);
        assert!(config.rewrite.process_attributes);
        assert_eq!(config.hashing, HashingConfiguration::default());
    }

    #[test]
    fn test_configured_hash_depth() {
        let f = crate::node::NodeFactory::synthetic();
        let deep = f.call("a", [f.call("b", [f.call("c", [f.call("d", [f.id("x")])])])]);
        let other = f.call("a", [f.call("b", [f.call("c", [f.call("d", [f.id("y")])])])]);

        let shallow = HashingConfiguration { depth: 1 };
        assert_eq!(shallow.hash(&deep), shallow.hash(&other));
        let default = HashingConfiguration::default();
        assert_eq!(default.hash(&deep), deep.structural_hash());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(LoycConfig::from_toml("[trivia]\nkeep_whitespace = true\n").is_err());
        assert!(LoycConfig::from_toml("[printer]\n").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(LoycConfig::from_toml("[rewrite]\nmax_expansions = 0\n").is_err());
        assert!(LoycConfig::from_toml("[hashing]\ndepth = 99\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = LoycConfig::default();
        config.trivia.split_on_blank_line = false;
        let text = config.to_toml().expect("serializable");
        assert_eq!(LoycConfig::from_toml(&text).expect("parses"), config);
    }

    #[test]
    fn test_trivia_options_conversion() {
        let config = TriviaConfiguration {
            mark_one_liners: false,
            split_on_blank_line: true,
        };
        let options = TriviaOptions::from(&config);
        assert!(!options.mark_one_liners);
        assert!(options.split_on_blank_line);
    }
}
