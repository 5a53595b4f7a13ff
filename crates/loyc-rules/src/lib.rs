//! Loyc Rules
//!
//! Pattern matching and macro-style rewriting over Loyc syntax trees.
//! Patterns are ordinary trees containing `$name` placeholders; a
//! [`RewriteRule`] pairs a pattern with a template, and the [`RuleEngine`]
//! applies rules across a whole tree until nothing matches.

pub mod engine;
pub mod pattern;
pub mod rewrite;

pub use engine::RuleEngine;
pub use pattern::{Captures, MatchResult, Pattern, Placeholder, match_pattern};
pub use rewrite::{RewriteRule, substitute};
