//! Tree patterns with `$name` placeholders
//!
//! A pattern is an ordinary tree in which some nodes are placeholders:
//!
//! - `$x` (`'$`(x)) captures any single node as `x`
//! - `$(..x)`, `$(...x)` or `$(params x)` capture a run of zero or more
//!   consecutive arguments as `x`, stored as `#splice(...)`
//!
//! Argument lists are aligned from the end, so fixed arguments after a run
//! capture still match exactly.
//!
//! Attributes on a pattern are not supported, except trivia which is
//! ignored. Candidates may carry trivia attributes anywhere; at the top
//! level they are handed back in [`MatchResult::unmatched_attrs`] so a
//! rewrite can keep them.

mod captures;
mod matcher;

pub use captures::Captures;
pub use matcher::match_pattern;

use loyc_core::{Atom, LoycError, Node, Result, ScanMode, sym};

/// A placeholder found in a pattern or template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: Atom,
    /// Captures a run of arguments instead of one node
    pub multi: bool,
}

impl Placeholder {
    /// Recognize `$x`, `$(..x)`, `$(...x)` and `$(params x)`
    pub fn of(node: &Node) -> Option<Placeholder> {
        if !node.calls_with(&sym::SUBSTITUTE, 1) {
            return None;
        }
        let arg = node.args().first()?;
        if arg.is_id() {
            let multi = arg.attr_named(&sym::PARAMS).is_some();
            return Some(Placeholder {
                name: arg.name().clone(),
                multi,
            });
        }
        let is_rest = arg.calls_with(&sym::DOT_DOT, 1) || arg.calls_with(&sym::DOT_DOT_DOT, 1);
        match arg.args().first() {
            Some(inner) if is_rest && inner.is_id() => Some(Placeholder {
                name: inner.name().clone(),
                multi: true,
            }),
            _ => None,
        }
    }
}

/// Outcome of a successful match
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub captures: Captures,
    /// Trivia attributes of the candidate root that the pattern did not
    /// account for
    pub unmatched_attrs: Vec<Node>,
}

/// A validated pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    node: Node,
}

impl Pattern {
    /// Wrap `node`, rejecting attributes the matcher cannot handle
    pub fn new(node: Node) -> Result<Self> {
        check_no_attributes(&node)?;
        Ok(Self { node })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Names of all placeholders, in pre-order
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.node
            .descendants(ScanMode::YIELD_ALL)
            .filter_map(|node| Placeholder::of(&node))
            .collect()
    }

    /// Match `candidate`, returning its captures on success
    pub fn matches(&self, candidate: &Node) -> Result<Option<MatchResult>> {
        let mut result = MatchResult::default();
        if match_pattern(
            candidate,
            &self.node,
            &mut result.captures,
            &mut result.unmatched_attrs,
        )? {
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }
}

/// Fail with `UnsupportedPattern` if `pattern` carries non-trivia
/// attributes outside of placeholders
pub(crate) fn check_pattern_attrs(pattern: &Node) -> Result<()> {
    match pattern.attrs().iter().find(|attr| !attr.is_trivia()) {
        Some(attr) => Err(LoycError::unsupported_pattern(format!(
            "attribute `{attr}` on pattern `{}`",
            pattern.without_attrs()
        ))),
        None => Ok(()),
    }
}

fn check_no_attributes(pattern: &Node) -> Result<()> {
    check_pattern_attrs(pattern)?;
    if Placeholder::of(pattern).is_some() {
        return Ok(());
    }
    for child in pattern.target().into_iter().chain(pattern.args().iter()) {
        check_no_attributes(child)?;
    }
    Ok(())
}
