//! Trivia: comments and newlines carried as attributes
//!
//! Parsers drop comments and blank lines before building the tree. This
//! module puts them back: [`TriviaInjector`] walks a freshly parsed node
//! stream alongside the sorted trivia tokens and attaches every token to the
//! node it belongs to, so a printer can reproduce the original layout.
//!
//! Trivia attributes use names that start with `%`:
//!
//! - `%SLComment("text")`: a single-line comment, delimiters removed
//! - `%MLComment("text")`: a block comment, delimiters removed
//! - `%newline`: a line break
//! - `%trailing(...)`: trivia that follows the node it is attached to
//!
//! How tokens are classified and turned into attributes is decided by a
//! [`TriviaStrategy`]; [`StandardTrivia`] handles `//` and `/* */` comments.
//!
//! # Example
//!
//! ```rust,ignore
//! use loyc_core::trivia::{StandardTrivia, TriviaInjector};
//!
//! let mut injected = TriviaInjector::new(StandardTrivia, file, tokens).run(nodes);
//! let nodes: Vec<Node> = injected.by_ref().collect();
//! assert_eq!(injected.consumed(), token_count);
//! ```

mod injector;
mod standard;

pub use injector::{Injected, TriviaInjector, TriviaOptions};
pub use standard::{StandardTrivia, TriviaKind, TriviaToken};

use crate::atom::{Atom, sym};
use crate::node::{LiteralData, Node, NodeList};
use crate::span::SourceRange;
use biome_text_size::TextRange;

/// Where a run of trivia ended up relative to the node it is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaLocation {
    /// Before the node
    Leading,
    /// After the node, on the same line (or up to a blank line)
    Trailing,
    /// After the last node of the input
    TrailingExtra,
    /// Inside the node but outside all of its located children
    Ambiguous,
}

/// What a trivia token is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaClass {
    Newline,
    /// A single-line comment with its delimiter removed
    SingleLineComment(String),
    /// A block comment with its delimiters removed
    BlockComment(String),
    /// Anything else (whitespace, unknown tokens); dropped by default
    Unrecognized,
}

/// Converts trivia tokens into attributes and attaches them to nodes.
///
/// The injector calls [`to_attribute`](Self::to_attribute) exactly once per
/// token and uses the result as is.
pub trait TriviaStrategy {
    /// The token type produced by the lexer
    type Trivia;

    /// Source range of a token
    fn range(&self, trivia: &Self::Trivia) -> TextRange;

    /// Check if a token is a line break
    fn is_newline(&self, trivia: &Self::Trivia) -> bool;

    /// Classify a token and extract its text
    fn classify(&self, trivia: &Self::Trivia) -> TriviaClass;

    /// Check if a token carries nothing worth keeping (spaces, unknown
    /// tokens). Such tokens never separate the two line breaks of a blank
    /// line.
    fn is_filler(&self, trivia: &Self::Trivia) -> bool {
        matches!(self.classify(trivia), TriviaClass::Unrecognized)
    }

    /// Build the attribute for a token, or `None` to drop it
    fn to_attribute(&self, trivia: &Self::Trivia, span: SourceRange) -> Option<Node> {
        match self.classify(trivia) {
            TriviaClass::Newline => Some(Node::id(Atom::clone(&sym::TRIVIA_NEWLINE), span)),
            TriviaClass::SingleLineComment(text) => Some(Node::trivia(
                Atom::clone(&sym::TRIVIA_SL_COMMENT),
                LiteralData::new(text),
                span,
            )),
            TriviaClass::BlockComment(text) => Some(Node::trivia(
                Atom::clone(&sym::TRIVIA_ML_COMMENT),
                LiteralData::new(text),
                span,
            )),
            TriviaClass::Unrecognized => None,
        }
    }

    /// Attach converted trivia to `node`
    fn attach(&self, node: &Node, attrs: Vec<Node>, location: TriviaLocation) -> Node {
        match location {
            TriviaLocation::Leading => node.plus_attrs_before(attrs),
            TriviaLocation::Trailing | TriviaLocation::TrailingExtra => {
                node.plus_trailing_trivia(attrs)
            }
            TriviaLocation::Ambiguous => node.plus_attrs(attrs),
        }
    }
}

impl Node {
    /// Trivia attributes in front of the node (everything trivia except
    /// the `%trailing` holder)
    pub fn leading_trivia(&self) -> impl Iterator<Item = &Node> {
        self.attrs()
            .iter()
            .filter(|attr| attr.is_trivia() && !attr.calls(&sym::TRIVIA_TRAILING))
    }

    /// Trivia that follows the node, from its `%trailing(...)` attribute
    pub fn trailing_trivia(&self) -> NodeList {
        self.attrs()
            .iter()
            .find(|attr| attr.calls(&sym::TRIVIA_TRAILING))
            .map(|holder| holder.args().clone())
            .unwrap_or_default()
    }

    /// Append trailing trivia, creating the `%trailing(...)` holder if
    /// needed
    pub fn plus_trailing_trivia(&self, trivia: impl IntoIterator<Item = Node>) -> Node {
        let trivia: Vec<Node> = trivia.into_iter().collect();
        if trivia.is_empty() {
            return self.clone();
        }
        let holder = self
            .attrs()
            .iter()
            .position(|attr| attr.calls(&sym::TRIVIA_TRAILING));
        match holder {
            Some(index) => {
                let updated = self.attrs()[index].plus_args(trivia);
                let attrs = self
                    .attrs()
                    .set(index, updated)
                    .unwrap_or_else(|| self.attrs().clone());
                self.with_attrs(attrs)
            }
            None => self.plus_attr(Node::call_named(
                Atom::clone(&sym::TRIVIA_TRAILING),
                NodeList::from(trivia),
                SourceRange::synthetic(),
            )),
        }
    }

    /// Remove all trivia attributes
    pub fn without_trivia(&self) -> Node {
        if !self.attrs().iter().any(Node::is_trivia) {
            return self.clone();
        }
        let kept: NodeList = self
            .attrs()
            .iter()
            .filter(|attr| !attr.is_trivia())
            .cloned()
            .collect();
        self.with_attrs(kept)
    }
}
