//! Convenience constructors that intern names and build ranges

use super::{LiteralData, LiteralValue, Node, NodeList};
use crate::atom::{Atom, Interner};
use crate::span::{SourceFile, SourceRange};
use biome_text_size::{TextRange, TextSize};

/// Builds nodes from string names, interning them in a shared pool.
///
/// Nodes built without explicit offsets get a synthetic range; the `_at`
/// variants place nodes in the factory's source file.
#[derive(Debug, Clone)]
pub struct NodeFactory {
    interner: Interner,
    file: Option<SourceFile>,
}

impl NodeFactory {
    /// Create a factory for nodes read from `file`
    pub fn new(interner: Interner, file: SourceFile) -> Self {
        Self {
            interner,
            file: Some(file),
        }
    }

    /// Create a factory with a fresh interner and no source file
    pub fn synthetic() -> Self {
        Self {
            interner: Interner::new(),
            file: None,
        }
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    /// Intern a name
    pub fn atom(&self, name: &str) -> Atom {
        self.interner.intern(name)
    }

    /// A range in this factory's file, or a synthetic range if it has none
    pub fn range(&self, start: u32, end: u32) -> SourceRange {
        match &self.file {
            Some(file) => SourceRange::at(file.clone(), start, end),
            None => SourceRange::synthetic(),
        }
    }

    pub fn id(&self, name: &str) -> Node {
        Node::id(self.atom(name), SourceRange::synthetic())
    }

    pub fn id_at(&self, name: &str, start: u32, end: u32) -> Node {
        Node::id(self.atom(name), self.range(start, end))
    }

    /// Call the identifier `name`
    pub fn call(&self, name: &str, args: impl IntoIterator<Item = Node>) -> Node {
        Node::call_named(
            self.atom(name),
            args.into_iter().collect::<NodeList>(),
            SourceRange::synthetic(),
        )
    }

    /// Call the identifier `name` located in `start..end`, inferring the
    /// target's position from the argument ranges
    pub fn call_named(
        &self,
        name: &str,
        args: impl IntoIterator<Item = Node>,
        start: u32,
        end: u32,
    ) -> Node {
        Node::call_named(
            self.atom(name),
            args.into_iter().collect::<NodeList>(),
            self.range(start, end),
        )
    }

    /// Call the identifier `name` whose own position is `target`
    pub fn call_at(
        &self,
        name: &str,
        target: (u32, u32),
        args: impl IntoIterator<Item = Node>,
        start: u32,
        end: u32,
    ) -> Node {
        let target = TextRange::new(TextSize::from(target.0), TextSize::from(target.1));
        Node::call_named_at(
            self.atom(name),
            target,
            args.into_iter().collect::<NodeList>(),
            self.range(start, end),
        )
    }

    /// Call an arbitrary target node
    pub fn call_node(&self, target: Node, args: impl IntoIterator<Item = Node>) -> Node {
        Node::call(
            target,
            args.into_iter().collect::<NodeList>(),
            SourceRange::synthetic(),
        )
    }

    pub fn literal(&self, value: impl Into<LiteralValue>) -> Node {
        Node::literal(LiteralData::new(value), SourceRange::synthetic())
    }

    /// A literal that remembers its source text
    pub fn literal_at(&self, value: impl Into<LiteralValue>, text: &str, start: u32) -> Node {
        let end = start + text.len() as u32;
        Node::literal(
            LiteralData::new(value).with_text(text),
            self.range(start, end),
        )
    }

    pub fn string(&self, value: &str) -> Node {
        self.literal(value)
    }

    pub fn int(&self, value: i64) -> Node {
        self.literal(value)
    }

    /// A trivia call such as `%SLComment(" text")`
    pub fn trivia(&self, name: &str, text: &str) -> Node {
        Node::trivia(
            self.atom(name),
            LiteralData::new(text),
            SourceRange::synthetic(),
        )
    }

    pub fn missing(&self) -> Node {
        Node::missing(SourceRange::synthetic())
    }

    /// Collect nodes into a child list
    pub fn list(&self, items: impl IntoIterator<Item = Node>) -> NodeList {
        items.into_iter().collect()
    }

    pub fn splice(&self, args: impl IntoIterator<Item = Node>) -> Node {
        Node::splice(args.into_iter().collect::<NodeList>())
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::synthetic()
    }
}
