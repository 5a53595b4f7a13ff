//! Universal syntax tree nodes
//!
//! Every element of a program is one of three kinds of [`Node`]:
//!
//! - **Identifier**: a name such as `x` or `'+`
//! - **Literal**: a value such as `123` or `"hi"`
//! - **Call**: a target node applied to an argument list, `f(x, y)`
//!
//! Any node can also carry an attribute list. Nodes are immutable and
//! cheap to clone (an `Arc` bump); "modifying" one produces a new node that
//! shares every unchanged child with the old one.
//!
//! ## Uniform indexing
//!
//! The children of a node are addressed by a single integer range
//! `[min(), max()]`:
//!
//! - `i < -1`: attribute `attrs[i + attr_count + 1]`
//! - `i == -1`: the call target
//! - `i >= 0`: argument `args[i]`
//!
//! so `min() == -attr_count - 1` and `max()` is `arg_count - 1` for calls and
//! `-2` for identifiers and literals.
//!
//! ## Compact layouts
//!
//! Two call shapes are stored without allocating their children up front:
//!
//! - a call whose target is a plain name keeps only the name and the target's
//!   position relative to the call (as two `u16`s); the target node is
//!   materialized on first access
//! - a trivia call such as `%SLComment(" text")` keeps its single literal
//!   argument inline and materializes the argument list on first access
//!
//! Both layouts are invisible to callers: `target()` and `args()` behave the
//! same as for the general layout.

mod descendants;
mod display;
mod equality;
mod factory;
mod list;
mod literal;
mod style;
mod update;

pub use descendants::{Descendants, ScanMode};
pub use equality::{CompareMode, DEFAULT_HASH_DEPTH};
pub use factory::NodeFactory;
pub use list::NodeList;
pub use literal::{LiteralData, LiteralValue};
pub use style::NodeStyle;

use crate::atom::{Atom, sym};
use crate::error::LoycError;
use crate::result::Result;
use crate::span::SourceRange;
use biome_text_size::{TextRange, TextSize};
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// The three kinds of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Identifier,
    Literal,
    Call,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::Call => "Call",
        };
        f.write_str(name)
    }
}

/// Borrowed, kind-specific view of a node, for exhaustive matching
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Identifier(&'a Atom),
    Literal(&'a LiteralData),
    Call { target: &'a Node, args: &'a NodeList },
}

/// An immutable syntax tree node
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

pub(crate) struct NodeData {
    span: SourceRange,
    style: AtomicU8,
    attrs: NodeList,
    body: Body,
}

#[derive(Clone)]
pub(crate) enum Body {
    Identifier(Atom),
    Literal(LiteralData),
    Call(CallData),
}

pub(crate) struct CallData {
    target: Target,
    args: Args,
    /// Cached default-depth hash; 0 means "not computed yet"
    hash: AtomicU64,
}

#[derive(Clone)]
pub(crate) enum Target {
    Node(Node),
    /// A plain-name target stored as the name plus its range relative to
    /// the start of the call
    Inferred {
        name: Atom,
        offset: u16,
        len: u16,
        node: OnceCell<Node>,
    },
}

#[derive(Clone)]
pub(crate) enum Args {
    List(NodeList),
    /// A single literal argument stored inline
    Literal {
        value: LiteralData,
        list: OnceCell<NodeList>,
    },
}

static EMPTY_LIST: Lazy<NodeList> = Lazy::new(NodeList::new);
static NO_VALUE: LiteralValue = LiteralValue::NoValue;

impl CallData {
    pub(crate) fn new(target: Target, args: Args) -> Self {
        Self {
            target,
            args,
            hash: AtomicU64::new(0),
        }
    }
}

/// The cached hash depends on the owning node's attributes, so a copied
/// call body starts with an empty cache.
impl Clone for CallData {
    fn clone(&self) -> Self {
        Self::new(self.target.clone(), self.args.clone())
    }
}

impl NodeData {
    pub(crate) fn new(span: SourceRange, style: NodeStyle, attrs: NodeList, body: Body) -> Self {
        Self {
            span,
            style: AtomicU8::new(style.bits()),
            attrs,
            body,
        }
    }
}

impl Node {
    pub(crate) fn from_data(data: NodeData) -> Self {
        Self(Arc::new(data))
    }

    pub(crate) fn data(&self) -> &NodeData {
        &self.0
    }

    pub(crate) fn body(&self) -> &Body {
        &self.0.body
    }

    fn from_body(body: Body, span: SourceRange) -> Self {
        Self::from_data(NodeData::new(span, NodeStyle::DEFAULT, NodeList::new(), body))
    }

    // ----------------------------------------------------------------------
    // Construction
    // ----------------------------------------------------------------------

    /// Create an identifier
    pub fn id(name: Atom, span: SourceRange) -> Self {
        Self::from_body(Body::Identifier(name), span)
    }

    /// Create a literal
    pub fn literal(value: impl Into<LiteralData>, span: SourceRange) -> Self {
        Self::from_body(Body::Literal(value.into()), span)
    }

    /// Create a call with an explicit target node
    pub fn call(target: Node, args: impl Into<NodeList>, span: SourceRange) -> Self {
        let body = CallData::new(Target::Node(target), Args::List(args.into()));
        Self::from_body(Body::Call(body), span)
    }

    /// Create a call whose target is the identifier `name`.
    ///
    /// The target's position is inferred from the call and argument ranges:
    /// before the first argument for prefix calls, between the first two
    /// arguments for infix calls, or after the only argument for suffix
    /// calls.
    pub fn call_named(name: Atom, args: impl Into<NodeList>, span: SourceRange) -> Self {
        let args = args.into();
        let target_range = infer_target_range(&name, &args, &span);
        Self::call_named_at(name, target_range, args, span)
    }

    /// Create a call whose target is the identifier `name` located at
    /// `target_range`
    pub fn call_named_at(
        name: Atom,
        target_range: TextRange,
        args: impl Into<NodeList>,
        span: SourceRange,
    ) -> Self {
        let target = compact_target(name, target_range, &span);
        let body = CallData::new(target, Args::List(args.into()));
        Self::from_body(Body::Call(body), span)
    }

    /// Create a trivia call `name(value)`, e.g. `%SLComment(" text")`.
    /// The argument shares the call's range.
    pub fn trivia(name: Atom, value: LiteralData, span: SourceRange) -> Self {
        let target = compact_target(name, TextRange::empty(span.start()), &span);
        let args = Args::Literal {
            value,
            list: OnceCell::new(),
        };
        Self::from_body(Body::Call(CallData::new(target, args)), span)
    }

    /// Create the empty identifier that stands in for a missing element
    pub fn missing(span: SourceRange) -> Self {
        Self::id(Atom::empty(), span)
    }

    /// Create a `#splice(...)` list, which is flattened into the enclosing
    /// list when inserted with the splice helpers
    pub fn splice(args: impl Into<NodeList>) -> Self {
        Self::call_named(Atom::clone(&sym::SPLICE), args, SourceRange::synthetic())
    }

    // ----------------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------------

    /// Get the node kind
    pub fn kind(&self) -> NodeKind {
        match self.body() {
            Body::Identifier(_) => NodeKind::Identifier,
            Body::Literal(_) => NodeKind::Literal,
            Body::Call(_) => NodeKind::Call,
        }
    }

    /// Get a kind-specific view of the node
    pub fn view(&self) -> NodeRef<'_> {
        match self.body() {
            Body::Identifier(name) => NodeRef::Identifier(name),
            Body::Literal(data) => NodeRef::Literal(data),
            Body::Call(call) => NodeRef::Call {
                target: self.call_target(call),
                args: self.args(),
            },
        }
    }

    /// The node's name.
    ///
    /// For a call this is the name of its target when the target is an
    /// identifier, otherwise the empty atom. Literals have the empty name.
    pub fn name(&self) -> &Atom {
        match self.body() {
            Body::Identifier(name) => name,
            Body::Literal(_) => &sym::EMPTY,
            Body::Call(call) => match &call.target {
                Target::Inferred { name, .. } => name,
                Target::Node(target) if target.is_id() => target.name(),
                Target::Node(_) => &sym::EMPTY,
            },
        }
    }

    /// The literal value, or [`LiteralValue::NoValue`] for other kinds
    pub fn value(&self) -> &LiteralValue {
        match self.body() {
            Body::Literal(data) => data.value(),
            _ => &NO_VALUE,
        }
    }

    /// The full literal payload (value, text and type marker)
    pub fn literal_data(&self) -> Option<&LiteralData> {
        match self.body() {
            Body::Literal(data) => Some(data),
            _ => None,
        }
    }

    /// The call target; `None` unless this is a call
    pub fn target(&self) -> Option<&Node> {
        match self.body() {
            Body::Call(call) => Some(self.call_target(call)),
            _ => None,
        }
    }

    fn call_target<'a>(&'a self, call: &'a CallData) -> &'a Node {
        match &call.target {
            Target::Node(node) => node,
            Target::Inferred {
                name,
                offset,
                len,
                node,
            } => node.get_or_init(|| {
                let start = self.span().start() + TextSize::from(u32::from(*offset));
                let range = TextRange::at(start, TextSize::from(u32::from(*len)));
                let span = if self.span().is_known() {
                    self.span().with_range(range)
                } else {
                    SourceRange::synthetic()
                };
                Node::id(name.clone(), span)
            }),
        }
    }

    /// The argument list; empty unless this is a call
    pub fn args(&self) -> &NodeList {
        let Body::Call(call) = self.body() else {
            return &EMPTY_LIST;
        };
        match &call.args {
            Args::List(list) => list,
            Args::Literal { value, list } => list.get_or_init(|| {
                NodeList::from(vec![Node::literal(value.clone(), self.span().clone())])
            }),
        }
    }

    /// The attribute list
    pub fn attrs(&self) -> &NodeList {
        &self.0.attrs
    }

    /// The source range
    pub fn span(&self) -> &SourceRange {
        &self.0.span
    }

    /// The printing style
    pub fn style(&self) -> NodeStyle {
        NodeStyle::from_bits(self.0.style.load(Ordering::Relaxed))
    }

    /// Overwrite the printing style in place.
    ///
    /// Styles are hints that never affect equality, so this is the one
    /// mutation allowed on a shared node. Concurrent writers race, and one
    /// of the written values wins.
    pub fn set_style(&self, style: NodeStyle) {
        self.0.style.store(style.bits(), Ordering::Relaxed);
    }

    // ----------------------------------------------------------------------
    // Uniform child indexing
    // ----------------------------------------------------------------------

    /// Lowest valid child index, `-attr_count - 1`
    pub fn min(&self) -> i32 {
        -(self.attr_count() as i32) - 1
    }

    /// Highest valid child index: `arg_count - 1` for calls, `-2` otherwise
    pub fn max(&self) -> i32 {
        if self.is_call() {
            self.arg_count() as i32 - 1
        } else {
            -2
        }
    }

    /// Get the child at `index`, or `None` if it is out of range
    pub fn child(&self, index: i32) -> Option<&Node> {
        if index < -1 {
            let slot = index + self.attr_count() as i32 + 1;
            usize::try_from(slot).ok().and_then(|slot| self.attrs().get(slot))
        } else if index == -1 {
            self.target()
        } else {
            self.args().get(index as usize)
        }
    }

    /// Get the child at `index`, failing with `IndexOutOfRange`
    pub fn try_child(&self, index: i32) -> Result<&Node> {
        self.child(index).ok_or_else(|| self.out_of_range(index))
    }

    pub(crate) fn out_of_range(&self, index: i32) -> LoycError {
        LoycError::IndexOutOfRange {
            index,
            min: self.min(),
            max: self.max(),
        }
    }

    /// Iterate over all children in index order: attributes, target, args
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.attrs()
            .iter()
            .chain(self.target())
            .chain(self.args().iter())
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    pub fn is_id(&self) -> bool {
        matches!(self.body(), Body::Identifier(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.body(), Body::Literal(_))
    }

    pub fn is_call(&self) -> bool {
        matches!(self.body(), Body::Call(_))
    }

    /// Check if this is the identifier `name`
    pub fn is_id_named(&self, name: &Atom) -> bool {
        matches!(self.body(), Body::Identifier(own) if own == name)
    }

    /// Check if this is the empty identifier used for missing elements
    pub fn is_missing(&self) -> bool {
        self.is_id_named(&sym::EMPTY)
    }

    /// Check if this is a call to `name`
    pub fn calls(&self, name: &Atom) -> bool {
        self.is_call() && self.name() == name
    }

    /// Check if this is a call to `name` with exactly `arg_count` arguments
    pub fn calls_with(&self, name: &Atom, arg_count: usize) -> bool {
        self.calls(name) && self.arg_count() == arg_count
    }

    /// Check if this is a call to `name` with at least `min_args` arguments
    pub fn calls_min(&self, name: &Atom, min_args: usize) -> bool {
        self.calls(name) && self.arg_count() >= min_args
    }

    /// Check if this is a call whose target is an identifier without
    /// attributes
    pub fn has_simple_head(&self) -> bool {
        let Body::Call(call) = self.body() else {
            return false;
        };
        match &call.target {
            Target::Inferred { .. } => true,
            Target::Node(target) => target.is_id() && !target.has_attrs(),
        }
    }

    /// Number of arguments (0 for non-calls)
    pub fn arg_count(&self) -> usize {
        match self.body() {
            Body::Call(CallData {
                args: Args::Literal { .. },
                ..
            }) => 1,
            Body::Call(_) => self.args().len(),
            _ => 0,
        }
    }

    /// Number of attributes
    pub fn attr_count(&self) -> usize {
        self.attrs().len()
    }

    pub fn has_attrs(&self) -> bool {
        !self.attrs().is_empty()
    }

    /// Find the first attribute named `name`
    pub fn attr_named(&self, name: &Atom) -> Option<&Node> {
        self.attrs().iter().find(|attr| attr.name() == name)
    }

    /// Check if this node's name marks it as trivia (starts with `%`)
    pub fn is_trivia(&self) -> bool {
        !self.is_literal() && self.name().is_trivia_name()
    }

    /// Check if this node has a special (keyword-like) name
    pub fn has_special_name(&self) -> bool {
        self.name().is_special()
    }

    /// Check if both handles refer to the same node allocation
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Store a plain-name target compactly when its range fits in the call's
/// `u16` offset/length slots, otherwise allocate the identifier.
fn compact_target(name: Atom, target_range: TextRange, span: &SourceRange) -> Target {
    if !span.is_known() {
        return Target::Inferred {
            name,
            offset: 0,
            len: 0,
            node: OnceCell::new(),
        };
    }
    let offset = target_range
        .start()
        .checked_sub(span.start())
        .and_then(|offset| u16::try_from(u32::from(offset)).ok());
    let len = u16::try_from(u32::from(target_range.len())).ok();
    match (offset, len) {
        (Some(offset), Some(len)) => Target::Inferred {
            name,
            offset,
            len,
            node: OnceCell::new(),
        },
        _ => Target::Node(Node::id(name, span.with_range(target_range))),
    }
}

fn infer_target_range(name: &Atom, args: &NodeList, span: &SourceRange) -> TextRange {
    let start = span.start();
    let name_len = TextSize::from(name.as_str().len() as u32);
    let mut located = args.iter().filter(|arg| arg.span().is_known());

    let Some(first) = located.next() else {
        return TextRange::at(start, name_len.min(span.len()));
    };
    let first = first.span().range();
    if first.start() > start {
        // prefix: `f(x)`, `-x`
        return TextRange::at(start, name_len.min(first.start() - start));
    }
    if let Some(second) = located.next() {
        let second = second.span().range();
        if first.end() <= second.start() {
            // infix: `x + y`
            return TextRange::new(first.end(), second.start());
        }
    }
    // suffix: `x++`
    let end = span.end().max(first.end());
    TextRange::new(first.end(), end)
}
