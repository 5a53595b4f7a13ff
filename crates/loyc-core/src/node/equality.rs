//! Structural equality and depth-bounded hashing
//!
//! Two nodes are structurally equal when they have the same kind, name or
//! literal value, attributes, target and arguments. Source ranges never take
//! part; printing styles only when [`CompareMode::STYLES`] is requested.
//!
//! Hashing stops descending after a fixed depth and mixes in only a bounded
//! number of children per level, so hashing a huge tree costs about the same
//! as hashing a small one. Equal trees always hash equally at the same depth.

use super::{Args, Body, CallData, LiteralData, Node, NodeKind, NodeList, Target};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;
use std::sync::atomic::Ordering;

/// Recursion budget used by [`Node::structural_hash`] and the `Hash` impl
pub const DEFAULT_HASH_DEPTH: u32 = 3;

/// Options for [`Node::equals`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompareMode(u8);

impl CompareMode {
    pub const NORMAL: Self = Self(0);
    /// Also compare printing styles
    pub const STYLES: Self = Self(1);
    /// Skip trivia attributes (comments, newlines) on either side
    pub const IGNORE_TRIVIA: Self = Self(2);

    pub const fn contains(self, flags: Self) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl BitOr for CompareMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Node {
    /// Compare two trees structurally
    pub fn equals(&self, other: &Node, mode: CompareMode) -> bool {
        if Node::ptr_eq(self, other) {
            return true;
        }
        if mode.contains(CompareMode::STYLES) && self.style() != other.style() {
            return false;
        }
        let bodies_equal = match (self.body(), other.body()) {
            (Body::Identifier(a), Body::Identifier(b)) => a == b,
            (Body::Literal(a), Body::Literal(b)) => a == b,
            (Body::Call(a), Body::Call(b)) => {
                self.call_target_equals(a, other, b, mode)
                    && lists_equal(self.args(), other.args(), mode)
            }
            _ => false,
        };
        bodies_equal && attrs_equal(self.attrs(), other.attrs(), mode)
    }

    fn call_target_equals(
        &self,
        a: &CallData,
        other: &Node,
        b: &CallData,
        mode: CompareMode,
    ) -> bool {
        match (&a.target, &b.target) {
            (Target::Inferred { name: x, .. }, Target::Inferred { name: y, .. })
                if !mode.contains(CompareMode::STYLES) =>
            {
                x == y
            }
            _ => self.call_target(a).equals(other.call_target(b), mode),
        }
    }

    /// Hash with the default depth; cached for calls
    pub fn structural_hash(&self) -> u64 {
        let Body::Call(call) = self.body() else {
            return self.hash_with_depth(DEFAULT_HASH_DEPTH);
        };
        let cached = call.hash.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        // Concurrent callers compute the same value, so a plain store is enough
        let hash = self.hash_with_depth(DEFAULT_HASH_DEPTH);
        call.hash.store(hash, Ordering::Relaxed);
        hash
    }

    /// Hash with an explicit recursion budget (never cached)
    pub fn hash_with_depth(&self, depth: u32) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_u8(self.kind() as u8);
        match self.body() {
            Body::Identifier(name) => name.hash(&mut hasher),
            Body::Literal(data) => data.hash(&mut hasher),
            Body::Call(_) => self.name().hash(&mut hasher),
        }
        hasher.write_usize(self.attr_count());
        hasher.write_usize(self.arg_count());

        if depth > 0 {
            let budget = 2 + depth as usize * 4;
            let mut children = 0;
            let mut mix = |hash: u64| {
                if children < budget {
                    hasher.write_u64(hash);
                    children += 1;
                }
            };
            for attr in self.attrs().iter().take(budget) {
                mix(attr.hash_with_depth(depth - 1));
            }
            if let Body::Call(call) = self.body() {
                mix(self.target_hash(call, depth - 1));
                match &call.args {
                    Args::Literal { value, .. } => mix(literal_hash(value)),
                    Args::List(args) => {
                        for arg in args.iter().take(budget) {
                            mix(arg.hash_with_depth(depth - 1));
                        }
                    }
                }
            }
        }
        nonzero(hasher.finish())
    }

    fn target_hash(&self, call: &CallData, depth: u32) -> u64 {
        match &call.target {
            Target::Node(target) => target.hash_with_depth(depth),
            Target::Inferred { name, .. } => {
                let mut hasher = FxHasher::default();
                hasher.write_u8(NodeKind::Identifier as u8);
                name.hash(&mut hasher);
                hasher.write_usize(0);
                hasher.write_usize(0);
                nonzero(hasher.finish())
            }
        }
    }
}

/// A literal argument with no attributes, hashed as `hash_with_depth` would
fn literal_hash(value: &LiteralData) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u8(NodeKind::Literal as u8);
    value.hash(&mut hasher);
    hasher.write_usize(0);
    hasher.write_usize(0);
    nonzero(hasher.finish())
}

fn nonzero(hash: u64) -> u64 {
    if hash == 0 { 1 } else { hash }
}

fn lists_equal(a: &NodeList, b: &NodeList, mode: CompareMode) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y, mode))
}

fn attrs_equal(a: &NodeList, b: &NodeList, mode: CompareMode) -> bool {
    if !mode.contains(CompareMode::IGNORE_TRIVIA) {
        return lists_equal(a, b, mode);
    }
    let mut left = a.iter().filter(|attr| !attr.is_trivia());
    let mut right = b.iter().filter(|attr| !attr.is_trivia());
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.equals(y, mode) => continue,
            _ => return false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, CompareMode::NORMAL)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}
