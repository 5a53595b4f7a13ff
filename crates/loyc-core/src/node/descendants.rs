//! Lazy tree traversal

use super::Node;
use std::ops::BitOr;

/// Selects which nodes [`Node::descendants`] yields and where it recurses.
///
/// `YIELD_LOCAL_*` flags yield direct children of the start node;
/// `SCAN_*` flags recurse into children of that category, and recursion
/// yields the same categories that are selected for direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanMode(u8);

impl ScanMode {
    pub const YIELD_SELF: Self = Self(0x01);
    pub const YIELD_LOCAL_ATTRS: Self = Self(0x02);
    pub const YIELD_LOCAL_TARGET: Self = Self(0x04);
    pub const YIELD_LOCAL_ARGS: Self = Self(0x08);
    pub const YIELD_LOCAL: Self = Self(0x0E);
    pub const SCAN_ATTRS: Self = Self(0x10);
    pub const SCAN_TARGET: Self = Self(0x20);
    pub const SCAN_ARGS: Self = Self(0x40);
    pub const YIELD_DEEP_ATTRS: Self = Self(0x12);
    pub const YIELD_DEEP_TARGET: Self = Self(0x24);
    pub const YIELD_DEEP_ARGS: Self = Self(0x48);
    pub const YIELD_DEEP: Self = Self(0x7E);
    pub const YIELD_ALL: Self = Self(0x7F);
    /// Everything except attributes and their contents
    pub const YIELD_ALL_NO_ATTRS: Self = Self(0x6D);

    pub const fn contains(self, flags: Self) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl BitOr for ScanMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Pre-order iterator over a subtree; see [`Node::descendants`].
///
/// Cloning the iterator snapshots its position, so a traversal can be
/// restarted from any point.
#[derive(Debug, Clone)]
pub struct Descendants {
    mode: ScanMode,
    pending_self: Option<Node>,
    stack: Vec<Cursor>,
}

#[derive(Debug, Clone)]
struct Cursor {
    node: Node,
    next: i32,
}

impl Cursor {
    fn new(node: Node) -> Self {
        let next = node.min();
        Self { node, next }
    }
}

impl Node {
    /// Lazily walk this subtree in pre-order, yielding the nodes selected by
    /// `mode`
    pub fn descendants(&self, mode: ScanMode) -> Descendants {
        Descendants {
            mode,
            pending_self: mode
                .contains(ScanMode::YIELD_SELF)
                .then(|| self.clone()),
            stack: vec![Cursor::new(self.clone())],
        }
    }
}

impl Descendants {
    fn flags_for(index: i32) -> (ScanMode, ScanMode) {
        match index {
            i if i < -1 => (ScanMode::YIELD_LOCAL_ATTRS, ScanMode::SCAN_ATTRS),
            -1 => (ScanMode::YIELD_LOCAL_TARGET, ScanMode::SCAN_TARGET),
            _ => (ScanMode::YIELD_LOCAL_ARGS, ScanMode::SCAN_ARGS),
        }
    }
}

impl Iterator for Descendants {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if let Some(node) = self.pending_self.take() {
            return Some(node);
        }
        loop {
            let cursor = self.stack.last_mut()?;
            if cursor.next > cursor.node.max() {
                self.stack.pop();
                continue;
            }
            let index = cursor.next;
            cursor.next += 1;
            let Some(child) = cursor.node.child(index).cloned() else {
                continue;
            };

            let (yield_flag, scan_flag) = Self::flags_for(index);
            if self.mode.contains(scan_flag) {
                self.stack.push(Cursor::new(child.clone()));
            }
            if self.mode.contains(yield_flag) {
                return Some(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeFactory;

    fn render(nodes: impl Iterator<Item = Node>) -> Vec<String> {
        nodes.map(|node| node.to_string()).collect()
    }

    fn sample(f: &NodeFactory) -> Node {
        // @[a] f(g(x), y)
        f.call("f", [f.call("g", [f.id("x")]), f.id("y")])
            .plus_attr(f.id("a"))
    }

    #[test]
    fn test_yield_all_is_pre_order() {
        let f = NodeFactory::synthetic();
        let tree = sample(&f);
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_ALL)),
            ["@[a] f(g(x), y)", "a", "f", "g(x)", "g", "x", "y"]
        );
    }

    #[test]
    fn test_local_modes() {
        let f = NodeFactory::synthetic();
        let tree = sample(&f);
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_LOCAL)),
            ["a", "f", "g(x)", "y"]
        );
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_LOCAL_ARGS)),
            ["g(x)", "y"]
        );
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_SELF)),
            ["@[a] f(g(x), y)"]
        );
    }

    #[test]
    fn test_deep_args_only() {
        let f = NodeFactory::synthetic();
        let tree = sample(&f);
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_DEEP_ARGS)),
            ["g(x)", "x", "y"]
        );
        assert_eq!(
            render(tree.descendants(ScanMode::YIELD_ALL_NO_ATTRS)),
            ["@[a] f(g(x), y)", "f", "g(x)", "g", "x", "y"]
        );
    }

    #[test]
    fn test_traversal_is_restartable() {
        let f = NodeFactory::synthetic();
        let tree = sample(&f);
        let mut walk = tree.descendants(ScanMode::YIELD_DEEP);
        walk.next();
        let snapshot = walk.clone();

        assert_eq!(render(walk), render(snapshot));
    }

    #[test]
    fn test_traversal_stops_early() {
        let f = NodeFactory::synthetic();
        let tree = sample(&f);
        let x = f.atom("x");
        let found = tree
            .descendants(ScanMode::YIELD_DEEP)
            .find(|node| node.is_id_named(&x));
        assert!(found.is_some());
    }
}
