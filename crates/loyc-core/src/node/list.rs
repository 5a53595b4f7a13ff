//! Persistent child lists
//!
//! Attribute and argument lists are immutable, structurally shared vectors
//! (`rpds::Vector` over `Arc`). Every "modification" returns a new list that shares
//! storage with the old one, and cloning is O(1).

use super::Node;
use crate::atom::{Atom, sym};
use crate::error::LoycError;
use crate::result::Result;
use archery::ArcK;
use rpds::Vector;
use std::fmt;

/// An immutable, structurally shared list of nodes
#[derive(Clone)]
pub struct NodeList(NodeVector);

type NodeVector = Vector<Node, ArcK>;

impl NodeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(NodeVector::new_with_ptr_kind())
    }

    /// Build a list from optional elements, failing on the first absent one.
    ///
    /// This is the entry point for producers (such as error-recovering
    /// parsers) that may not have a node for every slot.
    pub fn try_from_options(
        list: &'static str,
        items: impl IntoIterator<Item = Option<Node>>,
    ) -> Result<Self> {
        let mut vector = NodeVector::new_with_ptr_kind();
        for (index, item) in items.into_iter().enumerate() {
            let node = item.ok_or(LoycError::AbsentElement { list, index })?;
            vector.push_back_mut(node);
        }
        Ok(Self(vector))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the node at `index`
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    /// First node
    pub fn first(&self) -> Option<&Node> {
        self.0.first()
    }

    /// Last node
    pub fn last(&self) -> Option<&Node> {
        self.0.last()
    }

    /// Iterate over the nodes
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.0.iter()
    }

    /// Append a node
    pub fn push(&self, node: Node) -> Self {
        Self(self.0.push_back(node))
    }

    /// Replace the node at `index`; `None` if out of range
    pub fn set(&self, index: usize, node: Node) -> Option<Self> {
        self.0.set(index, node).map(Self)
    }

    /// Insert a node before `index` (`index == len` appends)
    pub fn insert(&self, index: usize, node: Node) -> Self {
        if index >= self.len() {
            return self.push(node);
        }
        let mut vector = NodeVector::new_with_ptr_kind();
        for (i, existing) in self.iter().enumerate() {
            if i == index {
                vector.push_back_mut(node.clone());
            }
            vector.push_back_mut(existing.clone());
        }
        Self(vector)
    }

    /// Remove the node at `index`
    pub fn remove(&self, index: usize) -> Self {
        if index + 1 == self.len() {
            return self.0.drop_last().map(Self).unwrap_or_default();
        }
        self.iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, node)| node.clone())
            .collect()
    }

    /// Append all nodes of `other`
    pub fn concat(&self, other: &NodeList) -> Self {
        let mut vector = self.0.clone();
        for node in other.iter() {
            vector.push_back_mut(node.clone());
        }
        Self(vector)
    }

    /// Check if both lists hold the same node references in the same order.
    ///
    /// This is the "nothing changed" test used by the update API; it does
    /// not look inside the nodes.
    pub fn same_nodes(&self, other: &NodeList) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| Node::ptr_eq(a, b))
    }

    /// Append `node`, or its arguments if it is a `#splice(...)` call
    pub fn add_splice(&self, node: &Node) -> Self {
        self.add_splice_named(node, &sym::SPLICE)
    }

    /// Append `node`, or its arguments if it calls `list_name`
    pub fn add_splice_named(&self, node: &Node, list_name: &Atom) -> Self {
        if node.calls(list_name) {
            self.concat(node.args())
        } else {
            self.push(node.clone())
        }
    }

    /// Insert `node` before `index`, or its arguments if it is a
    /// `#splice(...)` call
    pub fn insert_splice(&self, index: usize, node: &Node) -> Self {
        if !node.calls(&sym::SPLICE) {
            return self.insert(index, node.clone());
        }
        let mut vector = NodeVector::new_with_ptr_kind();
        for (i, existing) in self.iter().enumerate() {
            if i == index {
                for item in node.args().iter() {
                    vector.push_back_mut(item.clone());
                }
            }
            vector.push_back_mut(existing.clone());
        }
        if index >= self.len() {
            for item in node.args().iter() {
                vector.push_back_mut(item.clone());
            }
        }
        Self(vector)
    }

    /// Replace every `#splice(...)` element with its arguments (one level).
    /// Returns `self` unchanged when there is nothing to flatten.
    pub fn flatten_splices(&self) -> Self {
        if !self.iter().any(|node| node.calls(&sym::SPLICE)) {
            return self.clone();
        }
        self.iter()
            .fold(NodeList::new(), |list, node| list.add_splice(node))
    }
}

impl Default for NodeList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut vector = NodeVector::new_with_ptr_kind();
        for node in iter {
            vector.push_back_mut(node);
        }
        Self(vector)
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = rpds::vector::Iter<'a, Node, ArcK>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        nodes.into_iter().collect()
    }
}

/// Structural equality (spans ignored), element by element
impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for NodeList {}

impl fmt::Debug for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl std::ops::Index<usize> for NodeList {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.0[index]
    }
}
