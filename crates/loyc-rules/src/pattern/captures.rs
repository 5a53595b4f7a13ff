//! Capture maps produced by the matcher

use indexmap::IndexMap;
use indexmap::map::Entry;
use loyc_core::{Atom, Node, NodeList, sym};

/// Insertion-ordered map from capture name to captured node.
///
/// Binding a name twice does not overwrite: both values are concatenated
/// into one `#splice(...)`, flattening any splice already present.
#[derive(Debug, Clone, Default)]
pub struct Captures {
    bindings: IndexMap<Atom, Node>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `node`, concatenating with an earlier binding
    pub fn bind(&mut self, name: Atom, node: Node) {
        match self.bindings.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
            Entry::Occupied(mut entry) => {
                let items = NodeList::new()
                    .add_splice(entry.get())
                    .add_splice(&node);
                entry.insert(Node::splice(items));
            }
        }
    }

    /// Bind `name` to a run of nodes, as `#splice(...)`
    pub fn bind_run(&mut self, name: Atom, run: &[Node]) {
        self.bind(name, Node::splice(run.iter().cloned().collect::<NodeList>()));
    }

    pub fn get(&self, name: &Atom) -> Option<&Node> {
        self.bindings.get(name)
    }

    /// Look up a capture by its text
    pub fn get_named(&self, name: &str) -> Option<&Node> {
        self.bindings
            .iter()
            .find(|(atom, _)| atom.as_str() == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &Atom) -> bool {
        self.bindings.contains_key(name)
    }

    /// Captured nodes for `name` as a list: the items of a `#splice`, or
    /// the single node
    pub fn items(&self, name: &Atom) -> NodeList {
        match self.bindings.get(name) {
            Some(node) if node.calls(&sym::SPLICE) => node.args().clone(),
            Some(node) => NodeList::from(vec![node.clone()]),
            None => NodeList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &Node)> {
        self.bindings.iter()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
