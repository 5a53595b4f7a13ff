//! Immutable update operations
//!
//! Every `with_*`/`plus_*`/`without_*` method returns a new node and leaves
//! the receiver untouched. When a request changes nothing, the receiver
//! itself is returned (the same allocation, see [`Node::ptr_eq`]), so callers
//! can detect "no change" without comparing trees.
//!
//! Some requests change the node kind, following the classic rules:
//! renaming a literal yields an identifier, giving an identifier arguments
//! yields a call, and giving any non-call a target yields a call.

use super::{
    Args, Body, CallData, LiteralData, LiteralValue, Node, NodeData, NodeList, NodeStyle,
    Target, compact_target, infer_target_range,
};
use crate::atom::{Atom, sym};
use crate::error::LoycError;
use crate::result::Result;
use crate::span::SourceRange;
use once_cell::sync::OnceCell;

impl Node {
    fn rebuild(&self, span: SourceRange, attrs: NodeList, body: Body) -> Node {
        Node::from_data(NodeData::new(span, self.style(), attrs, body))
    }

    fn with_body(&self, body: Body) -> Node {
        self.rebuild(self.span().clone(), self.attrs().clone(), body)
    }

    fn call_body(target: Target, args: NodeList) -> Body {
        Body::Call(CallData::new(target, Args::List(args)))
    }

    /// Rename the node.
    ///
    /// A call is renamed through its target; a literal becomes an
    /// identifier.
    pub fn with_name(&self, name: Atom) -> Node {
        match self.body() {
            Body::Identifier(own) if *own == name => self.clone(),
            Body::Identifier(_) | Body::Literal(_) => self.with_body(Body::Identifier(name)),
            Body::Call(call) => match &call.target {
                Target::Inferred {
                    name: own,
                    offset,
                    len,
                    ..
                } => {
                    if *own == name {
                        return self.clone();
                    }
                    let target = Target::Inferred {
                        name,
                        offset: *offset,
                        len: *len,
                        node: OnceCell::new(),
                    };
                    self.with_body(Body::Call(CallData::new(target, call.args.clone())))
                }
                Target::Node(target) => self.with_target(target.with_name(name)),
            },
        }
    }

    /// Change the literal value.
    ///
    /// Fails with `InvalidOperation` on identifiers and calls.
    pub fn with_value(&self, value: impl Into<LiteralValue>) -> Result<Node> {
        let value = value.into();
        match self.body() {
            Body::Literal(data) if *data.value() == value => Ok(self.clone()),
            Body::Literal(data) => Ok(self.with_body(Body::Literal(data.with_value(value)))),
            _ => Err(LoycError::invalid_operation("set a value", self.kind())),
        }
    }

    /// Replace the full literal payload (value, text and type marker).
    ///
    /// Fails with `InvalidOperation` on identifiers and calls.
    pub fn with_literal(&self, data: LiteralData) -> Result<Node> {
        match self.body() {
            Body::Literal(own) if *own == data && own.text() == data.text() => Ok(self.clone()),
            Body::Literal(_) => Ok(self.with_body(Body::Literal(data))),
            _ => Err(LoycError::invalid_operation("set a value", self.kind())),
        }
    }

    /// Replace the call target; a non-call becomes a call with no arguments
    pub fn with_target(&self, target: Node) -> Node {
        match self.target() {
            Some(own) if Node::ptr_eq(own, &target) => self.clone(),
            Some(_) => self.with_body(Self::call_body(Target::Node(target), self.args().clone())),
            None => self.with_body(Self::call_body(Target::Node(target), NodeList::new())),
        }
    }

    /// Replace the argument list.
    ///
    /// A non-call becomes a call whose target is the receiver without its
    /// attributes; the attributes stay on the new call.
    pub fn with_args(&self, args: impl Into<NodeList>) -> Node {
        let args = args.into();
        match self.body() {
            Body::Call(call) => {
                if args.same_nodes(self.args()) {
                    return self.clone();
                }
                let target = call.target.clone();
                self.with_body(Body::Call(CallData::new(target, Args::List(args))))
            }
            _ => {
                let target = self.without_attrs();
                self.with_body(Self::call_body(Target::Node(target), args))
            }
        }
    }

    /// Replace the attribute list
    pub fn with_attrs(&self, attrs: impl Into<NodeList>) -> Node {
        let attrs = attrs.into();
        if attrs.same_nodes(self.attrs()) {
            return self.clone();
        }
        self.rebuild(self.span().clone(), attrs, self.body().clone())
    }

    /// Move the node to a new source range.
    ///
    /// A compact call target keeps its absolute position; if the old range
    /// was synthetic the target position is inferred from the new one.
    pub fn with_span(&self, span: SourceRange) -> Node {
        if *self.span() == span {
            return self.clone();
        }
        let body = match self.body() {
            Body::Call(call) => match &call.target {
                Target::Inferred { name, .. } if !self.span().is_known() => {
                    let range = infer_target_range(name, self.args(), &span);
                    let target = compact_target(name.clone(), range, &span);
                    Body::Call(CallData::new(target, call.args.clone()))
                }
                Target::Inferred { .. } => {
                    let target = self.target().cloned().unwrap_or_else(|| Node::missing(span.clone()));
                    Body::Call(CallData::new(Target::Node(target), call.args.clone()))
                }
                Target::Node(_) => self.body().clone(),
            },
            body => body.clone(),
        };
        self.rebuild(span, self.attrs().clone(), body)
    }

    /// Change the printing style
    pub fn with_style(&self, style: NodeStyle) -> Node {
        if self.style() == style {
            return self.clone();
        }
        let node = self.rebuild(self.span().clone(), self.attrs().clone(), self.body().clone());
        node.set_style(style);
        node
    }

    /// Append one attribute
    pub fn plus_attr(&self, attr: Node) -> Node {
        self.with_attrs(self.attrs().push(attr))
    }

    /// Append attributes
    pub fn plus_attrs(&self, attrs: impl IntoIterator<Item = Node>) -> Node {
        let mut list = self.attrs().clone();
        for attr in attrs {
            list = list.push(attr);
        }
        self.with_attrs(list)
    }

    /// Prepend attributes, keeping their order
    pub fn plus_attrs_before(&self, attrs: impl IntoIterator<Item = Node>) -> Node {
        let before: NodeList = attrs.into_iter().collect();
        if before.is_empty() {
            return self.clone();
        }
        self.with_attrs(before.concat(self.attrs()))
    }

    /// Append one argument (a non-call becomes a call)
    pub fn plus_arg(&self, arg: Node) -> Node {
        self.with_args(self.args().push(arg))
    }

    /// Append arguments
    pub fn plus_args(&self, args: impl IntoIterator<Item = Node>) -> Node {
        let mut list = self.args().clone();
        for arg in args {
            list = list.push(arg);
        }
        if self.is_call() {
            self.with_args(list)
        } else if list.is_empty() {
            self.clone()
        } else {
            self.with_args(list)
        }
    }

    /// Remove all attributes
    pub fn without_attrs(&self) -> Node {
        if !self.has_attrs() {
            return self.clone();
        }
        self.with_attrs(NodeList::new())
    }

    /// Remove the first attribute named `name`
    pub fn without_attr_named(&self, name: &Atom) -> Node {
        match self.attrs().iter().position(|attr| attr.name() == name) {
            Some(index) => self.with_attrs(self.attrs().remove(index)),
            None => self.clone(),
        }
    }

    /// Replace the attribute at `index` (counted from the front)
    pub fn with_attr_changed(&self, index: usize, attr: Node) -> Result<Node> {
        let uniform = index as i32 - self.attr_count() as i32 - 1;
        if index >= self.attr_count() {
            return Err(self.out_of_range(uniform));
        }
        self.with_child(uniform, attr)
    }

    /// Replace the argument at `index`
    pub fn with_arg_changed(&self, index: usize, arg: Node) -> Result<Node> {
        self.with_child(index as i32, arg)
    }

    /// Replace the child at a uniform `index`: attributes below -1, the
    /// target at -1, arguments from 0
    pub fn with_child(&self, index: i32, node: Node) -> Result<Node> {
        let existing = self.try_child(index)?;
        if Node::ptr_eq(existing, &node) {
            return Ok(self.clone());
        }
        if index < -1 {
            let slot = (index + self.attr_count() as i32 + 1) as usize;
            let attrs = self
                .attrs()
                .set(slot, node)
                .ok_or_else(|| self.out_of_range(index))?;
            Ok(self.with_attrs(attrs))
        } else if index == -1 {
            Ok(self.with_target(node))
        } else {
            let args = self
                .args()
                .set(index as usize, node)
                .ok_or_else(|| self.out_of_range(index))?;
            Ok(self.with_args(args))
        }
    }

    /// Replace the argument at `index` with `node`, splicing in its
    /// arguments instead if it is a `#splice(...)` call
    pub fn with_spliced_arg(&self, index: usize, node: &Node) -> Result<Node> {
        if !node.calls(&sym::SPLICE) {
            return self.with_arg_changed(index, node.clone());
        }
        if index >= self.arg_count() {
            return Err(self.out_of_range(index as i32));
        }
        let args = self.args().remove(index).insert_splice(index, node);
        Ok(self.with_args(args))
    }

    /// Flatten every `#splice(...)` argument into the argument list
    pub fn with_splices_flattened(&self) -> Node {
        self.with_args(self.args().flatten_splices())
    }

    /// Ask `select` what to do with each attribute, the target and each
    /// argument, in that order.
    ///
    /// `Some(node)` keeps or replaces the child; `None` deletes it. A call
    /// always keeps a target, so a deleted target becomes the empty
    /// (missing) identifier. Returns the receiver when nothing changed.
    pub fn transform(&self, mut select: impl FnMut(&Node) -> Option<Node>) -> Node {
        let (attrs, attrs_changed) = select_list(self.attrs(), &mut select);

        let Body::Call(call) = self.body() else {
            return if attrs_changed {
                self.with_attrs(attrs)
            } else {
                self.clone()
            };
        };

        let old_target = self.call_target(call);
        let target = select(old_target).unwrap_or_else(|| Node::missing(old_target.span().clone()));
        let target_changed = !Node::ptr_eq(&target, old_target);
        let (args, args_changed) = select_list(self.args(), &mut select);

        if !(attrs_changed || target_changed || args_changed) {
            return self.clone();
        }
        let target = if target_changed {
            Target::Node(target)
        } else {
            call.target.clone()
        };
        let args = if args_changed {
            Args::List(args)
        } else {
            call.args.clone()
        };
        self.rebuild(
            self.span().clone(),
            attrs,
            Body::Call(CallData::new(target, args)),
        )
    }

    /// Rebuild the tree, replacing every node for which `replace` returns
    /// `Some`. Replacements are not searched again; other nodes are
    /// searched recursively, starting with the receiver itself.
    pub fn replace_recursive<F>(&self, replace: &mut F) -> Node
    where
        F: FnMut(&Node) -> Option<Node>,
    {
        if let Some(replacement) = replace(self) {
            return replacement;
        }
        self.transform(|child| Some(child.replace_recursive(&mut *replace)))
    }
}

fn select_list(
    list: &NodeList,
    select: &mut impl FnMut(&Node) -> Option<Node>,
) -> (NodeList, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(list.len());
    for node in list.iter() {
        match select(node) {
            Some(kept) => {
                changed |= !Node::ptr_eq(&kept, node);
                out.push(kept);
            }
            None => changed = true,
        }
    }
    if changed {
        (out.into(), true)
    } else {
        (list.clone(), false)
    }
}
