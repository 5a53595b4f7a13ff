//! Reattaching trivia to a parsed node stream
//!
//! The injector walks the node stream and the trivia stream together. Each
//! run of trivia between two nodes is split at the end of the previous
//! node's line:
//!
//! - the part on the previous node's line (up to and including the first
//!   newline) trails the previous node
//! - when the run contains a blank line, the trailing part extends through
//!   the first newline of that blank line instead
//! - everything else leads the next node
//!
//! Inside a node the same rule applies between its located children, except
//! in the attribute region: trivia between attributes (or between the last
//! attribute and the target) becomes extra attributes of the node itself.
//! Trivia inside a node but outside all of its located children is attached
//! to the node as `Ambiguous`. Trivia after the last node trails it
//! (`TrailingExtra`), and trivia with no node at all gets a placeholder node,
//! so no token is ever dropped.

use super::{TriviaLocation, TriviaStrategy};
use crate::node::{Node, NodeStyle};
use crate::span::{SourceFile, SourceRange};
use biome_text_size::{TextRange, TextSize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Tuning for [`TriviaInjector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaOptions {
    /// Mark calls without any trivia inside as [`NodeStyle::ONE_LINER`]
    pub mark_one_liners: bool,
    /// Let a blank line end the trailing part of a trivia run
    pub split_on_blank_line: bool,
}

impl Default for TriviaOptions {
    fn default() -> Self {
        Self {
            mark_one_liners: true,
            split_on_blank_line: true,
        }
    }
}

/// Attaches sorted trivia tokens to a stream of parsed nodes
pub struct TriviaInjector<S: TriviaStrategy> {
    strategy: S,
    file: SourceFile,
    trivia: VecDeque<S::Trivia>,
    options: TriviaOptions,
    consumed: usize,
    converted: usize,
}

impl<S: TriviaStrategy> TriviaInjector<S> {
    /// Create an injector for nodes parsed from `file`. `trivia` must be
    /// sorted by position.
    pub fn new(
        strategy: S,
        file: SourceFile,
        trivia: impl IntoIterator<Item = S::Trivia>,
    ) -> Self {
        Self {
            strategy,
            file,
            trivia: trivia.into_iter().collect(),
            options: TriviaOptions::default(),
            consumed: 0,
            converted: 0,
        }
    }

    pub fn with_options(mut self, options: TriviaOptions) -> Self {
        self.options = options;
        self
    }

    /// Lazily attach trivia to `nodes`
    pub fn run<I>(self, nodes: I) -> Injected<S, I::IntoIter>
    where
        I: IntoIterator<Item = Node>,
    {
        Injected {
            injector: self,
            nodes: nodes.into_iter(),
            previous: None,
            unlocated: Vec::new(),
            ready: VecDeque::new(),
            emitted: 0,
            finished: false,
        }
    }

    fn take_before(&mut self, position: TextSize) -> Vec<S::Trivia> {
        let mut taken = Vec::new();
        while let Some(front) = self.trivia.front() {
            if self.strategy.range(front).start() >= position {
                break;
            }
            taken.extend(self.trivia.pop_front());
        }
        taken
    }

    fn take_rest(&mut self) -> Vec<S::Trivia> {
        self.trivia.drain(..).collect()
    }

    fn has_trivia_before(&self, position: TextSize) -> bool {
        self.trivia
            .front()
            .is_some_and(|front| self.strategy.range(front).start() < position)
    }

    /// Number of tokens in `run` that trail the previous node
    fn trailing_len(&self, run: &[S::Trivia]) -> usize {
        if self.options.split_on_blank_line {
            let mut last_newline = None;
            for (i, trivia) in run.iter().enumerate() {
                if self.strategy.is_newline(trivia) {
                    if let Some(blank) = last_newline {
                        return blank + 1;
                    }
                    last_newline = Some(i);
                } else if !self.strategy.is_filler(trivia) {
                    last_newline = None;
                }
            }
        }
        run.iter()
            .position(|trivia| self.strategy.is_newline(trivia))
            .map_or(run.len(), |first| first + 1)
    }

    /// Number of tokens in `run` before its first newline
    fn same_line_len(&self, run: &[S::Trivia]) -> usize {
        run.iter()
            .position(|t| self.strategy.is_newline(t))
            .unwrap_or(run.len())
    }

    fn convert(&mut self, run: Vec<S::Trivia>) -> Vec<Node> {
        self.consumed += run.len();
        let attrs: Vec<Node> = run
            .iter()
            .filter_map(|trivia| {
                let span = SourceRange::new(self.file.clone(), self.strategy.range(trivia));
                self.strategy.to_attribute(trivia, span)
            })
            .collect();
        self.converted += attrs.len();
        attrs
    }

    fn attach(&mut self, node: Node, run: Vec<S::Trivia>, location: TriviaLocation) -> Node {
        if run.is_empty() {
            return node;
        }
        let attrs = self.convert(run);
        if attrs.is_empty() {
            return node;
        }
        trace!(node = %node, count = attrs.len(), ?location, "attaching trivia");
        self.strategy.attach(&node, attrs, location)
    }

    /// Split `run` between `previous` (trailing) and the following node
    /// (leading); returns the updated previous node and the leading part
    fn split_run(&mut self, previous: Node, mut run: Vec<S::Trivia>) -> (Node, Vec<S::Trivia>) {
        let leading = run.split_off(self.trailing_len(&run));
        let previous = self.attach(previous, run, TriviaLocation::Trailing);
        (previous, leading)
    }

    /// Attach the trivia that lies inside `node`'s range to its children
    fn process_interior(&mut self, node: Node) -> Node {
        let span = node.span().clone();
        if !span.is_known() {
            return node;
        }
        let converted = self.converted;
        let node = if self.has_trivia_before(span.end()) {
            self.distribute(node, &span)
        } else {
            node
        };
        // whitespace-only interiors still count as one line
        if self.options.mark_one_liners && node.is_call() && self.converted == converted {
            return node.with_style(node.style() | NodeStyle::ONE_LINER);
        }
        node
    }

    fn distribute(&mut self, node: Node, span: &SourceRange) -> Node {
        let mut attrs: Vec<Node> = Vec::with_capacity(node.attr_count());
        let mut target: Option<Node> = None;
        let mut args: Vec<Node> = Vec::with_capacity(node.arg_count());
        let mut pending: Option<(Slot, Node)> = None;
        let mut last_end = span.start();

        for index in node.min()..=node.max() {
            let Some(child) = node.child(index).cloned() else {
                continue;
            };
            let slot = Slot::of(index);
            let child_span = child.span();
            let located = child_span.is_known()
                && child_span.start() >= last_end
                && child_span.end() <= span.end();
            if !located {
                flush(&mut pending, &mut attrs, &mut target, &mut args);
                place(slot, child, &mut attrs, &mut target, &mut args);
                continue;
            }

            let child_end = child_span.end();
            let gap = self.take_before(child_span.start());
            let leading = match pending.take() {
                Some((Slot::Attr, previous)) => {
                    attrs.push(previous);
                    let extra = self.convert(gap);
                    attrs.extend(extra);
                    Vec::new()
                }
                Some((previous_slot, previous)) => {
                    let (previous, leading) = self.split_run(previous, gap);
                    place(previous_slot, previous, &mut attrs, &mut target, &mut args);
                    leading
                }
                None => gap,
            };
            last_end = child_end;
            let child = self.process_interior(child);
            let child = self.attach(child, leading, TriviaLocation::Leading);
            pending = Some((slot, child));
        }

        let mut rest = self.take_before(span.end());
        let mut ambiguous = Vec::new();
        match pending.take() {
            Some((Slot::Attr, previous)) => {
                attrs.push(previous);
                let extra = self.convert(rest);
                attrs.extend(extra);
            }
            Some((slot, previous)) => {
                let remainder = rest.split_off(self.same_line_len(&rest));
                let previous = self.attach(previous, rest, TriviaLocation::Trailing);
                place(slot, previous, &mut attrs, &mut target, &mut args);
                ambiguous = remainder;
            }
            None => ambiguous = rest,
        }

        let mut rebuilt = node.with_attrs(attrs);
        if let Some(target) = target {
            rebuilt = rebuilt.with_target(target);
        }
        if rebuilt.is_call() {
            rebuilt = rebuilt.with_args(args);
        }
        self.attach(rebuilt, ambiguous, TriviaLocation::Ambiguous)
    }
}

/// Which list of its parent a child came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Attr,
    Target,
    Arg,
}

impl Slot {
    fn of(index: i32) -> Self {
        match index {
            i if i < -1 => Slot::Attr,
            -1 => Slot::Target,
            _ => Slot::Arg,
        }
    }
}

fn place(
    slot: Slot,
    node: Node,
    attrs: &mut Vec<Node>,
    target: &mut Option<Node>,
    args: &mut Vec<Node>,
) {
    match slot {
        Slot::Attr => attrs.push(node),
        Slot::Target => *target = Some(node),
        Slot::Arg => args.push(node),
    }
}

fn flush(
    pending: &mut Option<(Slot, Node)>,
    attrs: &mut Vec<Node>,
    target: &mut Option<Node>,
    args: &mut Vec<Node>,
) {
    if let Some((slot, node)) = pending.take() {
        place(slot, node, attrs, target, args);
    }
}

/// Iterator returned by [`TriviaInjector::run`]
pub struct Injected<S: TriviaStrategy, I> {
    injector: TriviaInjector<S>,
    nodes: I,
    /// Last node read, still waiting for its trailing trivia
    previous: Option<Node>,
    /// Nodes without a span read after `previous`; emitted right after it
    unlocated: Vec<Node>,
    ready: VecDeque<Node>,
    emitted: usize,
    finished: bool,
}

impl<S: TriviaStrategy, I: Iterator<Item = Node>> Injected<S, I> {
    /// Number of trivia tokens processed so far. Once the iterator is
    /// exhausted this equals the number of tokens supplied.
    pub fn consumed(&self) -> usize {
        self.injector.consumed
    }

    fn step(&mut self) {
        match self.nodes.next() {
            Some(node) if !node.span().is_known() => {
                if self.previous.is_some() {
                    self.unlocated.push(node);
                } else {
                    self.ready.push_back(node);
                }
            }
            Some(node) => {
                let gap = self.injector.take_before(node.span().start());
                let leading = match self.previous.take() {
                    Some(previous) => {
                        let (previous, leading) = self.injector.split_run(previous, gap);
                        self.ready.push_back(previous);
                        self.ready.extend(self.unlocated.drain(..));
                        leading
                    }
                    None => gap,
                };
                let node = self.injector.process_interior(node);
                let node = self.injector.attach(node, leading, TriviaLocation::Leading);
                self.previous = Some(node);
            }
            None => {
                self.finish();
                self.finished = true;
            }
        }
    }

    fn finish(&mut self) {
        let mut rest = self.injector.take_rest();
        match self.previous.take() {
            Some(previous) => {
                let extra = rest.split_off(self.injector.trailing_len(&rest));
                let previous = self.injector.attach(previous, rest, TriviaLocation::Trailing);
                let previous = self
                    .injector
                    .attach(previous, extra, TriviaLocation::TrailingExtra);
                self.ready.push_back(previous);
                self.ready.extend(self.unlocated.drain(..));
            }
            None if !rest.is_empty() => {
                let placeholder = self.placeholder(&rest);
                debug!(
                    tokens = rest.len(),
                    after_nodes = self.emitted,
                    "no node to hold trailing trivia; synthesizing a placeholder"
                );
                let placeholder = self
                    .injector
                    .attach(placeholder, rest, TriviaLocation::Leading);
                self.ready.push_back(placeholder);
            }
            None => {}
        }
    }

    fn placeholder(&self, run: &[S::Trivia]) -> Node {
        let strategy = &self.injector.strategy;
        let range = run
            .iter()
            .map(|trivia| strategy.range(trivia))
            .reduce(|a, b| a.cover(b))
            .unwrap_or_else(|| TextRange::empty(TextSize::from(0)));
        Node::missing(SourceRange::new(self.injector.file.clone(), range))
    }
}

impl<S: TriviaStrategy, I: Iterator<Item = Node>> Iterator for Injected<S, I> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        loop {
            if let Some(node) = self.ready.pop_front() {
                self.emitted += 1;
                return Some(node);
            }
            if self.finished {
                return None;
            }
            self.step();
        }
    }
}
