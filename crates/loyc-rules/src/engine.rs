//! Rule engine: applies rewrite rules until a tree is fully expanded

use crate::rewrite::RewriteRule;
use loyc_core::{LoycError, Node, NodeList, Result, ResultExt, RewriteConfiguration, sym};
use tracing::debug;

/// Applies registered [`RewriteRule`]s to a tree, top down.
///
/// A node is rewritten by the first matching rule, then the result is
/// tried again until no rule matches; only then are its children visited.
/// Results that are `#splice(...)` calls are flattened into the enclosing
/// list. Every application counts against
/// [`RewriteConfiguration::max_expansions`].
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<RewriteRule>,
    config: RewriteConfiguration,
}

impl RuleEngine {
    pub fn new(config: RewriteConfiguration) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Register a rule; earlier rules take precedence
    pub fn add_rule(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: RewriteRule) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn config(&self) -> &RewriteConfiguration {
        &self.config
    }

    /// Rewrite `node` and everything below it
    pub fn rewrite(&self, node: &Node) -> Result<Node> {
        let mut expansions = 0;
        self.expand(node, &mut expansions)
    }

    /// Rewrite a stream of top-level nodes, flattening `#splice` results
    pub fn rewrite_all(&self, nodes: impl IntoIterator<Item = Node>) -> Result<Vec<Node>> {
        let mut expansions = 0;
        let mut out = NodeList::new();
        for node in nodes {
            let rewritten = self.expand(&node, &mut expansions)?;
            out = out.add_splice(&rewritten);
        }
        debug!(expansions, "rewrite finished");
        Ok(out.iter().cloned().collect())
    }

    fn expand(&self, node: &Node, expansions: &mut usize) -> Result<Node> {
        let mut current = node.clone();
        while let Some((rule, rewritten)) = self.apply_first(&current)? {
            *expansions += 1;
            if *expansions > self.config.max_expansions {
                return Err(LoycError::ExpansionLimit {
                    limit: self.config.max_expansions,
                });
            }
            debug!(rule = rule.name(), from = %current, to = %rewritten, "applied rule");
            current = rewritten;
        }
        self.expand_children(&current, expansions)
    }

    /// First rule that rewrites `node`. Rules whose template refers to an
    /// unbound capture are skipped with a warning.
    fn apply_first(&self, node: &Node) -> Result<Option<(&RewriteRule, Node)>> {
        for rule in &self.rules {
            if let Some(Some(rewritten)) = rule.apply(node).recoverable()? {
                return Ok(Some((rule, rewritten)));
            }
        }
        Ok(None)
    }

    fn expand_children(&self, node: &Node, expansions: &mut usize) -> Result<Node> {
        let mut result = node.clone();
        if self.config.process_attributes && node.has_attrs() {
            let attrs = self.expand_list(node.attrs(), expansions, true)?;
            result = result.with_attrs(attrs);
        }
        if let Some(target) = node.target() {
            result = result.with_target(self.expand(target, expansions)?);
        }
        if node.is_call() {
            let args = self.expand_list(node.args(), expansions, false)?;
            result = result.with_args(args);
        }
        Ok(result)
    }

    fn expand_list(
        &self,
        list: &NodeList,
        expansions: &mut usize,
        skip_trivia: bool,
    ) -> Result<NodeList> {
        let mut out = NodeList::new();
        for item in list {
            if skip_trivia && item.is_trivia() {
                out = out.push(item.clone());
                continue;
            }
            let expanded = self.expand(item, expansions)?;
            if !Node::ptr_eq(&expanded, item) && expanded.calls(&sym::SPLICE) {
                out = out.add_splice(&expanded);
            } else {
                out = out.push(expanded);
            }
        }
        Ok(out)
    }
}
