//! Template substitution and rewrite rules

use crate::pattern::{Captures, Pattern, Placeholder};
use loyc_core::{LoycError, Node, NodeList, Result, sym};

/// Replace the placeholders in `template` with captured nodes.
///
/// A placeholder whose capture is a `#splice(...)` (a run capture, or a
/// name bound more than once) is flattened into the enclosing attribute or
/// argument list. Parts of the template without placeholders are shared,
/// not copied.
pub fn substitute(template: &Node, captures: &Captures) -> Result<Node> {
    if let Some(placeholder) = Placeholder::of(template) {
        let captured = captures
            .get(&placeholder.name)
            .ok_or_else(|| LoycError::unbound_capture(placeholder.name.as_str()))?;
        let attrs = substitute_list(template.attrs(), captures)?;
        return Ok(captured.plus_attrs_before(attrs.iter().cloned()));
    }

    let attrs = substitute_list(template.attrs(), captures)?;
    let mut node = template.with_attrs(attrs);
    if let Some(target) = template.target() {
        node = node.with_target(substitute(target, captures)?);
    }
    if template.is_call() {
        node = node.with_args(substitute_list(template.args(), captures)?);
    }
    Ok(node)
}

fn substitute_list(list: &NodeList, captures: &Captures) -> Result<NodeList> {
    let mut out = NodeList::new();
    for item in list {
        let replaced = substitute(item, captures)?;
        if Placeholder::of(item).is_some() && replaced.calls(&sym::SPLICE) {
            out = out.add_splice(&replaced);
        } else {
            out = out.push(replaced);
        }
    }
    Ok(out)
}

/// A named `pattern => template` rewrite
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: String,
    pattern: Pattern,
    template: Node,
}

impl RewriteRule {
    /// Create a rule; fails if `pattern` uses unsupported features
    pub fn new(name: impl Into<String>, pattern: Node, template: Node) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: Pattern::new(pattern)?,
            template,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn template(&self) -> &Node {
        &self.template
    }

    /// Rewrite `node` if it matches, keeping its trivia attributes and its
    /// position. Returns `Ok(None)` when the pattern does not match.
    pub fn apply(&self, node: &Node) -> Result<Option<Node>> {
        let Some(result) = self.pattern.matches(node)? else {
            return Ok(None);
        };
        let mut replacement = substitute(&self.template, &result.captures)?;
        if !result.unmatched_attrs.is_empty() {
            replacement = replacement.plus_attrs_before(result.unmatched_attrs);
        }
        if !replacement.span().is_known() {
            replacement = replacement.with_span(node.span().clone());
        }
        Ok(Some(replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loyc_core::NodeFactory;

    fn var(f: &NodeFactory, name: &str) -> Node {
        f.call("'$", [f.id(name)])
    }

    fn rest(f: &NodeFactory, name: &str) -> Node {
        f.call("'$", [f.call("'...", [f.id(name)])])
    }

    #[test]
    fn test_substitute_single_and_run_captures() {
        let f = NodeFactory::synthetic();
        let mut captures = Captures::new();
        captures.bind(f.atom("x"), f.id("a"));
        captures.bind_run(f.atom("rest"), &[f.int(1), f.int(2)]);

        let template = f.call("g", [var(&f, "x"), rest(&f, "rest"), var(&f, "x")]);
        let result = substitute(&template, &captures).expect("bound");
        assert_eq!(result.to_string(), "g(a, 1, 2, a)");
    }

    #[test]
    fn test_empty_run_disappears() {
        let f = NodeFactory::synthetic();
        let mut captures = Captures::new();
        captures.bind_run(f.atom("rest"), &[]);

        let template = f.call("g", [f.id("head"), rest(&f, "rest")]);
        let result = substitute(&template, &captures).expect("bound");
        assert_eq!(result.to_string(), "g(head)");
    }

    #[test]
    fn test_template_without_placeholders_is_shared() {
        let f = NodeFactory::synthetic();
        let template = f.call("g", [f.call("h", [f.id("y")])]);
        let result = substitute(&template, &Captures::new()).expect("no placeholders");
        assert!(Node::ptr_eq(&result, &template));
    }

    #[test]
    fn test_unbound_capture_is_recoverable() {
        let f = NodeFactory::synthetic();
        let template = f.call("g", [var(&f, "missing")]);

        let err = substitute(&template, &Captures::new()).expect_err("unbound");
        assert_eq!(err.to_string(), "Unbound capture: $missing");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_rule_keeps_trivia_and_position() {
        let f = NodeFactory::new(
            loyc_core::Interner::new(),
            loyc_core::SourceFile::new("rule.ecs"),
        );
        let rule = RewriteRule::new(
            "swap",
            f.call("pair", [var(&f, "a"), var(&f, "b")]),
            f.call("pair", [var(&f, "b"), var(&f, "a")]),
        )
        .expect("valid rule");

        let candidate = f
            .call_named("pair", [f.id_at("x", 5, 6), f.id_at("y", 8, 9)], 0, 10)
            .plus_attr(f.trivia("%SLComment", " keep"));
        let rewritten = rule.apply(&candidate).expect("ok").expect("matched");

        assert_eq!(rewritten.to_string(), r#"@[%SLComment(" keep")] pair(y, x)"#);
        assert_eq!(rewritten.span(), candidate.span());
        assert!(rule.apply(&f.id("pair")).expect("ok").is_none());
    }
}
