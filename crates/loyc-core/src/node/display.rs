//! Prefix-notation debug printer
//!
//! Prints `@[attrs] target(args)` with identifiers by name and literals by
//! their original text. The output is meant for tests and log lines; it is
//! not a source printer and does not round-trip.

use super::{LiteralData, LiteralValue, Node, NodeRef};
use std::fmt::{self, Write};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_attrs() {
            f.write_str("@[")?;
            write_list(f, self.attrs().iter())?;
            f.write_str("] ")?;
        }
        match self.view() {
            NodeRef::Identifier(name) => write_name(f, name.as_str()),
            NodeRef::Literal(data) => write_literal(f, data),
            NodeRef::Call { target, args } => {
                write!(f, "{target}(")?;
                write_list(f, args.iter())?;
                f.write_char(')')
            }
        }
    }
}

fn write_list<'a>(f: &mut fmt::Formatter<'_>, nodes: impl Iterator<Item = &'a Node>) -> fmt::Result {
    for (i, node) in nodes.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || matches!(first, '_' | '#' | '%'))
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_name(name) {
        return f.write_str(name);
    }
    f.write_char('`')?;
    for c in name.chars() {
        if c == '`' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('`')
}

fn write_literal(f: &mut fmt::Formatter<'_>, data: &LiteralData) -> fmt::Result {
    if let Some(text) = data.text() {
        return f.write_str(text);
    }
    match data.value() {
        LiteralValue::NoValue => f.write_str("<no value>")?,
        LiteralValue::Null => f.write_str("null")?,
        LiteralValue::Bool(value) => write!(f, "{value}")?,
        LiteralValue::Int(value) => write!(f, "{value}")?,
        LiteralValue::UInt(value) => write!(f, "{value}u")?,
        LiteralValue::Float(value) => write!(f, "{value:?}")?,
        LiteralValue::Char(value) => write!(f, "{value:?}")?,
        LiteralValue::String(value) => write!(f, "{value:?}")?,
        LiteralValue::Atom(value) => {
            f.write_str("@@")?;
            write_name(f, value.as_str())?;
        }
        LiteralValue::Custom(_) => f.write_str("<custom>")?,
    }
    if let Some(marker) = data.type_marker() {
        write!(f, "{marker}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::node::{LiteralData, Node, NodeFactory};
    use crate::span::SourceRange;

    #[test]
    fn test_prints_attributes_and_calls() {
        let f = NodeFactory::synthetic();
        let node = f
            .call("f", [f.id("x"), f.int(1), f.string("s")])
            .plus_attr(f.trivia("%SLComment", " c"));
        insta::assert_snapshot!(node.to_string(), @r#"@[%SLComment(" c")] f(x, 1, "s")"#);
    }

    #[test]
    fn test_backquotes_unusual_names() {
        let f = NodeFactory::synthetic();
        let plus = f.call("'+", [f.id("a"), f.id("b")]);
        insta::assert_snapshot!(plus.to_string(), @"`'+`(a, b)");
        insta::assert_snapshot!(f.missing().to_string(), @"``");
        insta::assert_snapshot!(f.splice([f.id("a")]).to_string(), @"#splice(a)");
    }

    #[test]
    fn test_literals_prefer_original_text() {
        let f = NodeFactory::synthetic();
        let hex = Node::literal(
            LiteralData::new(255i64).with_text("0xFF"),
            SourceRange::synthetic(),
        );
        insta::assert_snapshot!(hex.to_string(), @"0xFF");

        let long = Node::literal(
            LiteralData::new(5i64).with_type_marker(f.atom("L")),
            SourceRange::synthetic(),
        );
        insta::assert_snapshot!(long.to_string(), @"5L");
        insta::assert_snapshot!(f.literal('q').to_string(), @"'q'");
        insta::assert_snapshot!(f.literal(true).to_string(), @"true");
    }

    #[test]
    fn test_nested_call_targets() {
        let f = NodeFactory::synthetic();
        let curried = f.call_node(f.call("f", [f.id("a")]), [f.id("b")]);
        insta::assert_snapshot!(curried.to_string(), @"f(a)(b)");
    }
}
