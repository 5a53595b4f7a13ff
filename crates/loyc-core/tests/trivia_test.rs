//! Trivia reattachment over parsed source text

mod common;

use common::{comment_texts, newline_count, parse, parse_with_trivia};
use loyc_core::{Node, NodeStyle, ScanMode, TriviaOptions};

/// Every comment anywhere in the tree, in pre-order
fn all_comments(nodes: &[Node]) -> Vec<String> {
    let mut texts = Vec::new();
    for node in nodes {
        for descendant in node.descendants(ScanMode::YIELD_ALL) {
            texts.extend(comment_texts(std::iter::once(&descendant)));
        }
    }
    texts
}

#[test]
fn test_leading_and_same_line_comments() {
    let result = parse_with_trivia("// lead\nfoo(); // trail\nbar();");

    assert_eq!(result.nodes.len(), 2);
    let foo = &result.nodes[0];
    let bar = &result.nodes[1];

    assert_eq!(comment_texts(foo.leading_trivia()), [" lead"]);
    assert_eq!(newline_count(foo.leading_trivia()), 1);
    assert_eq!(comment_texts(&foo.trailing_trivia()), [" trail"]);

    assert!(!bar.has_attrs());
    assert_eq!(result.consumed, result.supplied);
}

#[test]
fn test_blank_line_splits_newlines() {
    let result = parse_with_trivia("a();\n\nb();");

    let a = &result.nodes[0];
    let b = &result.nodes[1];
    assert_eq!(newline_count(&a.trailing_trivia()), 1);
    assert_eq!(newline_count(b.leading_trivia()), 1);
    assert_eq!(b.trailing_trivia().len(), 0);
}

#[test]
fn test_comment_before_blank_line_trails_previous() {
    let source = "a();\n// about a\n\nb();";

    let result = parse(source).inject();
    let a = &result.nodes[0];
    let b = &result.nodes[1];
    assert_eq!(comment_texts(&a.trailing_trivia()), [" about a"]);
    assert_eq!(newline_count(&a.trailing_trivia()), 2);
    assert_eq!(newline_count(b.leading_trivia()), 1);

    let options = TriviaOptions {
        split_on_blank_line: false,
        ..TriviaOptions::default()
    };
    let result = parse(source).inject_with(options);
    let a = &result.nodes[0];
    let b = &result.nodes[1];
    assert_eq!(newline_count(&a.trailing_trivia()), 1);
    assert_eq!(comment_texts(b.leading_trivia()), [" about a"]);
    assert_eq!(newline_count(b.leading_trivia()), 2);
}

#[test]
fn test_blank_line_with_spaces_still_splits() {
    for source in ["a();\n// about a\n\nb();", "a();\n// about a\n   \nb();"] {
        let result = parse_with_trivia(source);
        let a = &result.nodes[0];
        let b = &result.nodes[1];
        assert_eq!(comment_texts(&a.trailing_trivia()), [" about a"], "{source:?}");
        assert_eq!(newline_count(&a.trailing_trivia()), 2, "{source:?}");
        assert_eq!(newline_count(b.leading_trivia()), 1, "{source:?}");
        assert!(comment_texts(b.leading_trivia()).is_empty(), "{source:?}");
        assert_eq!(result.consumed, result.supplied);
    }
}

#[test]
fn test_comment_between_attribute_and_target() {
    let result = parse_with_trivia("@[a] /* c */ f(x);");

    assert_eq!(
        result.nodes[0].to_string(),
        r#"@[a, %MLComment(" c ")] f(x)"#
    );
}

#[test]
fn test_comment_after_argument() {
    let result = parse_with_trivia("f(x, // about x\n  y);");

    let call = &result.nodes[0];
    assert_eq!(comment_texts(&call.args()[0].trailing_trivia()), [" about x"]);
    assert!(!call.args()[1].has_attrs());
    assert!(!call.style().contains(NodeStyle::ONE_LINER));
}

#[test]
fn test_unlocated_tail_is_ambiguous() {
    let result = parse_with_trivia("f(x\n /* c */);");

    let call = &result.nodes[0];
    assert_eq!(call.to_string(), r#"@[%newline, %MLComment(" c ")] f(x)"#);
    assert!(!call.args()[0].has_attrs());
}

#[test]
fn test_trailing_extra_at_end_of_input() {
    let result = parse_with_trivia("a(); // end\n\n// tail\n");

    assert_eq!(result.nodes.len(), 1);
    let trailing = result.nodes[0].trailing_trivia();
    assert_eq!(comment_texts(&trailing), [" end", " tail"]);
    assert_eq!(newline_count(&trailing), 3);
}

#[test]
fn test_comment_only_input_gets_placeholder() {
    let result = parse_with_trivia("// only a comment\n");

    assert_eq!(result.nodes.len(), 1);
    let placeholder = &result.nodes[0];
    assert!(placeholder.is_missing());
    assert_eq!(comment_texts(placeholder.leading_trivia()), [" only a comment"]);
    assert_eq!(result.consumed, result.supplied);
}

#[test]
fn test_empty_input_produces_nothing() {
    let result = parse_with_trivia("");
    assert!(result.nodes.is_empty());
    assert_eq!(result.consumed, 0);
}

#[test]
fn test_one_liners_marked_only_without_inner_trivia() {
    let result = parse_with_trivia("f(x, y);\ng(x,\n  y);");

    assert!(result.nodes[0].style().contains(NodeStyle::ONE_LINER));
    assert!(!result.nodes[1].style().contains(NodeStyle::ONE_LINER));

    let options = TriviaOptions {
        mark_one_liners: false,
        ..TriviaOptions::default()
    };
    let result = parse("f(x, y);").inject_with(options);
    assert!(!result.nodes[0].style().contains(NodeStyle::ONE_LINER));
}

#[test]
fn test_no_trivia_is_lost() {
    let sources = [
        "// a\nf(/* b */ x, // c\n y /* d */); // e\n\n// f\ng();\n// g",
        "@[/* a */ x, /* b */ y] /* c */ z(1 /* d */ + 2);",
        "f(g(h(/* deep */)));\n\n\n// end",
        "/* only */",
        "a + /* in operator */ b;",
    ];

    for source in sources {
        let expected = source.matches("//").count() + source.matches("/*").count();
        let result = parse_with_trivia(source);
        assert_eq!(result.consumed, result.supplied, "consumed all of {source:?}");
        assert_eq!(
            all_comments(&result.nodes).len(),
            expected,
            "kept every comment of {source:?}"
        );
    }
}

#[test]
fn test_injection_preserves_structure() {
    let source = "// header\nf(x, /* b */ y);\n@[a] g(1, \"s\");";
    let plain = parse(source);
    let originals = plain.nodes.clone();

    let result = plain.inject();
    for (original, injected) in originals.iter().zip(&result.nodes) {
        assert!(original.equals(injected, loyc_core::CompareMode::IGNORE_TRIVIA));
    }
}
