//! Test support: a tiny lexer and parser for a prefix-call notation
//!
//! Grammar:
//!
//! ```text
//! program    := (expr ';'?)*
//! expr       := attributed ('+' attributed)*
//! attributed := '@[' expr (',' expr)* ']' attributed | postfix
//! postfix    := primary ('(' (expr (',' expr)*)? ')')*
//! primary    := IDENT | NUMBER | STRING
//! ```
//!
//! Comments (`//`, `/* */`), newlines and spaces are collected as
//! [`TriviaToken`]s alongside the parsed nodes, just like a real lexer
//! would hand them to the trivia injector.

#![allow(dead_code)]

use loyc_core::{
    Interner, Node, NodeFactory, SourceFile, StandardTrivia, TriviaInjector, TriviaKind,
    TriviaOptions, TriviaToken,
};
use biome_text_size::{TextRange, TextSize};

pub const FILE_NAME: &str = "test.ecs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Ident,
    Number,
    String,
    LParen,
    RParen,
    LBracket,
    RBracket,
    At,
    Comma,
    Semicolon,
    Plus,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    text: String,
    start: u32,
    end: u32,
}

/// Output of [`parse`]
pub struct Parsed {
    pub factory: NodeFactory,
    pub nodes: Vec<Node>,
    pub trivia: Vec<TriviaToken>,
}

impl Parsed {
    /// Run the trivia injector over the parsed nodes
    pub fn inject(self) -> Injection {
        self.inject_with(TriviaOptions::default())
    }

    pub fn inject_with(self, options: TriviaOptions) -> Injection {
        let supplied = self.trivia.len();
        let mut injected = TriviaInjector::new(StandardTrivia, SourceFile::new(FILE_NAME), self.trivia)
            .with_options(options)
            .run(self.nodes);
        let nodes: Vec<Node> = injected.by_ref().collect();
        Injection {
            nodes,
            consumed: injected.consumed(),
            supplied,
        }
    }
}

/// Output of [`Parsed::inject`]
pub struct Injection {
    pub nodes: Vec<Node>,
    pub consumed: usize,
    pub supplied: usize,
}

/// Lex and parse `source`
pub fn parse(source: &str) -> Parsed {
    let factory = NodeFactory::new(Interner::new(), SourceFile::new(FILE_NAME));
    let (tokens, trivia) = lex(source);
    let mut parser = Parser {
        factory: &factory,
        tokens,
        pos: 0,
    };
    let mut nodes = Vec::new();
    while !parser.at_end() {
        nodes.push(parser.expr());
        parser.eat(TokenKind::Semicolon);
    }
    Parsed {
        factory,
        nodes,
        trivia,
    }
}

/// Parse `source` and reattach its trivia
pub fn parse_with_trivia(source: &str) -> Injection {
    parse(source).inject()
}

/// Text of every comment among `attrs`, in order
pub fn comment_texts<'a>(attrs: impl IntoIterator<Item = &'a Node>) -> Vec<String> {
    attrs
        .into_iter()
        .filter(|attr| attr.is_trivia() && attr.is_call())
        .filter_map(|attr| attr.args().first()?.value().as_str().map(str::to_string))
        .collect()
}

/// Number of `%newline` attributes among `attrs`
pub fn newline_count<'a>(attrs: impl IntoIterator<Item = &'a Node>) -> usize {
    attrs
        .into_iter()
        .filter(|attr| attr.is_id() && attr.name().as_str() == "%newline")
        .count()
}

fn lex(source: &str) -> (Vec<Token>, Vec<TriviaToken>) {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut trivia = Vec::new();
    let mut i = 0usize;

    let range = |start: usize, end: usize| {
        TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
    };

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];
        match c {
            b'\n' => {
                i += 1;
                trivia.push(TriviaToken::new(TriviaKind::Newline, "\n", range(start, i)));
            }
            b' ' | b'\t' | b'\r' => {
                while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\r') {
                    i += 1;
                }
                trivia.push(TriviaToken::new(
                    TriviaKind::Whitespace,
                    &source[start..i],
                    range(start, i),
                ));
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                trivia.push(TriviaToken::new(
                    TriviaKind::LineComment,
                    &source[start..i],
                    range(start, i),
                ));
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !source[i..].starts_with("*/") {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                trivia.push(TriviaToken::new(
                    TriviaKind::BlockComment,
                    &source[start..i],
                    range(start, i),
                ));
            }
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
                tokens.push(token(TokenKind::String, source, start, i));
            }
            b'0'..=b'9' => {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                tokens.push(token(TokenKind::Number, source, start, i));
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(token(TokenKind::Ident, source, start, i));
            }
            _ => {
                let kind = match c {
                    b'(' => TokenKind::LParen,
                    b')' => TokenKind::RParen,
                    b'[' => TokenKind::LBracket,
                    b']' => TokenKind::RBracket,
                    b'@' => TokenKind::At,
                    b',' => TokenKind::Comma,
                    b';' => TokenKind::Semicolon,
                    b'+' => TokenKind::Plus,
                    other => panic!("unexpected character {:?} at {start}", other as char),
                };
                i += 1;
                tokens.push(token(kind, source, start, i));
            }
        }
    }
    (tokens, trivia)
}

fn token(kind: TokenKind, source: &str, start: usize, end: usize) -> Token {
    Token {
        kind,
        text: source[start..end].to_string(),
        start: start as u32,
        end: end as u32,
    }
}

struct Parser<'a> {
    factory: &'a NodeFactory,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        (self.peek() == Some(kind)).then(|| self.bump())
    }

    fn expect(&mut self, kind: TokenKind) -> Token {
        self.eat(kind)
            .unwrap_or_else(|| panic!("expected {kind:?} at token {}", self.pos))
    }

    fn expr(&mut self) -> Node {
        let mut left = self.attributed();
        while self.eat(TokenKind::Plus).is_some() {
            let right = self.attributed();
            let start = u32::from(left.span().start());
            let end = u32::from(right.span().end());
            left = self.factory.call_named("'+", [left, right], start, end);
        }
        left
    }

    fn attributed(&mut self) -> Node {
        let Some(at) = self.eat(TokenKind::At) else {
            return self.postfix();
        };
        self.expect(TokenKind::LBracket);
        let mut attrs = vec![self.expr()];
        while self.eat(TokenKind::Comma).is_some() {
            attrs.push(self.expr());
        }
        self.expect(TokenKind::RBracket);
        let node = self.attributed();
        let span = self.factory.range(at.start, u32::from(node.span().end()));
        node.plus_attrs_before(attrs).with_span(span)
    }

    fn postfix(&mut self) -> Node {
        let head = self.bump();
        let mut node = self.primary(&head);
        while self.eat(TokenKind::LParen).is_some() {
            let mut args = Vec::new();
            if self.peek() != Some(TokenKind::RParen) {
                args.push(self.expr());
                while self.eat(TokenKind::Comma).is_some() {
                    args.push(self.expr());
                }
            }
            let close = self.expect(TokenKind::RParen);
            let start = u32::from(node.span().start());
            node = if node.is_id() {
                self.factory.call_at(
                    &head.text,
                    (head.start, head.end),
                    args,
                    start,
                    close.end,
                )
            } else {
                Node::call(node, args, self.factory.range(start, close.end))
            };
        }
        node
    }

    fn primary(&self, token: &Token) -> Node {
        match token.kind {
            TokenKind::Ident => self.factory.id_at(&token.text, token.start, token.end),
            TokenKind::Number => {
                let value: i64 = token.text.parse().expect("number literal");
                self.factory.literal_at(value, &token.text, token.start)
            }
            TokenKind::String => {
                let inner = token.text.trim_matches('"');
                self.factory.literal_at(inner, &token.text, token.start)
            }
            other => panic!("unexpected token {other:?} at {}", token.start),
        }
    }
}
