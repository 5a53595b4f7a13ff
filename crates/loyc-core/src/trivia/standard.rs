//! Trivia strategy for C-family comment syntax

use super::{TriviaClass, TriviaStrategy};
use biome_text_size::TextRange;

/// Kinds of trivia a C-family lexer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// `// ...` up to (not including) the line break
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// A single line break
    Newline,
    /// Spaces and tabs
    Whitespace,
}

/// A single trivia token as reported by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaToken {
    pub kind: TriviaKind,
    pub text: String,
    pub range: TextRange,
}

impl TriviaToken {
    pub fn new(kind: TriviaKind, text: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TriviaKind::Whitespace | TriviaKind::Newline)
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TriviaKind::Newline
    }

    /// The comment text without its delimiters. Inner spacing is kept so a
    /// printer can restore the comment exactly.
    pub fn comment_content(&self) -> Option<&str> {
        match self.kind {
            TriviaKind::LineComment => Some(self.text.strip_prefix("//").unwrap_or(&self.text)),
            TriviaKind::BlockComment => {
                let inner = self.text.strip_prefix("/*").unwrap_or(&self.text);
                Some(inner.strip_suffix("*/").unwrap_or(inner))
            }
            _ => None,
        }
    }
}

/// Strategy for [`TriviaToken`]s: comments become `%SLComment`/`%MLComment`,
/// line breaks become `%newline`, and whitespace is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTrivia;

impl TriviaStrategy for StandardTrivia {
    type Trivia = TriviaToken;

    fn range(&self, trivia: &TriviaToken) -> TextRange {
        trivia.range
    }

    fn is_newline(&self, trivia: &TriviaToken) -> bool {
        trivia.is_newline()
    }

    fn classify(&self, trivia: &TriviaToken) -> TriviaClass {
        match (trivia.kind, trivia.comment_content()) {
            (TriviaKind::Newline, _) => TriviaClass::Newline,
            (TriviaKind::LineComment, Some(text)) => TriviaClass::SingleLineComment(text.to_string()),
            (TriviaKind::BlockComment, Some(text)) => TriviaClass::BlockComment(text.to_string()),
            _ => TriviaClass::Unrecognized,
        }
    }
}
