//! Source positions for syntax nodes
//!
//! A [`SourceRange`] is an immutable `(file, start, length)` triple. It is
//! carried by every node but never takes part in structural equality.

use biome_text_size::{TextRange, TextSize};
use std::fmt;
use std::sync::Arc;

/// Shared name of a source file
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceFile(Arc<str>);

impl SourceFile {
    /// Create a source file handle from a file name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Get the file name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.name())
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a node in its source file
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceRange {
    file: Option<SourceFile>,
    range: TextRange,
}

impl SourceRange {
    /// Create a range within `file`
    pub fn new(file: SourceFile, range: TextRange) -> Self {
        Self {
            file: Some(file),
            range,
        }
    }

    /// Create a range from byte offsets
    pub fn at(file: SourceFile, start: u32, end: u32) -> Self {
        Self::new(file, TextRange::new(TextSize::from(start), TextSize::from(end)))
    }

    /// A range for nodes that were not read from any source
    pub fn synthetic() -> Self {
        Self {
            file: None,
            range: TextRange::default(),
        }
    }

    /// Check if this range points into a real file
    pub fn is_known(&self) -> bool {
        self.file.is_some()
    }

    /// Get the source file, if any
    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    /// Get the text range
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Start offset
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    /// End offset (exclusive)
    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    /// Length in bytes
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Check if the range is empty
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Check if `other` lies within this range in the same file
    pub fn contains(&self, other: &SourceRange) -> bool {
        self.is_known() && self.file == other.file && self.range.contains_range(other.range)
    }

    /// Create a sub-range of the same file
    pub fn with_range(&self, range: TextRange) -> Self {
        Self {
            file: self.file.clone(),
            range,
        }
    }

    /// Smallest range covering both ranges. An unknown range is absorbed by a
    /// known one.
    pub fn cover(&self, other: &SourceRange) -> Self {
        match (self.is_known(), other.is_known()) {
            (true, true) => self.with_range(self.range.cover(other.range)),
            (true, false) => self.clone(),
            (false, _) => other.clone(),
        }
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::synthetic()
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}@{:?}", file, self.range),
            None => f.write_str("<synthetic>"),
        }
    }
}
