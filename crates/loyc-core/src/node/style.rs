//! Printing hints carried by nodes

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A small hint byte telling printers how a node prefers to be written.
///
/// The low three bits select a base style; the upper bits are independent
/// flags. Styles never take part in equality unless explicitly requested.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeStyle(u8);

impl NodeStyle {
    pub const DEFAULT: Self = Self(0);
    /// Print a call as an operator (`x + y` rather than `'+(x, y)`)
    pub const OPERATOR: Self = Self(1);
    /// Print a call as a statement
    pub const STATEMENT: Self = Self(2);
    /// Print a call with special (keyword) syntax
    pub const SPECIAL: Self = Self(3);
    /// Force prefix notation
    pub const PREFIX_NOTATION: Self = Self(4);
    pub const BASE_STYLE_MASK: Self = Self(0x07);
    /// Alternate syntax (e.g. hex for integers, verbatim for strings)
    pub const ALTERNATE: Self = Self(0x08);
    pub const ALTERNATE2: Self = Self(0x10);
    /// The node was written on a single line, without comments
    pub const ONE_LINER: Self = Self(0x20);
    /// The node was written inside parentheses
    pub const IN_PARENS: Self = Self(0x40);

    /// Create a style from its raw byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the raw byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The base style (low three bits)
    pub const fn base(self) -> Self {
        Self(self.0 & Self::BASE_STYLE_MASK.0)
    }

    /// Check if all bits of `flags` are set
    pub const fn contains(self, flags: Self) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl BitOr for NodeStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for NodeStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for NodeStyle {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for NodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeStyle({:#04x})", self.0)
    }
}
