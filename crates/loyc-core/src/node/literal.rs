//! Literal payloads
//!
//! The tree treats a literal's value as opaque data tagged by an optional
//! type marker. Turning source text into values (and back) is the job of a
//! literal parser/printer outside this crate; the original text can be kept
//! alongside the value so printers can reproduce it exactly.

use crate::atom::Atom;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The value of a literal node
#[derive(Clone)]
pub enum LiteralValue {
    /// Sentinel returned by non-literal nodes
    NoValue,
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Floats compare bitwise, so `NaN` equals itself
    Float(f64),
    Char(char),
    String(Arc<str>),
    Atom(Atom),
    /// Any other payload; compared by identity
    Custom(Arc<dyn Any + Send + Sync>),
}

impl LiteralValue {
    /// Check if this is the `NoValue` sentinel
    pub fn is_no_value(&self) -> bool {
        matches!(self, LiteralValue::NoValue)
    }

    /// Get the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// Get the integer payload, if any
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            LiteralValue::Int(value) => Some(value),
            LiteralValue::UInt(value) => i64::try_from(value).ok(),
            _ => None,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            LiteralValue::NoValue => 0,
            LiteralValue::Null => 1,
            LiteralValue::Bool(_) => 2,
            LiteralValue::Int(_) => 3,
            LiteralValue::UInt(_) => 4,
            LiteralValue::Float(_) => 5,
            LiteralValue::Char(_) => 6,
            LiteralValue::String(_) => 7,
            LiteralValue::Atom(_) => 8,
            LiteralValue::Custom(_) => 9,
        }
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralValue::NoValue, LiteralValue::NoValue) => true,
            (LiteralValue::Null, LiteralValue::Null) => true,
            (LiteralValue::Bool(a), LiteralValue::Bool(b)) => a == b,
            (LiteralValue::Int(a), LiteralValue::Int(b)) => a == b,
            (LiteralValue::UInt(a), LiteralValue::UInt(b)) => a == b,
            (LiteralValue::Float(a), LiteralValue::Float(b)) => a.to_bits() == b.to_bits(),
            (LiteralValue::Char(a), LiteralValue::Char(b)) => a == b,
            (LiteralValue::String(a), LiteralValue::String(b)) => a == b,
            (LiteralValue::Atom(a), LiteralValue::Atom(b)) => a == b,
            (LiteralValue::Custom(a), LiteralValue::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            LiteralValue::NoValue | LiteralValue::Null => {}
            LiteralValue::Bool(value) => value.hash(state),
            LiteralValue::Int(value) => value.hash(state),
            LiteralValue::UInt(value) => value.hash(state),
            LiteralValue::Float(value) => value.to_bits().hash(state),
            LiteralValue::Char(value) => value.hash(state),
            LiteralValue::String(value) => value.hash(state),
            LiteralValue::Atom(value) => value.hash(state),
            LiteralValue::Custom(value) => {
                std::ptr::hash(Arc::as_ptr(value) as *const u8, state)
            }
        }
    }
}

impl fmt::Debug for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::NoValue => f.write_str("NoValue"),
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Bool(value) => write!(f, "{value}"),
            LiteralValue::Int(value) => write!(f, "{value}"),
            LiteralValue::UInt(value) => write!(f, "{value}u"),
            LiteralValue::Float(value) => write!(f, "{value:?}"),
            LiteralValue::Char(value) => write!(f, "{value:?}"),
            LiteralValue::String(value) => write!(f, "{value:?}"),
            LiteralValue::Atom(value) => write!(f, "@@{value}"),
            LiteralValue::Custom(_) => f.write_str("<custom>"),
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Int(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Int(value.into())
    }
}

impl From<u64> for LiteralValue {
    fn from(value: u64) -> Self {
        LiteralValue::UInt(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float(value)
    }
}

impl From<char> for LiteralValue {
    fn from(value: char) -> Self {
        LiteralValue::Char(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(Arc::from(value))
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(Arc::from(value))
    }
}

impl From<Atom> for LiteralValue {
    fn from(value: Atom) -> Self {
        LiteralValue::Atom(value)
    }
}

/// A literal value together with its optional source text and type marker.
///
/// Only the value and the type marker take part in equality, so `123` and
/// `0x7B` parsed to the same integer compare equal while `123` and `123L`
/// (different markers) do not.
#[derive(Clone)]
pub struct LiteralData {
    value: LiteralValue,
    text: Option<Arc<str>>,
    type_marker: Option<Atom>,
}

impl LiteralData {
    /// Create literal data from a bare value
    pub fn new(value: impl Into<LiteralValue>) -> Self {
        Self {
            value: value.into(),
            text: None,
            type_marker: None,
        }
    }

    /// Attach the original source text
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach a type marker
    pub fn with_type_marker(mut self, marker: Atom) -> Self {
        self.type_marker = Some(marker);
        self
    }

    /// Get the value
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// Get the original source text, if it was kept
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the type marker, if any
    pub fn type_marker(&self) -> Option<&Atom> {
        self.type_marker.as_ref()
    }

    /// Replace the value, dropping the original text (it no longer matches)
    pub fn with_value(&self, value: LiteralValue) -> Self {
        Self {
            value,
            text: None,
            type_marker: self.type_marker.clone(),
        }
    }
}

impl PartialEq for LiteralData {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.type_marker == other.type_marker
    }
}

impl Eq for LiteralData {}

impl Hash for LiteralData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.type_marker.hash(state);
    }
}

impl fmt::Debug for LiteralData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LiteralData");
        debug.field("value", &self.value);
        if let Some(text) = &self.text {
            debug.field("text", text);
        }
        if let Some(marker) = &self.type_marker {
            debug.field("type_marker", marker);
        }
        debug.finish()
    }
}

impl From<LiteralValue> for LiteralData {
    fn from(value: LiteralValue) -> Self {
        Self::new(value)
    }
}
