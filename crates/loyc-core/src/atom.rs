//! Interned names for identifiers and operators
//!
//! An [`Atom`] is a deduplicated string compared by identity. Atoms are
//! produced by an explicit [`Interner`] that callers own and pass around, so
//! tests can work with isolated pools. The reserved names used by the core
//! algorithms (see [`sym`]) are shared by every interner, which keeps them
//! identity-equal no matter which pool a tree was built from.
//!
//! # Example
//!
//! ```rust,ignore
//! use loyc_core::{Interner, sym};
//!
//! let interner = Interner::new();
//! let a = interner.intern("foo");
//! let b = interner.intern("foo");
//! assert_eq!(a, b);
//! assert_eq!(interner.intern("#splice"), *sym::SPLICE);
//! ```

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An interned name. Two atoms are equal only if they came from the same
/// pool entry.
#[derive(Clone)]
pub struct Atom(Arc<str>);

impl Atom {
    fn new_unpooled(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// Get the text of this atom
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The empty atom, used as the name of nodes that have no meaningful name
    pub fn empty() -> Self {
        Atom::clone(&sym::EMPTY)
    }

    /// Check if this is the empty atom
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this name is reserved for trivia (comments, newlines and
    /// other formatting attributes)
    pub fn is_trivia_name(&self) -> bool {
        self.0.starts_with('%')
    }

    /// Check if this name is a special (keyword-like) name: it is empty or
    /// starts with `#`, `'` or `%`
    pub fn is_special(&self) -> bool {
        matches!(self.0.chars().next(), None | Some('#' | '\'' | '%'))
    }

    fn addr(&self) -> *const u8 {
        self.0.as_ptr()
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal atoms share text, so hashing the text agrees with identity
        self.0.hash(state);
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| self.addr().cmp(&other.addr()))
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe pool of atoms
///
/// Cloning an interner is cheap and yields a handle to the same pool.
#[derive(Clone)]
pub struct Interner {
    pool: Arc<DashMap<Arc<str>, Atom>>,
}

impl Interner {
    /// Create a new interner pre-populated with the reserved atoms
    pub fn new() -> Self {
        let pool = DashMap::new();
        for atom in sym::reserved() {
            pool.insert(Arc::clone(&atom.0), atom.clone());
        }
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Intern `text`, returning the unique atom for it in this pool
    pub fn intern(&self, text: &str) -> Atom {
        if let Some(existing) = self.pool.get(text) {
            return existing.value().clone();
        }
        self.pool
            .entry(Arc::from(text))
            .or_insert_with(|| Atom::new_unpooled(text))
            .value()
            .clone()
    }

    /// Look up an atom without creating it
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.pool.get(text).map(|entry| entry.value().clone())
    }

    /// Number of atoms in this pool
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Check if the pool is empty (never true, reserved atoms are always present)
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.pool.len())
            .finish()
    }
}

/// Reserved atoms shared by every [`Interner`]
pub mod sym {
    use super::{Atom, Lazy};

    macro_rules! reserved_atoms {
        ($($(#[$doc:meta])* $name:ident = $text:literal;)*) => {
            $(
                $(#[$doc])*
                pub static $name: Lazy<Atom> = Lazy::new(|| Atom::new_unpooled($text));
            )*

            pub(crate) fn reserved() -> impl Iterator<Item = &'static Atom> {
                [$(&*$name),*].into_iter()
            }
        };
    }

    reserved_atoms! {
        /// The empty name; also marks a missing syntax element
        EMPTY = "";
        /// Substitution operator `$`, used for pattern placeholders
        SUBSTITUTE = "'$";
        /// Rest-of-sequence marker `..`
        DOT_DOT = "'..";
        /// Rest-of-sequence marker `...`
        DOT_DOT_DOT = "'...";
        /// List of nodes to be spliced into the enclosing list
        SPLICE = "#splice";
        /// `params` modifier, marks a multi-capture as in `$(params rest)`
        PARAMS = "#params";
        /// Single-line comment trivia
        TRIVIA_SL_COMMENT = "%SLComment";
        /// Multi-line (block) comment trivia
        TRIVIA_ML_COMMENT = "%MLComment";
        /// Newline trivia
        TRIVIA_NEWLINE = "%newline";
        /// Holder for trivia that follows a node
        TRIVIA_TRAILING = "%trailing";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_deduplicates() {
        let interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "foo");
    }

    #[test]
    fn test_isolated_pools_do_not_share_atoms() {
        let first = Interner::new();
        let second = Interner::new();

        assert_ne!(first.intern("foo"), second.intern("foo"));
    }

    #[test]
    fn test_reserved_atoms_are_shared() {
        let first = Interner::new();
        let second = Interner::new();

        assert_eq!(first.intern("#splice"), *sym::SPLICE);
        assert_eq!(second.intern("#splice"), *sym::SPLICE);
        assert_eq!(first.intern(""), Atom::empty());
        assert!(first.get("never-seen").is_none());
    }

    #[test]
    fn test_name_classification() {
        let interner = Interner::new();
        assert!(sym::TRIVIA_NEWLINE.is_trivia_name());
        assert!(!interner.intern("foo").is_trivia_name());
        assert!(sym::SUBSTITUTE.is_special());
        assert!(Atom::empty().is_special());
        assert!(!interner.intern("foo").is_special());
    }

    #[test]
    fn test_concurrent_interning() {
        let interner = Interner::new();
        let atoms: Vec<Atom> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| interner.intern("shared")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(atoms.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
