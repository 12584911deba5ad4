//! Interned symbols.
//!
//! Symbol names are interned in a global registry so that two symbols with
//! the same name share one key, and equality is a key comparison instead of
//! a string comparison.
//!
//! # Example
//! ```
//! use symb_logic::{symb, symbol_exists};
//!
//! let x = symb("doc_symbol_x");
//! let x2 = symb("doc_symbol_x");
//! assert_eq!(x, x2);
//! assert!(symbol_exists("doc_symbol_x"));
//! ```

pub mod registry;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use slotmap::{DefaultKey, Key};

pub use registry::{symb, symb_interned, symbol_count, symbol_exists};

/// A symbol name registered in the global registry.
///
/// Cloning is cheap (one `Arc` bump). Equality compares registry keys; the
/// hash and the canonical order use the name, which is consistent because a
/// name maps to exactly one key for the lifetime of the process.
#[derive(Clone)]
pub struct InternedSymbol {
    key: DefaultKey,
    name: Arc<str>,
}

impl InternedSymbol {
    pub(crate) fn new_named(name: &str, key: DefaultKey) -> Self {
        Self {
            key,
            name: Arc::from(name),
        }
    }

    /// The symbol's registry id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.key.data().as_ffi()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }
}

impl PartialEq for InternedSymbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for InternedSymbol {}

impl Hash for InternedSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for InternedSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedSymbol {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.key == other.key {
            return Ordering::Equal;
        }
        self.name
            .cmp(&other.name)
            .then_with(|| self.id().cmp(&other.id()))
    }
}

impl AsRef<str> for InternedSymbol {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedSymbol({:?}, #{})", self.name, self.id())
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_key() {
        let a = symb_interned("sym_test_alpha");
        let b = symb_interned("sym_test_alpha");
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_ordering_by_name() {
        let a = symb_interned("sym_test_a");
        let b = symb_interned("sym_test_b");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }
}
