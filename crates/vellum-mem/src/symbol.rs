//! Symbol type for interned strings.
//!
//! A [`Symbol`] is the 32-bit ID of a string owned by a
//! [`StringInterner`](crate::StringInterner). Declaration names, access
//! path components and attribute payloads are all stored as symbols, so
//! comparing two identifiers is one integer comparison.
//!
//! # Examples
//!
//! ```
//! use vellum_mem::Symbol;
//!
//! let sym1 = Symbol::new(42);
//! let sym2 = Symbol::new(42);
//!
//! assert_eq!(sym1, sym2);
//! assert_eq!(sym1.as_u32(), 42);
//! assert!(Symbol::INVALID.is_invalid());
//! ```

use std::fmt;

/// A symbol representing an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Placeholder symbol used where no identifier was written
    /// (for example `_`). Never produced by interning.
    pub const INVALID: Symbol = Symbol(u32::MAX);

    /// Creates a symbol from a raw ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the raw ID as an index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns true for [`Symbol::INVALID`].
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "Symbol(<invalid>)")
        } else {
            write!(f, "Symbol({})", self.0)
        }
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let sym = Symbol::new(42);
        assert_eq!(sym.as_u32(), 42);
        assert_eq!(sym.as_usize(), 42);
        assert_eq!(Symbol::from(42), sym);
    }

    #[test]
    fn test_symbol_ord() {
        assert!(Symbol::new(1) < Symbol::new(2));
        assert!(Symbol::new(7) < Symbol::INVALID);
    }

    #[test]
    fn test_symbol_invalid() {
        assert!(!Symbol::new(42).is_invalid());
        assert!(Symbol::INVALID.is_invalid());
        assert_eq!(Symbol::INVALID.as_u32(), u32::MAX);
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::new(42).to_string(), "Symbol(42)");
        assert_eq!(Symbol::INVALID.to_string(), "Symbol(<invalid>)");
    }
}
