//! String interning with ID-based references.
//!
//! The interner keeps two maps:
//! - `strings`: Symbol -> &str, for resolving IDs back to text
//! - `symbols`: &str -> Symbol, for deduplicating on intern
//!
//! String bytes live in a [`LocalArena`] owned by the interner, so all of
//! them are released together with it.
//!
//! The declaration keywords are interned first, in a fixed order, so their
//! symbols are the same in every compilation unit.
//!
//! # Examples
//!
//! ```
//! use vellum_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//!
//! let sym1 = interner.intern("count");
//! let sym2 = interner.intern("count");
//! let sym3 = interner.intern("total");
//!
//! assert_eq!(sym1, sym2);
//! assert_ne!(sym1, sym3);
//! assert_eq!(interner.resolve(sym1), Some("count"));
//! ```

use crate::arena::{LocalArena, SYNTAX_CHUNK_SIZE};
use crate::symbol::Symbol;

#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// Keywords that introduce or qualify declarations, in ID order.
pub const KEYWORDS: &[&str] = &[
    "import",
    "extension",
    "var",
    "func",
    "subscript",
    "typealias",
    "oneof",
    "static",
    "get",
    "set",
    "this",
    "protocol",
];

/// String interner with bidirectional mapping.
pub struct StringInterner {
    arena: LocalArena,

    /// Symbol ID -> text. The `'static` is a lie confined to this type:
    /// slices point into `arena` and are only handed out borrowed from
    /// `&self`.
    strings: Vec<&'static str>,

    symbols: HashMap<&'static str, Symbol>,
}

impl StringInterner {
    /// Creates an interner with the keywords pre-interned.
    ///
    /// ```
    /// use vellum_mem::StringInterner;
    ///
    /// let mut interner = StringInterner::new();
    /// assert_eq!(interner.intern("import").as_u32(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_chunk_size(SYNTAX_CHUNK_SIZE)
    }

    /// Creates an interner whose string arena starts with a chunk of
    /// `chunk_size` bytes.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        let mut interner = Self {
            arena: LocalArena::new(chunk_size),
            strings: Vec::with_capacity(KEYWORDS.len()),
            symbols: HashMap::with_capacity(KEYWORDS.len()),
        };

        for keyword in KEYWORDS {
            interner.intern(keyword);
        }

        interner
    }

    /// Interns `s`, returning the existing symbol if it was seen before.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 1` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.get(s) {
            return sym;
        }

        let id = match u32::try_from(self.strings.len()) {
            Ok(id) if id != Symbol::INVALID.as_u32() => id,
            _ => panic!("symbol space exhausted"),
        };

        let ptr = self.arena.alloc_str(s);

        // SAFETY: `ptr` holds a copy of `s` (valid UTF-8, `s.len()` bytes).
        // The arena never frees or moves it while `self` is alive, and the
        // slice is only exposed through borrows of `self`.
        let stored: &'static str = unsafe {
            let bytes = std::slice::from_raw_parts(ptr, s.len());
            std::str::from_utf8_unchecked(bytes)
        };

        let sym = Symbol::new(id);
        self.strings.push(stored);
        self.symbols.insert(stored, sym);
        sym
    }

    /// Resolves a symbol to its text, or `None` for a symbol this interner
    /// never produced.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).copied()
    }

    /// Returns the symbol of `s` without interning it.
    #[must_use]
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Number of interned strings, keywords included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false: the keywords are interned on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Bytes of string data held by the interner's arena.
    #[must_use]
    pub fn bytes_allocated(&self) -> usize {
        self.arena.stats().total_allocated
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.strings.len())
            .field("arena", &self.arena)
            .finish()
    }
}
