//! Source locations carried by declaration nodes.
//!
//! The declaration model treats locations as opaque: it stores them, hands
//! them back and picks the right one for [`Located::loc_start`], but never
//! interprets them. A location is a byte offset into the unit's source
//! buffer; [`SourceLoc::INVALID`] marks "not written in the source" (for
//! example the `static` keyword of a non-static function).
//!
//! # Examples
//!
//! ```
//! use vellum_ast::loc::{SourceLoc, SourceRange};
//!
//! let lbrace = SourceLoc::new(10);
//! let rbrace = SourceLoc::new(42);
//! let braces = SourceRange::new(lbrace, rbrace);
//!
//! assert!(braces.is_valid());
//! assert!(!SourceLoc::INVALID.is_valid());
//! ```

use std::fmt;

/// A byte offset into the source buffer of one compilation unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLoc(u32);

impl SourceLoc {
    /// The location of something that does not appear in the source.
    pub const INVALID: SourceLoc = SourceLoc(u32::MAX);

    /// Creates a location from a byte offset.
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// Returns false for [`SourceLoc::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Returns the byte offset, or `None` for an invalid location.
    #[must_use]
    pub const fn offset(self) -> Option<u32> {
        if self.is_valid() { Some(self.0) } else { None }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "@{offset}"),
            None => write!(f, "@<invalid>"),
        }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A pair of locations, such as the braces around accessor bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    /// First location of the range.
    pub start: SourceLoc,
    /// Last location of the range (inclusive).
    pub end: SourceLoc,
}

impl SourceRange {
    /// Creates a range from its two ends.
    #[must_use]
    pub const fn new(start: SourceLoc, end: SourceLoc) -> Self {
        Self { start, end }
    }

    /// Returns true if both ends are valid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

/// Implemented by anything that can report where it starts in the source.
pub trait Located {
    /// Returns the first source location of the node.
    fn loc_start(&self) -> SourceLoc;
}
