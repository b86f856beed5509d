//! Getter/setter linkage between storage declarations and functions.
//!
//! The link has two independent sides. A `var` or `subscript` records the
//! functions that mediate its access; each of those functions records which
//! storage it accesses and in what role. The primitives set one side at a
//! time and never update the other side; [`AstContext::wire_property`] and
//! [`AstContext::wire_subscript_accessors`] set both.
//!
//! [`AstContext::wire_property`]: crate::AstContext::wire_property
//! [`AstContext::wire_subscript_accessors`]: crate::AstContext::wire_subscript_accessors

use crate::decl::DeclId;
use crate::loc::SourceRange;

/// The accessor functions of a computed `var`.
///
/// A variable with a record has no storage of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetSetRecord {
    /// The braces around the accessor bodies.
    pub braces: SourceRange,
    /// The getter function.
    pub get: Option<DeclId>,
    /// The setter function.
    pub set: Option<DeclId>,
}

/// The role a function plays for a storage declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorRole {
    /// The function is the getter of the declaration.
    Getter(DeclId),
    /// The function is the setter of the declaration.
    Setter(DeclId),
}

impl AccessorRole {
    /// The storage declaration being accessed.
    #[must_use]
    pub const fn storage(self) -> DeclId {
        match self {
            Self::Getter(decl) | Self::Setter(decl) => decl,
        }
    }

    /// Returns true for [`AccessorRole::Getter`].
    #[must_use]
    pub const fn is_getter(self) -> bool {
        matches!(self, Self::Getter(_))
    }

    /// Returns true for [`AccessorRole::Setter`].
    #[must_use]
    pub const fn is_setter(self) -> bool {
        matches!(self, Self::Setter(_))
    }
}
