//! Type handles stored in declarations.
//!
//! Type-system semantics live elsewhere; the declaration model needs just
//! enough of a type table to hold what name binding and type checking write
//! into declarations: an error sentinel, named types, the sugared alias
//! type of a `typealias`, and the few structural forms used when computing
//! the type of a reference.
//!
//! Types are uniqued per compilation unit, so two equal [`TypeData`] values
//! always yield the same [`Type`] handle.

use vellum_mem::{Idx, Symbol};

use crate::decl::DeclId;

/// A uniqued type owned by one [`AstContext`](crate::AstContext).
pub type Type = Idx<TypeData>;

/// Structure of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// The sentinel written into a declaration whose type is ill-formed or
    /// could not be resolved.
    Error,
    /// A nominal type named by an identifier.
    Nominal(Symbol),
    /// The sugared type that spells a `typealias` by its own name.
    NameAlias(DeclId),
    /// `(A, B, ...)`
    Tuple(Box<[Type]>),
    /// `input -> result`
    Function {
        /// Parameter type (a tuple for multiple parameters).
        input: Type,
        /// Result type.
        result: Type,
    },
    /// A reference to mutable storage of the wrapped type.
    LValue(Type),
    /// The type of a type, e.g. of a `typealias` used as a value.
    MetaType(Type),
}

impl TypeData {
    /// Returns true for the error sentinel.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, TypeData::Error)
    }
}
