//! Error type for the declaration model.
//!
//! Misusing a node is a compiler bug, not a user error. The panicking entry
//! points (`cast`, `TypeSlot::get`, `TypeSlot::set`, handle lookups) report
//! these errors by panicking with their message. The `try_*` entry points
//! return them for callers that want to check first.

use std::fmt;

use vellum_mem::IndexError;

use crate::kind::DeclKind;
use crate::ty::Type;

/// Contract violations detected by the declaration model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A node was viewed as a variant or family it does not belong to.
    KindMismatch {
        /// The requested variant or family.
        expected: &'static str,

        /// The node's actual kind.
        found: DeclKind,
    },

    /// A type slot was read before anything was assigned to it.
    TypeNotSet,

    /// The set-once assignment was used on a slot that already holds a type.
    ///
    /// Replacing a type must go through `overwrite`.
    TypeAlreadySet {
        /// The type already in the slot.
        existing: Type,
    },

    /// A handle did not resolve in this unit.
    Handle(IndexError),
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, found } => {
                write!(f, "expected a {expected} declaration, found {found}")
            }
            Self::TypeNotSet => write!(f, "type slot read before a type was set"),
            Self::TypeAlreadySet { existing } => {
                write!(f, "type slot already set to {existing:?}; use overwrite to replace it")
            }
            Self::Handle(err) => write!(f, "invalid handle: {err}"),
        }
    }
}

impl std::error::Error for AstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IndexError> for AstError {
    fn from(err: IndexError) -> Self {
        Self::Handle(err)
    }
}

/// Result type for the checked entry points.
pub type AstResult<T> = Result<T, AstError>;
