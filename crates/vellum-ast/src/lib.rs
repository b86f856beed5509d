//! Vellum AST: declaration nodes
//!
//! This crate holds the declaration half of the Vellum syntax tree: imports,
//! extensions, pattern bindings, top-level code, subscripts, type aliases,
//! variables, functions and `oneof` cases. Nodes are produced by the parser
//! and read and updated by name binding, type checking and code generation.
//!
//! # Modules
//!
//! - [`kind`] - The closed list of declaration kinds and their families
//! - [`flags`] - The packed per-node flag word and its bit budget
//! - [`decl`] - Node types, typed views and the type slot
//! - [`accessor`] - Getter/setter linkage
//! - [`decl_context`] - Lexical contexts
//! - [`context`] - [`AstContext`], the per-unit owner of every node
//! - [`walker`] - Traversal entry point
//!
//! # Examples
//!
//! ```
//! use vellum_ast::decl::{AccessPathElement, ImportDecl, ValueDecl};
//! use vellum_ast::loc::SourceLoc;
//! use vellum_ast::AstContext;
//!
//! let mut ctx = AstContext::new();
//! let tu = ctx.translation_unit();
//!
//! let swift = ctx.intern("swift");
//! let import = ctx.create_import(tu, SourceLoc::new(0), &[AccessPathElement::new(swift, SourceLoc::new(7))]);
//! assert_eq!(ctx.get::<ImportDecl>(import).access_path().len(), 1);
//!
//! let x = ctx.intern("x");
//! let int = ctx.intern("Int");
//! let int_ty = ctx.nominal_type(int);
//! let var = ctx.create_var(tu, SourceLoc::new(20), x, None);
//! ctx.set_type(var, int_ty);
//! assert_eq!(ctx.get::<ValueDecl>(var).get_type(), int_ty);
//! ```

#![warn(missing_docs)]

pub mod accessor;
pub mod attrs;
pub mod context;
pub mod decl;
pub mod decl_context;
pub mod error;
pub mod flags;
pub mod kind;
pub mod loc;
pub mod payload;
pub mod ty;
pub mod walker;

pub use accessor::{AccessorRole, GetSetRecord};
pub use attrs::{DeclAttributes, Resilience};
pub use context::{AstConfig, AstContext, AstStats, Diagnostic};
pub use decl::{Decl, DeclClass, DeclId, NamedDecl, TypeSlot, ValueDecl};
pub use decl_context::{ContextId, DeclContextKind};
pub use error::{AstError, AstResult};
pub use kind::{DeclFamily, DeclKind};
pub use loc::{Located, SourceLoc, SourceRange};
pub use ty::{Type, TypeData};
pub use walker::{AstWalker, DeclChild};
