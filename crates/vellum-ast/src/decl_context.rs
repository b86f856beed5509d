//! Lexical contexts.
//!
//! A lexical context is the naming environment a declaration lives in. The
//! declaration model only links to contexts and walks their parent chain;
//! scope resolution happens elsewhere. Contexts have their own kind space,
//! independent of [`DeclKind`](crate::kind::DeclKind): an extension is both a
//! declaration of kind `Extension` and a context of kind
//! [`DeclContextKind::ExtensionDecl`].

use std::fmt;

use vellum_mem::Idx;

use crate::decl::DeclId;

/// Handle to a lexical context owned by an [`AstContext`](crate::AstContext).
pub type ContextId = Idx<ContextData>;

/// Kind of a lexical context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclContextKind {
    /// The root of one compilation unit.
    TranslationUnit,
    /// The compiler's builtin module.
    BuiltinModule,
    /// A closure or function body.
    CapturingExpr,
    /// The body of an `extension`.
    ExtensionDecl,
    /// A top-level statement or expression.
    TopLevelCodeDecl,
}

impl DeclContextKind {
    /// Returns true for contexts local to executable code.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::CapturingExpr | Self::TopLevelCodeDecl)
    }

    /// Returns true for the roots of the context tree.
    #[must_use]
    pub const fn is_module_scope(self) -> bool {
        matches!(self, Self::TranslationUnit | Self::BuiltinModule)
    }
}

impl fmt::Display for DeclContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TranslationUnit => "translation unit",
            Self::BuiltinModule => "builtin module",
            Self::CapturingExpr => "capturing expression",
            Self::ExtensionDecl => "extension",
            Self::TopLevelCodeDecl => "top-level code",
        };
        f.write_str(name)
    }
}

/// One lexical context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextData {
    /// The context's kind.
    pub kind: DeclContextKind,
    /// Enclosing context; `None` only for module scopes.
    pub parent: Option<ContextId>,
    /// The declaration that doubles as this context, for the dual-role
    /// declarations.
    pub owner: Option<DeclId>,
}
