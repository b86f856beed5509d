//! Traversal entry point for declaration trees.
//!
//! The declaration model does not own a traversal policy. It exposes the
//! children of each declaration in source order ([`AstContext::children`])
//! and one entry point, [`AstContext::walk_decl`], that hands each child to
//! an [`AstWalker`]. The walker decides whether to descend into a
//! declaration and may stop the whole walk early.
//!
//! Patterns, expressions, statements and function bodies are not owned here,
//! so the walker receives only their handles.

use std::ops::ControlFlow;

use crate::context::AstContext;
use crate::decl::{DeclData, DeclId, ExtensionDecl, TopLevelBody};
use crate::payload::{ExprId, FuncExprId, PatternId, StmtId};

/// One child of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclChild {
    /// A nested declaration (member, accessor).
    Decl(DeclId),
    /// A pattern.
    Pattern(PatternId),
    /// An expression.
    Expr(ExprId),
    /// A statement.
    Stmt(StmtId),
    /// A function's signature and body.
    FuncBody(FuncExprId),
}

/// Callbacks driven by [`AstContext::walk_decl`].
///
/// Every method has a default that continues the walk.
pub trait AstWalker {
    /// Called before a declaration's children. Return false to skip them.
    fn walk_to_decl_pre(&mut self, ctx: &AstContext, decl: DeclId) -> bool {
        let _ = (ctx, decl);
        true
    }

    /// Called after a declaration's children (or instead of them, when
    /// [`AstWalker::walk_to_decl_pre`] returned false).
    fn walk_to_decl_post(&mut self, ctx: &AstContext, decl: DeclId) -> ControlFlow<()> {
        let _ = (ctx, decl);
        ControlFlow::Continue(())
    }

    /// Called for a pattern child.
    fn visit_pattern(&mut self, pattern: PatternId) -> ControlFlow<()> {
        let _ = pattern;
        ControlFlow::Continue(())
    }

    /// Called for an expression child.
    fn visit_expr(&mut self, expr: ExprId) -> ControlFlow<()> {
        let _ = expr;
        ControlFlow::Continue(())
    }

    /// Called for a statement child.
    fn visit_stmt(&mut self, stmt: StmtId) -> ControlFlow<()> {
        let _ = stmt;
        ControlFlow::Continue(())
    }

    /// Called for a function body child.
    fn visit_func_body(&mut self, body: FuncExprId) -> ControlFlow<()> {
        let _ = body;
        ControlFlow::Continue(())
    }
}

impl AstContext {
    /// The children of `decl` in source order.
    ///
    /// | Kind | Children |
    /// |---|---|
    /// | Extension | members |
    /// | PatternBinding | pattern, initializer |
    /// | TopLevelCode | body |
    /// | Subscript | indices, getter, setter |
    /// | Var | getter, setter |
    /// | Func | body |
    ///
    /// An accessor that the enclosing extension also lists as a member is
    /// left to the extension, so walking the extension reaches it once.
    #[must_use]
    pub fn children(&self, decl: DeclId) -> Vec<DeclChild> {
        let mut children = Vec::new();
        match self.decl(decl).data() {
            DeclData::Extension(ext) => {
                children.extend(ext.members().iter().copied().map(DeclChild::Decl));
            }
            DeclData::PatternBinding(binding) => {
                children.push(DeclChild::Pattern(binding.pattern()));
                children.extend(binding.init().map(DeclChild::Expr));
            }
            DeclData::TopLevelCode(code) => match code.body() {
                Some(TopLevelBody::Expr(expr)) => children.push(DeclChild::Expr(expr)),
                Some(TopLevelBody::Stmt(stmt)) => children.push(DeclChild::Stmt(stmt)),
                None => {}
            },
            DeclData::Subscript(subscript) => {
                children.push(DeclChild::Pattern(subscript.indices()));
                self.push_accessors(decl, [subscript.getter(), subscript.setter()], &mut children);
            }
            DeclData::Var(var) => {
                self.push_accessors(decl, [var.getter(), var.setter()], &mut children);
            }
            DeclData::Func(func) => {
                children.extend(func.body().map(DeclChild::FuncBody));
            }
            DeclData::Import(_) | DeclData::TypeAlias(_) | DeclData::OneOfElement(_) => {}
        }
        children
    }

    fn push_accessors(
        &self,
        storage: DeclId,
        accessors: [Option<DeclId>; 2],
        children: &mut Vec<DeclChild>,
    ) {
        let members = self
            .context_owner(self.decl_context_of(storage))
            .and_then(|owner| self.decl(owner).dyn_cast::<ExtensionDecl>())
            .map_or(&[][..], ExtensionDecl::members);
        children.extend(
            accessors
                .into_iter()
                .flatten()
                .filter(|accessor| !members.contains(accessor))
                .map(DeclChild::Decl),
        );
    }

    /// Walks `decl` and, as the walker allows, its descendants.
    pub fn walk_decl(&self, decl: DeclId, walker: &mut impl AstWalker) -> ControlFlow<()> {
        if walker.walk_to_decl_pre(self, decl) {
            for child in self.children(decl) {
                match child {
                    DeclChild::Decl(nested) => self.walk_decl(nested, walker)?,
                    DeclChild::Pattern(pattern) => walker.visit_pattern(pattern)?,
                    DeclChild::Expr(expr) => walker.visit_expr(expr)?,
                    DeclChild::Stmt(stmt) => walker.visit_stmt(stmt)?,
                    DeclChild::FuncBody(body) => walker.visit_func_body(body)?,
                }
            }
        }
        walker.walk_to_decl_post(self, decl)
    }
}
