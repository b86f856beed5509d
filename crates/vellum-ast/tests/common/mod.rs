// Shared fixtures for the declaration integration tests.

#![allow(dead_code)]

use vellum_ast::decl::SubscriptParts;
use vellum_ast::loc::{SourceLoc, SourceRange};
use vellum_ast::payload::{ExprId, FuncExprId, PatternId};
use vellum_ast::{AstContext, DeclId, Type};

/// One declaration of every kind, created in the translation unit.
pub struct EveryKind {
    pub import: DeclId,
    pub extension: DeclId,
    pub pattern_binding: DeclId,
    pub top_level_code: DeclId,
    pub subscript: DeclId,
    pub type_alias: DeclId,
    pub var: DeclId,
    pub func: DeclId,
    pub one_of_element: DeclId,
}

impl EveryKind {
    pub fn all(&self) -> [DeclId; 9] {
        [
            self.import,
            self.extension,
            self.pattern_binding,
            self.top_level_code,
            self.subscript,
            self.type_alias,
            self.var,
            self.func,
            self.one_of_element,
        ]
    }
}

/// Applies `VELLUM_LOG`, so a failing test can be rerun with traces.
pub fn init_logging() {
    let _ = vellum_log::init_from_env();
}

pub fn loc(offset: u32) -> SourceLoc {
    SourceLoc::new(offset)
}

pub fn int_type(ctx: &mut AstContext) -> Type {
    let int = ctx.intern("Int");
    ctx.nominal_type(int)
}

pub fn func(ctx: &mut AstContext, name: &str, offset: u32) -> DeclId {
    let tu = ctx.translation_unit();
    let name = ctx.intern(name);
    ctx.create_func(tu, SourceLoc::INVALID, loc(offset), name, None, Some(FuncExprId::new(offset)))
}

pub fn every_kind(ctx: &mut AstContext) -> EveryKind {
    init_logging();
    let tu = ctx.translation_unit();
    let int = int_type(ctx);
    let swift = ctx.intern("swift");
    let name = ctx.intern("name");
    let get = func(ctx, "get", 60);

    EveryKind {
        import: ctx.create_import(
            tu,
            loc(0),
            &[vellum_ast::decl::AccessPathElement::new(swift, loc(7))],
        ),
        extension: ctx.create_extension(tu, loc(10), int),
        pattern_binding: ctx.create_pattern_binding(tu, loc(20), PatternId::new(0), Some(ExprId::new(0))),
        top_level_code: ctx.create_top_level_code(tu, loc(30)),
        subscript: ctx.create_subscript(
            tu,
            SubscriptParts {
                subscript_loc: loc(40),
                arrow_loc: loc(48),
                indices: PatternId::new(1),
                element_type: int,
                braces: SourceRange::new(loc(52), loc(70)),
                get: Some(get),
                set: None,
            },
        ),
        type_alias: ctx.create_type_alias(tu, loc(80), name, Some(int)),
        var: ctx.create_var(tu, loc(90), name, None),
        func: func(ctx, "f", 100),
        one_of_element: ctx.create_one_of_element(tu, loc(110), name, None, Some(int)),
    }
}
