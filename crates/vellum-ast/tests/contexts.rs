// Lexical context tests
//
// Extensions and top-level code are declarations and lexical contexts at
// the same time; the two kind spaces are queried separately.

mod common;

use std::ops::ControlFlow;

use vellum_ast::decl::{AsDeclContext, ExtensionDecl, TopLevelCodeDecl};
use vellum_ast::loc::SourceLoc;
use vellum_ast::payload::FuncExprId;
use vellum_ast::{AstContext, AstWalker, DeclContextKind, DeclId, DeclKind, Located};

use common::loc;

fn extension_with_members(ctx: &mut AstContext) -> (DeclId, Vec<DeclId>) {
    let tu = ctx.translation_unit();
    let int = common::int_type(ctx);
    let count = ctx.intern("count");
    let describe = ctx.intern("describe");
    let zero = ctx.intern("zero");

    let ext = ctx.create_extension_with(tu, loc(0), int, |ctx, own| {
        vec![
            ctx.create_var(own, loc(20), count, None),
            ctx.create_func(own, SourceLoc::INVALID, loc(40), describe, None, Some(FuncExprId::new(1))),
            ctx.create_func(own, loc(60), loc(67), zero, None, None),
        ]
    });
    let members = ctx.members(ext).to_vec();
    (ext, members)
}

#[test]
fn test_dual_role_kinds_are_independent() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    let ext_ctx = ctx.get::<ExtensionDecl>(nodes.extension).as_decl_context();
    let code_ctx = ctx.get::<TopLevelCodeDecl>(nodes.top_level_code).as_decl_context();

    assert_eq!(ctx.decl(nodes.extension).kind(), DeclKind::Extension);
    assert_eq!(ctx.context_kind(ext_ctx), DeclContextKind::ExtensionDecl);
    assert_eq!(ctx.decl(nodes.top_level_code).kind(), DeclKind::TopLevelCode);
    assert_eq!(ctx.context_kind(code_ctx), DeclContextKind::TopLevelCodeDecl);

    assert_eq!(ctx.context_owner(ext_ctx), Some(nodes.extension));
    assert_eq!(ctx.context_owner(code_ctx), Some(nodes.top_level_code));
    assert!(ctx.is_local_context(code_ctx));
    assert!(!ctx.is_local_context(ext_ctx));
}

#[test]
fn test_members_and_instance_membership() {
    let mut ctx = AstContext::new();
    let (ext, members) = extension_with_members(&mut ctx);
    let [count, describe, zero] = members[..] else {
        panic!("expected three members");
    };

    assert_eq!(ctx.members(ext), &members[..]);
    assert!(ctx.is_instance_member(count));
    assert!(ctx.is_instance_member(describe));
    assert!(!ctx.is_instance_member(zero));

    let nodes = common::every_kind(&mut ctx);
    assert!(!ctx.is_instance_member(nodes.var));
}

#[test]
fn test_extension_type_of_methods() {
    let mut ctx = AstContext::new();
    let (ext, members) = extension_with_members(&mut ctx);
    let extended = ctx.get::<ExtensionDecl>(ext).extended_type();

    assert_eq!(ctx.extension_type_of(members[1]), Some(extended));

    let free = common::func(&mut ctx, "free", 300);
    assert_eq!(ctx.extension_type_of(free), None);
}

#[test]
fn test_context_chain_reaches_translation_unit() {
    let mut ctx = AstContext::new();
    let tu = ctx.translation_unit();
    let code = ctx.create_top_level_code(tu, loc(0));
    let code_ctx = ctx.get::<TopLevelCodeDecl>(code).as_decl_context();
    let closure = ctx.create_capturing_context(code_ctx);

    let chain: Vec<_> = ctx.context_chain(closure).collect();
    assert_eq!(chain, vec![closure, code_ctx, tu]);
    assert_eq!(ctx.translation_unit_of(closure), tu);

    let builtin = ctx.create_builtin_module();
    assert_eq!(ctx.translation_unit_of(builtin), builtin);
}

#[test]
fn test_decl_can_be_reattached() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);
    let ext_ctx = ctx.get::<ExtensionDecl>(nodes.extension).as_decl_context();

    ctx.decl_mut(nodes.var).set_decl_context(ext_ctx);
    assert_eq!(ctx.decl_context_of(nodes.var), ext_ctx);
    assert!(ctx.is_instance_member(nodes.var));
}

#[test]
fn test_loc_start_of_each_kind() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    let starts: Vec<_> = nodes
        .all()
        .iter()
        .map(|&id| ctx.decl(id).loc_start())
        .collect();
    let expected: Vec<_> = [0, 10, 20, 30, 40, 80, 90, 100, 110].map(loc).to_vec();
    assert_eq!(starts, expected);
}

struct Collect {
    seen: Vec<DeclId>,
    stop_at: Option<DeclId>,
}

impl AstWalker for Collect {
    fn walk_to_decl_pre(&mut self, _ctx: &AstContext, decl: DeclId) -> bool {
        self.seen.push(decl);
        true
    }

    fn walk_to_decl_post(&mut self, _ctx: &AstContext, decl: DeclId) -> ControlFlow<()> {
        if self.stop_at == Some(decl) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[test]
fn test_walk_extension_members_and_stop_early() {
    let mut ctx = AstContext::new();
    let (ext, members) = extension_with_members(&mut ctx);

    let mut all = Collect { seen: Vec::new(), stop_at: None };
    assert_eq!(ctx.walk_decl(ext, &mut all), ControlFlow::Continue(()));
    assert_eq!(all.seen, [vec![ext], members.clone()].concat());

    let mut early = Collect { seen: Vec::new(), stop_at: Some(members[0]) };
    assert_eq!(ctx.walk_decl(ext, &mut early), ControlFlow::Break(()));
    assert_eq!(early.seen, vec![ext, members[0]]);
}
