// Classification tests
//
// Every node must classify as its own kind and as each family whose range
// contains that kind, and as nothing else.

mod common;

use vellum_ast::decl::{
    ExtensionDecl, FuncDecl, ImportDecl, OneOfElementDecl, PatternBindingDecl, SubscriptDecl,
    TopLevelCodeDecl, TypeAliasDecl, VarDecl,
};
use vellum_ast::{AstContext, AstError, Decl, DeclClass, DeclFamily, DeclKind, NamedDecl, ValueDecl};

fn is_kind(decl: &Decl, kind: DeclKind) -> bool {
    match kind {
        DeclKind::Import => decl.isa::<ImportDecl>(),
        DeclKind::Extension => decl.isa::<ExtensionDecl>(),
        DeclKind::PatternBinding => decl.isa::<PatternBindingDecl>(),
        DeclKind::TopLevelCode => decl.isa::<TopLevelCodeDecl>(),
        DeclKind::Subscript => decl.isa::<SubscriptDecl>(),
        DeclKind::TypeAlias => decl.isa::<TypeAliasDecl>(),
        DeclKind::Var => decl.isa::<VarDecl>(),
        DeclKind::Func => decl.isa::<FuncDecl>(),
        DeclKind::OneOfElement => decl.isa::<OneOfElementDecl>(),
    }
}

fn is_family(decl: &Decl, family: DeclFamily) -> bool {
    match family {
        DeclFamily::Named => decl.isa::<NamedDecl>(),
        DeclFamily::Value => decl.isa::<ValueDecl>(),
    }
}

#[test]
fn test_every_node_is_exactly_its_own_kind() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    for id in nodes.all() {
        let decl = ctx.decl(id);
        for &kind in DeclKind::ALL {
            assert_eq!(
                is_kind(decl, kind),
                decl.kind() == kind,
                "{} classified as {kind}",
                decl.kind()
            );
        }
    }
}

#[test]
fn test_family_checks_follow_ranges() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    for id in nodes.all() {
        let decl = ctx.decl(id);
        for &family in DeclFamily::ALL {
            assert_eq!(is_family(decl, family), decl.kind().is_in(family));
        }
    }
}

#[test]
fn test_dyn_cast_projects_shared_layers() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);
    let name = ctx.intern("name");

    for id in [nodes.type_alias, nodes.var, nodes.one_of_element] {
        let decl = ctx.decl(id);
        assert_eq!(decl.dyn_cast::<NamedDecl>().map(NamedDecl::name), Some(name));
        assert_eq!(decl.name(), Some(name));
    }
    assert_eq!(ctx.decl(nodes.import).name(), None);
    assert!(ctx.decl(nodes.subscript).dyn_cast::<ValueDecl>().is_none());
}

#[test]
fn test_try_cast_reports_mismatch() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    let err = ctx.decl(nodes.var).try_cast::<FuncDecl>().unwrap_err();
    assert_eq!(
        err,
        AstError::KindMismatch {
            expected: FuncDecl::NAME,
            found: DeclKind::Var,
        }
    );
}

#[test]
#[should_panic(expected = "expected a VarDecl declaration, found Func")]
fn test_cast_to_wrong_kind_panics() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);
    let _ = ctx.get::<VarDecl>(nodes.func);
}

#[test]
#[should_panic(expected = "expected a ValueDecl declaration, found Import")]
fn test_value_flags_on_unnamed_node_panic() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);
    let _ = ctx.decl(nodes.import).never_used_as_lvalue();
}

#[test]
fn test_value_flags_start_clear() {
    let mut ctx = AstContext::new();
    let nodes = common::every_kind(&mut ctx);

    for id in [nodes.type_alias, nodes.var, nodes.func, nodes.one_of_element] {
        let decl = ctx.decl(id);
        assert!(!decl.never_used_as_lvalue());
        assert!(!decl.has_fixed_lifetime());
    }

    let var = ctx.decl_mut(nodes.var);
    var.set_has_fixed_lifetime(true);
    assert!(var.has_fixed_lifetime());
    assert_eq!(var.kind(), DeclKind::Var);
}
