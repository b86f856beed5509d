//! Declaration benchmarks.
//!
//! - Creating a unit full of variables and functions
//! - Family classification over every node (range check)
//! - Typed downcasts through `dyn_cast`
//! - Walking an extension with many members

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vellum_ast::decl::{FuncDecl, VarDecl};
use vellum_ast::loc::SourceLoc;
use vellum_ast::{AstContext, AstWalker, DeclId, ValueDecl};

fn build_unit(size: u32) -> AstContext {
    let mut ctx = AstContext::new();
    let tu = ctx.translation_unit();
    for i in 0..size {
        let name = ctx.intern(&format!("decl_{i}"));
        if i % 2 == 0 {
            ctx.create_var(tu, SourceLoc::new(i), name, None);
        } else {
            ctx.create_func(tu, SourceLoc::INVALID, SourceLoc::new(i), name, None, None);
        }
    }
    ctx
}

fn bench_create(c: &mut Criterion) {
    vellum_log::init_from_env();
    let mut group = c.benchmark_group("create_decls");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(build_unit(size)).release());
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let ctx = build_unit(10_000);

    c.bench_function("classify_value_family", |b| {
        b.iter(|| {
            ctx.decls()
                .filter(|(_, decl)| decl.isa::<ValueDecl>())
                .count()
        });
    });

    c.bench_function("dyn_cast_var", |b| {
        b.iter(|| {
            ctx.decls()
                .filter_map(|(_, decl)| decl.dyn_cast::<VarDecl>())
                .map(|var| var.var_loc())
                .count()
        });
    });

    c.bench_function("dyn_cast_func", |b| {
        b.iter(|| {
            ctx.decls()
                .filter_map(|(_, decl)| decl.dyn_cast::<FuncDecl>())
                .filter(|func| func.is_static())
                .count()
        });
    });
}

struct Counter(usize);

impl AstWalker for Counter {
    fn walk_to_decl_pre(&mut self, _ctx: &AstContext, _decl: DeclId) -> bool {
        self.0 += 1;
        true
    }
}

fn bench_walk(c: &mut Criterion) {
    let mut ctx = AstContext::new();
    let tu = ctx.translation_unit();
    let int = ctx.intern("Int");
    let int_ty = ctx.nominal_type(int);
    let ext = ctx.create_extension_with(tu, SourceLoc::new(0), int_ty, |ctx, own| {
        (0..1_000)
            .map(|i| {
                let name = ctx.intern(&format!("member_{i}"));
                ctx.create_var(own, SourceLoc::new(i), name, None)
            })
            .collect()
    });

    c.bench_function("walk_extension_1000", |b| {
        b.iter(|| {
            let mut counter = Counter(0);
            let _ = ctx.walk_decl(ext, &mut counter);
            black_box(counter.0)
        });
    });
}

criterion_group!(benches, bench_create, bench_classify, bench_walk);
criterion_main!(benches);
