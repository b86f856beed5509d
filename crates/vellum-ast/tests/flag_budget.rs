// Flag budget tests
//
// The layers of the Decl -> NamedDecl -> ValueDecl chain share one 32-bit
// word; each starts where its base ends.

use vellum_ast::flags::{
    DeclBits, FLAG_BUDGET, FLAG_LAYERS, NUM_DECL_BITS, NUM_NAMED_DECL_BITS, NUM_VALUE_DECL_BITS,
};
use vellum_ast::DeclKind;

#[test]
fn test_declared_widths_fit_in_budget() {
    let total: u32 = FLAG_LAYERS.iter().map(|layer| layer.width).sum();

    assert_eq!(FLAG_BUDGET, 32);
    assert!(total <= FLAG_BUDGET, "flag layers use {total} bits");
    assert_eq!(FLAG_LAYERS.last().map(|layer| layer.end()), Some(NUM_VALUE_DECL_BITS));
}

#[test]
fn test_layers_are_chained() {
    assert!(NUM_DECL_BITS <= NUM_NAMED_DECL_BITS);
    assert!(NUM_NAMED_DECL_BITS <= NUM_VALUE_DECL_BITS);

    for pair in FLAG_LAYERS.windows(2) {
        assert_eq!(pair[1].start, pair[0].end(), "{} overlaps {}", pair[1].name, pair[0].name);
    }
}

#[test]
fn test_kind_field_holds_every_kind() {
    assert!(DeclKind::COUNT <= 1 << NUM_DECL_BITS);
    for &kind in DeclKind::ALL {
        assert_eq!(DeclBits::new(kind).kind(), kind);
        assert_eq!(DeclBits::new(kind).raw() >> NUM_DECL_BITS, 0);
    }
}

#[test]
fn test_node_word_is_four_bytes() {
    assert_eq!(size_of::<DeclBits>(), 4);
}
