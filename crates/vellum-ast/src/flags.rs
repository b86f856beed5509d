//! Packed per-node flags.
//!
//! Each node keeps all of its small state in one `u32`. The layers of the
//! hierarchy claim bits in order, each starting right after its base:
//!
//! | Layer     | Bits  | Contents                                   |
//! |-----------|-------|--------------------------------------------|
//! | Decl      | 0..8  | [`DeclKind`] discriminant                  |
//! | NamedDecl | 8..8  | (none yet)                                 |
//! | ValueDecl | 8..10 | never used as lvalue, has fixed lifetime   |
//!
//! Overrunning the 32-bit budget is rejected at compile time.

use crate::kind::DeclKind;

/// Total bits available to all layers.
pub const FLAG_BUDGET: u32 = u32::BITS;

/// Bits used by the base `Decl` layer (the kind).
pub const NUM_DECL_BITS: u32 = 8;

/// Bits used up to and including the `NamedDecl` layer.
pub const NUM_NAMED_DECL_BITS: u32 = NUM_DECL_BITS;

/// Bits used up to and including the `ValueDecl` layer.
pub const NUM_VALUE_DECL_BITS: u32 = NUM_NAMED_DECL_BITS + 2;

const _: () = assert!(NUM_DECL_BITS <= FLAG_BUDGET, "Decl bits overflow u32");
const _: () = assert!(NUM_NAMED_DECL_BITS <= FLAG_BUDGET, "NamedDecl bits overflow u32");
const _: () = assert!(NUM_VALUE_DECL_BITS <= FLAG_BUDGET, "ValueDecl bits overflow u32");
const _: () = assert!(
    DeclKind::COUNT <= 1 << NUM_DECL_BITS,
    "too many declaration kinds for the kind field"
);

/// One layer's slice of the flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagLayer {
    /// Layer name.
    pub name: &'static str,
    /// First bit owned by the layer.
    pub start: u32,
    /// Number of bits owned by the layer.
    pub width: u32,
}

impl FlagLayer {
    /// One past the last bit owned by the layer.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.start + self.width
    }
}

/// The layers along the deepest chain, base first.
pub const FLAG_LAYERS: [FlagLayer; 3] = [
    FlagLayer {
        name: "Decl",
        start: 0,
        width: NUM_DECL_BITS,
    },
    FlagLayer {
        name: "NamedDecl",
        start: NUM_DECL_BITS,
        width: NUM_NAMED_DECL_BITS - NUM_DECL_BITS,
    },
    FlagLayer {
        name: "ValueDecl",
        start: NUM_NAMED_DECL_BITS,
        width: NUM_VALUE_DECL_BITS - NUM_NAMED_DECL_BITS,
    },
];

const KIND_MASK: u32 = (1 << NUM_DECL_BITS) - 1;
const NEVER_USED_AS_LVALUE: u32 = NUM_NAMED_DECL_BITS;
const HAS_FIXED_LIFETIME: u32 = NUM_NAMED_DECL_BITS + 1;

/// The packed flag word of one declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclBits(u32);

impl DeclBits {
    /// Flag word for a fresh node: the kind set, every flag clear.
    #[must_use]
    pub const fn new(kind: DeclKind) -> Self {
        Self(kind as u32)
    }

    /// Returns the raw word.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the kind stored in the `Decl` layer.
    #[must_use]
    pub const fn kind(self) -> DeclKind {
        match DeclKind::from_raw((self.0 & KIND_MASK) as u8) {
            Some(kind) => kind,
            None => panic!("corrupt declaration kind bits"),
        }
    }

    /// `ValueDecl` layer: the value is never used where it could be
    /// modified.
    #[must_use]
    pub const fn never_used_as_lvalue(self) -> bool {
        self.bit(NEVER_USED_AS_LVALUE)
    }

    /// `ValueDecl` layer: the value's lifetime matches its lexical scope
    /// (it is not captured).
    #[must_use]
    pub const fn has_fixed_lifetime(self) -> bool {
        self.bit(HAS_FIXED_LIFETIME)
    }

    pub(crate) fn set_never_used_as_lvalue(&mut self, flag: bool) {
        self.set_bit(NEVER_USED_AS_LVALUE, flag);
    }

    pub(crate) fn set_has_fixed_lifetime(&mut self, flag: bool) {
        self.set_bit(HAS_FIXED_LIFETIME, flag);
    }

    const fn bit(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    fn set_bit(&mut self, bit: u32, flag: bool) {
        if flag {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }
}

impl std::fmt::Debug for DeclBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclBits")
            .field("kind", &self.kind())
            .field("never_used_as_lvalue", &self.never_used_as_lvalue())
            .field("has_fixed_lifetime", &self.has_fixed_lifetime())
            .finish()
    }
}
