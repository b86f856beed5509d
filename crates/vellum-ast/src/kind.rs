//! The closed set of declaration kinds and their families.
//!
//! Every concrete declaration variant is listed exactly once, in the
//! [`decl_nodes!`] invocation at the bottom of this module. The order of that
//! list is significant: each abstract family (named declarations, value
//! declarations) must occupy a contiguous run of it, so that "is this kind
//! in family F?" is a single two-sided comparison against the kind's
//! discriminant.
//!
//! Adding a variant means adding one line to the list, inside the run of
//! every family it belongs to, and one `DeclData` case in [`crate::decl`].
//!
//! # Examples
//!
//! ```
//! use vellum_ast::kind::{DeclFamily, DeclKind};
//!
//! assert!(DeclKind::Var.is_in(DeclFamily::Value));
//! assert!(DeclKind::Var.is_in(DeclFamily::Named));
//! assert!(!DeclKind::Import.is_in(DeclFamily::Named));
//! assert_eq!(DeclKind::from_raw(DeclKind::Func as u8), Some(DeclKind::Func));
//! ```

use std::fmt;

macro_rules! decl_nodes {
    (
        kinds {
            $( $(#[$meta:meta])* $kind:ident, )*
        }
        families {
            $( $(#[$fmeta:meta])* $family:ident = $first:ident ..= $last:ident, )*
        }
    ) => {
        /// Discriminant of a concrete declaration variant.
        ///
        /// Stored in the low bits of every node's [`DeclBits`](crate::flags::DeclBits)
        /// and never changed after construction.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum DeclKind {
            $( $(#[$meta])* $kind, )*
        }

        impl DeclKind {
            /// Every kind, in registry order.
            pub const ALL: &'static [DeclKind] = &[ $( DeclKind::$kind, )* ];

            /// Number of kinds.
            pub const COUNT: usize = Self::ALL.len();

            /// Returns the variant name, e.g. `"TypeAlias"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( DeclKind::$kind => stringify!($kind), )*
                }
            }
        }

        /// An abstract layer of the declaration hierarchy, covering a
        /// contiguous range of [`DeclKind`]s.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DeclFamily {
            $( $(#[$fmeta])* $family, )*
        }

        impl DeclFamily {
            /// Every family.
            pub const ALL: &'static [DeclFamily] = &[ $( DeclFamily::$family, )* ];

            /// First kind of the family's range.
            #[must_use]
            pub const fn first(self) -> DeclKind {
                match self {
                    $( DeclFamily::$family => DeclKind::$first, )*
                }
            }

            /// Last kind of the family's range (inclusive).
            #[must_use]
            pub const fn last(self) -> DeclKind {
                match self {
                    $( DeclFamily::$family => DeclKind::$last, )*
                }
            }

            /// Returns the family name, e.g. `"Value"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( DeclFamily::$family => stringify!($family), )*
                }
            }
        }

        const _: () = {
            $( assert!(
                (DeclKind::$first as u8) <= (DeclKind::$last as u8),
                concat!("family ", stringify!($family), " has an empty range")
            ); )*
        };
    };
}

decl_nodes! {
    kinds {
        /// `import a.b.c`
        Import,
        /// `extension T { ... }`, also a lexical context
        Extension,
        /// `var (a, b) = init`
        PatternBinding,
        /// Top-level expression or statement, also a lexical context
        TopLevelCode,
        /// `subscript (i : Int) -> T { get set }`
        Subscript,
        /// `typealias Name : Underlying`
        TypeAlias,
        /// `var name : T`
        Var,
        /// `func name(...)`
        Func,
        /// One case of a `oneof`
        OneOfElement,
    }
    families {
        /// Declarations with an identifier.
        Named = TypeAlias ..= OneOfElement,
        /// Named declarations that denote a value and carry a type.
        Value = TypeAlias ..= OneOfElement,
    }
}

impl DeclKind {
    /// Recovers a kind from its discriminant.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<DeclKind> {
        if (raw as usize) < Self::COUNT {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Returns true if this kind lies within `family`'s range.
    #[inline]
    #[must_use]
    pub const fn is_in(self, family: DeclFamily) -> bool {
        let raw = self as u8;
        raw >= family.first() as u8 && raw <= family.last() as u8
    }

    /// Shorthand for `is_in(DeclFamily::Named)`.
    #[inline]
    #[must_use]
    pub const fn is_named(self) -> bool {
        self.is_in(DeclFamily::Named)
    }

    /// Shorthand for `is_in(DeclFamily::Value)`.
    #[inline]
    #[must_use]
    pub const fn is_value(self) -> bool {
        self.is_in(DeclFamily::Value)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_follow_registry_order() {
        for (i, kind) in DeclKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
            assert_eq!(DeclKind::from_raw(i as u8), Some(*kind));
        }
        assert_eq!(DeclKind::from_raw(DeclKind::COUNT as u8), None);
    }

    #[test]
    fn test_family_membership_is_the_declared_range() {
        for &family in DeclFamily::ALL {
            for &kind in DeclKind::ALL {
                let expected = family.first() <= kind && kind <= family.last();
                assert_eq!(kind.is_in(family), expected, "{kind} in {}", family.name());
            }
        }
    }

    #[test]
    fn test_value_family_is_within_named_family() {
        for &kind in DeclKind::ALL {
            if kind.is_value() {
                assert!(kind.is_named(), "{kind} is a value but not named");
            }
        }
    }

    #[test]
    fn test_unnamed_kinds() {
        for kind in [
            DeclKind::Import,
            DeclKind::Extension,
            DeclKind::PatternBinding,
            DeclKind::TopLevelCode,
            DeclKind::Subscript,
        ] {
            assert!(!kind.is_named());
            assert!(!kind.is_value());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(DeclKind::OneOfElement.name(), "OneOfElement");
        assert_eq!(DeclKind::TypeAlias.to_string(), "TypeAlias");
        assert_eq!(DeclFamily::Value.name(), "Value");
    }
}
