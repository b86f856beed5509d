//! Declaration attributes.
//!
//! Almost no declaration carries attributes, so a named declaration starts
//! out pointing at the shared [`DeclAttributes::EMPTY`] set and only gets
//! storage of its own the first time someone asks to modify it (see
//! [`AstContext::attrs_mut`](crate::AstContext::attrs_mut)).

use vellum_mem::{Idx, Symbol};

/// Handle to an attribute set owned by an [`AstContext`](crate::AstContext).
pub type AttrId = Idx<DeclAttributes>;

/// How a declaration may change across library versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resilience {
    /// Frozen by an explicit attribute.
    Fragile,
    /// Cannot change because it is local to a function or top-level code.
    InherentlyFragile,
    /// May change.
    #[default]
    Resilient,
}

/// Associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Associativity {
    /// `a op b op c` is ill-formed.
    #[default]
    None,
    /// `(a op b) op c`
    Left,
    /// `a op (b op c)`
    Right,
}

/// Parsing information for an infix operator function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfixData {
    /// Binding strength; higher binds tighter.
    pub precedence: u8,
    /// Associativity.
    pub associativity: Associativity,
}

impl InfixData {
    /// Creates infix data.
    #[must_use]
    pub const fn new(precedence: u8, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity,
        }
    }
}

/// The attributes written on one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclAttributes {
    /// Explicit resilience, if written.
    pub resilience: Option<Resilience>,
    /// Infix operator data, if written.
    pub infix: Option<InfixData>,
    /// Symbol name to use in the object file.
    pub asm_name: Option<Symbol>,
    /// Compound assignment operator such as `+=`.
    pub is_assignment: bool,
    /// Implicit conversion function.
    pub is_conversion: bool,
}

impl DeclAttributes {
    /// The shared empty set every named declaration starts with.
    pub const EMPTY: DeclAttributes = DeclAttributes::new();

    /// Creates an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resilience: None,
            infix: None,
            asm_name: None,
            is_assignment: false,
            is_conversion: false,
        }
    }

    /// Returns true if no attribute is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for DeclAttributes {
    fn default() -> Self {
        Self::new()
    }
}

/// Backing storage for [`DeclAttributes::EMPTY`] when a reference is needed.
pub(crate) static EMPTY_ATTRIBUTES: DeclAttributes = DeclAttributes::EMPTY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        assert!(DeclAttributes::EMPTY.is_empty());
        assert!(EMPTY_ATTRIBUTES.is_empty());
        assert_eq!(DeclAttributes::default(), DeclAttributes::EMPTY);
    }

    #[test]
    fn test_any_attribute_makes_set_non_empty() {
        let mut attrs = DeclAttributes::new();
        attrs.infix = Some(InfixData::new(160, Associativity::Left));
        assert!(!attrs.is_empty());

        let mut attrs = DeclAttributes::new();
        attrs.is_conversion = true;
        assert!(!attrs.is_empty());
    }
}
