//! Handles to patterns, expressions, statements and function bodies.
//!
//! Those trees are built and owned by other parts of the compiler; a
//! declaration only records which one it refers to. The handles are plain
//! 32-bit IDs minted by their owners.

macro_rules! opaque_handle {
    ($( $(#[$meta:meta])* $name:ident; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(u32);

            impl $name {
                /// Wraps an ID minted by the owning tree.
                #[must_use]
                pub const fn new(id: u32) -> Self {
                    Self(id)
                }

                /// Returns the raw ID.
                #[must_use]
                pub const fn as_u32(self) -> u32 {
                    self.0
                }
            }
        )*
    };
}

opaque_handle! {
    /// A pattern, such as the `(a, b)` of `var (a, b) = f()`.
    PatternId;
    /// An expression.
    ExprId;
    /// A statement.
    StmtId;
    /// The function expression holding a `func`'s signature and body.
    FuncExprId;
}
