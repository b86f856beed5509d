//! Vellum memory management infrastructure
//!
//! This crate provides the ownership primitives the compiler frontend is
//! built on:
//!
//! - **Bump arena** ([`arena::LocalArena`]): raw storage released in one
//!   step when the arena is dropped (feature `local-arena`)
//! - **Index arena** ([`index::IndexArena`]): single-owner typed storage that
//!   hands out copyable [`index::Idx`] handles (feature `index-arena`)
//! - **String interning** ([`StringInterner`]): deduplicated identifiers
//!   addressed by [`Symbol`] (feature `string-interner`)

#[cfg(feature = "local-arena")]
pub mod arena;
#[cfg(feature = "index-arena")]
pub mod index;
#[cfg(feature = "string-interner")]
pub mod interner;
pub mod symbol;

#[cfg(feature = "index-arena")]
pub use index::{ArenaTag, Idx, IndexArena, IndexError};
#[cfg(feature = "string-interner")]
pub use interner::StringInterner;
pub use symbol::Symbol;
