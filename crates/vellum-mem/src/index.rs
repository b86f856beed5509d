//! Typed index arena.
//!
//! [`IndexArena<T>`] is the sole owner of every `T` it stores. Instead of
//! references it hands out [`Idx<T>`] handles: a 32-bit slot index plus the
//! [`ArenaTag`] of the arena that produced it. Handles are `Copy`, can be
//! stored anywhere (including inside other arena values, which is how
//! back-references are expressed) and are resolved by the owning arena.
//!
//! There is no way to remove a single value. Dropping the arena releases all
//! of them at once, and every handle it produced becomes unusable: a lookup
//! in any other arena is rejected because the tags differ.
//!
//! # Examples
//!
//! ```
//! use vellum_mem::index::IndexArena;
//!
//! let mut arena = IndexArena::new();
//! let a = arena.alloc("first");
//! let b = arena.alloc("second");
//!
//! assert_eq!(arena[a], "first");
//! assert_eq!(*arena.get(b), "second");
//! assert_eq!(arena.len(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

static NEXT_TAG: AtomicU32 = AtomicU32::new(1);

/// Identity of one arena instance, unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaTag(NonZeroU32);

impl ArenaTag {
    fn fresh() -> Self {
        let raw = NEXT_TAG.fetch_add(1, AtomicOrdering::Relaxed);
        match NonZeroU32::new(raw) {
            Some(tag) => ArenaTag(tag),
            None => panic!("arena tag space exhausted"),
        }
    }

    /// Returns the raw tag value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ArenaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arena#{}", self.0)
    }
}

/// A typed handle to a value owned by an [`IndexArena<T>`].
pub struct Idx<T> {
    index: u32,
    tag: ArenaTag,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Returns the slot index within the owning arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the tag of the arena that produced this handle.
    #[must_use]
    pub const fn tag(self) -> ArenaTag {
        self.tag
    }
}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.tag == other.tag
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.tag.as_u32(), self.index).cmp(&(other.tag.as_u32(), other.index))
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.tag.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "Idx<{short}>({}@{})", self.index, self.tag.as_u32())
    }
}

/// Errors reported by the checked lookups of [`IndexArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The handle was produced by a different (possibly released) arena.
    ForeignHandle {
        /// Tag of the arena performing the lookup.
        expected: ArenaTag,
        /// Tag carried by the handle.
        found: ArenaTag,
    },
    /// The slot does not exist in this arena.
    OutOfBounds {
        /// The requested slot.
        index: usize,
        /// Number of slots in the arena.
        len: usize,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignHandle { expected, found } => write!(
                f,
                "handle from {found} used with {expected}; the owning arena was released or is a different unit"
            ),
            Self::OutOfBounds { index, len } => {
                write!(f, "handle index {index} out of bounds for arena of {len} values")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Single-owner storage that hands out [`Idx<T>`] handles.
pub struct IndexArena<T> {
    tag: ArenaTag,
    values: Vec<T>,
}

impl<T> IndexArena<T> {
    /// Creates an empty arena with a fresh tag.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty arena with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IndexArena {
            tag: ArenaTag::fresh(),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Returns this arena's tag.
    #[must_use]
    pub const fn tag(&self) -> ArenaTag {
        self.tag
    }

    /// Moves `value` into the arena.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` values.
    pub fn alloc(&mut self, value: T) -> Idx<T> {
        self.alloc_with(|_| value)
    }

    /// Allocates a value that needs to know its own handle, such as a node
    /// that registers itself as the owner of something else.
    pub fn alloc_with(&mut self, make: impl FnOnce(Idx<T>) -> T) -> Idx<T> {
        let idx = self.next_idx();
        let value = make(idx);
        self.values.push(value);
        idx
    }

    /// Returns the handle the next allocation will receive.
    #[must_use]
    pub fn next_idx(&self) -> Idx<T> {
        let index = match u32::try_from(self.values.len()) {
            Ok(index) if index != u32::MAX => index,
            _ => panic!("{}: index space exhausted", self.tag),
        };
        Idx {
            index,
            tag: self.tag,
            _marker: PhantomData,
        }
    }

    /// Returns true if `idx` was produced by this arena.
    #[must_use]
    pub fn owns(&self, idx: Idx<T>) -> bool {
        idx.tag == self.tag && idx.index() < self.values.len()
    }

    /// Checked lookup.
    pub fn try_get(&self, idx: Idx<T>) -> Result<&T, IndexError> {
        self.check(idx)?;
        Ok(&self.values[idx.index()])
    }

    /// Checked mutable lookup.
    pub fn try_get_mut(&mut self, idx: Idx<T>) -> Result<&mut T, IndexError> {
        self.check(idx)?;
        Ok(&mut self.values[idx.index()])
    }

    /// Resolves `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` belongs to another arena.
    #[must_use]
    pub fn get(&self, idx: Idx<T>) -> &T {
        match self.try_get(idx) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resolves `idx` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `idx` belongs to another arena.
    pub fn get_mut(&mut self, idx: Idx<T>) -> &mut T {
        match self.try_get_mut(idx) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Number of values in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over every value with its handle, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> + '_ {
        let tag = self.tag;
        self.values.iter().enumerate().map(move |(i, value)| {
            let idx = Idx {
                index: i as u32,
                tag,
                _marker: PhantomData,
            };
            (idx, value)
        })
    }

    /// Approximate heap footprint of the stored values in bytes.
    #[must_use]
    pub fn footprint(&self) -> usize {
        self.values.capacity() * size_of::<T>()
    }

    fn check(&self, idx: Idx<T>) -> Result<(), IndexError> {
        if idx.tag != self.tag {
            return Err(IndexError::ForeignHandle {
                expected: self.tag,
                found: idx.tag,
            });
        }
        if idx.index() >= self.values.len() {
            return Err(IndexError::OutOfBounds {
                index: idx.index(),
                len: self.values.len(),
            });
        }
        Ok(())
    }
}

impl<T> Default for IndexArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Idx<T>> for IndexArena<T> {
    type Output = T;

    fn index(&self, idx: Idx<T>) -> &T {
        self.get(idx)
    }
}

impl<T> IndexMut<Idx<T>> for IndexArena<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        self.get_mut(idx)
    }
}

impl<T> fmt::Debug for IndexArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexArena")
            .field("tag", &self.tag)
            .field("len", &self.values.len())
            .finish()
    }
}
