//! Bump-pointer arena for compiler data.
//!
//! [`LocalArena`] hands out raw, properly aligned storage from a list of
//! chunks. Nothing allocated from it is ever freed individually: every chunk
//! is returned to the system allocator when the arena is dropped, which is
//! the one and only release point for everything it produced.
//!
//! # Architecture
//!
//! - [`LocalArena`]: single-threaded arena, one per compilation unit
//! - `LocalChunk`: a fixed-size region with a non-atomic bump pointer
//!
//! Chunks double in size (up to 1 MiB) as the arena grows; an allocation
//! larger than that gets a dedicated chunk of exactly the needed size.
//!
//! # Examples
//!
//! ```
//! use vellum_mem::arena::LocalArena;
//!
//! let mut arena = LocalArena::new(8192);
//!
//! let value: *mut u32 = arena.alloc(42);
//! let text = arena.alloc_str("import");
//!
//! unsafe {
//!     assert_eq!(*value, 42);
//!     assert_eq!(std::slice::from_raw_parts(text, 6), b"import");
//! }
//!
//! // Every pointer above dangles once the arena is dropped.
//! drop(arena);
//! ```

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;

use vellum_log::debug;

/// Error type for arena allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaAllocError {
    /// The system allocator returned null.
    OutOfMemory {
        /// Size of the chunk that could not be allocated.
        size: usize,
    },
    /// The requested alignment is zero or not a power of two.
    InvalidAlignment {
        /// The requested alignment.
        align: usize,
    },
    /// `size + trailing` overflowed `usize`.
    SizeOverflow,
}

impl fmt::Display for ArenaAllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { size } => {
                write!(f, "arena allocation failed: out of memory ({size} bytes)")
            }
            Self::InvalidAlignment { align } => {
                write!(f, "arena allocation failed: invalid alignment {align}")
            }
            Self::SizeOverflow => write!(f, "arena allocation failed: size overflow"),
        }
    }
}

impl std::error::Error for ArenaAllocError {}

/// Default alignment for arena allocations (8 bytes).
const DEFAULT_ALIGNMENT: usize = 8;

/// Minimum chunk size (8 KiB).
const MIN_CHUNK_SIZE: usize = 8192;

/// Maximum size of a regular (doubling) chunk (1 MiB).
const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Chunk size tuned for one compilation unit's syntax tree.
pub const SYNTAX_CHUNK_SIZE: usize = 8192;

/// Arena allocation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStats {
    /// Bytes handed out, including trailing payloads but not padding.
    pub total_allocated: usize,
    /// Number of chunks in the arena.
    pub chunk_count: usize,
    /// Total capacity of all chunks in bytes.
    pub total_capacity: usize,
}

/// A region of memory with a bump pointer.
///
/// The region is owned by the chunk and released when the chunk is dropped.
/// Moving the `LocalChunk` value does not move the region, so pointers into
/// it stay valid as the chunk list grows.
struct LocalChunk {
    start: NonNull<u8>,
    /// Current bump pointer, kept as a raw pointer to preserve provenance.
    ptr: *mut u8,
    end: *mut u8,
    capacity: usize,
    align: usize,
}

impl LocalChunk {
    fn new(size: usize, align: usize) -> Result<Self, ArenaAllocError> {
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| ArenaAllocError::InvalidAlignment { align })?;

        // SAFETY: `size` is never zero (callers pass at least MIN_CHUNK_SIZE).
        let start = unsafe { alloc::alloc(layout) };
        let start = NonNull::new(start).ok_or(ArenaAllocError::OutOfMemory { size })?;

        Ok(LocalChunk {
            start,
            ptr: start.as_ptr(),
            end: start.as_ptr().wrapping_add(size),
            capacity: size,
            align,
        })
    }

    /// Bumps `size` bytes aligned to `align`, or returns `None` if the chunk
    /// is exhausted.
    #[inline(always)]
    fn alloc(&mut self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let current_addr = self.ptr.addr();

        let aligned_start = current_addr.checked_add(align - 1)? & !(align - 1);
        let new_addr = aligned_start.checked_add(size)?;

        if new_addr > self.end.addr() {
            return None;
        }

        // with_addr keeps the provenance of the chunk allocation; the new
        // address is within the same allocation (checked above).
        self.ptr = self.ptr.with_addr(new_addr);
        NonNull::new(self.ptr.with_addr(aligned_start))
    }
}

impl Drop for LocalChunk {
    fn drop(&mut self) {
        // SAFETY: same size/align pair the region was allocated with.
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.capacity, self.align);
            alloc::dealloc(self.start.as_ptr(), layout);
        }
    }
}

/// Single-threaded bump arena with bulk release.
///
/// `LocalArena` is neither `Send` nor `Sync`: every compilation unit owns
/// its own arena, and no storage crosses from one arena to another.
///
/// Values written with [`alloc`](Self::alloc) must be `Copy`: the arena never
/// runs destructors, so anything owning heap memory would leak.
pub struct LocalArena {
    chunks: Vec<LocalChunk>,
    /// Size of the last regular chunk, the base for doubling.
    next_chunk_size: usize,
    alignment: usize,
    total_allocated: usize,
}

impl LocalArena {
    /// Creates an arena whose first chunk holds at least `initial_size`
    /// bytes (rounded up to a power of two, minimum 8 KiB).
    ///
    /// # Panics
    ///
    /// Panics if the initial chunk cannot be allocated.
    #[must_use]
    pub fn new(initial_size: usize) -> Self {
        let size = initial_size.max(MIN_CHUNK_SIZE).next_power_of_two();

        let first_chunk = match LocalChunk::new(size, DEFAULT_ALIGNMENT) {
            Ok(chunk) => chunk,
            Err(err) => panic!("{err}"),
        };

        LocalArena {
            chunks: vec![first_chunk],
            next_chunk_size: size,
            alignment: DEFAULT_ALIGNMENT,
            total_allocated: 0,
        }
    }

    /// Moves `value` into the arena and returns a pointer to it.
    ///
    /// The pointer is aligned for `T` and stays valid until the arena is
    /// dropped.
    #[inline(always)]
    pub fn alloc<T: Copy>(&mut self, value: T) -> *mut T {
        let ptr = self
            .alloc_layout(size_of::<T>(), align_of::<T>(), 0)
            .cast::<T>();

        // SAFETY: the storage is fresh, sized and aligned for T.
        unsafe { ptr.as_ptr().write(value) };
        ptr.as_ptr()
    }

    /// Moves `value` into the arena followed by `trailing` elements stored
    /// contiguously after it, in one allocation.
    ///
    /// Returns the header pointer; the trailing elements start at the first
    /// `E`-aligned address at or after `header + size_of::<T>()`, which is
    /// what [`trailing_ptr`] computes.
    pub fn alloc_with_trailing<T: Copy, E: Copy>(&mut self, value: T, trailing: &[E]) -> *mut T {
        let offset = trailing_offset::<T, E>();
        let trailing_bytes = size_of_val(trailing);
        let align = align_of::<T>().max(align_of::<E>());

        let base = self.alloc_layout(offset, align, trailing_bytes);

        // SAFETY: `base` holds `offset + trailing_bytes` bytes aligned for
        // both T and E; the regions written do not overlap `trailing`.
        unsafe {
            base.cast::<T>().as_ptr().write(value);
            let elems = base.as_ptr().add(offset).cast::<E>();
            std::ptr::copy_nonoverlapping(trailing.as_ptr(), elems, trailing.len());
        }

        base.cast::<T>().as_ptr()
    }

    /// Returns `size + trailing` bytes of uninitialized storage aligned to
    /// `align`.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two, if the size overflows, or if
    /// the system allocator fails. These are programming errors, not
    /// recoverable conditions; [`try_alloc_layout`](Self::try_alloc_layout)
    /// reports them instead.
    pub fn alloc_layout(&mut self, size: usize, align: usize, trailing: usize) -> NonNull<u8> {
        match self.try_alloc_layout(size, align, trailing) {
            Ok(ptr) => ptr,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`alloc_layout`](Self::alloc_layout).
    pub fn try_alloc_layout(
        &mut self,
        size: usize,
        align: usize,
        trailing: usize,
    ) -> Result<NonNull<u8>, ArenaAllocError> {
        if align == 0 || !align.is_power_of_two() {
            return Err(ArenaAllocError::InvalidAlignment { align });
        }
        let total = size
            .checked_add(trailing)
            .ok_or(ArenaAllocError::SizeOverflow)?;
        let align = align.max(self.alignment);

        if let Some(chunk) = self.chunks.last_mut()
            && let Some(ptr) = chunk.alloc(total, align)
        {
            self.total_allocated += total;
            return Ok(ptr);
        }

        self.grow(total, align)?;

        let chunk = self
            .chunks
            .last_mut()
            .ok_or(ArenaAllocError::OutOfMemory { size: total })?;
        let ptr = chunk
            .alloc(total, align)
            .ok_or(ArenaAllocError::OutOfMemory { size: total })?;
        self.total_allocated += total;
        Ok(ptr)
    }

    /// Copies `s` into the arena and returns a pointer to its first byte.
    ///
    /// The bytes are valid UTF-8 and `s.len()` long; no terminator is
    /// written.
    #[inline(always)]
    pub fn alloc_str(&mut self, s: &str) -> *const u8 {
        let ptr = self.alloc_layout(s.len().max(1), 1, 0);

        // SAFETY: fresh storage of at least s.len() bytes, no overlap.
        unsafe {
            std::ptr::copy_nonoverlapping(s.as_ptr(), ptr.as_ptr(), s.len());
        }

        ptr.as_ptr()
    }

    /// Returns allocation statistics for this arena.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            total_allocated: self.total_allocated,
            chunk_count: self.chunks.len(),
            total_capacity: self.chunks.iter().map(|c| c.capacity).sum(),
        }
    }

    #[cold]
    fn grow(&mut self, min_size: usize, align: usize) -> Result<(), ArenaAllocError> {
        // Worst-case padding is align - 1 bytes.
        let needed = min_size
            .checked_add(align - 1)
            .ok_or(ArenaAllocError::SizeOverflow)?;

        let doubled = (self.next_chunk_size * 2).min(MAX_CHUNK_SIZE);
        let size = if needed > doubled {
            needed.next_power_of_two().max(MIN_CHUNK_SIZE)
        } else {
            self.next_chunk_size = doubled;
            doubled
        };

        debug!(
            "arena growing: chunk #{} of {} bytes ({} bytes requested)",
            self.chunks.len() + 1,
            size,
            min_size
        );

        let chunk = LocalChunk::new(size, DEFAULT_ALIGNMENT.max(align))?;
        self.chunks.push(chunk);
        Ok(())
    }
}

impl Default for LocalArena {
    fn default() -> Self {
        Self::new(SYNTAX_CHUNK_SIZE)
    }
}

impl fmt::Debug for LocalArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalArena")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Byte offset of the trailing `E` elements after a `T` header.
#[must_use]
pub const fn trailing_offset<T, E>() -> usize {
    let align = align_of::<E>();
    (size_of::<T>() + align - 1) & !(align - 1)
}

/// Returns a pointer to the trailing elements of a header allocated with
/// [`LocalArena::alloc_with_trailing`].
///
/// # Safety
///
/// `header` must come from `alloc_with_trailing::<T, E>` on an arena that is
/// still alive, and at most the number of elements written may be read.
#[must_use]
pub unsafe fn trailing_ptr<T, E>(header: *const T) -> *const E {
    // SAFETY: upheld by the caller; the offset stays inside the allocation.
    unsafe { header.cast::<u8>().add(trailing_offset::<T, E>()).cast::<E>() }
}
