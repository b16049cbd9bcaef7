//! Reference-counted entry storage with copy-on-write mutation.
//!
//! This module encapsulates the `buffer` and `ownership` fields of
//! [`RawEntryBuffer`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the central invariant: **if the ownership
//! flag is clear, the strong count of `buffer` is exactly 1**.
//!
//! # Invariant Maintenance
//!
//! Every way of obtaining a second reference to the buffer goes through
//! [`RawEntryBuffer::share`] or [`RawEntryBuffer::shared_buffer`], both of
//! which mark the flag of the source. Buffers adopted through
//! [`RawEntryBuffer::from_shared`] start out marked. The flag is only cleared
//! after installing a freshly allocated buffer or after observing a strong
//! count of one.
//!
//! # Allocation Strategy
//!
//! When an append has to duplicate a shared buffer, the duplicate is allocated
//! with room for the appended entries, so the duplication doubles as the growth
//! and the entries are copied exactly once. Removal from a shared buffer copies
//! only the surviving entries into the new allocation.

use alloc::vec::Vec;

use triomphe::Arc;

use crate::ownership::OwnershipTracker;

/// Describes how a structural mutation touched the underlying buffer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum BufferWrite {
    /// The mutation turned out to be a no-op and the buffer was not touched.
    Untouched,
    /// The existing buffer was exclusively owned and was written in place.
    InPlace,
    /// The existing buffer was (possibly) shared, so a new buffer was
    /// allocated and the holder now owns it exclusively.
    Duplicated,
}

/// An ordered entry buffer that may be shared between several list values.
///
/// Cloning is done through [`share`](Self::share), which is O(1) and marks both
/// the source and the new value as possibly shared. Structural mutations
/// establish exclusive ownership first.
pub struct RawEntryBuffer<E> {
    /// The reference-counted entries
    ///
    /// # Invariant
    ///
    /// If `ownership` is clear, the strong count of this `Arc` is `1`.
    buffer: Arc<Vec<E>>,

    /// Whether `buffer` may be referenced by another value
    ownership: OwnershipTracker,
}

impl<E> RawEntryBuffer<E> {
    /// Creates an empty, exclusively owned buffer.
    #[inline]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Takes ownership of `entries` as a new, exclusively owned buffer.
    #[inline]
    pub fn from_vec(entries: Vec<E>) -> Self {
        Self {
            buffer: Arc::new(entries),
            ownership: OwnershipTracker::exclusive(),
        }
    }

    /// Adopts a buffer the caller may still hold references to.
    ///
    /// The result is marked as possibly shared, so the first structural
    /// mutation will not write through to `buffer`.
    #[inline]
    pub fn from_shared(buffer: Arc<Vec<E>>) -> Self {
        Self {
            buffer,
            ownership: OwnershipTracker::possibly_shared(),
        }
    }

    /// Returns the entries in call order.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.buffer
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the buffer holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns a second handle to the same buffer.
    ///
    /// Both `self` and the returned value are marked as possibly shared.
    #[inline]
    pub fn share(&self) -> Self {
        self.ownership.mark_possibly_shared();
        Self {
            buffer: Arc::clone(&self.buffer),
            ownership: OwnershipTracker::possibly_shared(),
        }
    }

    /// Hands out a reference to the underlying buffer, marking `self` as
    /// possibly shared.
    #[inline]
    pub fn shared_buffer(&self) -> Arc<Vec<E>> {
        self.ownership.mark_possibly_shared();
        Arc::clone(&self.buffer)
    }

    /// Returns `true` if the buffer may be shared with another value.
    #[inline]
    pub fn is_possibly_shared(&self) -> bool {
        self.ownership.is_possibly_shared()
    }

    /// Returns `true` if `self` and `other` reference the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Returns the number of live handles to the underlying buffer.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::count(&self.buffer)
    }

    /// Installs `entries` as a new, exclusively owned buffer.
    ///
    /// The previous buffer is released without being inspected, so no
    /// duplication is ever needed.
    #[inline]
    pub fn replace(&mut self, entries: Vec<E>) {
        self.buffer = Arc::new(entries);
        self.ownership.clear();
    }
}

impl<E: Clone> RawEntryBuffer<E> {
    /// Copies the entries into a new, exclusively owned buffer with room for
    /// `additional` more entries.
    ///
    /// `self` is left untouched, including its ownership flag.
    pub fn duplicate(&self, additional: usize) -> Self {
        let mut entries = Vec::with_capacity(self.buffer.len() + additional);
        entries.extend_from_slice(&self.buffer);
        Self::from_vec(entries)
    }

    /// Appends `entries` after the existing ones.
    ///
    /// If the buffer is possibly shared and another handle to it is still
    /// alive, the buffer is duplicated into an allocation that already fits the
    /// new entries (as far as the iterator's size hint tells). If the flag is
    /// set but this is in fact the last handle, the flag is cleared and the
    /// append happens in place. Appending nothing never touches the buffer.
    pub fn append<I>(&mut self, entries: I) -> BufferWrite
    where
        I: IntoIterator<Item = E>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return BufferWrite::Untouched;
        }

        let write = if !self.ownership.is_possibly_shared() {
            BufferWrite::InPlace
        } else if Arc::is_unique(&self.buffer) {
            self.ownership.clear();
            BufferWrite::InPlace
        } else {
            let (additional, _) = entries.size_hint();
            *self = self.duplicate(additional);
            BufferWrite::Duplicated
        };

        self.exclusive_mut().extend(entries);
        write
    }

    /// Appends clones of `entries` after the existing ones.
    ///
    /// See [`append`](Self::append) for the ownership behavior.
    #[inline]
    pub fn append_slice(&mut self, entries: &[E]) -> BufferWrite {
        self.append(entries.iter().cloned())
    }

    /// Returns the inner vector for writing.
    ///
    /// Must only be called once the ownership flag is clear, at which point
    /// the strong count is 1 and [`Arc::make_mut`] never clones.
    fn exclusive_mut(&mut self) -> &mut Vec<E> {
        debug_assert!(!self.ownership.is_possibly_shared());
        debug_assert_eq!(Arc::count(&self.buffer), 1);
        Arc::make_mut(&mut self.buffer)
    }
}

impl<E: Clone + PartialEq> RawEntryBuffer<E> {
    /// Removes every entry equal to `entry`, keeping the order of the rest.
    ///
    /// Returns the number of removed entries together with how the buffer was
    /// written. If nothing matches, the buffer is left untouched even when it
    /// is shared. Otherwise a possibly shared buffer is always duplicated
    /// (only the survivors are copied); a reference count of one is not taken
    /// as proof of exclusivity here.
    pub fn remove_all(&mut self, entry: &E) -> (usize, BufferWrite) {
        let matching = self.buffer.iter().filter(|e| *e == entry).count();
        if matching == 0 {
            return (0, BufferWrite::Untouched);
        }

        if self.ownership.is_possibly_shared() {
            let survivors: Vec<E> = self
                .buffer
                .iter()
                .filter(|e| *e != entry)
                .cloned()
                .collect();
            self.replace(survivors);
            return (matching, BufferWrite::Duplicated);
        }

        self.exclusive_mut().retain(|e| e != entry);
        (matching, BufferWrite::InPlace)
    }
}

impl<E: PartialEq> RawEntryBuffer<E> {
    /// Removes every entry equal to `entry` in place, without consulting the
    /// ownership flag, and clears the flag afterwards.
    ///
    /// Returns the number of removed entries.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. No other handle to the underlying buffer exists. Specifically the
    ///    strong count of the inner [`triomphe::Arc`] must be `1`.
    pub unsafe fn remove_all_unchecked(&mut self, entry: &E) -> usize {
        debug_assert_eq!(
            Arc::count(&self.buffer),
            1,
            "remove_all_unchecked called on a shared entry buffer"
        );

        // SAFETY:
        // 1. The caller guarantees the strong count is 1, in which case
        //    `Arc::get_mut` always returns `Some`.
        let entries = unsafe { Arc::get_mut(&mut self.buffer).unwrap_unchecked() };
        let before = entries.len();
        entries.retain(|e| e != entry);
        self.ownership.clear();
        before - entries.len()
    }
}

impl<E> Default for RawEntryBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for RawEntryBuffer<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawEntryBuffer")
            .field("entries", &self.as_slice())
            .field("possibly_shared", &self.is_possibly_shared())
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
