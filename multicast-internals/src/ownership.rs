//! The "possibly shared" flag kept next to every entry buffer.
//!
//! The flag is deliberately conservative: a set flag only means that some other
//! list value *may* reference the same buffer. A cleared flag is a promise that
//! the holder has exclusive ownership.

use core::cell::Cell;

/// Records whether an entry buffer may be referenced by more than one list.
///
/// Marking happens through a shared reference, because cloning a list only
/// has `&self` access to the source but still has to taint it. The use of
/// [`Cell`] makes the tracker (and everything embedding it) `!Sync`.
///
/// # Examples
///
/// ```
/// use multicast_internals::OwnershipTracker;
///
/// let tracker = OwnershipTracker::exclusive();
/// assert!(!tracker.is_possibly_shared());
///
/// tracker.mark_possibly_shared();
/// assert!(tracker.is_possibly_shared());
///
/// tracker.clear();
/// assert!(!tracker.is_possibly_shared());
/// ```
#[derive(Default)]
pub struct OwnershipTracker {
    /// `true` when the buffer may be shared with another list value
    possibly_shared: Cell<bool>,
}

impl OwnershipTracker {
    /// Creates a tracker for a buffer that nobody else references.
    #[inline]
    pub const fn exclusive() -> Self {
        Self {
            possibly_shared: Cell::new(false),
        }
    }

    /// Creates a tracker for a buffer that may already be referenced
    /// elsewhere.
    #[inline]
    pub const fn possibly_shared() -> Self {
        Self {
            possibly_shared: Cell::new(true),
        }
    }

    /// Marks the buffer as possibly shared.
    #[inline]
    pub fn mark_possibly_shared(&self) {
        self.possibly_shared.set(true);
    }

    /// Returns `true` if the buffer may be shared with another list value.
    #[inline]
    pub fn is_possibly_shared(&self) -> bool {
        self.possibly_shared.get()
    }

    /// Records that the holder has established exclusive ownership.
    #[inline]
    pub fn clear(&self) {
        self.possibly_shared.set(false);
    }
}

impl core::fmt::Debug for OwnershipTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OwnershipTracker")
            .field("possibly_shared", &self.is_possibly_shared())
            .finish()
    }
}
