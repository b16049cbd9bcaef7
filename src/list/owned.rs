//! Construction, copy-on-write mutation, combination and introspection of
//! [`MulticastList`].
//!
//! Every structural mutation goes through the internal entry buffer, which
//! moves a possibly shared list onto a buffer of its own before writing.
//! Replacing or clearing the entries never copies: the old buffer is simply
//! released.

use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};

use multicast_internals::{BufferWrite, RawEntryBuffer};
use triomphe::Arc;

use crate::{
    list::Iter,
    markers::{Permissive, PolicyMarker, Strict},
};

/// An ordered list of entries that can be invoked as a single callable.
///
/// A [`MulticastList`] is a value type: [`Clone`] is O(1) and shares the
/// entry buffer between the two values. Sharing is recorded with a
/// conservative "possibly shared" flag on both values, and the first
/// structural mutation of a flagged list moves it onto a buffer of its own
/// before writing. A mutation of one copy is therefore never visible through
/// another copy.
///
/// The `Policy` parameter selects what invoking an empty list does. See
/// [`markers`](crate::markers) and [`invoke`](Self::invoke).
///
/// # Examples
///
/// ```
/// use multicast::prelude::*;
///
/// fn first(log: &mut Vec<u8>) -> Result<usize, ()> {
///     log.push(1);
///     Ok(log.len())
/// }
///
/// fn second(log: &mut Vec<u8>) -> Result<usize, ()> {
///     log.push(2);
///     Ok(log.len())
/// }
///
/// let mut original: MulticastList<Function<Vec<u8>, usize, ()>> =
///     MulticastList::from_entry(Function::new(first));
///
/// // The copy shares the buffer until one of them is mutated.
/// let mut copy = original.clone();
/// assert!(copy.shares_buffer_with(&original));
///
/// copy.push(Function::new(second));
/// assert!(!copy.shares_buffer_with(&original));
/// assert_eq!(original.len(), 1);
/// assert_eq!(copy.len(), 2);
///
/// let mut log = Vec::new();
/// assert_eq!(copy.invoke(&mut log), Ok(2));
/// assert_eq!(log, [1, 2]);
/// ```
pub struct MulticastList<Entry, Policy = Strict>
where
    Policy: PolicyMarker,
{
    raw: RawEntryBuffer<Entry>,
    _policy: PhantomData<Policy>,
}

/// A [`MulticastList`] that panics when invoked while empty.
pub type StrictList<E> = MulticastList<E, Strict>;

/// A [`MulticastList`] that returns a default result when invoked while
/// empty.
pub type PermissiveList<E> = MulticastList<E, Permissive>;

impl<E, P> MulticastList<E, P>
where
    P: PolicyMarker,
{
    #[inline]
    pub(crate) fn from_raw(raw: RawEntryBuffer<E>) -> Self {
        Self {
            raw,
            _policy: PhantomData,
        }
    }

    /// Creates an empty list.
    ///
    /// This method is equivalent to calling [`Default::default()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::{StrictList, callable::Function};
    ///
    /// let list: StrictList<Function<(), (), ()>> = StrictList::new();
    /// assert!(list.is_empty());
    /// assert!(!list.has_entries());
    /// ```
    pub fn new() -> Self {
        Self::from_raw(RawEntryBuffer::new())
    }

    /// Creates a list holding a single entry.
    pub fn from_entry(entry: E) -> Self {
        let mut entries = Vec::with_capacity(1);
        entries.push(entry);
        Self::from_raw(RawEntryBuffer::from_vec(entries))
    }

    /// Creates a list from a sequence of entries, keeping their order.
    ///
    /// The list owns the collected entries exclusively.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self::from_raw(RawEntryBuffer::from_vec(entries.into_iter().collect()))
    }

    /// Creates a list on top of a buffer the caller may keep references to.
    ///
    /// The list starts out marked as possibly shared, so mutating it never
    /// writes through to `buffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::{PermissiveList, callable::Function};
    /// use triomphe::Arc;
    ///
    /// fn noop(_: &mut ()) -> Result<(), ()> {
    ///     Ok(())
    /// }
    ///
    /// let shared = Arc::new(vec![Function::new(noop)]);
    /// let mut list: PermissiveList<_> = PermissiveList::from_shared(Arc::clone(&shared));
    /// assert!(list.is_possibly_shared());
    ///
    /// list.clear();
    /// assert_eq!(shared.len(), 1);
    /// ```
    pub fn from_shared(buffer: Arc<Vec<E>>) -> Self {
        Self::from_raw(RawEntryBuffer::from_shared(buffer))
    }

    /// Returns a handle to the entry buffer, marking this list as possibly
    /// shared.
    pub fn to_shared(&self) -> Arc<Vec<E>> {
        self.raw.shared_buffer()
    }

    /// Returns the entries in call order.
    #[inline]
    pub fn entries(&self) -> &[E] {
        self.raw.as_slice()
    }

    /// Returns an iterator over the entries in call order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, E> {
        self.entries().iter()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the list has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if the list has at least one entry.
    ///
    /// For a [`Strict`] list, this tells whether [`invoke`](Self::invoke) is
    /// allowed.
    #[inline]
    pub fn has_entries(&self) -> bool {
        !self.is_empty()
    }

    /// Returns `true` if the entry buffer may be shared with another list.
    ///
    /// This is conservative: the other lists may already be gone.
    #[inline]
    pub fn is_possibly_shared(&self) -> bool {
        self.raw.is_possibly_shared()
    }

    /// Returns `true` if both lists currently use the same entry buffer.
    #[inline]
    pub fn shares_buffer_with<Q: PolicyMarker>(&self, other: &MulticastList<E, Q>) -> bool {
        self.raw.ptr_eq(&other.raw)
    }

    /// Replaces all entries.
    ///
    /// The old buffer is released, not modified, so other lists sharing it
    /// are unaffected and no duplication is needed.
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
    {
        self.raw.replace(entries.into_iter().collect());
    }

    /// Replaces all entries with a single one.
    pub fn replace_with_entry(&mut self, entry: E) {
        let mut entries = Vec::with_capacity(1);
        entries.push(entry);
        self.raw.replace(entries);
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.raw.replace(Vec::new());
    }

    /// Changes the policy marker.
    ///
    /// The entry buffer and its sharing state are kept as they are.
    pub fn into_policy<Q: PolicyMarker>(self) -> MulticastList<E, Q> {
        MulticastList::from_raw(self.raw)
    }

    /// Emits a trace event when a write had to move off a shared buffer.
    fn record_write(&self, write: BufferWrite) {
        if write == BufferWrite::Duplicated {
            let len = self.raw.len();
            trace_event!(trace, "duplicated a shared entry buffer", len);
        }
    }
}

impl<E, P> MulticastList<E, P>
where
    E: Clone,
    P: PolicyMarker,
{
    /// Appends an entry at the end of the call order.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::{StrictList, callable::Function};
    ///
    /// fn noop(_: &mut ()) -> Result<(), ()> {
    ///     Ok(())
    /// }
    ///
    /// let mut list: StrictList<_> = StrictList::new();
    /// list.push(Function::new(noop));
    /// list.push(Function::new(noop));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn push(&mut self, entry: E) {
        let write = self.raw.append(core::iter::once(entry));
        self.record_write(write);
    }

    /// Appends several entries at the end of the call order, keeping their
    /// order.
    ///
    /// If the buffer is shared, the new buffer is allocated with room for the
    /// appended entries up front.
    pub fn append<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
    {
        let write = self.raw.append(entries);
        self.record_write(write);
    }

    /// Appends the entries of `other` at the end of the call order.
    ///
    /// `other` is not modified.
    pub fn append_list<Q: PolicyMarker>(&mut self, other: &MulticastList<E, Q>) {
        let write = self.raw.append_slice(other.entries());
        self.record_write(write);
    }

    /// Returns a new list with the entries of `self` followed by the entries of
    /// `other`.
    ///
    /// Neither input is modified: the result always gets a buffer of its own,
    /// and the ownership flags of the inputs are left as they were.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::prelude::*;
    ///
    /// fn push_a(log: &mut String) -> Result<(), ()> {
    ///     log.push('a');
    ///     Ok(())
    /// }
    ///
    /// fn push_b(log: &mut String) -> Result<(), ()> {
    ///     log.push('b');
    ///     Ok(())
    /// }
    ///
    /// let a: MulticastList<Function<String, (), ()>> =
    ///     MulticastList::from_entry(Function::new(push_a));
    /// let b: MulticastList<Function<String, (), ()>> =
    ///     MulticastList::from_entry(Function::new(push_b));
    ///
    /// let both = a.combine(&b);
    /// assert_eq!(both.entries(), &[Function::new(push_a), Function::new(push_b)]);
    /// assert_eq!(a.len(), 1);
    /// assert_eq!(b.len(), 1);
    /// assert!(!a.is_possibly_shared());
    ///
    /// let mut log = String::new();
    /// both.invoke(&mut log).unwrap();
    /// assert_eq!(log, "ab");
    /// ```
    pub fn combine<Q: PolicyMarker>(&self, other: &MulticastList<E, Q>) -> Self {
        let mut raw = self.raw.duplicate(other.len());
        let write = raw.append_slice(other.entries());
        debug_assert_ne!(write, BufferWrite::Duplicated);
        Self::from_raw(raw)
    }
}

impl<E, P> MulticastList<E, P>
where
    E: PartialEq,
    P: PolicyMarker,
{
    /// Returns `true` if the list holds an entry equal to `entry`.
    pub fn contains(&self, entry: &E) -> bool {
        self.entries().contains(entry)
    }

    /// Removes every entry equal to `entry` without checking whether the
    /// buffer is shared.
    ///
    /// Returns the number of removed entries.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. No other list (and no handle returned by
    ///    [`to_shared`](Self::to_shared) or passed to
    ///    [`from_shared`](Self::from_shared)) references the entry buffer of
    ///    this list.
    ///
    /// A list that was never cloned and never handed out or adopted a shared
    /// buffer satisfies this, as does a list whose clones have all been
    /// dropped.
    pub unsafe fn remove_unchecked(&mut self, entry: &E) -> usize {
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.raw.remove_all_unchecked(entry) }
    }
}

impl<E, P> MulticastList<E, P>
where
    E: Clone + PartialEq,
    P: PolicyMarker,
{
    /// Removes every entry equal to `entry`, keeping the order of the rest.
    ///
    /// Returns the number of removed entries. Removing an entry that is not
    /// present is a no-op and does not detach a shared buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::{StrictList, callable::Function};
    ///
    /// fn a(_: &mut ()) -> Result<(), ()> {
    ///     Ok(())
    /// }
    ///
    /// fn b(_: &mut ()) -> Result<(), ()> {
    ///     Err(())
    /// }
    ///
    /// let mut list: StrictList<Function<(), (), ()>> =
    ///     [Function::new(a), Function::new(b), Function::new(a)].into_iter().collect();
    /// assert_eq!(list.remove(&Function::new(a)), 2);
    /// assert_eq!(list.entries(), &[Function::new(b)]);
    /// assert_eq!(list.remove(&Function::new(a)), 0);
    /// ```
    pub fn remove(&mut self, entry: &E) -> usize {
        let (removed, write) = self.raw.remove_all(entry);
        self.record_write(write);
        removed
    }
}

impl<E, P> Clone for MulticastList<E, P>
where
    P: PolicyMarker,
{
    /// Returns a copy sharing the same entry buffer.
    ///
    /// Both `self` and the copy are marked as possibly shared.
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.share())
    }
}

impl<E, P> Default for MulticastList<E, P>
where
    P: PolicyMarker,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> From<Vec<E>> for MulticastList<E, P>
where
    P: PolicyMarker,
{
    fn from(entries: Vec<E>) -> Self {
        Self::from_raw(RawEntryBuffer::from_vec(entries))
    }
}

impl<E, P, Q> PartialEq<MulticastList<E, Q>> for MulticastList<E, P>
where
    E: PartialEq,
    P: PolicyMarker,
    Q: PolicyMarker,
{
    fn eq(&self, other: &MulticastList<E, Q>) -> bool {
        self.entries() == other.entries()
    }
}

impl<E, P> Eq for MulticastList<E, P>
where
    E: Eq,
    P: PolicyMarker,
{
}

impl<E, P> fmt::Debug for MulticastList<E, P>
where
    E: fmt::Debug,
    P: PolicyMarker,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticastList")
            .field("policy", &P::NAME)
            .field("entries", &self.entries())
            .field("possibly_shared", &self.is_possibly_shared())
            .finish()
    }
}
