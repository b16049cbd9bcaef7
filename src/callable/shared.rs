use core::fmt;

use triomphe::Arc;
use unsize::{CoerceUnsize, Coercion};

use crate::callable::Callable;

/// An entry calling an arbitrary closure through a shared pointer.
///
/// Closures cannot be compared, so equality is identity: a [`SharedFn`] is
/// only equal to its own clones. Keep a clone around if the entry needs to be
/// removed from a list later.
///
/// # Examples
///
/// ```
/// use multicast::{Callable, callable::SharedFn};
///
/// let offset = 10;
/// let add_offset: SharedFn<i64, i64, ()> = SharedFn::new(move |value: &mut i64| {
///     *value += offset;
///     Ok(*value)
/// });
///
/// let mut value = 1;
/// assert_eq!(add_offset.call(&mut value), Ok(11));
///
/// let same = add_offset.clone();
/// assert_eq!(same, add_offset);
///
/// let lookalike: SharedFn<i64, i64, ()> = SharedFn::new(move |value: &mut i64| {
///     *value += offset;
///     Ok(*value)
/// });
/// assert_ne!(lookalike, add_offset);
/// ```
pub struct SharedFn<Args: ?Sized + 'static, Output: 'static, Error: 'static> {
    func: Arc<dyn Fn(&mut Args) -> Result<Output, Error>>,
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> SharedFn<Args, Output, Error> {
    /// Moves `func` into a new shared allocation.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut Args) -> Result<Output, Error> + 'static,
    {
        // SAFETY:
        // 1. The coercion function returns its argument unchanged, only
        //    unsizing the pointer.
        let coercion = unsafe {
            Coercion::new(|ptr: *const F| -> *const dyn Fn(&mut Args) -> Result<Output, Error> {
                ptr
            })
        };
        Self {
            func: Arc::new(func).unsize(coercion),
        }
    }

    /// Returns `true` if both handles point to the same closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> Callable<Args>
    for SharedFn<Args, Output, Error>
{
    type Output = Output;
    type Error = Error;

    #[inline]
    fn call(&self, args: &mut Args) -> Result<Output, Error> {
        (self.func)(args)
    }
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> Clone
    for SharedFn<Args, Output, Error>
{
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> PartialEq
    for SharedFn<Args, Output, Error>
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> Eq
    for SharedFn<Args, Output, Error>
{
}

impl<Args: ?Sized + 'static, Output: 'static, Error: 'static> fmt::Debug
    for SharedFn<Args, Output, Error>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedFn")
            .field(&core::ptr::from_ref(&*self.func).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    #[test]
    fn test_shared_fn_clone_not_copy() {
        static_assertions::assert_impl_all!(SharedFn<Vec<u8>, (), ()>: Clone);
        static_assertions::assert_not_impl_any!(SharedFn<Vec<u8>, (), ()>: Copy, Send, Sync);
    }

    #[test]
    fn test_shared_fn_identity() {
        let first: SharedFn<Vec<u8>, (), ()> = SharedFn::new(|log: &mut Vec<u8>| {
            log.push(1);
            Ok(())
        });
        let second: SharedFn<Vec<u8>, (), ()> = SharedFn::new(|log: &mut Vec<u8>| {
            log.push(1);
            Ok(())
        });

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_shared_fn_captures() {
        let tag = 7u8;
        let entry: SharedFn<Vec<u8>, usize, ()> = SharedFn::new(move |log: &mut Vec<u8>| {
            log.push(tag);
            Ok(log.len())
        });

        let mut log = Vec::new();
        assert_eq!(entry.call(&mut log), Ok(1));
        assert_eq!(entry.call(&mut log), Ok(2));
        assert_eq!(log, vec![7, 7]);
    }
}
