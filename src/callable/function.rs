use core::fmt;

use crate::callable::Callable;

/// An entry calling a plain function pointer.
///
/// Two [`Function`]s are equal when they point to the same function.
///
/// # Examples
///
/// ```
/// use multicast::{Callable, callable::Function};
///
/// fn bump(counter: &mut u32) -> Result<u32, ()> {
///     *counter += 1;
///     Ok(*counter)
/// }
///
/// let entry = Function::new(bump);
/// let mut counter = 0;
/// assert_eq!(entry.call(&mut counter), Ok(1));
/// assert_eq!(entry, Function::new(bump));
/// ```
pub struct Function<Args: ?Sized, Output, Error> {
    func: fn(&mut Args) -> Result<Output, Error>,
}

impl<Args: ?Sized, Output, Error> Function<Args, Output, Error> {
    /// Wraps `func` as an entry.
    #[inline]
    pub const fn new(func: fn(&mut Args) -> Result<Output, Error>) -> Self {
        Self { func }
    }

    /// Returns the wrapped function pointer.
    #[inline]
    pub const fn func(&self) -> fn(&mut Args) -> Result<Output, Error> {
        self.func
    }
}

impl<Args: ?Sized, Output, Error> Callable<Args> for Function<Args, Output, Error> {
    type Output = Output;
    type Error = Error;

    #[inline]
    fn call(&self, args: &mut Args) -> Result<Output, Error> {
        (self.func)(args)
    }
}

impl<Args: ?Sized, Output, Error> Clone for Function<Args, Output, Error> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args: ?Sized, Output, Error> Copy for Function<Args, Output, Error> {}

impl<Args: ?Sized, Output, Error> PartialEq for Function<Args, Output, Error> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::fn_addr_eq(self.func, other.func)
    }
}

impl<Args: ?Sized, Output, Error> Eq for Function<Args, Output, Error> {}

impl<Args: ?Sized, Output, Error> fmt::Debug for Function<Args, Output, Error> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function")
            .field(&(self.func as *const ()))
            .finish()
    }
}

/// An entry calling a function pointer bound to a target value.
///
/// The target is the captured state of the entry: it is cloned together with
/// the entry, and two [`Method`]s are equal when they call the same function
/// on equal targets. Use a cheaply clonable target (a reference, an id, an
/// `Arc`) when the state is large.
///
/// # Examples
///
/// ```
/// use multicast::{Callable, callable::Method};
///
/// fn push(token: &&'static str, log: &mut Vec<&'static str>) -> Result<usize, ()> {
///     log.push(*token);
///     Ok(log.len())
/// }
///
/// let first = Method::new("1", push);
/// let mut log = Vec::new();
/// assert_eq!(first.call(&mut log), Ok(1));
/// assert_eq!(first, Method::new("1", push));
/// assert_ne!(first, Method::new("2", push));
/// ```
pub struct Method<Target, Args: ?Sized, Output, Error> {
    target: Target,
    func: fn(&Target, &mut Args) -> Result<Output, Error>,
}

impl<Target, Args: ?Sized, Output, Error> Method<Target, Args, Output, Error> {
    /// Binds `func` to `target`.
    #[inline]
    pub const fn new(
        target: Target,
        func: fn(&Target, &mut Args) -> Result<Output, Error>,
    ) -> Self {
        Self { target, func }
    }

    /// Returns the bound target.
    #[inline]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the wrapped function pointer.
    #[inline]
    pub const fn func(&self) -> fn(&Target, &mut Args) -> Result<Output, Error> {
        self.func
    }
}

impl<Target, Args: ?Sized, Output, Error> Callable<Args> for Method<Target, Args, Output, Error>
where
    Target: Clone + PartialEq,
{
    type Output = Output;
    type Error = Error;

    #[inline]
    fn call(&self, args: &mut Args) -> Result<Output, Error> {
        (self.func)(&self.target, args)
    }
}

impl<Target: Clone, Args: ?Sized, Output, Error> Clone for Method<Target, Args, Output, Error> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            func: self.func,
        }
    }
}

impl<Target: Copy, Args: ?Sized, Output, Error> Copy for Method<Target, Args, Output, Error> {}

impl<Target: PartialEq, Args: ?Sized, Output, Error> PartialEq
    for Method<Target, Args, Output, Error>
{
    fn eq(&self, other: &Self) -> bool {
        core::ptr::fn_addr_eq(self.func, other.func) && self.target == other.target
    }
}

impl<Target: Eq, Args: ?Sized, Output, Error> Eq for Method<Target, Args, Output, Error> {}

impl<Target: fmt::Debug, Args: ?Sized, Output, Error> fmt::Debug
    for Method<Target, Args, Output, Error>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("target", &self.target)
            .field("func", &(self.func as *const ()))
            .finish()
    }
}
