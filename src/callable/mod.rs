//! The entry side of a multicast list.
//!
//! Anything stored in a [`MulticastList`](crate::MulticastList) implements
//! [`Callable`]: it can be invoked with the list's argument binding, it can be
//! cloned cheaply (lists store entries by value), and it can be compared for
//! equality (removal finds entries by equality).
//!
//! The provided implementations cover the usual shapes:
//!
//! | Type | Identity used for equality |
//! |---|---|
//! | [`Function`] | function address |
//! | [`Method`] | function address and bound target |
//! | [`SharedFn`] | allocation of the shared closure |
//!
//! Custom entry types implement [`Callable`] directly; every trait bound the
//! list needs is a supertrait, so an entry type that does not satisfy them is
//! rejected where the list is instantiated.

mod function;
mod shared;

pub use self::{
    function::{Function, Method},
    shared::SharedFn,
};

/// A single invocable entry of a multicast list.
///
/// `Args` is the argument binding shared by all entries of a list. It is
/// passed as `&mut Args`, so an entry can use it both for input and for
/// output: every entry sees the modifications made by the entries invoked
/// before it.
///
/// # Examples
///
/// ```
/// use multicast::Callable;
///
/// #[derive(Clone, PartialEq)]
/// struct Append(&'static str);
///
/// impl Callable<Vec<&'static str>> for Append {
///     type Output = usize;
///     type Error = core::convert::Infallible;
///
///     fn call(&self, log: &mut Vec<&'static str>) -> Result<usize, Self::Error> {
///         log.push(self.0);
///         Ok(log.len())
///     }
/// }
///
/// let mut log = Vec::new();
/// assert_eq!(Append("a").call(&mut log), Ok(1));
/// assert_eq!(log, ["a"]);
/// ```
pub trait Callable<Args: ?Sized>: Clone + PartialEq {
    /// The value produced by a successful call.
    type Output;

    /// The error produced by a failed call.
    type Error;

    /// Invokes the entry.
    fn call(&self, args: &mut Args) -> Result<Self::Output, Self::Error>;
}
