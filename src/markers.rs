//! Marker types and traits selecting what invoking an empty list means.
//!
//! The policy is the second type parameter of
//! [`MulticastList<E, P>`](crate::MulticastList). It is resolved entirely at
//! compile time: both policies share the same storage and mutation code and
//! only differ in the [`EmptyPolicy`] implementation used by
//! [`invoke`](crate::MulticastList::invoke).
//!
//! - [`Strict`]: an empty list has nothing meaningful to return, so invoking
//!   one is a programmer error and panics.
//! - [`Permissive`]: invoking an empty list is a no-op that returns the
//!   default value of the output type. This is only available when the output
//!   type implements [`Default`], which is enforced at the call site.
//!
//! # Examples
//!
//! ```
//! use multicast::prelude::*;
//!
//! fn answer(_: &mut ()) -> Result<u8, ()> {
//!     Ok(42)
//! }
//!
//! let mut permissive: MulticastList<Function<(), u8, ()>, markers::Permissive> =
//!     MulticastList::new();
//! assert_eq!(permissive.invoke(&mut ()), Ok(0));
//!
//! // Switching the policy does not touch the entries.
//! permissive.push(Function::new(answer));
//! let strict: MulticastList<Function<(), u8, ()>, markers::Strict> = permissive.into_policy();
//! assert_eq!(strict.invoke(&mut ()), Ok(42));
//! ```
//!
//! Invoking an empty strict list panics:
//!
//! ```should_panic
//! use multicast::prelude::*;
//!
//! let strict: MulticastList<Function<(), u8, ()>> = MulticastList::new();
//! let _ = strict.invoke(&mut ());
//! ```

/// Marker type for lists where invoking an empty list is a fatal error.
///
/// This is the default policy of [`MulticastList`](crate::MulticastList).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Strict;

/// Marker type for lists where invoking an empty list is a no-op.
///
/// The invocation returns `Ok(Output::default())` and leaves the arguments
/// untouched.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Permissive;

mod sealed_policy_marker {
    use super::*;

    pub trait Sealed: 'static {}

    impl Sealed for Strict {}
    impl Sealed for Permissive {}
}

/// Marker trait implemented by [`Strict`] and [`Permissive`].
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait PolicyMarker: sealed_policy_marker::Sealed {
    /// Human-readable policy name, used in `Debug` output.
    const NAME: &'static str;
}

impl PolicyMarker for Strict {
    const NAME: &'static str = "strict";
}

impl PolicyMarker for Permissive {
    const NAME: &'static str = "permissive";
}

/// Decides the outcome of invoking a list that has no entries.
///
/// [`Strict`] implements this for every output type, [`Permissive`] only for
/// output types that implement [`Default`]. Invoking a permissive list whose
/// output type has no default value is therefore a compile error rather than
/// a runtime surprise.
pub trait EmptyPolicy<Output>: PolicyMarker {
    /// Produces the result of invoking an empty list.
    #[track_caller]
    fn on_empty() -> Output;
}

impl<Output> EmptyPolicy<Output> for Strict {
    #[track_caller]
    fn on_empty() -> Output {
        trace_event!(error, "invoked an empty strict multicast list");
        panic!("invoked an empty multicast list with the strict policy")
    }
}

impl<Output: Default> EmptyPolicy<Output> for Permissive {
    #[inline]
    fn on_empty() -> Output {
        Output::default()
    }
}
