//! The multicast list value type.
//!
//! - [`owned`]: construction, copy-on-write mutation, combination and
//!   introspection of [`MulticastList`].
//! - [`invoke`]: invoking a list and the [`Callable`](crate::Callable)
//!   implementation that lets lists nest.
//! - [`iter`]: iteration over the entries.

pub mod invoke;
pub mod iter;
pub mod owned;

pub use self::{
    iter::Iter,
    owned::{MulticastList, PermissiveList, StrictList},
};
