#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Copy-on-write multicast lists: ordered collections of callables that share
//! one call signature and can be invoked as a single callable.
//!
//! ## Overview
//!
//! A [`MulticastList`] stores entries that implement [`Callable`]. Invoking
//! the list invokes every entry, in insertion order, with the same argument
//! binding. The list is a value: cloning it is O(1) because the clone shares
//! the entry buffer, and a mutation of either copy never shows up in the
//! other one.
//!
//! ## Quick Example
//!
//! ```
//! use multicast::prelude::*;
//!
//! fn add_one(total: &mut i32) -> Result<i32, core::convert::Infallible> {
//!     *total += 1;
//!     Ok(*total)
//! }
//!
//! fn double(total: &mut i32) -> Result<i32, core::convert::Infallible> {
//!     *total *= 2;
//!     Ok(*total)
//! }
//!
//! let mut list: MulticastList<Function<i32, i32, core::convert::Infallible>> =
//!     MulticastList::from_entry(Function::new(add_one));
//! list.push(Function::new(double));
//!
//! let mut total = 3;
//! assert_eq!(list.invoke(&mut total), Ok(8));
//! assert_eq!(total, 8);
//! ```
//!
//! ## Core Concepts
//!
//! **Entries** are small handles implementing [`Callable`]: a function,
//! optionally bound to some captured state, that can be compared for equality.
//! Equality is what [`remove`](MulticastList::remove) uses to find entries.
//! The crate ships three entry types in [`callable`]:
//!
//! - [`Function`]: a plain function pointer.
//! - [`Method`]: a function pointer bound to a target value.
//! - [`SharedFn`]: any closure behind a reference-counted pointer, compared
//!   by identity.
//!
//! **Invocation** is sequential. Every entry receives the same `&mut Args`,
//! so an entry observes whatever the entries before it did to the arguments.
//! The first entry that returns an error stops the invocation: the error is
//! returned unchanged and later entries never run. Side effects of the entries
//! that already ran stay in place. When every entry succeeds, the result is
//! the result of the last entry.
//!
//! **Sharing** is tracked with a conservative "possibly shared" flag stored
//! next to the buffer. Cloning a list sets it on both values. Any structural
//! mutation of a list whose flag is set first moves that list onto a buffer
//! of its own. See [`multicast-internals`] for the mechanics.
//!
//! [`multicast-internals`]: multicast_internals
//!
//! ## Policies
//!
//! The second type parameter of [`MulticastList`] decides what invoking an
//! empty list means:
//!
//! - [`Strict`] (default): invoking an empty list is a programmer error and
//!   panics.
//! - [`Permissive`]: invoking an empty list does nothing and returns
//!   `Output::default()`.
//!
//! ```
//! use multicast::prelude::*;
//!
//! fn noop(_: &mut ()) -> Result<u32, ()> {
//!     Ok(7)
//! }
//!
//! let mut list: MulticastList<Function<(), u32, ()>, markers::Permissive> = MulticastList::new();
//! assert_eq!(list.invoke(&mut ()), Ok(0));
//!
//! list.push(Function::new(noop));
//! assert_eq!(list.invoke(&mut ()), Ok(7));
//! ```
//!
//! ## Cargo features
//!
//! - `std`: enables the `std` support of the reference-counting backend.
//! - `tracing`: emits [`tracing`](https://docs.rs/tracing) events when a
//!   shared buffer gets duplicated, when an entry fails, and right before an
//!   empty strict list panics.
//!
//! [`Function`]: crate::callable::Function
//! [`Method`]: crate::callable::Method
//! [`SharedFn`]: crate::callable::SharedFn
//! [`Strict`]: crate::markers::Strict
//! [`Permissive`]: crate::markers::Permissive

extern crate alloc;

#[macro_use]
mod trace;

pub mod callable;
pub mod list;
pub mod markers;
pub mod prelude;

pub use self::{
    callable::Callable,
    list::{MulticastList, PermissiveList, StrictList},
};
