//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use multicast::prelude::*;
//!
//! fn greet(names: &mut Vec<&'static str>) -> Result<usize, ()> {
//!     names.push("hello");
//!     Ok(names.len())
//! }
//!
//! let list: MulticastList<Function<Vec<&'static str>, usize, ()>, markers::Permissive> =
//!     MulticastList::from_entry(Function::new(greet));
//!
//! let mut names = Vec::new();
//! assert_eq!(list.invoke(&mut names), Ok(1));
//! ```
//!
//! # What's Included
//!
//! - **[`MulticastList`]** and its aliases [`StrictList`] and
//!   [`PermissiveList`]
//! - **[`Callable`]**: the entry trait
//! - **[`Function`]**, **[`Method`]** and **[`SharedFn`]**: the provided
//!   entry types
//! - **[`markers`]**: the policy markers

pub use crate::{
    Callable, MulticastList, PermissiveList, StrictList,
    callable::{Function, Method, SharedFn},
    markers,
};
