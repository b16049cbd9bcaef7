#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`multicast`].
//!
//! # Overview
//!
//! This crate contains the storage layer that powers the [`multicast`]
//! library: a reference-counted entry buffer paired with a conservative
//! "possibly shared" flag, and the copy-on-write primitives that keep two
//! lists sharing one buffer from ever observing each other's mutations.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`multicast`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`ownership`]**: The [`OwnershipTracker`], a single flag recording
//!   whether a buffer may currently be referenced by another list value.
//! - **[`buffer`]**: The [`RawEntryBuffer`], which owns a
//!   [`triomphe::Arc<Vec<E>>`](triomphe::Arc) together with its tracker and
//!   implements every structural mutation as "establish exclusive ownership,
//!   then write".
//!
//! # Ownership Strategy
//!
//! The tracker never undercounts: every operation that hands out a second
//! reference to a buffer marks it, and a cleared flag is only ever produced by
//! an operation that either allocated a fresh buffer or observed a strong
//! count of one. Because of that, the only code that can write to a buffer
//! without consulting the flag is
//! [`RawEntryBuffer::remove_all_unchecked`], whose caller takes over that
//! obligation.
//!
//! [`multicast`]: https://docs.rs/multicast/latest/multicast/
//! [`OwnershipTracker`]: ownership::OwnershipTracker
//! [`RawEntryBuffer`]: buffer::RawEntryBuffer

extern crate alloc;

pub mod buffer;
pub mod ownership;

pub use buffer::{BufferWrite, RawEntryBuffer};
pub use ownership::OwnershipTracker;
