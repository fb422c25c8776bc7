//! Owning sequence containers with explicit capacity and error contracts.
//!
//! This crate provides two containers whose behavior is spelled out rather
//! than left to an allocator policy:
//!
//! ```text
//! DynArray<T>   - contiguous, doubling growth, strong error safety
//! LinkedSeq<T>  - doubly-linked, O(1) splice, relink-only merge and sort
//! ```
//!
//! Fallible operations return [`ContainerError`] and leave the container
//! exactly as it was before the call. Nothing is reported through panics
//! except [`DynArray::push_back`] capacity exhaustion (use
//! [`DynArray::try_push_back`] to observe it) and out-of-bounds indexing with
//! `[]`.
//!
//! # Quick Start
//!
//! ```
//! use nexus_containers::{ContainerError, DynArray, LinkedSeq};
//!
//! let mut arr = DynArray::new();
//! arr.push_back(1);
//! arr.push_back(2);
//! arr.insert(1, 5).unwrap();
//! assert_eq!(arr, [1, 5, 2]);
//! assert_eq!(arr.capacity(), 2 * 2);
//!
//! assert_eq!(
//!     arr.at(3),
//!     Err(ContainerError::OutOfRange { pos: 3, len: 3 })
//! );
//!
//! let mut list: LinkedSeq<_> = arr.into_iter().collect();
//! list.sort();
//! assert_eq!(list.pop_front(), Ok(1));
//! ```
//!
//! # Growth
//!
//! | Operation | Capacity afterwards |
//! |-----------|---------------------|
//! | `push_back` / `insert` at capacity | `max(1, cap * 2)`, clamped to `max_size` |
//! | `reserve(n)`, `n > cap` | exactly `n` |
//! | `shrink_to_fit` | exactly `len` |
//! | `clear`, `pop_back`, `erase` | unchanged |
//!
//! # Feature Flags
//!
//! - `tracing` (default) - emit a `trace` event on every buffer relocation
//!   under the `nexus_containers::raw` target

#![warn(missing_docs)]

mod error;
mod raw;

pub mod list;
pub mod vector;

pub use error::{ContainerError, Rejected};
pub use list::{Cursor, CursorMut, LinkedSeq};
pub use vector::DynArray;
