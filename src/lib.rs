//! # hamt-map
//!
//! A persistent (immutable) hash map implemented as a Hash Array Mapped
//! Trie (HAMT).
//!
//! ## Overview
//!
//! [`HamtMap`] is an associative container in which every mutating
//! operation returns a new logical map. The new map shares all unmodified
//! subtrees with its predecessor, so the old map stays valid and cheap to
//! keep around.
//!
//! - O(log32 N) `get` (effectively O(1) for practical sizes)
//! - O(log32 N) `insert`
//! - O(log32 N) `remove`
//! - O(1) `len` and `is_empty`
//!
//! Keys are hashed to 32 bits through the [`Hash32`] trait, which is
//! implemented for the primitive types, strings, and the dynamic [`Value`]
//! universe (numbers, strings, byte buffers, sequences, sets, mappings,
//! records, dates, and opaque references).
//!
//! ## Feature Flags
//!
//! - `arc`: share structure through `Arc` instead of `Rc`, making maps
//!   usable across threads.
//!
//! ## Example
//!
//! ```rust
//! use hamt_map::HamtMap;
//!
//! let map = HamtMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2);
//!
//! assert_eq!(map.get("one"), Some(&1));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get("one"), Some(&100)); // New version
//! ```
//!
//! ## Internal Structure
//!
//! The trie branches 32 ways, consuming the key hash five bits at a time.
//! Sparse interior nodes keep a bitmap plus a compact child sequence;
//! once a node would exceed sixteen children it is promoted to a dense
//! 32-slot array. Keys whose hashes fully collide share a collision node.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod bits;
pub mod hash;
mod map;
mod node;
pub mod value;

pub use hash::Hash32;
pub use map::{HamtMap, IntoIter, Iter, NotFound};
pub use value::{OpaqueKey, Value};

/// Reference-counted smart pointer used for structural sharing.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;
