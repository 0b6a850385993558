//! # llrbmap
//!
//! An in-memory ordered key/value map backed by a left-leaning red-black
//! (LLRB) tree.
//!
//! ## Overview
//!
//! This library provides [`llrb::LlrbMap`], a sorted associative container
//! with capabilities a hash table cannot offer:
//!
//! - O(log N) insert, update and delete
//! - O(log N) exact lookup
//! - O(log N) nearest-key queries (successor/predecessor, with and without
//!   equality)
//! - Ordered traversal, with two iterator flavors trading speed against
//!   consistency under concurrent writers
//!
//! The container is internally synchronized with a reader/writer lock, so a
//! single map can be shared across threads without external locking.
//!
//! ## Example
//!
//! ```rust
//! use llrbmap::llrb::LlrbMap;
//!
//! let map = LlrbMap::new();
//! map.put(2, "two");
//! map.put(1, "one");
//! map.put(3, "three");
//!
//! assert_eq!(map.get(&2), Some("two"));
//! assert_eq!(map.bigger(&1), Some((2, "two")));
//!
//! let keys: Vec<i32> = map.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use llrbmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::llrb::*;
}

pub mod llrb;
