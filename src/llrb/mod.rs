//! In-memory ordered key/value map backed by a left-leaning red-black tree.
//!
//! This module provides [`LlrbMap`], a sorted map that keeps its entries in
//! comparator order at all times, enabling ordered iteration and nearest-key
//! lookups in addition to the usual map operations.
//!
//! # Overview
//!
//! The map is built on an LLRB (Left-Leaning Red-Black) tree, a red-black
//! variant that disallows right-leaning red links. The restriction collapses
//! the number of rebalancing cases and makes deletion tractable with a short
//! recursive descent.
//!
//! - O(log N) [`put`](LlrbMap::put), [`get`](LlrbMap::get),
//!   [`delete`](LlrbMap::delete)
//! - O(log N) [`min`](LlrbMap::min) / [`max`](LlrbMap::max) and the
//!   nearest-key family ([`bigger`](LlrbMap::bigger),
//!   [`smaller`](LlrbMap::smaller) and their equal-or- variants)
//! - O(1) amortized per-step ordered traversal via [`LlrbMap::iter`], or
//!   O(log N) per-step mutation-tolerant traversal via
//!   [`LlrbMap::safe_iter`]
//!
//! Both the 2-3-4 discipline (4-nodes allowed, split on the way down) and
//! the 2-3 discipline (4-nodes split eagerly on the way up) are supported;
//! see [`Variant`].
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants after every mutation:
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. A red node never has a red child
//! 4. Every path from a node to an empty subtree crosses the same number of
//!    black nodes
//! 5. A red right link only appears next to a red left link (red links never
//!    lean right)
//!
//! [`LlrbMap::check`] validates all of them on demand and reports the first
//! violated property as an [`InvariantViolation`].
//!
//! # Concurrency
//!
//! Access is serialized by one reader/writer lock owned by the map. Mutating
//! operations hold it exclusively for their whole duration, so every
//! mutation is atomic to observers; read operations share it. Iterators
//! re-acquire the shared lock per step rather than across steps — see the
//! iterator types for the consistency trade-offs.
//!
//! # Examples
//!
//! ```rust
//! use llrbmap::llrb::LlrbMap;
//!
//! let map = LlrbMap::new();
//! for key in [40, 10, 30, 20] {
//!     map.put(key, key * 10);
//! }
//!
//! assert_eq!(map.len(), 4);
//! assert_eq!(map.min(), Some((10, 100)));
//! assert_eq!(map.equal_or_bigger(&15), Some((20, 200)));
//!
//! let keys: Vec<i32> = map.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![10, 20, 30, 40]);
//!
//! assert!(map.check().is_ok());
//! ```

mod arena;
mod check;
mod iter;
mod map;
mod stats;

pub use check::InvariantViolation;
pub use iter::Iter;
pub use iter::SafeIter;
pub use map::Comparator;
pub use map::LlrbMap;
pub use map::Variant;
pub use stats::DeleteStats;
pub use stats::GetStats;
pub use stats::PutStats;
pub use stats::RotateStats;
pub use stats::Stats;
