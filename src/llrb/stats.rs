//! Usage and performance statistics.
//!
//! Every map owns its own counter block; nothing is shared process-wide.
//! Counters are atomics so that read operations, which only hold the shared
//! lock, can still record hits and misses. [`Stats`] is the plain snapshot
//! handed back to callers.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use super::map::Variant;

/// Insertion counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PutStats {
    /// Total number of put operations.
    pub sum: u64,
    /// Puts that created a new key.
    pub new: u64,
    /// Puts that overwrote an existing key in place.
    pub updated: u64,
}

/// Deletion counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DeleteStats {
    /// Total number of delete operations.
    pub sum: u64,
    /// Deletes that removed a present key.
    pub removed: u64,
    /// Deletes of an absent key (no-ops).
    pub not_found: u64,
}

/// Lookup counters, covering exact, min/max and nearest-key queries.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GetStats {
    /// Total number of lookups.
    pub sum: u64,
    /// Lookups that produced an entry.
    pub found: u64,
    /// Lookups with no qualifying entry.
    pub not_found: u64,
}

/// Rebalancing rotation counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RotateStats {
    /// Total rotations in either direction.
    pub sum: u64,
    /// Left rotations.
    pub left: u64,
    /// Right rotations.
    pub right: u64,
}

/// Point-in-time snapshot of a map's cumulative counters.
///
/// Returned by [`LlrbMap::stats`](super::LlrbMap::stats). The `sum` fields
/// are computed at snapshot time from their components.
///
/// # Examples
///
/// ```rust
/// use llrbmap::llrb::LlrbMap;
///
/// let map = LlrbMap::new();
/// map.put(1, "one");
/// map.put(1, "ONE");
///
/// let stats = map.stats();
/// assert_eq!(stats.put.new, 1);
/// assert_eq!(stats.put.updated, 1);
/// assert_eq!(stats.put.sum, 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    /// The balancing discipline of the map that produced this snapshot.
    pub variant: Variant,
    /// Insertion counters.
    pub put: PutStats,
    /// Deletion counters.
    pub delete: DeleteStats,
    /// Lookup counters.
    pub get: GetStats,
    /// Rotation counters.
    pub rotate: RotateStats,
    /// Color flips.
    pub flip: u64,
}

impl fmt::Display for Stats {
    /// One-line summary with rotations and flips averaged per mutation.
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mutations = self.put.sum + self.delete.sum;
        let per_mutation = |count: u64| {
            if mutations == 0 {
                0.0
            } else {
                count as f64 / mutations as f64
            }
        };
        write!(
            formatter,
            "Variant:{}, Put:{}, Delete:{}, Get:{}, Rotate:{:.2}, Flip:{:.2}",
            self.variant,
            self.put.sum,
            self.delete.sum,
            self.get.sum,
            per_mutation(self.rotate.sum),
            per_mutation(self.flip),
        )
    }
}

/// Live atomic counters, owned by one map instance and threaded through the
/// balancing primitives.
pub(crate) struct Counters {
    put_new: AtomicU64,
    put_updated: AtomicU64,
    delete_removed: AtomicU64,
    delete_not_found: AtomicU64,
    get_found: AtomicU64,
    get_not_found: AtomicU64,
    rotate_left: AtomicU64,
    rotate_right: AtomicU64,
    flip: AtomicU64,
}

impl Counters {
    pub(crate) const fn new() -> Self {
        Self {
            put_new: AtomicU64::new(0),
            put_updated: AtomicU64::new(0),
            delete_removed: AtomicU64::new(0),
            delete_not_found: AtomicU64::new(0),
            get_found: AtomicU64::new(0),
            get_not_found: AtomicU64::new(0),
            rotate_left: AtomicU64::new(0),
            rotate_right: AtomicU64::new(0),
            flip: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_put_new(&self) {
        self.put_new.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_put_updated(&self) {
        self.put_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete_removed(&self) {
        self.delete_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete_not_found(&self) {
        self.delete_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get_found(&self) {
        self.get_found.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get_not_found(&self) {
        self.get_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotate_left(&self) {
        self.rotate_left.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotate_right(&self) {
        self.rotate_right.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flip(&self) {
        self.flip.fetch_add(1, Ordering::Relaxed);
    }

    /// Captures the current counter values into a [`Stats`] snapshot.
    pub(crate) fn snapshot(&self, variant: Variant) -> Stats {
        let put_new = self.put_new.load(Ordering::Relaxed);
        let put_updated = self.put_updated.load(Ordering::Relaxed);
        let delete_removed = self.delete_removed.load(Ordering::Relaxed);
        let delete_not_found = self.delete_not_found.load(Ordering::Relaxed);
        let get_found = self.get_found.load(Ordering::Relaxed);
        let get_not_found = self.get_not_found.load(Ordering::Relaxed);
        let rotate_left = self.rotate_left.load(Ordering::Relaxed);
        let rotate_right = self.rotate_right.load(Ordering::Relaxed);

        Stats {
            variant,
            put: PutStats {
                sum: put_new + put_updated,
                new: put_new,
                updated: put_updated,
            },
            delete: DeleteStats {
                sum: delete_removed + delete_not_found,
                removed: delete_removed,
                not_found: delete_not_found,
            },
            get: GetStats {
                sum: get_found + get_not_found,
                found: get_found,
                not_found: get_not_found,
            },
            rotate: RotateStats {
                sum: rotate_left + rotate_right,
                left: rotate_left,
                right: rotate_right,
            },
            flip: self.flip.load(Ordering::Relaxed),
        }
    }

    /// Zeroes every counter.
    pub(crate) fn reset(&self) {
        self.put_new.store(0, Ordering::Relaxed);
        self.put_updated.store(0, Ordering::Relaxed);
        self.delete_removed.store(0, Ordering::Relaxed);
        self.delete_not_found.store(0, Ordering::Relaxed);
        self.get_found.store(0, Ordering::Relaxed);
        self.get_not_found.store(0, Ordering::Relaxed);
        self.rotate_left.store(0, Ordering::Relaxed);
        self.rotate_right.store(0, Ordering::Relaxed);
        self.flip.store(0, Ordering::Relaxed);
    }
}
