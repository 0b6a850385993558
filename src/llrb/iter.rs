//! Ordered traversal.
//!
//! Two iterator flavors with different consistency trade-offs are provided;
//! both yield owned `(key, value)` pairs in ascending comparator order,
//! re-acquiring the map's shared lock per step but never holding it across
//! steps.
//!
//! - [`Iter`] walks the node graph through parent back-references: O(1)
//!   amortized per step, but a concurrent writer can invalidate its cursor,
//!   so entries may be skipped or repeated. Use it when no writers run, or
//!   when that is acceptable.
//! - [`SafeIter`] remembers only the last key it returned and re-queries the
//!   live tree for the next bigger one each step: O(log N) per step, always
//!   observing the current state and degrading gracefully under concurrent
//!   inserts and deletes.
//!
//! Both flavors accept an optional inclusive upper bound, are forward-only,
//! and yield at most as many entries as the map held when they were created.

use super::arena::NodeId;
use super::map::LlrbMap;

/// Fast in-order iterator stepping through parent back-references.
///
/// Created by [`LlrbMap::iter`] and [`LlrbMap::range`].
///
/// # Consistency
///
/// The cursor is a node handle. If a concurrent writer deletes the cursor's
/// node, iteration ends early; if the slot is reused, iteration continues
/// from whatever entry occupies it. Either way the walk is memory-safe and
/// finite — it just is not guaranteed to observe a consistent snapshot.
///
/// # Examples
///
/// ```rust
/// use llrbmap::llrb::LlrbMap;
///
/// let map = LlrbMap::new();
/// for key in [7, 1, 3, 9, 5] {
///     map.put(key, key * 10);
/// }
///
/// let entries: Vec<(i32, i32)> = map.iter().collect();
/// assert_eq!(entries, vec![(1, 10), (3, 30), (5, 50), (7, 70), (9, 90)]);
/// ```
pub struct Iter<'a, K, V> {
    map: &'a LlrbMap<K, V>,
    cursor: Option<NodeId>,
    upper: Option<K>,
    remaining: usize,
}

/// Mutation-tolerant in-order iterator driven by nearest-key queries.
///
/// Created by [`LlrbMap::safe_iter`] and [`LlrbMap::safe_range`].
///
/// # Consistency
///
/// Only the last returned key is retained between steps; each step asks the
/// live tree for the next strictly bigger entry. Entries inserted behind the
/// cursor are not revisited, entries deleted ahead of it are skipped, and a
/// deleted cursor key is simply stepped over.
///
/// # Examples
///
/// ```rust
/// use llrbmap::llrb::LlrbMap;
///
/// let map = LlrbMap::new();
/// for key in [2, 4, 6] {
///     map.put(key, ());
/// }
///
/// let mut entries = map.safe_iter();
/// assert_eq!(entries.next(), Some((2, ())));
/// map.delete(&4);
/// assert_eq!(entries.next(), Some((6, ())));
/// ```
pub struct SafeIter<'a, K, V> {
    map: &'a LlrbMap<K, V>,
    pending: Option<K>,
    include_equal: bool,
    upper: Option<K>,
    remaining: usize,
}

impl<K, V> LlrbMap<K, V> {
    /// Returns a fast iterator over all entries in ascending order.
    ///
    /// See [`Iter`] for the consistency trade-off.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let core = self.core.read();
        Iter {
            map: self,
            cursor: core.find_min(core.root),
            upper: None,
            remaining: core.len,
        }
    }

    /// Returns a fast iterator over entries with `lower <= key <= upper`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// for key in [7, 1, 3, 9, 5] {
    ///     map.put(key, ());
    /// }
    ///
    /// let keys: Vec<i32> = map.range(&3, &8).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![3, 5, 7]);
    /// ```
    #[must_use]
    pub fn range(&self, lower: &K, upper: &K) -> Iter<'_, K, V>
    where
        K: Clone,
    {
        let core = self.core.read();
        Iter {
            map: self,
            cursor: core.bigger_node(core.root, lower, true),
            upper: Some(upper.clone()),
            remaining: core.len,
        }
    }

    /// Returns a mutation-tolerant iterator over all entries in ascending
    /// order.
    ///
    /// See [`SafeIter`] for the consistency trade-off.
    #[must_use]
    pub fn safe_iter(&self) -> SafeIter<'_, K, V>
    where
        K: Clone,
    {
        let core = self.core.read();
        let start = core
            .find_min(core.root)
            .map(|id| core.arena.node(id).key.clone());
        SafeIter {
            map: self,
            pending: start,
            include_equal: true,
            upper: None,
            remaining: core.len,
        }
    }

    /// Returns a mutation-tolerant iterator over entries with
    /// `lower <= key <= upper`.
    #[must_use]
    pub fn safe_range(&self, lower: &K, upper: &K) -> SafeIter<'_, K, V>
    where
        K: Clone,
    {
        let core = self.core.read();
        SafeIter {
            map: self,
            pending: Some(lower.clone()),
            include_equal: true,
            upper: Some(upper.clone()),
            remaining: core.len,
        }
    }
}

impl<K: Clone, V: Clone> Iterator for Iter<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.cursor = None;
            return None;
        }
        let cursor = self.cursor?;

        let core = self.map.core.read();
        let Some(entry) = core.arena.get(cursor) else {
            // the cursor's node was deleted between steps
            self.cursor = None;
            return None;
        };
        if let Some(upper) = &self.upper
            && (core.less)(upper, &entry.key)
        {
            self.cursor = None;
            return None;
        }
        let item = (entry.key.clone(), entry.value.clone());
        self.cursor = core.successor(cursor);
        drop(core);

        self.remaining -= 1;
        Some(item)
    }
}

impl<K: Clone, V: Clone> Iterator for SafeIter<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.pending = None;
            return None;
        }
        let key = self.pending.take()?;

        let core = self.map.core.read();
        let found = core.bigger_node(core.root, &key, self.include_equal)?;
        let entry = core.arena.node(found);
        if let Some(upper) = &self.upper
            && (core.less)(upper, &entry.key)
        {
            return None;
        }
        let item = (entry.key.clone(), entry.value.clone());
        drop(core);

        self.include_equal = false;
        self.pending = Some(item.0.clone());
        self.remaining -= 1;
        Some(item)
    }
}
