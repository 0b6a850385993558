//! The balanced-tree engine and its public container type.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use log::debug;
use log::trace;
use parking_lot::RwLock;

use super::arena::Arena;
use super::arena::Node;
use super::arena::NodeId;
use super::stats::Counters;
use super::stats::Stats;

// =============================================================================
// Comparator
// =============================================================================

/// Pluggable strict total order over keys.
///
/// `less(a, b)` must return `true` exactly when `a` orders strictly before
/// `b`. Two keys are equal when neither is less than the other under the
/// active comparator — this derived equality is used everywhere, even where
/// it diverges from the key type's native equality.
///
/// The comparator is injected at construction and cannot change afterwards.
pub type Comparator<K> = fn(&K, &K) -> bool;

/// Natural `Ord`-based order, the default comparator.
fn natural_less<K: Ord>(a: &K, b: &K) -> bool {
    a < b
}

// =============================================================================
// Variant
// =============================================================================

/// The balancing discipline of a map.
///
/// Both are valid LLRB disciplines with identical externally observable map
/// behavior; they differ in when 4-nodes (a black node carrying two red
/// children) are split, which changes the rebalancing characteristics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Variant {
    /// 3-node-only discipline: 4-nodes are split eagerly on the way back up,
    /// so no node keeps two red children between operations.
    TwoThree,
    /// 4-node-permitting discipline (the default): 4-nodes are split on the
    /// way down during insertion, bounding the work of a single pass.
    #[default]
    TwoThreeFour,
}

impl fmt::Display for Variant {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoThree => formatter.write_str("LLRB23"),
            Self::TwoThreeFour => formatter.write_str("LLRB234"),
        }
    }
}

// =============================================================================
// Core
// =============================================================================

/// Lock-protected state: the arena, the root handle, the key count and the
/// fixed construction-time configuration.
pub(crate) struct Core<K, V> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
    pub(crate) less: Comparator<K>,
    pub(crate) variant: Variant,
}

impl<K, V> Core<K, V> {
    pub(crate) fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|id| self.arena.node(id).red)
    }

    fn left_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).left
    }

    fn right_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).right
    }

    /// Writes the left child link and keeps the child's parent link in sync.
    fn link_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.arena.node_mut(parent).left = child;
        if let Some(id) = child {
            self.arena.node_mut(id).up = Some(parent);
        }
    }

    /// Writes the right child link and keeps the child's parent link in sync.
    fn link_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.arena.node_mut(parent).right = child;
        if let Some(id) = child {
            self.arena.node_mut(id).up = Some(parent);
        }
    }

    // -------------------------------------------------------------------------
    // Balancing primitives
    // -------------------------------------------------------------------------
    //
    // These are the only places where colors and links mutate. Each is a
    // local O(1) rewrite and records itself in the per-map counters.

    /// Promotes the right child over `h`. The promoted node inherits the
    /// color of the replaced edge; the demoted node becomes red.
    fn rotate_left(&mut self, h: NodeId, counters: &Counters) -> NodeId {
        let Some(x) = self.right_of(h) else { return h };
        let moved = self.left_of(x);
        let up = self.arena.node(h).up;
        self.link_right(h, moved);
        let was_red = self.arena.node(h).red;
        {
            let promoted = self.arena.node_mut(x);
            promoted.red = was_red;
            promoted.up = up;
        }
        self.arena.node_mut(h).red = true;
        self.link_left(x, Some(h));
        counters.record_rotate_left();
        x
    }

    /// Mirror image of [`Core::rotate_left`].
    fn rotate_right(&mut self, h: NodeId, counters: &Counters) -> NodeId {
        let Some(x) = self.left_of(h) else { return h };
        let moved = self.right_of(x);
        let up = self.arena.node(h).up;
        self.link_left(h, moved);
        let was_red = self.arena.node(h).red;
        {
            let promoted = self.arena.node_mut(x);
            promoted.red = was_red;
            promoted.up = up;
        }
        self.arena.node_mut(h).red = true;
        self.link_right(x, Some(h));
        counters.record_rotate_right();
        x
    }

    /// Toggles the color of `h` and both children, splitting or fusing a
    /// 4-node.
    fn flip_colors(&mut self, h: NodeId, counters: &Counters) {
        let entry = self.arena.node_mut(h);
        entry.red = !entry.red;
        let (left, right) = (entry.left, entry.right);
        if let Some(id) = left {
            let child = self.arena.node_mut(id);
            child.red = !child.red;
        }
        if let Some(id) = right {
            let child = self.arena.node_mut(id);
            child.red = !child.red;
        }
        counters.record_flip();
    }

    /// Borrows a red link from the right sibling while descending left for
    /// deletion.
    fn move_red_left(&mut self, mut h: NodeId, counters: &Counters) -> NodeId {
        self.flip_colors(h, counters);
        if let Some(right) = self.right_of(h)
            && self.is_red(self.left_of(right))
        {
            let rotated = self.rotate_right(right, counters);
            self.link_right(h, Some(rotated));
            h = self.rotate_left(h, counters);
            self.flip_colors(h, counters);
            // trailing red-red on the right only arises under the 2-3-4
            // discipline
            if self.variant == Variant::TwoThreeFour
                && let Some(right) = self.right_of(h)
                && self.is_red(self.right_of(right))
            {
                let rotated = self.rotate_left(right, counters);
                self.link_right(h, Some(rotated));
            }
        }
        h
    }

    /// Borrows a red link from the left sibling while descending right for
    /// deletion.
    fn move_red_right(&mut self, mut h: NodeId, counters: &Counters) -> NodeId {
        self.flip_colors(h, counters);
        if let Some(left) = self.left_of(h)
            && self.is_red(self.left_of(left))
        {
            h = self.rotate_right(h, counters);
            self.flip_colors(h, counters);
        }
        h
    }

    /// Post-recursion normalization applied on every return while unwinding
    /// a delete.
    fn fix_up(&mut self, mut h: NodeId, counters: &Counters) -> NodeId {
        // rotate a right-leaning red back to the left
        if self.is_red(self.right_of(h)) {
            if self.variant == Variant::TwoThreeFour
                && let Some(right) = self.right_of(h)
                && self.is_red(self.left_of(right))
            {
                let rotated = self.rotate_right(right, counters);
                self.link_right(h, Some(rotated));
            }
            h = self.rotate_left(h, counters);
        }
        // rotate a left-left red-red run to the right
        if let Some(left) = self.left_of(h)
            && self.arena.node(left).red
            && self.is_red(self.left_of(left))
        {
            h = self.rotate_right(h, counters);
        }
        // the 2-3 discipline splits 4-nodes on the way up
        if self.variant == Variant::TwoThree
            && self.is_red(self.left_of(h))
            && self.is_red(self.right_of(h))
        {
            self.flip_colors(h, counters);
        }
        h
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Recursive insert. Returns the new subtree root.
    pub(crate) fn put_node(
        &mut self,
        node: Option<NodeId>,
        key: K,
        value: V,
        counters: &Counters,
    ) -> NodeId {
        let Some(mut h) = node else {
            self.len += 1;
            counters.record_put_new();
            return self.arena.alloc(Node::new_red(key, value));
        };

        // split 4-nodes on the way down
        if self.variant == Variant::TwoThreeFour
            && self.is_red(self.left_of(h))
            && self.is_red(self.right_of(h))
        {
            self.flip_colors(h, counters);
        }

        let less = self.less;
        if less(&key, &self.arena.node(h).key) {
            let left = self.left_of(h);
            let child = self.put_node(left, key, value, counters);
            self.link_left(h, Some(child));
        } else if less(&self.arena.node(h).key, &key) {
            let right = self.right_of(h);
            let child = self.put_node(right, key, value, counters);
            self.link_right(h, Some(child));
        } else {
            // existing key, overwrite in place
            self.arena.node_mut(h).value = value;
            counters.record_put_updated();
        }

        // fix a right-leaning red on the way up
        if self.is_red(self.right_of(h)) && !self.is_red(self.left_of(h)) {
            h = self.rotate_left(h, counters);
        }
        // fix two reds in a row on the way up
        if let Some(left) = self.left_of(h)
            && self.arena.node(left).red
            && self.is_red(self.left_of(left))
        {
            h = self.rotate_right(h, counters);
        }
        // split 4-nodes on the way up
        if self.variant == Variant::TwoThree
            && self.is_red(self.left_of(h))
            && self.is_red(self.right_of(h))
        {
            self.flip_colors(h, counters);
        }

        h
    }

    // -------------------------------------------------------------------------
    // Deletion
    // -------------------------------------------------------------------------

    /// Recursive delete. Maintains "current node is red or has a red child"
    /// on the way down so the removal at the bottom never unbalances a path.
    /// Returns the new subtree root and whether the key was present.
    pub(crate) fn delete_node(
        &mut self,
        node: Option<NodeId>,
        key: &K,
        counters: &Counters,
    ) -> (Option<NodeId>, bool) {
        let Some(mut h) = node else {
            counters.record_delete_not_found();
            return (None, false);
        };

        let less = self.less;
        let deleted;
        if less(key, &self.arena.node(h).key) {
            // move red left when searching left past a black pair
            if let Some(left) = self.left_of(h)
                && !self.arena.node(left).red
                && !self.is_red(self.left_of(left))
            {
                h = self.move_red_left(h, counters);
            }
            let left = self.left_of(h);
            let (child, found) = self.delete_node(left, key, counters);
            self.link_left(h, child);
            deleted = found;
        } else {
            if self.is_red(self.left_of(h)) {
                h = self.rotate_right(h, counters);
            }
            if let Some(right) = self.right_of(h)
                && !self.arena.node(right).red
                && !self.is_red(self.left_of(right))
            {
                h = self.move_red_right(h, counters);
            }
            if less(&self.arena.node(h).key, key) {
                // keep going down to the right
                let right = self.right_of(h);
                let (child, found) = self.delete_node(right, key, counters);
                self.link_right(h, child);
                deleted = found;
            } else if let Some(right) = self.right_of(h) {
                // found in the middle: replace with the minimum of the right
                // subtree, then physically remove that minimum
                let (child, min_id) = self.delete_min_node(right, counters);
                self.link_right(h, child);
                let min_node = self.arena.release(min_id);
                let entry = self.arena.node_mut(h);
                entry.key = min_node.key;
                entry.value = min_node.value;
                self.len -= 1;
                counters.record_delete_removed();
                deleted = true;
            } else {
                // found at the bottom: a left-leaning node without a right
                // child is a leaf
                self.len -= 1;
                counters.record_delete_removed();
                self.arena.release(h);
                return (None, true);
            }
        }

        (Some(self.fix_up(h, counters)), deleted)
    }

    /// Detaches the minimum of the subtree rooted at `node`. Returns the new
    /// subtree root and the detached minimum, which the caller releases.
    fn delete_min_node(&mut self, node: NodeId, counters: &Counters) -> (Option<NodeId>, NodeId) {
        let mut h = node;
        let Some(first_left) = self.left_of(h) else {
            // 3-nodes lean left, so a node without a left child is a leaf
            return (None, h);
        };
        if !self.arena.node(first_left).red && !self.is_red(self.left_of(first_left)) {
            h = self.move_red_left(h, counters);
        }
        let Some(left) = self.left_of(h) else {
            return (None, h);
        };
        let (child, min_id) = self.delete_min_node(left, counters);
        self.link_left(h, child);
        (Some(self.fix_up(h, counters)), min_id)
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Iterative exact-match descent. Never rebalances.
    pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
        let less = self.less;
        let mut current = self.root;
        while let Some(id) = current {
            let entry = self.arena.node(id);
            if less(key, &entry.key) {
                current = entry.left;
            } else if less(&entry.key, key) {
                current = entry.right;
            } else {
                return Some(id);
            }
        }
        None
    }

    pub(crate) fn find_min(&self, node: Option<NodeId>) -> Option<NodeId> {
        let mut current = node?;
        while let Some(left) = self.left_of(current) {
            current = left;
        }
        Some(current)
    }

    pub(crate) fn find_max(&self, node: Option<NodeId>) -> Option<NodeId> {
        let mut current = node?;
        while let Some(right) = self.right_of(current) {
            current = right;
        }
        Some(current)
    }

    /// Nearest-key descent towards bigger keys. When branching left, the
    /// current node is the best candidate so far and backs the search up if
    /// the left subtree holds nothing qualifying. With `include_equal` unset
    /// an exact match continues strictly to the right.
    pub(crate) fn bigger_node(
        &self,
        node: Option<NodeId>,
        key: &K,
        include_equal: bool,
    ) -> Option<NodeId> {
        let id = node?;
        let less = self.less;
        let entry = self.arena.node(id);
        if less(key, &entry.key) {
            Some(self.bigger_node(entry.left, key, include_equal).unwrap_or(id))
        } else if less(&entry.key, key) {
            self.bigger_node(entry.right, key, include_equal)
        } else if include_equal {
            Some(id)
        } else {
            // match found, continue to the right
            self.bigger_node(entry.right, key, include_equal)
        }
    }

    /// Mirror image of [`Core::bigger_node`].
    pub(crate) fn smaller_node(
        &self,
        node: Option<NodeId>,
        key: &K,
        include_equal: bool,
    ) -> Option<NodeId> {
        let id = node?;
        let less = self.less;
        let entry = self.arena.node(id);
        if less(&entry.key, key) {
            Some(self.smaller_node(entry.right, key, include_equal).unwrap_or(id))
        } else if less(key, &entry.key) {
            self.smaller_node(entry.left, key, include_equal)
        } else if include_equal {
            Some(id)
        } else {
            // match found, continue to the left
            self.smaller_node(entry.left, key, include_equal)
        }
    }

    /// In-order successor through parent links, without re-descending from
    /// the root. Tolerates stale handles by answering `None`.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        let entry = self.arena.get(id)?;
        if entry.right.is_some() {
            return self.find_min(entry.right);
        }
        let mut child = id;
        let mut parent = entry.up;
        while let Some(up_id) = parent {
            let up_entry = self.arena.get(up_id)?;
            if up_entry.left == Some(child) {
                return Some(up_id);
            }
            child = up_id;
            parent = up_entry.up;
        }
        None
    }

    /// In-order visit of every entry.
    pub(crate) fn for_each<F>(&self, node: Option<NodeId>, visit: &mut F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(id) = node {
            let entry = self.arena.node(id);
            self.for_each(entry.left, visit);
            visit(&entry.key, &entry.value);
            self.for_each(entry.right, visit);
        }
    }
}

// =============================================================================
// Debug rendering
// =============================================================================

impl<K: fmt::Display, V> Core<K, V> {
    /// Draws the tree shape, right subtrees on top, red nodes bracketed.
    /// The format is a debugging aid, not a contract.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(&mut out, self.root, "", None);
        out
    }

    fn render_node(
        &self,
        out: &mut String,
        node: Option<NodeId>,
        prefix: &str,
        connector: Option<bool>,
    ) {
        let Some(id) = node else { return };
        let entry = self.arena.node(id);
        let (right_pad, left_pad) = match connector {
            None => ("", ""),
            Some(true) => ("    ", "│   "),
            Some(false) => ("│   ", "    "),
        };

        let child_prefix = format!("{prefix}{right_pad}");
        self.render_node(out, entry.right, &child_prefix, Some(true));

        out.push_str(prefix);
        match connector {
            Some(true) => out.push_str("┌──"),
            Some(false) => out.push_str("└──"),
            None => {}
        }
        if entry.red {
            out.push_str(&format!("[{}]\n", entry.key));
        } else {
            if connector.is_some() {
                out.push(' ');
            }
            out.push_str(&format!("{}\n", entry.key));
        }

        let child_prefix = format!("{prefix}{left_pad}");
        self.render_node(out, entry.left, &child_prefix, Some(false));
    }
}

// =============================================================================
// LlrbMap
// =============================================================================

/// An internally synchronized ordered map backed by a left-leaning red-black
/// tree.
///
/// Entries are kept in comparator order at all times. All operations take
/// `&self`; a reader/writer lock owned by the map serializes access, so a
/// shared `LlrbMap` can be used from several threads directly.
///
/// # Time Complexity
///
/// | Operation                  | Complexity |
/// |----------------------------|------------|
/// | `put`                      | O(log N)   |
/// | `get` / `contains_key`     | O(log N)   |
/// | `delete`                   | O(log N)   |
/// | `min` / `max`              | O(log N)   |
/// | nearest-key queries        | O(log N)   |
/// | `iter` step                | O(1) amortized |
/// | `safe_iter` step           | O(log N)   |
/// | `len` / `is_empty`         | O(1)       |
///
/// # Examples
///
/// ```rust
/// use llrbmap::llrb::LlrbMap;
///
/// let map = LlrbMap::new();
/// map.put("b", 2);
/// map.put("a", 1);
/// map.put("c", 3);
///
/// assert_eq!(map.get(&"b"), Some(2));
/// assert_eq!(map.min(), Some(("a", 1)));
/// assert_eq!(map.max(), Some(("c", 3)));
///
/// let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// ```
pub struct LlrbMap<K, V> {
    pub(crate) core: RwLock<Core<K, V>>,
    pub(crate) counters: Counters,
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Creates an empty map with the natural key order and the default
    /// 4-node-permitting discipline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map: LlrbMap<i32, String> = LlrbMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_variant_and_comparator(Variant::TwoThreeFour, natural_less::<K>)
    }

    /// Creates an empty map with the natural key order and the given
    /// balancing discipline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::{LlrbMap, Variant};
    ///
    /// let map: LlrbMap<i32, ()> = LlrbMap::with_variant(Variant::TwoThree);
    /// for key in [3, 1, 2] {
    ///     map.put(key, ());
    /// }
    /// assert!(map.check().is_ok());
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_variant(variant: Variant) -> Self {
        Self::with_variant_and_comparator(variant, natural_less::<K>)
    }
}

impl<K, V> LlrbMap<K, V> {
    /// Creates an empty map ordered by `less` instead of the key type's
    /// natural order.
    ///
    /// Key equality is derived from the comparator: two keys are the same
    /// entry exactly when neither orders before the other. The comparator is
    /// fixed for the lifetime of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// // reverse ordering: min() yields the largest natural key
    /// let map: LlrbMap<i32, &str> = LlrbMap::with_comparator(|a, b| b < a);
    /// map.put(1, "one");
    /// map.put(2, "two");
    /// assert_eq!(map.min(), Some((2, "two")));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(less: Comparator<K>) -> Self {
        Self::with_variant_and_comparator(Variant::TwoThreeFour, less)
    }

    /// Creates an empty map with both the balancing discipline and the
    /// comparator chosen by the caller.
    #[must_use]
    pub const fn with_variant_and_comparator(variant: Variant, less: Comparator<K>) -> Self {
        Self {
            core: RwLock::new(Core {
                arena: Arena::new(),
                root: None,
                len: 0,
                less,
                variant,
            }),
            counters: Counters::new(),
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.read().len
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the balancing discipline this map was created with.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.core.read().variant
    }

    /// Inserts a key/value pair, replacing the value in place if the key is
    /// already present.
    ///
    /// # Complexity
    ///
    /// O(log N) comparisons and worst-case rotations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// map.put(1, "one");
    /// map.put(1, "ONE");
    /// assert_eq!(map.get(&1), Some("ONE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) {
        let mut core = self.core.write();
        let root = core.root;
        let new_root = core.put_node(root, key, value, &self.counters);
        core.root = Some(new_root);
        let root_entry = core.arena.node_mut(new_root);
        root_entry.red = false;
        root_entry.up = None;
    }

    /// Removes a key, reporting whether it was present.
    ///
    /// Deleting an absent key is a no-op that returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// map.put(1, "one");
    /// assert!(map.delete(&1));
    /// assert!(!map.delete(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn delete(&self, key: &K) -> bool {
        let mut core = self.core.write();
        let root = core.root;
        let (new_root, deleted) = core.delete_node(root, key, &self.counters);
        core.root = new_root;
        if let Some(id) = new_root {
            let root_entry = core.arena.node_mut(id);
            root_entry.red = false;
            root_entry.up = None;
        }
        deleted
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// map.put("hello", 42);
    /// assert_eq!(map.get(&"hello"), Some(42));
    /// assert_eq!(map.get(&"world"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let core = self.core.read();
        core.find(key).map_or_else(
            || {
                self.counters.record_get_not_found();
                None
            },
            |id| {
                self.counters.record_get_found();
                Some(core.arena.node(id).value.clone())
            },
        )
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        let core = self.core.read();
        if core.find(key).is_some() {
            self.counters.record_get_found();
            true
        } else {
            self.counters.record_get_not_found();
            false
        }
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.find_min(core.root);
        self.entry_at(&core, found)
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.find_max(core.root);
        self.entry_at(&core, found)
    }

    /// Returns the entry with the smallest key strictly bigger than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// for key in [10, 20, 30] {
    ///     map.put(key, ());
    /// }
    /// assert_eq!(map.bigger(&20), Some((30, ())));
    /// assert_eq!(map.bigger(&30), None);
    /// ```
    #[must_use]
    pub fn bigger(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.bigger_node(core.root, key, false);
        self.entry_at(&core, found)
    }

    /// Returns the entry with the largest key strictly smaller than `key`.
    #[must_use]
    pub fn smaller(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.smaller_node(core.root, key, false);
        self.entry_at(&core, found)
    }

    /// Returns the entry under `key` itself, or the nearest bigger one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// for key in [10, 20, 30] {
    ///     map.put(key, ());
    /// }
    /// assert_eq!(map.equal_or_bigger(&20), Some((20, ())));
    /// assert_eq!(map.equal_or_bigger(&25), Some((30, ())));
    /// ```
    #[must_use]
    pub fn equal_or_bigger(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.bigger_node(core.root, key, true);
        self.entry_at(&core, found)
    }

    /// Returns the entry under `key` itself, or the nearest smaller one.
    #[must_use]
    pub fn equal_or_smaller(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let core = self.core.read();
        let found = core.smaller_node(core.root, key, true);
        self.entry_at(&core, found)
    }

    /// Drops every entry. Statistics are preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// map.put(1, "one");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.stats().put.new, 1);
    /// ```
    pub fn clear(&self) {
        let mut core = self.core.write();
        let dropped = core.len;
        core.arena.clear();
        core.root = None;
        core.len = 0;
        debug!("llrb map cleared, dropped {dropped} entries");
    }

    /// Returns an unordered snapshot of all current entries.
    #[must_use]
    pub fn to_hash_map(&self) -> HashMap<K, V>
    where
        K: Clone + Eq + Hash,
        V: Clone,
    {
        let core = self.core.read();
        let mut entries = HashMap::with_capacity(core.len);
        core.for_each(core.root, &mut |key, value| {
            entries.insert(key.clone(), value.clone());
        });
        entries
    }

    /// Returns a snapshot of the cumulative usage and rebalancing counters.
    ///
    /// Counters are owned by this instance; two maps never share them.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let core = self.core.read();
        self.counters.snapshot(core.variant)
    }

    /// Zeroes all counters.
    pub fn reset_stats(&self) {
        self.counters.reset();
        trace!("llrb map statistics reset");
    }

    /// Clones out the entry behind `node`, recording the lookup outcome.
    fn entry_at(&self, core: &Core<K, V>, node: Option<NodeId>) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        node.map_or_else(
            || {
                self.counters.record_get_not_found();
                None
            },
            |id| {
                self.counters.record_get_found();
                let entry = core.arena.node(id);
                Some((entry.key.clone(), entry.value.clone()))
            },
        )
    }
}

// =============================================================================
// Std trait implementations
// =============================================================================

impl<K: Ord, V> Default for LlrbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let map = Self::new();
        for (key, value) in iterable {
            map.put(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.put(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.read();
        let mut builder = formatter.debug_map();
        core.for_each(core.root, &mut |key, value| {
            builder.entry(key, value);
        });
        builder.finish()
    }
}

impl<K: fmt::Display, V> fmt::Display for LlrbMap<K, V> {
    /// Renders the current tree shape: right subtrees print on top, red
    /// nodes appear in brackets. The exact format is non-contractual.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.core.read().render())
    }
}

static_assertions::assert_impl_all!(LlrbMap<i32, String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
