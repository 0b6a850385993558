//! Red-black invariant validation.
//!
//! Four independent validators, one per property, composed into a single
//! result. They exist for verification and testing only — no mutating
//! operation ever calls them.

use std::fmt;

use log::debug;

use super::arena::NodeId;
use super::map::Core;
use super::map::LlrbMap;

/// The first red-black property found violated by [`LlrbMap::check`].
///
/// A violation can only be produced by corrupting the tree from outside the
/// public API; every public mutation leaves all four properties intact.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvariantViolation {
    /// The root node is red.
    RootColor,
    /// A red node has a red child.
    LocalRed,
    /// Two paths from the same node cross different numbers of black nodes.
    BlackHeight,
    /// A red right link appears without a red left sibling.
    LeftLeaning,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootColor => formatter.write_str("root color property violated: the root is red"),
            Self::LocalRed => {
                formatter.write_str("local red property violated: a red node has a red child")
            }
            Self::BlackHeight => formatter
                .write_str("black height property violated: paths disagree on black node count"),
            Self::LeftLeaning => formatter.write_str(
                "left-leaning property violated: a red right link has no red left sibling",
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K, V> LlrbMap<K, V> {
    /// Validates the red-black invariants of the current tree.
    ///
    /// Runs all four validators in order — root color, local red, black
    /// height, left-leaning — and reports the first violated property.
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] naming the failed property.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrbmap::llrb::LlrbMap;
    ///
    /// let map = LlrbMap::new();
    /// for key in [5, 3, 8, 1, 4] {
    ///     map.put(key, ());
    /// }
    /// assert!(map.check().is_ok());
    /// ```
    pub fn check(&self) -> Result<(), InvariantViolation> {
        let core = self.core.read();
        let result = run_checks(&core);
        if let Err(violation) = result {
            debug!("llrb invariant check failed: {violation}");
        }
        result
    }
}

fn run_checks<K, V>(core: &Core<K, V>) -> Result<(), InvariantViolation> {
    check_root_color(core)?;
    check_local_red(core, core.root)?;
    check_black_height(core, core.root)?;
    check_left_leaning(core, core.root)
}

/// Root property: the root, if present, is black.
fn check_root_color<K, V>(core: &Core<K, V>) -> Result<(), InvariantViolation> {
    if core.is_red(core.root) {
        return Err(InvariantViolation::RootColor);
    }
    Ok(())
}

/// Red property: a red node never has a red child. Pre-order walk.
fn check_local_red<K, V>(
    core: &Core<K, V>,
    node: Option<NodeId>,
) -> Result<(), InvariantViolation> {
    let Some(id) = node else { return Ok(()) };
    let entry = core.arena.node(id);
    if entry.red && (core.is_red(entry.left) || core.is_red(entry.right)) {
        return Err(InvariantViolation::LocalRed);
    }
    check_local_red(core, entry.right)?;
    check_local_red(core, entry.left)
}

/// Black property: both subtrees of every node have the same black depth.
/// Post-order walk propagating the shared depth upwards.
fn check_black_height<K, V>(
    core: &Core<K, V>,
    node: Option<NodeId>,
) -> Result<usize, InvariantViolation> {
    let Some(id) = node else { return Ok(1) };
    let entry = core.arena.node(id);
    let right_depth = check_black_height(core, entry.right)?;
    let left_depth = check_black_height(core, entry.left)?;
    if right_depth != left_depth {
        return Err(InvariantViolation::BlackHeight);
    }
    if entry.red {
        Ok(right_depth)
    } else {
        Ok(right_depth + 1)
    }
}

/// LLRB property: red links never lean right — a red right child implies a
/// red left child exists.
fn check_left_leaning<K, V>(
    core: &Core<K, V>,
    node: Option<NodeId>,
) -> Result<(), InvariantViolation> {
    let Some(id) = node else { return Ok(()) };
    let entry = core.arena.node(id);
    if core.is_red(entry.right) && !core.is_red(entry.left) {
        return Err(InvariantViolation::LeftLeaning);
    }
    check_left_leaning(core, entry.right)?;
    check_left_leaning(core, entry.left)
}

#[cfg(test)]
mod tests {
    use super::InvariantViolation;
    use super::LlrbMap;
    use super::NodeId;
    use rstest::rstest;

    // The 2-3-4 discipline balances 1..=5 as:
    //
    //         ┌──[5]
    //     ┌── 4
    //     │   └──[3]
    //     2
    //     └── 1
    fn sample_map() -> LlrbMap<i32, ()> {
        let map = LlrbMap::new();
        for key in [1, 2, 3, 4, 5] {
            map.put(key, ());
        }
        assert!(map.check().is_ok());
        map
    }

    fn root_of(map: &LlrbMap<i32, ()>) -> NodeId {
        map.core.read().root.expect("tree is non-empty")
    }

    fn right_of(map: &LlrbMap<i32, ()>, id: NodeId) -> NodeId {
        map.core.read().arena.node(id).right.expect("right child")
    }

    fn set_red(map: &LlrbMap<i32, ()>, id: NodeId, red: bool) {
        map.core.write().arena.node_mut(id).red = red;
    }

    #[rstest]
    fn test_empty_tree_passes() {
        let map: LlrbMap<i32, ()> = LlrbMap::new();
        assert!(map.check().is_ok());
    }

    #[rstest]
    fn test_red_root_is_reported() {
        let map = sample_map();
        let root = root_of(&map);
        set_red(&map, root, true);
        assert_eq!(map.check(), Err(InvariantViolation::RootColor));
        set_red(&map, root, false);
        assert!(map.check().is_ok());
    }

    #[rstest]
    fn test_red_red_pair_is_reported() {
        let map = sample_map();
        let four = right_of(&map, root_of(&map));
        set_red(&map, four, true);
        assert_eq!(map.check(), Err(InvariantViolation::LocalRed));
        set_red(&map, four, false);
        assert!(map.check().is_ok());
    }

    #[rstest]
    fn test_black_depth_mismatch_is_reported() {
        let map = sample_map();
        let five = right_of(&map, right_of(&map, root_of(&map)));
        set_red(&map, five, false);
        assert_eq!(map.check(), Err(InvariantViolation::BlackHeight));
        set_red(&map, five, true);
        assert!(map.check().is_ok());
    }

    #[rstest]
    fn test_right_leaning_red_is_reported() {
        let map = sample_map();
        let four = right_of(&map, root_of(&map));
        let detached = {
            let mut core = map.core.write();
            core.arena.node_mut(four).left.take()
        };
        assert_eq!(map.check(), Err(InvariantViolation::LeftLeaning));
        map.core.write().arena.node_mut(four).left = detached;
        assert!(map.check().is_ok());
    }

    #[rstest]
    fn test_display_names_the_property() {
        assert!(InvariantViolation::RootColor.to_string().contains("root"));
        assert!(
            InvariantViolation::BlackHeight
                .to_string()
                .contains("black")
        );
    }
}
