//! Tidy layout for trees with any number of children per node.
//!
//! Assigns every node a position along one axis so that nodes on the same
//! level are at least `min_distance` apart and every parent is centered over
//! the full extent of its subtree. This is Walker's multi-child algorithm
//! with Buchheim-style contour threads, arranged so that all children of a
//! node are separated in one simultaneous walk down their contours.
//!
//! # Algorithm Overview
//!
//! 1. **Setup (bottom-up):** for each node, walk the left and right contours
//!    of all child subtrees level by level, pushing a subtree right whenever
//!    its left contour comes closer than `min_distance` to the right contour
//!    of its nearest still-active neighbour. When the outermost subtree on a
//!    side runs out before a deeper one, its last contour node gets a thread
//!    to the deeper subtree's contour so later walks skip straight across.
//!    Walking stops as soon as a single subtree remains, which keeps the
//!    total work linear in the node count.
//! 2. **Finalize (top-down):** follow the left contour from the root to find
//!    the minimum coordinate, then convert relative offsets into absolute
//!    positions with that minimum at exactly 0. Threads are cleared.
//!
//! The engine works on any tree implementing [`Tidy`]. Scratch state
//! (threads, thread offsets, subtree extents) lives in an index arena that is
//! dropped when layout returns; it is never visible on the caller's nodes.

use log::debug;

/// A tree node that can be laid out.
///
/// Child order is significant and preserved.
pub trait Tidy: Sized {
    /// Ordered children.
    fn children(&self) -> &[Self];

    /// Ordered children, mutably.
    fn children_mut(&mut self) -> &mut [Self];

    /// Receives the final absolute position.
    fn set_position(&mut self, position: f64);
}

/// Layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Minimum distance between two nodes on the same level
    pub min_distance: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions { min_distance: 1.0 }
    }
}

/// Work counters from one layout run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Nodes laid out
    pub nodes: usize,
    /// Contour cursor advances across both passes
    pub cursor_steps: usize,
    /// Threads installed during setup
    pub threads: usize,
}

/// Position of a contour cursor: a node and its offset from the subtree root
/// the walk started at.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: usize,
    offset: f64,
}

#[derive(Debug, Default)]
struct Slot {
    children: Vec<usize>,
    /// Offset from the parent once the parent's setup has run
    position: f64,
    thread: Option<usize>,
    /// Offset of `thread` relative to this node
    thread_offset: f64,
    /// Leftmost and rightmost descendant offsets relative to this node
    extent: (f64, f64),
}

/// Index arena mirroring the caller's tree in pre-order, so every parent
/// index is smaller than its children's.
#[derive(Debug)]
struct Arena {
    slots: Vec<Slot>,
    stats: LayoutStats,
}

impl Arena {
    fn from_tree<N: Tidy>(root: &N) -> Self {
        let mut arena = Arena {
            slots: Vec::new(),
            stats: LayoutStats::default(),
        };
        arena.push(root);
        arena.stats.nodes = arena.slots.len();
        arena
    }

    fn push<N: Tidy>(&mut self, node: &N) -> usize {
        let id = self.slots.len();
        self.slots.push(Slot::default());
        let children = node.children().iter().map(|child| self.push(child)).collect();
        self.slots[id].children = children;
        id
    }

    fn next_left(&mut self, cursor: Cursor) -> Option<Cursor> {
        self.stats.cursor_steps += 1;
        let slot = &self.slots[cursor.node];
        if let Some(thread) = slot.thread {
            Some(Cursor {
                node: thread,
                offset: cursor.offset + slot.thread_offset,
            })
        } else {
            slot.children.first().map(|&child| Cursor {
                node: child,
                offset: cursor.offset + self.slots[child].position,
            })
        }
    }

    fn next_right(&mut self, cursor: Cursor) -> Option<Cursor> {
        self.stats.cursor_steps += 1;
        let slot = &self.slots[cursor.node];
        if let Some(thread) = slot.thread {
            Some(Cursor {
                node: thread,
                offset: cursor.offset + slot.thread_offset,
            })
        } else {
            slot.children.last().map(|&child| Cursor {
                node: child,
                offset: cursor.offset + self.slots[child].position,
            })
        }
    }

    fn install_thread(&mut self, from: usize, to: usize, offset: f64) {
        debug_assert!(self.slots[from].thread.is_none());
        debug_assert!(self.slots[from].children.is_empty());
        self.slots[from].thread = Some(to);
        self.slots[from].thread_offset = offset;
        self.stats.threads += 1;
    }

    /// Bottom-up pass. Children come after parents in the arena, so walking
    /// indices backwards visits every child before its parent.
    fn setup(&mut self, min_distance: f64) {
        for id in (0..self.slots.len()).rev() {
            let children = std::mem::take(&mut self.slots[id].children);
            match children.len() {
                0 => {}
                1 => {
                    let child = children[0];
                    self.slots[child].position = 0.0;
                    self.slots[id].extent = self.slots[child].extent;
                }
                _ => self.separate(id, &children, min_distance),
            }
            self.slots[id].children = children;
        }
    }

    /// Places the children of `parent` relative to it.
    fn separate(&mut self, parent: usize, children: &[usize], min_distance: f64) {
        let count = children.len();

        // gaps[i]: offset of child i from child i - 1 (gaps[0] is always 0).
        let mut gaps: Vec<f64> = (0..count)
            .map(|i| if i == 0 { 0.0 } else { min_distance })
            .collect();
        // spans[i]: offset of active child i from the previous active child,
        // or from child 0 for the first active one.
        let mut spans = gaps.clone();
        // xs[i]: offset of child i from child 0 at the current level.
        let mut xs = vec![0.0; count];

        let mut lefts: Vec<Cursor> = children
            .iter()
            .map(|&node| Cursor { node, offset: 0.0 })
            .collect();
        let mut rights = lefts.clone();
        let mut active: Vec<usize> = (0..count).collect();

        while active.len() > 1 {
            // Apportion: push each active subtree clear of its active left neighbour.
            let mut x = 0.0;
            for (n, &i) in active.iter().enumerate() {
                x += spans[i];
                if n > 0 {
                    let prev = active[n - 1];
                    let separation = (x + lefts[i].offset) - (xs[prev] + rights[prev].offset);
                    if separation < min_distance {
                        let push = min_distance - separation;
                        spans[i] += push;
                        gaps[i] += push;
                        x += push;
                    }
                }
                xs[i] = x;
            }

            // Advance every active contour one level.
            let mut advanced = Vec::with_capacity(active.len());
            for &i in &active {
                let left = self.next_left(lefts[i]);
                let right = self.next_right(rights[i]);
                debug_assert_eq!(left.is_some(), right.is_some());
                advanced.push((i, left.zip(right)));
            }

            let first = active[0];
            let last = active[active.len() - 1];
            let first_survivor = advanced
                .iter()
                .find_map(|&(i, next)| next.map(|(left, _)| (i, left)));
            let last_survivor = advanced
                .iter()
                .rev()
                .find_map(|&(i, next)| next.map(|(_, right)| (i, right)));

            // An exhausted outer subtree hands its contour over to the
            // nearest deeper subtree on the same side.
            if advanced[0].1.is_none() {
                if let Some((s, next)) = first_survivor {
                    let offset = (xs[s] + next.offset) - (xs[first] + lefts[first].offset);
                    self.install_thread(lefts[first].node, next.node, offset);
                }
            }
            if advanced[advanced.len() - 1].1.is_none() {
                if let Some((s, next)) = last_survivor {
                    let offset = (xs[s] + next.offset) - (xs[last] + rights[last].offset);
                    self.install_thread(rights[last].node, next.node, offset);
                }
            }

            let mut carry = 0.0;
            let mut survivors = Vec::with_capacity(advanced.len());
            for (i, next) in advanced {
                match next {
                    Some((left, right)) => {
                        lefts[i] = left;
                        rights[i] = right;
                        spans[i] += carry;
                        carry = 0.0;
                        survivors.push(i);
                    }
                    None => carry += spans[i],
                }
            }
            active = survivors;
        }

        let mut x = 0.0;
        let mut leftmost = f64::INFINITY;
        let mut rightmost = f64::NEG_INFINITY;
        for (i, &child) in children.iter().enumerate() {
            x += gaps[i];
            xs[i] = x;
            let (lo, hi) = self.slots[child].extent;
            leftmost = leftmost.min(x + lo);
            rightmost = rightmost.max(x + hi);
        }

        let center = (leftmost + rightmost) / 2.0;
        for (i, &child) in children.iter().enumerate() {
            self.slots[child].position = xs[i] - center;
        }
        self.slots[parent].extent = (leftmost - center, rightmost - center);
    }

    /// Top-down pass: absolute positions with the minimum at 0, threads cleared.
    fn finalize(&mut self) -> Vec<f64> {
        let mut cursor = Cursor { node: 0, offset: 0.0 };
        let mut min = 0.0f64;
        while let Some(next) = self.next_left(cursor) {
            min = min.min(next.offset);
            cursor = next;
        }

        let mut absolute = vec![0.0; self.slots.len()];
        absolute[0] = -min;
        let mut lowest = absolute[0];
        for id in 0..self.slots.len() {
            let base = absolute[id];
            for &child in &self.slots[id].children {
                absolute[child] = base + self.slots[child].position;
                lowest = lowest.min(absolute[child]);
            }
            self.slots[id].thread = None;
            self.slots[id].thread_offset = 0.0;
        }

        // Thread offsets and parent chains can round differently.
        if lowest != 0.0 {
            for position in &mut absolute {
                *position -= lowest;
            }
        }
        absolute
    }
}

fn write_positions<N: Tidy>(node: &mut N, positions: &[f64], next: &mut usize) {
    node.set_position(positions[*next]);
    *next += 1;
    for child in node.children_mut() {
        write_positions(child, positions, next);
    }
}

/// Lays out `root` in place.
///
/// After this returns, every node's position is absolute, finite and
/// non-negative, the smallest position in the tree is exactly 0, and any two
/// nodes on the same level are at least `min_distance` apart.
///
/// `min_distance` must be finite and positive.
///
/// # Example
///
/// ```
/// use recipe_tree::layout::{layout, Tidy};
///
/// struct Dot { children: Vec<Dot>, x: f64 }
///
/// impl Tidy for Dot {
///     fn children(&self) -> &[Self] { &self.children }
///     fn children_mut(&mut self) -> &mut [Self] { &mut self.children }
///     fn set_position(&mut self, position: f64) { self.x = position; }
/// }
///
/// let leaf = || Dot { children: vec![], x: 0.0 };
/// let mut root = Dot { children: vec![leaf(), leaf()], x: 0.0 };
/// layout(&mut root, 1.0);
///
/// assert_eq!(root.children[0].x, 0.0);
/// assert_eq!(root.x, 0.5);
/// assert_eq!(root.children[1].x, 1.0);
/// ```
pub fn layout<N: Tidy>(root: &mut N, min_distance: f64) -> LayoutStats {
    debug_assert!(min_distance.is_finite() && min_distance > 0.0);

    let mut arena = Arena::from_tree(root);
    arena.setup(min_distance);
    let positions = arena.finalize();
    write_positions(root, &positions, &mut 0);

    debug!(
        "laid out {} nodes: {} cursor steps, {} threads",
        arena.stats.nodes, arena.stats.cursor_steps, arena.stats.threads
    );
    arena.stats
}

/// Lays out `root` with the given options.
pub fn layout_with<N: Tidy>(root: &mut N, options: &LayoutOptions) -> LayoutStats {
    layout(root, options.min_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Plain {
        children: Vec<Plain>,
    }

    impl Tidy for Plain {
        fn children(&self) -> &[Self] {
            &self.children
        }

        fn children_mut(&mut self) -> &mut [Self] {
            &mut self.children
        }

        fn set_position(&mut self, _position: f64) {}
    }

    fn leaf() -> Plain {
        Plain { children: vec![] }
    }

    fn node(children: Vec<Plain>) -> Plain {
        Plain { children }
    }

    fn relative_positions(tree: &Plain, min_distance: f64) -> Arena {
        let mut arena = Arena::from_tree(tree);
        arena.setup(min_distance);
        arena
    }

    #[test]
    fn test_single_child_is_centered_before_finalize() {
        // 0 -> 1 -> (2, 3)
        let tree = node(vec![node(vec![leaf(), leaf()])]);
        let arena = relative_positions(&tree, 1.0);

        assert_eq!(arena.slots[1].position, 0.0);
        assert_eq!(arena.slots[2].position, -0.5);
        assert_eq!(arena.slots[3].position, 0.5);
    }

    #[test]
    fn test_children_are_centered_over_subtree_extent() {
        // 0 -> (1 -> (2, 3, 4), 5)
        let tree = node(vec![node(vec![leaf(), leaf(), leaf()]), leaf()]);
        let arena = relative_positions(&tree, 1.0);

        // Leaf 5 only meets node 1 on the first level.
        assert_eq!(arena.slots[5].position - arena.slots[1].position, 1.0);
        assert_eq!(arena.slots[0].extent, (-1.0, 1.0));
    }

    #[test]
    fn test_thread_installed_for_shallow_outer_subtree() {
        // 0 -> (1, 2 -> (3, 4))
        let tree = node(vec![leaf(), node(vec![leaf(), leaf()])]);
        let arena = relative_positions(&tree, 1.0);

        assert_eq!(arena.stats.threads, 1);
        assert_eq!(arena.slots[1].thread, Some(3));
        // Leaf 1 sits at 0, node 2 at 1, leaf 3 at 0.5 from child 0.
        assert_eq!(arena.slots[1].thread_offset, 0.5);
    }

    #[test]
    fn test_finalize_clears_threads() {
        let tree = node(vec![leaf(), node(vec![leaf(), leaf()]), leaf()]);
        let mut arena = relative_positions(&tree, 1.0);
        assert!(arena.stats.threads > 0);

        let positions = arena.finalize();
        assert!(arena.slots.iter().all(|s| s.thread.is_none() && s.thread_offset == 0.0));
        assert_eq!(positions.iter().copied().fold(f64::INFINITY, f64::min), 0.0);
    }

    #[test]
    fn test_deeper_neighbour_is_pushed_clear_of_wide_subtree() {
        // 0 -> (1 -> (2, 3, 4, 5), 6 -> 7)
        let tree = node(vec![node(vec![leaf(), leaf(), leaf(), leaf()]), node(vec![leaf()])]);
        let arena = relative_positions(&tree, 1.0);

        // Leaf 5 sits 1.5 right of node 1, so node 7 (under node 6) must be 2.5 away.
        assert_eq!(arena.slots[6].position - arena.slots[1].position, 2.5);
        assert_eq!(arena.slots[7].position, 0.0);
    }
}
