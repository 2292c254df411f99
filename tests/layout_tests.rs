//! Tests for the tidy tree layout engine.

use proptest::prelude::*;
use recipe_tree::layout::{layout, layout_with, LayoutOptions, LayoutStats, Tidy};

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
struct Shape {
    children: Vec<Shape>,
    x: f64,
}

impl Tidy for Shape {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn set_position(&mut self, position: f64) {
        self.x = position;
    }
}

fn leaf() -> Shape {
    node(vec![])
}

fn node(children: Vec<Shape>) -> Shape {
    Shape {
        children,
        x: f64::NAN,
    }
}

/// Builds a tree from `parents[i]`, the parent of node `i + 1`.
fn from_parents(parents: &[usize]) -> Shape {
    let mut children = vec![Vec::new(); parents.len() + 1];
    for (i, &parent) in parents.iter().enumerate() {
        children[parent].push(i + 1);
    }
    fn assemble(id: usize, children: &[Vec<usize>]) -> Shape {
        node(children[id].iter().map(|&c| assemble(c, children)).collect())
    }
    assemble(0, &children)
}

/// A spine of `length` nodes, each with a short sibling on one side.
fn caterpillar(length: usize, sibling: fn() -> Shape, sibling_first: bool) -> Shape {
    let mut spine = leaf();
    for _ in 0..length {
        spine = if sibling_first {
            node(vec![sibling(), spine])
        } else {
            node(vec![spine, sibling()])
        };
    }
    spine
}

fn short_branch() -> Shape {
    node(vec![leaf()])
}

/// Positions grouped by depth, left to right.
fn levels(root: &Shape) -> Vec<Vec<f64>> {
    let mut levels: Vec<Vec<f64>> = Vec::new();
    let mut stack = vec![(root, 0)];
    while let Some((shape, depth)) = stack.pop() {
        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        levels[depth].push(shape.x);
        stack.extend(shape.children.iter().rev().map(|c| (c, depth + 1)));
    }
    levels
}

fn subtree_bounds(shape: &Shape) -> (f64, f64) {
    shape.children.iter().map(subtree_bounds).fold((shape.x, shape.x), |(lo, hi), (l, h)| {
        (lo.min(l), hi.max(h))
    })
}

fn check_layout(root: &Shape, min_distance: f64) -> Result<(), String> {
    let levels = levels(root);
    let all: Vec<f64> = levels.iter().flatten().copied().collect();

    if let Some(bad) = all.iter().find(|x| !x.is_finite() || **x < 0.0) {
        return Err(format!("position {bad} is not finite and non-negative"));
    }
    let min = all.iter().copied().fold(f64::INFINITY, f64::min);
    if min != 0.0 {
        return Err(format!("smallest position is {min}, not 0"));
    }

    for (depth, level) in levels.iter().enumerate() {
        for pair in level.windows(2) {
            if pair[1] - pair[0] < min_distance - EPSILON {
                return Err(format!("depth {depth}: {} and {} are too close", pair[0], pair[1]));
            }
        }
    }

    let mut stack = vec![root];
    while let Some(shape) = stack.pop() {
        if !shape.children.is_empty() {
            let (lo, hi) = subtree_bounds(shape);
            if (shape.x - (lo + hi) / 2.0).abs() > EPSILON * (1.0 + hi) {
                return Err(format!("parent at {} is not centered over [{lo}, {hi}]", shape.x));
            }
        }
        stack.extend(shape.children.iter());
    }
    Ok(())
}

#[test]
fn test_single_node() {
    let mut root = leaf();
    let stats = layout(&mut root, 1.0);

    assert_eq!(root.x, 0.0);
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.threads, 0);
}

#[test]
fn test_worked_example_positions() {
    // i1 -> r1 -> (i2 -> r2, i3 -> r3)
    let mut root = node(vec![node(vec![node(vec![leaf()]), node(vec![leaf()])])]);
    layout(&mut root, 1.0);

    let r1 = &root.children[0];
    assert_eq!(root.x, 0.5);
    assert_eq!(r1.x, 0.5);
    assert_eq!(r1.children[0].x, 0.0);
    assert_eq!(r1.children[1].x, 1.0);
    assert_eq!(r1.children[0].children[0].x, 0.0);
    assert_eq!(r1.children[1].children[0].x, 1.0);
}

#[test]
fn test_chain_stacks_on_one_position() {
    let mut root = node(vec![node(vec![node(vec![leaf()])])]);
    layout(&mut root, 1.0);

    assert!(levels(&root).iter().all(|level| level == &vec![0.0]));
}

#[test]
fn test_leaves_are_spaced_by_min_distance() {
    let mut root = node(vec![leaf(), leaf(), leaf(), leaf()]);
    layout_with(&mut root, &LayoutOptions { min_distance: 2.0 });

    let xs: Vec<f64> = root.children.iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0]);
    assert_eq!(root.x, 3.0);
}

#[test]
fn test_default_options() {
    assert_eq!(LayoutOptions::default().min_distance, 1.0);
}

#[test]
fn test_deep_subtrees_do_not_overlap() {
    // The wide grandchildren of the first child would collide with the
    // second child's grandchildren if only the children were compared.
    let wide = || node(vec![node(vec![leaf(), leaf(), leaf()])]);
    let mut root = node(vec![wide(), wide()]);
    layout(&mut root, 1.0);

    check_layout(&root, 1.0).expect("layout should be tidy");
    assert_eq!(root.children[1].x - root.children[0].x, 3.0);
}

#[test]
fn test_threads_bridge_shallow_outer_subtrees() {
    // Leaves at both ends; the middle subtree is two levels deeper, and the
    // outer subtrees must not be pulled into it.
    let mut root = node(vec![
        leaf(),
        node(vec![node(vec![leaf(), leaf()]), node(vec![leaf(), leaf()])]),
        leaf(),
    ]);
    let stats = layout(&mut root, 1.0);

    check_layout(&root, 1.0).expect("layout should be tidy");
    assert!(stats.threads >= 2, "Both outer leaves should be threaded");
}

#[test]
fn test_small_subtree_between_deep_ones() {
    let deep = || node(vec![node(vec![leaf(), leaf(), leaf(), leaf()])]);
    let mut root = node(vec![deep(), leaf(), deep()]);
    layout(&mut root, 1.0);

    check_layout(&root, 1.0).expect("layout should be tidy");
    let xs: Vec<f64> = root.children.iter().map(|c| c.x).collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2], "Child order is preserved");
}

#[test]
fn test_mirror_symmetry() {
    let half = node(vec![leaf(), node(vec![leaf(), leaf(), leaf()]), leaf()]);
    let mut root = node(vec![half.clone(), half]);
    layout(&mut root, 1.0);

    let levels = levels(&root);
    let center = root.x;
    for level in &levels {
        let mirrored: Vec<f64> = level.iter().rev().map(|x| 2.0 * center - x).collect();
        for (x, m) in level.iter().zip(&mirrored) {
            assert!((x - m).abs() < EPSILON, "{level:?} is not symmetric about {center}");
        }
    }
}

#[test]
fn test_identical_trees_get_identical_positions() {
    let parents = [0, 0, 1, 1, 1, 2, 6, 6, 0, 9, 3];
    let mut first = from_parents(&parents);
    let mut second = from_parents(&parents);
    layout(&mut first, 1.5);
    layout(&mut second, 1.5);

    assert_eq!(first, second);

    // Laying out again overwrites every position with the same values.
    let snapshot = first.clone();
    layout(&mut first, 1.5);
    assert_eq!(first, snapshot);
}

#[test]
fn test_work_grows_linearly() {
    for &sibling_first in &[true, false] {
        for sibling in [leaf as fn() -> Shape, short_branch] {
            let mut counts = Vec::new();
            for length in [125, 250, 500, 1000] {
                let mut tree = caterpillar(length, sibling, sibling_first);
                let stats: LayoutStats = layout(&mut tree, 1.0);
                assert!(
                    stats.cursor_steps <= 8 * stats.nodes,
                    "{} steps for {} nodes",
                    stats.cursor_steps,
                    stats.nodes
                );
                counts.push(stats.cursor_steps as f64);
            }
            for pair in counts.windows(2) {
                let ratio = pair[1] / pair[0];
                assert!(ratio < 2.2, "Doubling the tree multiplied the work by {ratio}");
            }
        }
    }
}

#[test]
fn test_caterpillar_is_tidy() {
    let mut tree = caterpillar(50, short_branch, true);
    layout(&mut tree, 1.0);
    check_layout(&tree, 1.0).expect("layout should be tidy");

    let mut tree = caterpillar(50, short_branch, false);
    layout(&mut tree, 1.0);
    check_layout(&tree, 1.0).expect("layout should be tidy");
}

fn parents_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..120)
        .prop_map(|picks| picks.iter().enumerate().map(|(i, pick)| pick.index(i + 1)).collect::<Vec<usize>>())
}

proptest! {
    #[test]
    fn prop_random_trees_are_tidy(parents in parents_strategy(), min_distance in 0.25f64..4.0) {
        let mut tree = from_parents(&parents);
        let stats = layout(&mut tree, min_distance);

        prop_assert_eq!(stats.nodes, parents.len() + 1);
        if let Err(message) = check_layout(&tree, min_distance) {
            return Err(TestCaseError::fail(message));
        }
    }

    #[test]
    fn prop_threads_at_most_one_per_node(parents in parents_strategy()) {
        let mut tree = from_parents(&parents);
        let stats = layout(&mut tree, 1.0);

        prop_assert!(stats.threads < stats.nodes);
    }
}
