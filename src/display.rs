//! Display and formatting utilities for recipe trees.
//!
//! This module turns laid-out trees and production plans into plain text for
//! the command-line tool. Nothing here feeds back into building or layout.

use crate::models::Item;
use crate::plan::{PlanLine, PlanStack};
use crate::tree::{Node, NodeKind};

/// Formats a duration in seconds to a human-readable string.
///
/// # Arguments
///
/// * `seconds` - Duration in seconds
///
/// # Returns
///
/// A formatted string like "1h 30m 45s", "15m 30s", or "45s"
///
/// # Example
///
/// ```
/// use recipe_tree::display::format_time;
///
/// assert_eq!(format_time(3665.0), "1h 1m 5s");
/// assert_eq!(format_time(125.0), "2m 5s");
/// assert_eq!(format_time(45.0), "45s");
/// ```
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;

    if hours > 0.0 {
        format!("{}h {}m {:.0}s", hours, minutes, secs)
    } else if minutes > 0.0 {
        format!("{}m {:.0}s", minutes, secs)
    } else {
        format!("{:.0}s", secs)
    }
}

/// Formats a layout coordinate without trailing zeros ("0", "0.5", "1.25").
pub fn format_position(position: f64) -> String {
    let s = format!("{:.3}", position);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn format_stacks(stacks: &[PlanStack]) -> String {
    if stacks.is_empty() {
        return "(nothing)".to_string();
    }
    stacks
        .iter()
        .map(|s| format!("{} x{}", s.name, s.count))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Formats one plan line as `ingredients => machine => products`.
///
/// # Example
///
/// ```
/// use recipe_tree::display::format_plan_line;
/// use recipe_tree::plan::{PlanLine, PlanStack};
///
/// let line = PlanLine {
///     recipe_id: "smelt".to_string(),
///     ingredients: vec![PlanStack { id: "ore".into(), name: "Ore".into(), count: 2 }],
///     machine: "Furnace".to_string(),
///     products: vec![PlanStack { id: "ingot".into(), name: "Ingot".into(), count: 1 }],
///     time: 2.0,
/// };
/// assert_eq!(format_plan_line(&line), "Ore x2 => Furnace (2s) => Ingot x1");
/// ```
pub fn format_plan_line(line: &PlanLine) -> String {
    format!(
        "{} => {} ({}) => {}",
        format_stacks(&line.ingredients),
        line.machine,
        format_time(line.time),
        format_stacks(&line.products)
    )
}

/// Formats a tree as an indented outline, one node per line, with each
/// node's position.
///
/// Duplicate items are marked with `...` since their recipes already appear
/// further up the same branch.
pub fn format_tree(root: &Node) -> Vec<String> {
    root.nodes()
        .into_iter()
        .map(|node| {
            let indent = "  ".repeat(node.depth);
            let position = format_position(node.position);
            match &node.kind {
                NodeKind::Item(item) => {
                    let marker = if item.duplicate { " ..." } else { "" };
                    format!("{indent}{} [{}] @ {position}{marker}", item.item.name, item.item.id)
                }
                NodeKind::Recipe(recipe) => format!(
                    "{indent}<- {} ({}) @ {position}",
                    recipe.recipe.name,
                    format_time(recipe.recipe.time)
                ),
            }
        })
        .collect()
}

/// Formats node positions grouped by depth, e.g. `depth 2: ore@0, sand@1`.
///
/// # Example
///
/// ```
/// use recipe_tree::display::format_levels;
/// use recipe_tree::layout::layout;
/// use recipe_tree::models::{Item, ItemStack, Recipe, RecipeTables};
/// use recipe_tree::tree::{build, BuildOptions};
///
/// let tables = RecipeTables::new(
///     vec![Item::new("a", "A"), Item::new("b", "B"), Item::new("c", "C")],
///     vec![],
///     vec![Recipe::new("r", "m", vec![ItemStack::new("b", 1), ItemStack::new("c", 1)], vec![ItemStack::new("a", 1)], 1.0)],
/// );
/// let mut root = build("a", &tables, &BuildOptions::default()).unwrap();
/// layout(&mut root, 1.0);
///
/// assert_eq!(
///     format_levels(&root),
///     vec!["depth 0: a@0.5", "depth 1: r@0.5", "depth 2: b@0, c@1"]
/// );
/// ```
pub fn format_levels(root: &Node) -> Vec<String> {
    let nodes = root.nodes();
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    (0..=max_depth)
        .map(|depth| {
            let entries: Vec<String> = nodes
                .iter()
                .filter(|n| n.depth == depth)
                .map(|n| format!("{}@{}", n.id(), format_position(n.position)))
                .collect();
            format!("depth {depth}: {}", entries.join(", "))
        })
        .collect()
}

/// Displays a laid-out recipe tree to stdout.
///
/// This function prints:
/// - The outline of the tree with positions
/// - Positions grouped by depth
/// - The items the root can be turned into, if any
pub fn display_tree(root: &Node) {
    println!();
    println!("+================================================================+");
    println!("|                         RECIPE TREE                            |");
    println!("+================================================================+");
    println!();

    for line in format_tree(root) {
        println!("  {line}");
    }

    println!();
    println!("[POSITIONS BY DEPTH]");
    println!("----------------------------------------------------------------");
    for line in format_levels(root) {
        println!("  {line}");
    }

    if let Some(item) = root.as_item() {
        if !item.possible_products.is_empty() {
            println!();
            println!("[USED TO MAKE]");
            println!("----------------------------------------------------------------");
            for product in &item.possible_products {
                println!("  {} [{}]", product.name, product.id);
            }
        }
    }

    println!();
}

/// Displays a production plan to stdout.
pub fn display_plan(lines: &[PlanLine]) {
    println!("[FIRST-RECIPE PLAN]");
    println!("----------------------------------------------------------------");
    if lines.is_empty() {
        println!("  Nothing to craft: the target is gathered directly.");
    }
    for (i, line) in lines.iter().enumerate() {
        println!("  Step {}: {}", i + 1, format_plan_line(line));
    }
    println!();
}

/// Displays a list of items, one per line.
pub fn display_items(items: &[&Item]) {
    println!("{:<32} {}", "Id", "Name");
    println!("----------------------------------------------------------------");
    for item in items {
        println!("{:<32} {}", item.id, item.name);
    }
}
