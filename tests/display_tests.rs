//! Tests for display and formatting utilities.

use recipe_tree::display::{format_levels, format_plan_line, format_position, format_time, format_tree};
use recipe_tree::layout::layout;
use recipe_tree::models::{Item, ItemStack, Recipe, RecipeTables};
use recipe_tree::plan::{PlanLine, PlanStack};
use recipe_tree::tree::{build, BuildOptions};

fn cycle_tables() -> RecipeTables {
    RecipeTables::new(
        vec![Item::new("a", "Alpha"), Item::new("b", "Beta")],
        vec![],
        vec![
            Recipe::new("ra", "m", vec![ItemStack::new("b", 1)], vec![ItemStack::new("a", 1)], 90.0),
            Recipe::new("rb", "m", vec![ItemStack::new("a", 1)], vec![ItemStack::new("b", 1)], 5.0),
        ],
    )
}

#[test]
fn test_format_time_seconds() {
    assert_eq!(format_time(30.0), "30s");
    assert_eq!(format_time(59.0), "59s");
}

#[test]
fn test_format_time_minutes() {
    assert_eq!(format_time(60.0), "1m 0s");
    assert_eq!(format_time(90.0), "1m 30s");
}

#[test]
fn test_format_time_hours() {
    assert_eq!(format_time(3600.0), "1h 0m 0s");
    assert_eq!(format_time(3661.0), "1h 1m 1s");
}

#[test]
fn test_format_time_zero() {
    assert_eq!(format_time(0.0), "0s");
}

#[test]
fn test_format_position() {
    assert_eq!(format_position(0.0), "0");
    assert_eq!(format_position(-0.0), "0");
    assert_eq!(format_position(0.5), "0.5");
    assert_eq!(format_position(1.25), "1.25");
    assert_eq!(format_position(3.0), "3");
    assert_eq!(format_position(1.0 / 3.0), "0.333");
}

#[test]
fn test_format_plan_line_without_ingredients() {
    let line = PlanLine {
        recipe_id: "mine".to_string(),
        ingredients: vec![],
        machine: "Electric Miner".to_string(),
        products: vec![
            PlanStack { id: "ore".into(), name: "Ore".into(), count: 1 },
            PlanStack { id: "slag".into(), name: "Slag".into(), count: 2 },
        ],
        time: 120.0,
    };

    assert_eq!(format_plan_line(&line), "(nothing) => Electric Miner (2m 0s) => Ore x1 + Slag x2");
}

#[test]
fn test_format_tree_marks_duplicates() {
    let mut root = build("a", &cycle_tables(), &BuildOptions::default()).expect("Failed to build tree");
    layout(&mut root, 1.0);

    assert_eq!(
        format_tree(&root),
        vec![
            "Alpha [a] @ 0",
            "  <- ra (1m 30s) @ 0",
            "    Beta [b] @ 0",
            "      <- rb (5s) @ 0",
            "        Alpha [a] @ 0 ...",
        ]
    );
}

#[test]
fn test_format_levels_lists_every_depth() {
    let mut root = build("a", &cycle_tables(), &BuildOptions::default()).expect("Failed to build tree");
    layout(&mut root, 1.0);

    let levels = format_levels(&root);
    assert_eq!(levels.len(), 5);
    assert_eq!(levels[4], "depth 4: a@0");
}
