//! First-recipe production plan.
//!
//! Flattens a recipe tree into one line per recipe by always following the
//! first recipe listed under each item. Recipes keep table order, so this is
//! the default plan; no recipe is preferred over another.

use std::collections::VecDeque;

use crate::error::TreeError;
use crate::models::{ItemStack, Recipe, RecipeTables};
use crate::tree::Node;

/// An item reference with its display name and amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStack {
    /// Item id
    pub id: String,
    /// Item display name
    pub name: String,
    /// Amount per recipe run
    pub count: u32,
}

/// One step of a production plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanLine {
    /// Recipe id
    pub recipe_id: String,
    /// Consumed items
    pub ingredients: Vec<PlanStack>,
    /// Machine display name
    pub machine: String,
    /// Produced items
    pub products: Vec<PlanStack>,
    /// Processing time in seconds
    pub time: f64,
}

fn resolve_stacks(tables: &RecipeTables, stacks: &[ItemStack]) -> Result<Vec<PlanStack>, TreeError> {
    stacks
        .iter()
        .map(|stack| {
            let item = tables
                .item(&stack.id)
                .ok_or_else(|| TreeError::MissingItem { id: stack.id.clone() })?;
            Ok(PlanStack {
                id: stack.id.clone(),
                name: item.name.clone(),
                count: stack.count,
            })
        })
        .collect()
}

/// Resolves the display names for one recipe.
///
/// # Errors
///
/// [`TreeError::MissingItem`] or [`TreeError::MissingMachine`] when the
/// recipe references a record that is not in `tables`.
pub fn plan_line(recipe: &Recipe, tables: &RecipeTables) -> Result<PlanLine, TreeError> {
    let machine = tables
        .machine(&recipe.machine_id)
        .ok_or_else(|| TreeError::MissingMachine {
            recipe: recipe.id.clone(),
            machine: recipe.machine_id.clone(),
        })?;
    Ok(PlanLine {
        recipe_id: recipe.id.clone(),
        ingredients: resolve_stacks(tables, &recipe.ingredients)?,
        machine: machine.name.clone(),
        products: resolve_stacks(tables, &recipe.products)?,
        time: recipe.time,
    })
}

/// Walks `root` depth-first along first recipes and returns one line per
/// recipe visited.
///
/// Leaf and duplicate item nodes contribute nothing. Ingredients are visited
/// in recipe order, each ingredient's whole chain before the next one.
///
/// # Example
///
/// ```
/// use recipe_tree::models::{Item, ItemStack, Machine, Recipe, RecipeTables};
/// use recipe_tree::plan::first_recipe_plan;
/// use recipe_tree::tree::{build, BuildOptions};
///
/// let tables = RecipeTables::new(
///     vec![Item::new("ore", "Ore"), Item::new("ingot", "Ingot")],
///     vec![Machine { id: "furnace".into(), name: "Furnace".into(), description: String::new(), power: 5.0 }],
///     vec![Recipe::new("smelt", "furnace", vec![ItemStack::new("ore", 2)], vec![ItemStack::new("ingot", 1)], 2.0)],
/// );
/// let root = build("ingot", &tables, &BuildOptions::default()).unwrap();
/// let plan = first_recipe_plan(&root, &tables).unwrap();
///
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan[0].machine, "Furnace");
/// assert_eq!(plan[0].ingredients[0].count, 2);
/// ```
pub fn first_recipe_plan(root: &Node, tables: &RecipeTables) -> Result<Vec<PlanLine>, TreeError> {
    let mut lines = Vec::new();
    let mut remaining: VecDeque<&Node> = VecDeque::from([root]);
    while let Some(item) = remaining.pop_front() {
        let Some(first) = item.children.first() else {
            continue;
        };
        if let Some(recipe) = first.as_recipe() {
            lines.push(plan_line(&recipe.recipe, tables)?);
        }
        for ingredient in first.children.iter().rev() {
            remaining.push_front(ingredient);
        }
    }
    Ok(lines)
}
