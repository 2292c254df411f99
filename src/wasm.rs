//! WebAssembly bindings for recipe trees.
//!
//! This module provides JavaScript-accessible functions that build and lay
//! out a recipe tree and hand it to a browser renderer as JSON.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::display::{format_plan_line, format_time};
use crate::layout::layout;
use crate::models::{Item, Recipe, RecipeTables, TablesDocument};
use crate::plan::first_recipe_plan;
use crate::tree::{build, BuildOptions, Node, NodeKind};

fn default_min_distance() -> f64 {
    1.0
}

fn default_max_depth() -> usize {
    10
}

/// JavaScript-friendly input for building a tree.
#[derive(Debug, Clone, Deserialize)]
pub struct JsTreeInput {
    pub target: String,
    pub tables: TablesDocument,
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub include_pour: bool,
    #[serde(default)]
    pub expand_seeds: bool,
}

/// JavaScript-friendly item reference.
#[derive(Debug, Clone, Serialize)]
pub struct JsItem {
    pub id: String,
    pub name: String,
}

impl From<&Item> for JsItem {
    fn from(item: &Item) -> Self {
        JsItem {
            id: item.id.clone(),
            name: item.name.clone(),
        }
    }
}

/// JavaScript-friendly tree node. Only what a renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct JsNode {
    pub kind: &'static str,
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub position: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub duplicate: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_products: Vec<JsItem>,
    pub children: Vec<JsNode>,
}

impl From<&Node> for JsNode {
    fn from(node: &Node) -> Self {
        let (kind, machine_id, time, duplicate, possible_products) = match &node.kind {
            NodeKind::Item(item) => (
                "item",
                None,
                None,
                item.duplicate,
                item.possible_products.iter().map(JsItem::from).collect(),
            ),
            NodeKind::Recipe(recipe) => (
                "recipe",
                Some(recipe.recipe.machine_id.clone()),
                Some(format_time(recipe.recipe.time)),
                false,
                Vec::new(),
            ),
        };
        JsNode {
            kind,
            id: node.id().to_string(),
            name: node.name().to_string(),
            depth: node.depth,
            position: node.position,
            machine_id,
            time,
            duplicate,
            possible_products,
            children: node.children.iter().map(JsNode::from).collect(),
        }
    }
}

/// JavaScript-friendly plan line.
#[derive(Debug, Clone, Serialize)]
pub struct JsPlanLine {
    pub recipe_id: String,
    pub text: String,
}

/// JavaScript-friendly result.
#[derive(Debug, Clone, Serialize)]
pub struct JsTreeResult {
    pub success: bool,
    pub error: Option<String>,
    pub root: Option<JsNode>,
    pub max_depth: usize,
    pub max_position: f64,
    pub plan: Vec<JsPlanLine>,
}

impl JsTreeResult {
    fn failure(error: String) -> Self {
        JsTreeResult {
            success: false,
            error: Some(error),
            root: None,
            max_depth: 0,
            max_position: 0.0,
            plan: vec![],
        }
    }
}

fn include_everything(_: &Recipe) -> bool {
    false
}

fn run(input: JsTreeInput) -> JsTreeResult {
    let tables: RecipeTables = input.tables.into();
    let exclude: fn(&Recipe) -> bool = if input.include_pour {
        include_everything
    } else {
        Recipe::is_pour
    };
    let options = BuildOptions {
        max_depth: input.max_depth,
        exclude,
        seeds_as_leaves: !input.expand_seeds,
    };

    let mut root = match build(&input.target, &tables, &options) {
        Ok(root) => root,
        Err(e) => return JsTreeResult::failure(e.to_string()),
    };
    if !(input.min_distance.is_finite() && input.min_distance > 0.0) {
        return JsTreeResult::failure(format!("Invalid min_distance: {}", input.min_distance));
    }
    layout(&mut root, input.min_distance);

    let plan = match first_recipe_plan(&root, &tables) {
        Ok(lines) => lines
            .iter()
            .map(|line| JsPlanLine {
                recipe_id: line.recipe_id.clone(),
                text: format_plan_line(line),
            })
            .collect(),
        Err(e) => return JsTreeResult::failure(e.to_string()),
    };

    let nodes = root.nodes();
    let max_position = nodes.iter().map(|n| n.position).fold(0.0, f64::max);
    JsTreeResult {
        success: true,
        error: None,
        max_depth: root.max_depth(),
        max_position,
        root: Some(JsNode::from(&root)),
        plan,
    }
}

/// Build and lay out the recipe tree for an item.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn recipe_tree(input_json: &str) -> String {
    let result = match serde_json::from_str::<JsTreeInput>(input_json) {
        Ok(input) => run(input),
        Err(e) => JsTreeResult::failure(format!("Invalid input: {}", e)),
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Get the version of the library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Search items by name. Returns a JSON array of `{ id, name }`.
#[wasm_bindgen]
pub fn search_items(tables_json: &str, query: &str) -> String {
    let tables: RecipeTables = match serde_json::from_str::<TablesDocument>(tables_json) {
        Ok(doc) => doc.into(),
        Err(_) => return "[]".to_string(),
    };
    let found: Vec<JsItem> = tables.search(query).into_iter().map(JsItem::from).collect();
    serde_json::to_string(&found).unwrap_or_default()
}
