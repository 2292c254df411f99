//! Data models and structures for recipe trees.
//!
//! This module contains the immutable reference records supplied by the data
//! layer (items, machines and recipes), the lookup tables the tree builder
//! reads from, and the CSV row structures used while loading them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Special handling hints for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A plantable seed. Seeds and the plants grown from them produce each
    /// other, so by default a seed is treated as a gathered leaf.
    Seed,
}

/// Special handling hints for recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    /// Pours a liquid into (or out of) a container. These recipes connect
    /// almost every liquid to every bottle and clutter the dependency tree.
    Pour,
}

/// A single item that can be gathered, consumed or produced.
///
/// # Example
///
/// ```
/// use recipe_tree::models::Item;
///
/// let ore = Item::new("item_iron_ore", "Iron Ore");
/// assert_eq!(ore.id, "item_iron_ore");
/// assert!(ore.kind.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id (e.g., "item_iron_ore")
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional handling hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    /// Main description followed by any additional description lines
    #[serde(rename = "desc", default)]
    pub description: Vec<String>,
}

impl Item {
    /// Creates an item with no kind and no description.
    pub fn new(id: &str, name: &str) -> Self {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            kind: None,
            description: Vec::new(),
        }
    }

    /// Returns true if the item is a seed.
    pub fn is_seed(&self) -> bool {
        self.kind == Some(ItemKind::Seed)
    }
}

/// A machine that runs recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description text
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Power draw while running
    #[serde(default)]
    pub power: f64,
}

/// An item id together with an amount, used for recipe ingredients and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item id
    pub id: String,
    /// Amount consumed or produced per run
    pub count: u32,
}

impl ItemStack {
    /// Creates a stack of `count` items with the given id.
    pub fn new(id: &str, count: u32) -> Self {
        ItemStack {
            id: id.to_string(),
            count,
        }
    }
}

/// A recipe: a hyper-edge that consumes several items and produces several items.
///
/// # Example
///
/// ```
/// use recipe_tree::models::{ItemStack, Recipe};
///
/// let smelt = Recipe::new(
///     "r_smelt",
///     "m_furnace",
///     vec![ItemStack::new("ore", 1)],
///     vec![ItemStack::new("ingot", 1)],
///     2.0,
/// );
/// assert!(smelt.produces("ingot"));
/// assert!(smelt.consumes("ore"));
/// assert!(!smelt.produces("ore"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique recipe id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Optional handling hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecipeKind>,
    /// Machine that runs this recipe
    pub machine_id: String,
    /// Consumed items, in display order
    #[serde(default)]
    pub ingredients: Vec<ItemStack>,
    /// Produced items, in display order
    #[serde(default)]
    pub products: Vec<ItemStack>,
    /// Processing time in seconds
    pub time: f64,
}

impl Recipe {
    /// Creates a recipe whose display name is its id.
    pub fn new(
        id: &str,
        machine_id: &str,
        ingredients: Vec<ItemStack>,
        products: Vec<ItemStack>,
        time: f64,
    ) -> Self {
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            kind: None,
            machine_id: machine_id.to_string(),
            ingredients,
            products,
            time,
        }
    }

    /// Returns true if `item_id` is one of the products.
    pub fn produces(&self, item_id: &str) -> bool {
        self.products.iter().any(|p| p.id == item_id)
    }

    /// Returns true if `item_id` is one of the ingredients.
    pub fn consumes(&self, item_id: &str) -> bool {
        self.ingredients.iter().any(|i| i.id == item_id)
    }

    /// Returns true if the recipe is a liquid pouring recipe.
    pub fn is_pour(&self) -> bool {
        self.kind == Some(RecipeKind::Pour)
    }
}

/// Read-only lookup tables for one build and layout cycle.
///
/// Items and machines are keyed by id. Recipes keep the order in which they
/// were supplied, because recipe nodes are emitted in that order.
#[derive(Debug, Clone, Default)]
pub struct RecipeTables {
    items: HashMap<String, Item>,
    machines: HashMap<String, Machine>,
    recipes: Vec<Recipe>,
}

impl RecipeTables {
    /// Builds the tables. Later records with a duplicate id replace earlier ones.
    pub fn new(items: Vec<Item>, machines: Vec<Machine>, recipes: Vec<Recipe>) -> Self {
        RecipeTables {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
            machines: machines.into_iter().map(|m| (m.id.clone(), m)).collect(),
            recipes,
        }
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Looks up a machine by id.
    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.machines.get(id)
    }

    /// All recipes in table order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of items in the table.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of machines in the table.
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Recipes that list `item_id` among their products, in table order.
    pub fn recipes_producing<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| r.produces(item_id))
    }

    /// Recipes that list `item_id` among their ingredients, in table order.
    pub fn recipes_consuming<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| r.consumes(item_id))
    }

    /// All items sorted by id.
    pub fn sorted_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    /// Items whose display name contains `query`, sorted by id.
    ///
    /// An empty query matches every item.
    ///
    /// # Example
    ///
    /// ```
    /// use recipe_tree::models::{Item, RecipeTables};
    ///
    /// let tables = RecipeTables::new(
    ///     vec![Item::new("a", "Iron Ore"), Item::new("b", "Iron Ingot"), Item::new("c", "Sand")],
    ///     vec![],
    ///     vec![],
    /// );
    /// let found: Vec<&str> = tables.search("Iron").iter().map(|i| i.id.as_str()).collect();
    /// assert_eq!(found, vec!["a", "b"]);
    /// ```
    pub fn search(&self, query: &str) -> Vec<&Item> {
        self.sorted_items()
            .into_iter()
            .filter(|item| query.is_empty() || item.name.contains(query))
            .collect()
    }
}

/// The JSON document layout produced by the data export step.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TablesDocument {
    /// Every item
    #[serde(default)]
    pub items: Vec<Item>,
    /// Every machine
    #[serde(default)]
    pub machines: Vec<Machine>,
    /// Every recipe, in enumeration order
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl From<TablesDocument> for RecipeTables {
    fn from(doc: TablesDocument) -> Self {
        RecipeTables::new(doc.items, doc.machines, doc.recipes)
    }
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for `items.csv`.
#[derive(Debug, Deserialize)]
pub struct ItemRow {
    /// Item id
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional kind ("seed" or empty)
    pub kind: Option<String>,
    /// Description lines separated by `;`
    pub description: Option<String>,
}

/// CSV row structure for `machines.csv`.
#[derive(Debug, Deserialize)]
pub struct MachineRow {
    /// Machine id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description text
    pub description: Option<String>,
    /// Power draw
    pub power: Option<f64>,
}

/// CSV row structure for `recipes.csv`.
#[derive(Debug, Deserialize)]
pub struct RecipeRow {
    /// Recipe id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Optional kind ("pour" or empty)
    pub kind: Option<String>,
    /// Machine id
    pub machine_id: String,
    /// Ingredients as `item_id:count` pairs separated by `;`
    pub ingredients: Option<String>,
    /// Products as `item_id:count` pairs separated by `;`
    pub products: Option<String>,
    /// Processing time in seconds
    pub time: f64,
}
