//! Data loading functionality for recipe trees.
//!
//! Tables can be loaded either from the single JSON document written by the
//! data export step, or from a directory holding `items.csv`, `machines.csv`
//! and `recipes.csv`. Both paths produce the same [`RecipeTables`].

use csv::ReaderBuilder;
use log::{debug, warn};
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

use crate::models::{
    Item, ItemKind, ItemRow, ItemStack, Machine, MachineRow, Recipe, RecipeKind, RecipeRow,
    RecipeTables, TablesDocument,
};

/// Parses a stack list string (e.g., "item_iron_ore:2;item_sand:1").
///
/// Empty segments are skipped. A segment without a count is read as a count
/// of 1; a segment whose count does not parse is skipped with a warning.
///
/// # Example
///
/// ```
/// use recipe_tree::data::parse_stacks;
/// use recipe_tree::models::ItemStack;
///
/// assert_eq!(
///     parse_stacks("ore:2; sand"),
///     vec![ItemStack::new("ore", 2), ItemStack::new("sand", 1)]
/// );
/// assert!(parse_stacks("").is_empty());
/// ```
pub fn parse_stacks(s: &str) -> Vec<ItemStack> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.split_once(':') {
            Some((id, count)) => match count.trim().parse::<u32>() {
                Ok(count) => Some(ItemStack::new(id.trim(), count)),
                Err(_) => {
                    warn!("skipping stack with invalid count: {part}");
                    None
                }
            },
            None => Some(ItemStack::new(part, 1)),
        })
        .collect()
}

fn parse_item_kind(kind: &Option<String>) -> Option<ItemKind> {
    match kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("seed") => Some(ItemKind::Seed),
        Some(other) => {
            warn!("ignoring unknown item kind: {other}");
            None
        }
    }
}

fn parse_recipe_kind(kind: &Option<String>) -> Option<RecipeKind> {
    match kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("pour") => Some(RecipeKind::Pour),
        Some(other) => {
            warn!("ignoring unknown recipe kind: {other}");
            None
        }
    }
}

/// Parses a JSON tables document.
///
/// # Example
///
/// ```
/// use recipe_tree::data::parse_tables_json;
///
/// let json = r#"{
///     "items": [{ "id": "ore", "name": "Ore", "desc": ["raw"] }],
///     "machines": [{ "id": "m", "name": "Miner", "desc": "", "power": 5 }],
///     "recipes": [{ "id": "r", "name": "Mine", "machineId": "m",
///                   "ingredients": [], "products": [{ "id": "ore", "count": 1 }], "time": 2 }]
/// }"#;
/// let tables = parse_tables_json(json).unwrap();
/// assert_eq!(tables.recipes().len(), 1);
/// assert_eq!(tables.item("ore").unwrap().name, "Ore");
/// ```
pub fn parse_tables_json(json: &str) -> Result<RecipeTables, Box<dyn Error>> {
    let doc: TablesDocument = serde_json::from_str(json)?;
    Ok(doc.into())
}

/// Loads tables from a JSON document on disk.
pub fn load_json(path: &Path) -> Result<RecipeTables, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    parse_tables_json(&json)
}

/// Loads items from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `id, name, kind, description`
pub fn load_items(path: &Path) -> Result<Vec<Item>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut items = Vec::new();
    for result in rdr.deserialize() {
        let row: ItemRow = result?;
        items.push(Item {
            kind: parse_item_kind(&row.kind),
            description: row
                .description
                .map(|d| d.split(';').map(|line| line.trim().to_string()).collect())
                .unwrap_or_default(),
            id: row.id,
            name: row.name,
        });
    }
    Ok(items)
}

/// Loads machines from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `id, name, description, power`
pub fn load_machines(path: &Path) -> Result<Vec<Machine>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut machines = Vec::new();
    for result in rdr.deserialize() {
        let row: MachineRow = result?;
        machines.push(Machine {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            power: row.power.unwrap_or(0.0),
        });
    }
    Ok(machines)
}

/// Loads recipes from a CSV file, keeping file order.
///
/// # CSV Format
///
/// Expected columns: `id, name, kind, machine_id, ingredients, products, time`
///
/// # Notes
///
/// `ingredients` and `products` use the `item_id:count;item_id:count` form
/// understood by [`parse_stacks`]. A missing name falls back to the id.
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut recipes = Vec::new();
    for result in rdr.deserialize() {
        let row: RecipeRow = result?;
        recipes.push(Recipe {
            name: row.name.filter(|n| !n.is_empty()).unwrap_or_else(|| row.id.clone()),
            kind: parse_recipe_kind(&row.kind),
            machine_id: row.machine_id,
            ingredients: row.ingredients.as_deref().map(parse_stacks).unwrap_or_default(),
            products: row.products.as_deref().map(parse_stacks).unwrap_or_default(),
            time: row.time,
            id: row.id,
        });
    }
    Ok(recipes)
}

/// Loads all tables from a directory of CSV files.
pub fn load_csv_dir(data_dir: &Path) -> Result<RecipeTables, Box<dyn Error>> {
    let items = load_items(&data_dir.join("items.csv"))?;
    let machines = load_machines(&data_dir.join("machines.csv"))?;
    let recipes = load_recipes(&data_dir.join("recipes.csv"))?;
    Ok(RecipeTables::new(items, machines, recipes))
}

/// Loads tables from either a JSON document or a CSV directory.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use recipe_tree::data::load_tables;
///
/// let tables = load_tables(Path::new("data")).unwrap();
/// println!("Loaded {} recipes", tables.recipes().len());
/// ```
pub fn load_tables(path: &Path) -> Result<RecipeTables, Box<dyn Error>> {
    let tables = if path.is_dir() {
        load_csv_dir(path)?
    } else {
        load_json(path)?
    };
    debug!(
        "loaded {} items, {} machines, {} recipes from {}",
        tables.item_count(),
        tables.machine_count(),
        tables.recipes().len(),
        path.display()
    );
    Ok(tables)
}
