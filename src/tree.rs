//! Recipe tree model and builder.
//!
//! A recipe tree alternates item nodes and recipe nodes: the children of an
//! item node are the recipes producing that item, and the children of a
//! recipe node are the items it consumes. Cycles in the recipe graph are cut
//! at the first repeated item on a root-to-leaf path, which is kept as a
//! childless node flagged `duplicate`.

use log::debug;
use std::fmt;

use crate::error::TreeError;
use crate::layout::Tidy;
use crate::models::{Item, Recipe, RecipeTables};

/// Payload of an item node.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemNode {
    /// The wrapped item
    pub item: Item,
    /// The item already appears among this node's ancestors; never expanded
    pub duplicate: bool,
    /// Items produced by any recipe that consumes this item. Only filled at
    /// the root; informational and never expanded into children.
    pub possible_products: Vec<Item>,
}

/// Payload of a recipe node.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeNode {
    /// The wrapped recipe
    pub recipe: Recipe,
}

/// What a tree node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An item, at an even depth
    Item(ItemNode),
    /// A recipe, at an odd depth
    Recipe(RecipeNode),
}

/// A node of a recipe tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Item or recipe payload
    pub kind: NodeKind,
    /// Level in the tree; items are even, recipes odd
    pub depth: usize,
    /// Offset along the layout axis. Zero until [`crate::layout::layout`]
    /// runs, absolute (and non-negative) afterwards.
    pub position: f64,
    /// Children in enumeration order
    pub children: Vec<Node>,
}

impl Node {
    fn item(item: &Item, depth: usize) -> Self {
        Node {
            kind: NodeKind::Item(ItemNode {
                item: item.clone(),
                duplicate: false,
                possible_products: Vec::new(),
            }),
            depth,
            position: 0.0,
            children: Vec::new(),
        }
    }

    fn recipe(recipe: &Recipe, depth: usize, children: Vec<Node>) -> Self {
        Node {
            kind: NodeKind::Recipe(RecipeNode {
                recipe: recipe.clone(),
            }),
            depth,
            position: 0.0,
            children,
        }
    }

    /// Id of the wrapped item or recipe.
    pub fn id(&self) -> &str {
        match &self.kind {
            NodeKind::Item(n) => &n.item.id,
            NodeKind::Recipe(n) => &n.recipe.id,
        }
    }

    /// Display name of the wrapped item or recipe.
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Item(n) => &n.item.name,
            NodeKind::Recipe(n) => &n.recipe.name,
        }
    }

    /// The item payload, if this is an item node.
    pub fn as_item(&self) -> Option<&ItemNode> {
        match &self.kind {
            NodeKind::Item(n) => Some(n),
            NodeKind::Recipe(_) => None,
        }
    }

    /// The recipe payload, if this is a recipe node.
    pub fn as_recipe(&self) -> Option<&RecipeNode> {
        match &self.kind {
            NodeKind::Recipe(n) => Some(n),
            NodeKind::Item(_) => None,
        }
    }

    /// Returns true for item nodes.
    pub fn is_item(&self) -> bool {
        matches!(self.kind, NodeKind::Item(_))
    }

    /// Returns true for item nodes that cut a cycle.
    pub fn is_duplicate(&self) -> bool {
        self.as_item().is_some_and(|n| n.duplicate)
    }

    /// All nodes of the tree in pre-order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Deepest `depth` value in the tree.
    pub fn max_depth(&self) -> usize {
        self.nodes().iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl Tidy for Node {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn set_position(&mut self, position: f64) {
        self.position = position;
    }
}

/// Tunables for [`build`].
#[derive(Clone, Copy)]
pub struct BuildOptions {
    /// Longest ancestor path allowed before the build aborts
    pub max_depth: usize,
    /// Recipes for which this returns true are not expanded as children
    pub exclude: fn(&Recipe) -> bool,
    /// Treat seed items as gathered leaves
    pub seeds_as_leaves: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            max_depth: 10,
            exclude: Recipe::is_pour,
            seeds_as_leaves: true,
        }
    }
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("max_depth", &self.max_depth)
            .field("seeds_as_leaves", &self.seeds_as_leaves)
            .finish_non_exhaustive()
    }
}

struct TreeBuilder<'a> {
    tables: &'a RecipeTables,
    options: &'a BuildOptions,
}

impl<'a> TreeBuilder<'a> {
    fn lookup(&self, id: &str) -> Result<&'a Item, TreeError> {
        self.tables
            .item(id)
            .ok_or_else(|| TreeError::MissingItem { id: id.to_string() })
    }

    /// Items produced by recipes consuming `item`, deduplicated in first-seen order.
    ///
    /// The exclusion hook does not apply here.
    fn possible_products(&self, item: &Item) -> Result<Vec<Item>, TreeError> {
        let mut seen: Vec<&str> = Vec::new();
        for recipe in self.tables.recipes_consuming(&item.id) {
            for product in &recipe.products {
                if !seen.contains(&product.id.as_str()) {
                    seen.push(&product.id);
                }
            }
        }
        seen.into_iter()
            .map(|id| self.lookup(id).cloned())
            .collect()
    }

    fn expand(&self, item: &'a Item, path: &mut Vec<&'a str>) -> Result<Node, TreeError> {
        let mut node = Node::item(item, 2 * path.len());

        if path.contains(&item.id.as_str()) {
            if let NodeKind::Item(n) = &mut node.kind {
                n.duplicate = true;
            }
            return Ok(node);
        }

        if path.is_empty() {
            let products = self.possible_products(item)?;
            if let NodeKind::Item(n) = &mut node.kind {
                n.possible_products = products;
            }
        }

        if path.len() > self.options.max_depth {
            return Err(TreeError::DepthExceeded {
                item: item.id.clone(),
                depth: path.len(),
                limit: self.options.max_depth,
            });
        }

        if self.options.seeds_as_leaves && item.is_seed() {
            return Ok(node);
        }

        let exclude = self.options.exclude;
        path.push(&item.id);
        for recipe in self.tables.recipes_producing(&item.id).filter(|r| !exclude(*r)) {
            let children = recipe
                .ingredients
                .iter()
                .map(|ingredient| {
                    let ingredient = self.lookup(&ingredient.id)?;
                    self.expand(ingredient, path)
                })
                .collect::<Result<Vec<_>, _>>()?;
            node.children.push(Node::recipe(recipe, node.depth + 1, children));
        }
        path.pop();

        Ok(node)
    }
}

/// Builds the recipe tree rooted at `target`.
///
/// Every recipe producing an item becomes a child of that item's node, in
/// table order; every ingredient of a recipe becomes a child of the recipe's
/// node. An item that already appears on the path from the root is emitted
/// as a childless node with `duplicate` set.
///
/// # Errors
///
/// * [`TreeError::MissingItem`] if `target` or any ingredient is not in the item table
/// * [`TreeError::DepthExceeded`] if the ancestor path exceeds `options.max_depth`
///
/// # Example
///
/// ```
/// use recipe_tree::models::{Item, ItemStack, Recipe, RecipeTables};
/// use recipe_tree::tree::{build, BuildOptions};
///
/// let tables = RecipeTables::new(
///     vec![Item::new("ore", "Ore"), Item::new("ingot", "Ingot")],
///     vec![],
///     vec![Recipe::new("smelt", "furnace", vec![ItemStack::new("ore", 1)], vec![ItemStack::new("ingot", 1)], 2.0)],
/// );
/// let root = build("ingot", &tables, &BuildOptions::default()).unwrap();
/// assert_eq!(root.children.len(), 1);
/// assert_eq!(root.children[0].children[0].id(), "ore");
/// assert_eq!(root.children[0].children[0].depth, 2);
/// ```
pub fn build(target: &str, tables: &RecipeTables, options: &BuildOptions) -> Result<Node, TreeError> {
    let builder = TreeBuilder { tables, options };
    let item = builder.lookup(target)?;
    let mut path = Vec::new();
    let root = builder.expand(item, &mut path)?;
    debug!(
        "built recipe tree for {target}: {} nodes, max depth {}",
        root.len(),
        root.max_depth()
    );
    Ok(root)
}
