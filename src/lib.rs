//! # Recipe Tree
//!
//! A command-line tool and library for drawing production recipe graphs as
//! tidy trees.
//!
//! Recipes form a cyclic hyper-graph: a recipe consumes several items and
//! produces several items, and chains of recipes frequently loop back on
//! themselves. This crate provides:
//!
//! - A cycle-safe builder that expands the graph into a finite tree rooted at
//!   a chosen item, alternating item nodes and recipe nodes
//! - A linear-time layout engine that positions every node of any tree so
//!   that no two subtrees overlap and every parent sits centered over its
//!   subtree
//!
//! ## Modules
//!
//! - [`models`] - Items, machines, recipes and the lookup tables
//! - [`data`] - JSON and CSV table loading
//! - [`tree`] - Tree model and builder
//! - [`layout`] - Tidy tree layout engine
//! - [`plan`] - First-recipe production plan
//! - [`display`] - Output formatting and display utilities
//! - [`error`] - Build errors
//!
//! ## Example Usage
//!
//! ```
//! use recipe_tree::{
//!     layout::layout,
//!     models::{Item, ItemStack, Recipe, RecipeTables},
//!     tree::{build, BuildOptions},
//! };
//!
//! let tables = RecipeTables::new(
//!     vec![Item::new("i1", "Gear"), Item::new("i2", "Plate"), Item::new("i3", "Bolt")],
//!     vec![],
//!     vec![
//!         Recipe::new("r1", "m1", vec![ItemStack::new("i2", 1), ItemStack::new("i3", 1)], vec![ItemStack::new("i1", 1)], 2.0),
//!         Recipe::new("r2", "m1", vec![], vec![ItemStack::new("i2", 1)], 1.0),
//!         Recipe::new("r3", "m1", vec![], vec![ItemStack::new("i3", 1)], 1.0),
//!     ],
//! );
//!
//! let mut root = build("i1", &tables, &BuildOptions::default()).unwrap();
//! layout(&mut root, 1.0);
//!
//! let ingredients = &root.children[0].children;
//! assert_eq!(ingredients[0].position, 0.0);
//! assert_eq!(root.position, 0.5);
//! assert_eq!(ingredients[1].position, 1.0);
//! ```
//!
//! ## Cycles
//!
//! An item that already appears on the path from the root is kept as a
//! childless node marked `duplicate`, so a tree is always finite. A depth
//! guard (10 ancestors by default) turns runaway expansion into an error
//! instead of a silently truncated tree.

pub mod data;
pub mod display;
pub mod error;
pub mod layout;
pub mod models;
pub mod plan;
pub mod tree;
pub mod wasm;
