//! Recipe Tree - Command Line Interface
//!
//! This is the main entry point for the recipe tree tool.
//! Run with `--help` to see all available options.

use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;

use recipe_tree::{
    data::load_tables,
    display::{display_items, display_plan, display_tree},
    layout::{layout_with, LayoutOptions},
    models::Recipe,
    plan::first_recipe_plan,
    tree::{build, BuildOptions},
};

/// Command-line arguments for Recipe Tree.
#[derive(Parser, Debug)]
#[command(name = "recipe-tree")]
#[command(author, version, about = "Lay out the recipe tree of an item as a tidy diagram", long_about = None)]
struct Args {
    /// Item id to build the tree for
    #[arg(short, long, required_unless_present = "list")]
    target: Option<String>,

    /// JSON tables document, or a directory with items.csv, machines.csv and recipes.csv
    #[arg(short, long, default_value = "data")]
    data: PathBuf,

    /// Minimum distance between two nodes on the same level
    #[arg(short, long, default_value = "1.0")]
    min_distance: f64,

    /// Longest ancestor path allowed before the build aborts
    #[arg(long, default_value = "10")]
    max_depth: usize,

    /// Expand liquid pouring recipes as well
    #[arg(long, default_value = "false")]
    include_pour: bool,

    /// Expand recipes producing seeds instead of treating seeds as leaves
    #[arg(long, default_value = "false")]
    expand_seeds: bool,

    /// Print the first-recipe production plan
    #[arg(long, default_value = "false")]
    plan: bool,

    /// List items whose name contains this text (empty lists everything)
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    list: Option<String>,
}

fn include_everything(_: &Recipe) -> bool {
    false
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if !args.data.exists() {
        eprintln!(
            "Error: '{}' not found. Pass --data or run from the project root.",
            args.data.display()
        );
        std::process::exit(1);
    }
    if !(args.min_distance.is_finite() && args.min_distance > 0.0) {
        eprintln!("Error: --min-distance must be a positive number.");
        std::process::exit(1);
    }

    let tables = load_tables(&args.data)?;
    info!(
        "loaded {} items and {} recipes",
        tables.item_count(),
        tables.recipes().len()
    );

    if let Some(query) = &args.list {
        display_items(&tables.search(query));
        return Ok(());
    }

    let Some(target) = &args.target else {
        return Ok(());
    };

    let exclude: fn(&Recipe) -> bool = if args.include_pour {
        include_everything
    } else {
        Recipe::is_pour
    };
    let options = BuildOptions {
        max_depth: args.max_depth,
        exclude,
        seeds_as_leaves: !args.expand_seeds,
    };

    println!("Recipe Tree");
    println!("================================================================");
    println!();
    println!("Configuration:");
    println!("  Target:          {}", target);
    println!("  Min Distance:    {}", args.min_distance);
    println!("  Max Depth:       {}", args.max_depth);
    println!("  Pour Recipes:    {}", if args.include_pour { "included" } else { "excluded" });
    println!("  Seeds:           {}", if args.expand_seeds { "expanded" } else { "leaves" });

    let mut root = build(target, &tables, &options)?;
    let stats = layout_with(
        &mut root,
        &LayoutOptions {
            min_distance: args.min_distance,
        },
    );
    info!(
        "{} nodes, {} cursor steps, {} threads",
        stats.nodes, stats.cursor_steps, stats.threads
    );

    display_tree(&root);

    if args.plan {
        let lines = first_recipe_plan(&root, &tables)?;
        display_plan(&lines);
    }

    Ok(())
}
