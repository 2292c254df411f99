//! Errors raised while building recipe trees.

use std::error::Error;
use std::fmt;

/// Failures of the tree builder and of the table lookups that depend on it.
///
/// Every variant is a defect in either the builder or the input tables; none
/// of them can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The ancestor path grew past the configured depth guard.
    DepthExceeded {
        /// Item being expanded when the guard tripped
        item: String,
        /// Length of the ancestor path at that point
        depth: usize,
        /// Configured guard
        limit: usize,
    },
    /// An item id is not present in the item table.
    MissingItem {
        /// The unknown id
        id: String,
    },
    /// A recipe names a machine that is not present in the machine table.
    MissingMachine {
        /// Recipe holding the reference
        recipe: String,
        /// The unknown machine id
        machine: String,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DepthExceeded { item, depth, limit } => write!(
                f,
                "recipe tree too deep at {item}: path length {depth} exceeds limit {limit}"
            ),
            TreeError::MissingItem { id } => write!(f, "unknown item id: {id}"),
            TreeError::MissingMachine { recipe, machine } => {
                write!(f, "recipe {recipe} references unknown machine: {machine}")
            }
        }
    }
}

impl Error for TreeError {}
