//! Build command implementation

use super::open_store;
use crate::block::Block;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Build the tree for a block file and store it
pub fn execute(store: Option<PathBuf>, block: PathBuf, no_check: bool, quiet: bool) -> Result<()> {
    let tree_store = open_store(store)?;

    let parsed = Block::from_json_file(&block)
        .with_context(|| format!("failed to read block from {}", block.display()))?;
    let tree = if no_check {
        parsed.build_tree_unchecked()?
    } else {
        parsed.build_tree()?
    };

    let key = tree_store.write(&tree)?;

    if quiet {
        println!("{}", key);
        return Ok(());
    }

    println!("{}", "✓ Tree stored".green());
    println!("  • Root: {}", key.to_string().cyan());
    println!("  • Leaves: {}", tree.leaf_count());
    println!("  • Height: {}", tree.height());
    println!("  • File: {}", tree_store.blob_path(&key).display());

    Ok(())
}
