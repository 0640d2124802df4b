//! Info command implementation

use super::open_store;
use crate::core::types::RootKey;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Show header information for a stored tree
pub fn execute(store: Option<PathBuf>, root: String, json: bool) -> Result<()> {
    let key = RootKey::parse(&root)?;
    let tree_store = open_store(store)?;
    let info = tree_store.info(&key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Tree Information".bold());
    println!("  • Root: {}", info.root.cyan());
    println!("  • Leaves: {}", info.leaf_count);
    println!("  • Height: {}", info.height);
    println!("  • Level sizes: {:?}", info.level_sizes);
    println!("  • Size: {} bytes", info.size_bytes);
    Ok(())
}
