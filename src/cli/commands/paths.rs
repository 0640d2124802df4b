//! Paths command implementation

use crate::block::Block;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Print the block with the inclusion path of every transaction
pub fn execute(block: PathBuf, output: Option<PathBuf>, no_check: bool) -> Result<()> {
    let parsed = Block::from_json_file(&block)
        .with_context(|| format!("failed to read block from {}", block.display()))?;
    let described = parsed.with_paths(!no_check)?;

    let json = serde_json::to_string_pretty(&described)?;
    match output {
        Some(file) => std::fs::write(file, json + "\n")?,
        None => println!("{}", json),
    }

    Ok(())
}
