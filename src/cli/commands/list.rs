//! List command implementation

use super::open_store;
use anyhow::Result;
use std::path::PathBuf;

/// Print the root of every stored tree, one per line
pub fn execute(store: Option<PathBuf>) -> Result<()> {
    let tree_store = open_store(store)?;
    for key in tree_store.list()? {
        println!("{}", key);
    }
    Ok(())
}
