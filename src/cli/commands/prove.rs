//! Prove command implementation

use super::open_store;
use crate::core::types::RootKey;
use crate::proofs::MerklePathJson;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Read the path of leaf `index` and print it as JSON
pub fn execute(
    store: Option<PathBuf>,
    root: String,
    index: u64,
    output: Option<PathBuf>,
    check: bool,
) -> Result<()> {
    let key = RootKey::parse(&root)?;
    let tree_store = open_store(store)?;

    let path = tree_store.read_path(&key, index)?;
    if check && !path.verify(&key.root()) {
        bail!("path for index {} does not lead to root {}", index, key);
    }

    let json = MerklePathJson::from(&path).to_json_pretty()?;
    match output {
        Some(file) => std::fs::write(file, json + "\n")?,
        None => println!("{}", json),
    }

    Ok(())
}
