//! Verify command implementation

use crate::core::types::{MerklePath, RootKey};
use crate::proofs::{verify, verify_with_leaf_count, MerklePathJson};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

/// Verify a JSON path against `root`; fails when the path is invalid
pub fn execute(proof: PathBuf, root: String, leaf_count: Option<u64>, quiet: bool) -> Result<()> {
    let key = RootKey::parse(&root)?;

    let json = if proof.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        MerklePathJson::from_json(&buf)?
    } else {
        MerklePathJson::from_file(&proof)
            .with_context(|| format!("failed to read path from {}", proof.display()))?
    };
    let path = MerklePath::try_from(&json)?;

    let valid = match leaf_count {
        Some(n) => verify_with_leaf_count(&path.leaf, &path, &key.root(), n),
        None => verify(&path.leaf, &path, &key.root()),
    };

    if !valid {
        bail!("path for index {} does not lead to root {}", path.index, key);
    }

    if !quiet {
        println!("{}", "✓ Path verified".green());
        println!("  • Leaf: {}", path.leaf);
        println!("  • Index: {}", path.index);
        println!("  • Root: {}", key);
    }
    Ok(())
}
