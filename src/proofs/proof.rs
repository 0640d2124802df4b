//! JSON form of an inclusion path
//!
//! Every hash is rendered in display orientation so the output can be
//! compared directly with txids printed by a node or block explorer.

use crate::core::{
    error::Result,
    types::{Hash, MerklePath},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read response: `{ "leaf": ..., "index": ..., "path": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePathJson {
    /// Leaf hash, display hex
    pub leaf: String,
    /// Leaf position in the original list
    pub index: u64,
    /// Sibling hashes, leaf-adjacent first, display hex
    pub path: Vec<String>,
}

impl From<&MerklePath> for MerklePathJson {
    fn from(path: &MerklePath) -> Self {
        Self {
            leaf: path.leaf.to_display_hex(),
            index: path.index,
            path: path.siblings.iter().map(Hash::to_display_hex).collect(),
        }
    }
}

impl TryFrom<&MerklePathJson> for MerklePath {
    type Error = crate::core::error::MerkleError;

    fn try_from(json: &MerklePathJson) -> Result<Self> {
        let leaf = Hash::from_display_hex(&json.leaf)?;
        let siblings = json
            .path
            .iter()
            .map(|s| Hash::from_display_hex(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(MerklePath::new(leaf, json.index, siblings))
    }
}

impl MerklePathJson {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
