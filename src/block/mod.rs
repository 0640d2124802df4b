//! Block descriptions as input to tree building
//!
//! Reads the JSON a node returns for a block (`getblock` verbosity 1):
//! `hash`, `merkleroot` and the ordered `tx` list, all in display hex.
//! Other fields are ignored.

use crate::core::{
    error::{MerkleError, Result},
    types::{Hash, LeafSet},
};
use crate::proofs::{merkle::MerkleTree, proof::MerklePathJson};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Block description as found on disk
#[derive(Debug, Clone, Deserialize)]
pub struct BlockJson {
    /// Transaction ids, display hex, block order
    pub tx: Vec<String>,
    /// Block hash, display hex
    #[serde(default)]
    pub hash: Option<String>,
    /// Declared merkle root, display hex
    #[serde(default)]
    pub merkleroot: Option<String>,
}

/// Inclusion paths of a whole block, keyed by display-hex txid
pub type PathMap = BTreeMap<String, MerklePathJson>;

/// Block description with the inclusion path of every transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockPathsJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub merkleroot: String,
    pub tx: Vec<String>,
    pub merklepaths: PathMap,
}

/// Block with its hashes parsed into wire orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub hash: Option<Hash>,
    pub merkle_root: Option<Hash>,
    pub txids: Vec<Hash>,
}

impl Block {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let json: BlockJson = serde_json::from_str(s)?;
        Self::try_from(json)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let block = Self::from_json_str(&content)?;
        debug!(path = %path.display(), tx_count = block.txids.len(), "loaded block");
        Ok(block)
    }

    pub fn leaves(&self) -> Result<LeafSet> {
        LeafSet::new(self.txids.clone())
    }

    /// Build the tree, checking it against the declared merkle root if any
    pub fn build_tree(&self) -> Result<MerkleTree> {
        let tree = self.build_tree_unchecked()?;
        if let Some(declared) = self.merkle_root {
            if declared != tree.root() {
                return Err(MerkleError::RootMismatch {
                    declared: declared.to_display_hex(),
                    computed: tree.root().to_display_hex(),
                });
            }
        }
        Ok(tree)
    }

    /// Inclusion path of every transaction, keyed by txid
    ///
    /// A txid that appears more than once maps to its first position.
    pub fn merkle_paths(&self, tree: &MerkleTree) -> PathMap {
        let mut map = PathMap::new();
        for path in tree.paths() {
            map.entry(path.leaf.to_display_hex())
                .or_insert_with(|| MerklePathJson::from(&path));
        }
        map
    }

    /// Build the tree and describe the block with all of its paths
    pub fn with_paths(&self, check_root: bool) -> Result<BlockPathsJson> {
        let tree = if check_root {
            self.build_tree()?
        } else {
            self.build_tree_unchecked()?
        };
        let merklepaths = self.merkle_paths(&tree);
        debug!(paths = merklepaths.len(), "computed block-wide merkle paths");

        Ok(BlockPathsJson {
            hash: self.hash.map(|h| h.to_display_hex()),
            merkleroot: tree.root().to_display_hex(),
            tx: self.txids.iter().map(Hash::to_display_hex).collect(),
            merklepaths,
        })
    }

    /// Build the tree without looking at the declared merkle root
    pub fn build_tree_unchecked(&self) -> Result<MerkleTree> {
        Ok(MerkleTree::build(self.leaves()?))
    }
}

impl TryFrom<BlockJson> for Block {
    type Error = MerkleError;

    fn try_from(json: BlockJson) -> Result<Self> {
        let txids = json
            .tx
            .iter()
            .map(|t| Hash::from_display_hex(t))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let hash = json.hash.as_deref().map(Hash::from_display_hex).transpose()?;
        let merkle_root = json
            .merkleroot
            .as_deref()
            .map(Hash::from_display_hex)
            .transpose()?;

        Ok(Self {
            hash,
            merkle_root,
            txids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = r#"{
        "hash": "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
        "height": 0,
        "merkleroot": "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
        "tx": ["4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"]
    }"#;

    #[test]
    fn test_genesis_block() {
        let block = Block::from_json_str(GENESIS).unwrap();
        assert_eq!(block.txids.len(), 1);
        let tree = block.build_tree().unwrap();
        assert_eq!(tree.height(), 0);
        assert_eq!(
            tree.root_key().to_string(),
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
    }

    #[test]
    fn test_root_mismatch() {
        let json = GENESIS.replace(
            "\"merkleroot\": \"4a5e",
            "\"merkleroot\": \"5a5e",
        );
        let block = Block::from_json_str(&json).unwrap();
        assert!(matches!(
            block.build_tree(),
            Err(MerkleError::RootMismatch { .. })
        ));
        assert!(block.build_tree_unchecked().is_ok());
    }

    #[test]
    fn test_empty_tx_list() {
        let block = Block::from_json_str(r#"{"tx": []}"#).unwrap();
        assert!(matches!(
            block.build_tree(),
            Err(MerkleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_bad_txid() {
        assert!(matches!(
            Block::from_json_str(r#"{"tx": ["xyz"]}"#),
            Err(MerkleError::HexError(_))
        ));
    }

    #[test]
    fn test_every_block_path_verifies() {
        let txids: Vec<String> = (0..7u8)
            .map(|i| crate::core::hash::sha256(&[i]).to_display_hex())
            .collect();
        let json = serde_json::json!({ "tx": txids }).to_string();
        let block = Block::from_json_str(&json).unwrap();

        let described = block.with_paths(true).unwrap();
        assert_eq!(described.merklepaths.len(), 7);
        let root = Hash::from_display_hex(&described.merkleroot).unwrap();
        for (i, txid) in txids.iter().enumerate() {
            let entry = &described.merklepaths[txid];
            assert_eq!(entry.index, i as u64);
            assert_eq!(&entry.leaf, txid);
            let path = crate::core::types::MerklePath::try_from(entry).unwrap();
            assert!(crate::proofs::verify(&path.leaf, &path, &root));
        }
    }

    #[test]
    fn test_repeated_txid_keeps_first_position() {
        let txid = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
        let other = "0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098";
        let json = serde_json::json!({ "tx": [txid, other, txid] }).to_string();
        let block = Block::from_json_str(&json).unwrap();
        let tree = block.build_tree().unwrap();

        let map = block.merkle_paths(&tree);
        assert_eq!(map.len(), 2);
        assert_eq!(map[txid].index, 0);
        assert_eq!(map[other].index, 1);
    }

    #[test]
    fn test_with_paths_checks_declared_root() {
        let json = GENESIS.replace(
            "\"merkleroot\": \"4a5e",
            "\"merkleroot\": \"5a5e",
        );
        let block = Block::from_json_str(&json).unwrap();
        assert!(matches!(
            block.with_paths(true),
            Err(MerkleError::RootMismatch { .. })
        ));

        let described = block.with_paths(false).unwrap();
        assert_eq!(
            described.merkleroot,
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
        let only = &described.merklepaths[&described.merkleroot];
        assert!(only.path.is_empty());
    }
}
