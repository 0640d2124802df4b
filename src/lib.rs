//! merkle_store - Merkle trees on disk with seek-based inclusion paths
//!
//! Builds a binary Merkle tree over an ordered list of transaction ids,
//! stores it in a compact file named by its root, and reads the inclusion
//! path of any single leaf with one seek per level instead of loading the
//! tree.
//!
//! # Core Features
//!
//! - **Tree Building**: double SHA-256 interior nodes, odd levels pair their last node with itself
//! - **Compact Blobs**: `[u64 LE leaf count][levels L-1..0]`, the root is the file name
//! - **Random-Access Reads**: `O(log n)` fixed-size reads per path
//! - **Verification**: recompute the root from a leaf, its index and its path
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use merkle_store::{Hash, MerkleTree, TreeStore};
//! use std::path::Path;
//!
//! let leaves: Vec<Hash> = (0u8..5).map(|i| merkle_store::core::sha256(&[i])).collect();
//! let tree = MerkleTree::from_hashes(&leaves)?;
//!
//! let store = TreeStore::open(Path::new("./trees"))?;
//! let key = store.write(&tree)?;
//!
//! let path = store.read_path(&key, 3)?;
//! assert!(merkle_store::verify(&leaves[3], &path, &tree.root()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod block;
pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    error::{ErrorKind, MerkleError, Result},
    types::{Hash, LeafSet, MerklePath, RootKey},
};

pub use crate::proofs::{merkle::MerkleTree, proof::MerklePathJson, verify::verify};

pub use crate::storage::{reader::PathReader, store::TreeStore};

pub use crate::config::StoreConfig;

/// Current version of merkle_store
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
