//! Core types and utilities for merkle_store
//!
//! This module contains the hash type and its textual orientations, the
//! error type, and the double SHA-256 combiner used for every interior node.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{ErrorKind, MerkleError, Result};
pub use hash::{combine, sha256, sha256d};
pub use types::{level_sizes, tree_height, Hash, LeafSet, MerklePath, RootKey, HASH_SIZE};
