//! Merkle tree building and inclusion path verification

pub mod merkle;
pub mod proof;
pub mod verify;

// Re-export commonly used items
pub use merkle::MerkleTree;
pub use proof::MerklePathJson;
pub use verify::{compute_root, verify, verify_with_leaf_count};
