//! Core data types for merkle_store
//!
//! A [`Hash`] always holds its bytes in wire orientation (the order they are
//! hashed and stored on disk). Textual forms exist in two orientations:
//!
//! - **display**: byte-reversed hex, the way block explorers print txids
//! - **wire**: the raw bytes hex encoded as-is
//!
//! Conversion between the two only happens at the edges of the system.

use crate::core::error::{MerkleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a hash in bytes
pub const HASH_SIZE: usize = 32;

/// 32-byte double SHA-256 value in wire orientation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from wire-oriented bytes
    pub fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Get the underlying wire bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Create a zero hash (for testing and special cases)
    pub fn zero() -> Self {
        Hash([0u8; HASH_SIZE])
    }

    /// The same bytes in the opposite orientation
    pub fn reversed(&self) -> Self {
        let mut bytes = self.0;
        bytes.reverse();
        Hash(bytes)
    }

    /// Parse display-oriented (byte-reversed) hex, e.g. a txid as printed by a node
    pub fn from_display_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        Ok(Self::from_wire_hex(s)?.reversed())
    }

    /// Render in display orientation
    pub fn to_display_hex(&self) -> String {
        hex::encode(self.reversed().0)
    }

    /// Parse wire-oriented hex
    pub fn from_wire_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut array = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut array)?;
        Ok(Hash(array))
    }

    /// Render in wire orientation
    pub fn to_wire_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_display_hex()[..8])
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

// Hashes cross the JSON boundary in display orientation
impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_display_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Hash::from_display_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}

/// Lookup key of a stored tree: its root rendered as lowercase display hex
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootKey(Hash);

impl RootKey {
    pub fn from_root(root: Hash) -> Self {
        RootKey(root)
    }

    /// Parse a key, rejecting anything that is not exactly 64 hex characters
    pub fn parse(key: &str) -> Result<Self> {
        let trimmed = key.trim();
        if trimmed.len() != HASH_SIZE * 2 {
            return Err(MerkleError::invalid_root_key(key));
        }
        Hash::from_display_hex(trimmed)
            .map(RootKey)
            .map_err(|_| MerkleError::invalid_root_key(key))
    }

    /// The root hash in wire orientation
    pub fn root(&self) -> Hash {
        self.0
    }

    /// The file name used for the blob
    pub fn file_name(&self) -> String {
        self.0.to_display_hex()
    }
}

impl FromStr for RootKey {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        RootKey::parse(s)
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

impl fmt::Debug for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RootKey({})", self.file_name())
    }
}

/// Ordered, non-empty list of leaf hashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSet(Vec<Hash>);

impl LeafSet {
    pub fn new(leaves: Vec<Hash>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::invalid_input("leaf set must not be empty"));
        }
        Ok(LeafSet(leaves))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Hash] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Hash> {
        self.0
    }
}

impl TryFrom<Vec<Hash>> for LeafSet {
    type Error = MerkleError;

    fn try_from(leaves: Vec<Hash>) -> Result<Self> {
        LeafSet::new(leaves)
    }
}

/// Inclusion path for one leaf
///
/// `siblings` runs from the leaf's immediate sibling up to the level just
/// below the root, so its length equals the tree height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePath {
    /// The leaf being proven
    pub leaf: Hash,
    /// Position of the leaf in the original list
    pub index: u64,
    /// Sibling hashes, leaf-adjacent first
    pub siblings: Vec<Hash>,
}

impl MerklePath {
    pub fn new(leaf: Hash, index: u64, siblings: Vec<Hash>) -> Self {
        Self {
            leaf,
            index,
            siblings,
        }
    }

    pub fn height(&self) -> usize {
        self.siblings.len()
    }
}

/// Height of a tree with `leaf_count` leaves: `ceil(log2(leaf_count))`
///
/// A single leaf is its own root, so its height is zero.
pub fn tree_height(leaf_count: u64) -> u32 {
    if leaf_count <= 1 {
        0
    } else {
        u64::BITS - (leaf_count - 1).leading_zeros()
    }
}

/// Sizes of every level from the leaves (index 0) up to the root
pub fn level_sizes(leaf_count: u64) -> Vec<u64> {
    let mut sizes = Vec::with_capacity(tree_height(leaf_count) as usize + 1);
    let mut size = leaf_count;
    sizes.push(size);
    while size > 1 {
        size = size.div_ceil(2);
        sizes.push(size);
    }
    sizes
}
