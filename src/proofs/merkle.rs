//! Merkle tree construction
//!
//! Levels are built bottom-up, pairing entries left to right. When a level
//! has an odd number of entries the last one is combined with itself. That
//! duplicate only exists implicitly: it never appears in any level vector,
//! so every level `i + 1` holds exactly `ceil(len(level i) / 2)` entries and
//! the on-disk layout can be derived from the leaf count alone.

use crate::core::{
    error::{MerkleError, Result},
    hash::combine,
    types::{tree_height, Hash, LeafSet, MerklePath, RootKey},
};

/// Fully materialised Merkle tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All levels of the tree (leaves at index 0, root level last)
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree over a non-empty leaf set
    pub fn build(leaves: LeafSet) -> Self {
        let leaves = leaves.into_inner();
        let height = tree_height(leaves.len() as u64) as usize;

        let mut levels = Vec::with_capacity(height + 1);
        levels.push(leaves);

        while levels[levels.len() - 1].len() > 1 {
            let next = parent_level(&levels[levels.len() - 1]);
            levels.push(next);
        }

        debug_assert_eq!(levels.len(), height + 1);
        Self { levels }
    }

    /// Build a tree from a list of hashes
    pub fn from_hashes(hashes: &[Hash]) -> Result<Self> {
        Ok(Self::build(LeafSet::new(hashes.to_vec())?))
    }

    pub fn root(&self) -> Hash {
        self.levels[self.levels.len() - 1][0]
    }

    pub fn root_key(&self) -> RootKey {
        RootKey::from_root(self.root())
    }

    /// Number of levels above the leaves
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaf_count(&self) -> u64 {
        self.levels[0].len() as u64
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.levels[0]
    }

    /// All levels, leaves first
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    pub fn level_sizes(&self) -> Vec<u64> {
        self.levels.iter().map(|l| l.len() as u64).collect()
    }

    /// Inclusion path for `index` taken straight from the in-memory levels
    pub fn path(&self, index: u64) -> Result<MerklePath> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::index_out_of_range(index, leaf_count));
        }
        Ok(self.path_unchecked(index))
    }

    /// Inclusion paths of every leaf, in leaf order
    pub fn paths(&self) -> Vec<MerklePath> {
        (0..self.leaf_count())
            .map(|index| self.path_unchecked(index))
            .collect()
    }

    fn path_unchecked(&self, index: u64) -> MerklePath {
        let mut siblings = Vec::with_capacity(self.height());
        let mut position = index as usize;
        for level in &self.levels[..self.height()] {
            let sibling = if position & 1 == 1 {
                level[position - 1]
            } else if position + 1 < level.len() {
                level[position + 1]
            } else {
                level[position]
            };
            siblings.push(sibling);
            position >>= 1;
        }

        MerklePath::new(self.levels[0][index as usize], index, siblings)
    }
}

fn parent_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => combine(left, right),
            [last] => combine(last, last),
            _ => unreachable!("chunks(2) yields one or two entries"),
        })
        .collect()
}
