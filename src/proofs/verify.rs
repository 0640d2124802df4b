//! Inclusion path verification

use crate::core::{
    hash::combine,
    types::{tree_height, Hash, MerklePath},
};

/// Recompute the root from `leaf` and `path` and compare it with `root`
///
/// Bit `k` of the index says which side the working hash sits on at height
/// `k`: set means it is the right child and the sibling goes on the left.
pub fn verify(leaf: &Hash, path: &MerklePath, root: &Hash) -> bool {
    compute_root(leaf, path.index, &path.siblings) == *root
}

/// Like [`verify`], but also checks the path against a known leaf count
///
/// Without the leaf count a caller cannot tell a path of the wrong length
/// apart from one that happens to hash to the right root, so use this
/// whenever N is known.
pub fn verify_with_leaf_count(leaf: &Hash, path: &MerklePath, root: &Hash, leaf_count: u64) -> bool {
    if path.index >= leaf_count {
        return false;
    }
    if path.siblings.len() != tree_height(leaf_count) as usize {
        return false;
    }
    verify(leaf, path, root)
}

/// Fold `siblings` over `leaf`, leaf-adjacent sibling first
pub fn compute_root(leaf: &Hash, index: u64, siblings: &[Hash]) -> Hash {
    let mut working = *leaf;
    let mut bits = index;
    for sibling in siblings {
        working = if bits & 1 == 1 {
            combine(sibling, &working)
        } else {
            combine(&working, sibling)
        };
        bits >>= 1;
    }
    working
}

impl MerklePath {
    /// Verify this path's own leaf against `root`
    pub fn verify(&self, root: &Hash) -> bool {
        verify(&self.leaf, self, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha256;
    use crate::proofs::merkle::MerkleTree;

    fn leaves(n: usize) -> Vec<Hash> {
        (0..n).map(|i| sha256(&(i as u64).to_le_bytes())).collect()
    }

    #[test]
    fn test_every_in_memory_path_verifies() {
        for n in 1..=33 {
            let tree = MerkleTree::from_hashes(&leaves(n)).unwrap();
            for i in 0..n as u64 {
                let path = tree.path(i).unwrap();
                assert!(path.verify(&tree.root()), "n={} i={}", n, i);
                assert!(verify_with_leaf_count(
                    &path.leaf,
                    &path,
                    &tree.root(),
                    n as u64
                ));
            }
        }
    }

    #[test]
    fn test_single_leaf_empty_path() {
        let h = leaves(1);
        let path = MerklePath::new(h[0], 0, vec![]);
        assert!(verify(&h[0], &path, &h[0]));
        assert!(!verify(&h[0], &path, &sha256(b"other")));
    }

    #[test]
    fn test_wrong_index_fails() {
        let tree = MerkleTree::from_hashes(&leaves(8)).unwrap();
        let mut path = tree.path(3).unwrap();
        path.index = 2;
        assert!(!path.verify(&tree.root()));
    }

    #[test]
    fn test_wrong_leaf_fails() {
        let h = leaves(6);
        let tree = MerkleTree::from_hashes(&h).unwrap();
        let path = tree.path(1).unwrap();
        assert!(!verify(&h[2], &path, &tree.root()));
    }

    #[test]
    fn test_leaf_count_mismatch_rejected() {
        let tree = MerkleTree::from_hashes(&leaves(5)).unwrap();
        let path = tree.path(4).unwrap();
        assert!(verify_with_leaf_count(&path.leaf, &path, &tree.root(), 5));
        // Height of 16 leaves is 4, the path only has 3 siblings
        assert!(!verify_with_leaf_count(&path.leaf, &path, &tree.root(), 16));
        assert!(!verify_with_leaf_count(&path.leaf, &path, &tree.root(), 4));
    }
}
