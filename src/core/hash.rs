//! Hash utilities for merkle_store
//!
//! Interior nodes are `SHA256(SHA256(left || right))` over wire-oriented bytes.

use crate::core::types::Hash;
use sha2::{Digest, Sha256};

/// Compute SHA-256 of data
pub fn sha256(data: &[u8]) -> Hash {
    Hash::from_bytes(Sha256::digest(data).into())
}

/// Compute double SHA-256 of data
pub fn sha256d(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Hash::from_bytes(Sha256::digest(first).into())
}

/// Parent of two nodes. Order matters: `combine(a, b) != combine(b, a)`.
pub fn combine(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    let first = hasher.finalize();
    Hash::from_bytes(Sha256::digest(first).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256(b"").to_wire_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256d_empty() {
        assert_eq!(
            sha256d(b"").to_wire_hex(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_sha256d_is_sha256_twice() {
        let data = b"merkle_store";
        let once = sha256(data);
        assert_eq!(sha256d(data), sha256(once.as_bytes()));
    }

    #[test]
    fn test_combine_matches_concatenation() {
        let left = sha256(b"left");
        let right = sha256(b"right");
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(left.as_bytes());
        concat.extend_from_slice(right.as_bytes());
        assert_eq!(combine(&left, &right), sha256d(&concat));
    }

    #[test]
    fn test_combine_order_sensitive() {
        let a = sha256(b"first");
        let b = sha256(b"second");
        let ab = combine(&a, &b);

        assert_ne!(ab, a);
        assert_ne!(ab, b);
        assert_eq!(ab, combine(&a, &b));
        assert_ne!(ab, combine(&b, &a));
    }

    #[test]
    fn test_self_combine_differs_from_input() {
        let a = sha256(b"only");
        assert_ne!(combine(&a, &a), a);
    }
}
