//! Tree blob encoding
//!
//! See [`crate::storage::layout`] for the byte layout. Writing is a single
//! forward pass and is not atomic on its own; [`crate::storage::TreeStore`]
//! publishes through a temporary file when atomic writes are enabled.

use crate::core::error::Result;
use crate::proofs::merkle::MerkleTree;
use crate::storage::layout::HEADER_SIZE;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Blob header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    /// Number of leaves in the stored tree
    pub leaf_count: u64,
}

impl BlobHeader {
    pub const SIZE: usize = HEADER_SIZE as usize;

    pub fn new(leaf_count: u64) -> Self {
        Self { leaf_count }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u64::<LittleEndian>(self.leaf_count)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let leaf_count = reader.read_u64::<LittleEndian>()?;
        Ok(Self { leaf_count })
    }
}

/// Write `tree` as a blob: header, then levels L-1 down to 0
///
/// Returns the number of bytes written. The writer is flushed before
/// returning so buffered failures surface here.
pub fn write_tree<W: Write>(tree: &MerkleTree, writer: &mut W) -> Result<u64> {
    BlobHeader::new(tree.leaf_count()).write_to(writer)?;

    let mut written = HEADER_SIZE;
    for level in tree.levels()[..tree.height()].iter().rev() {
        for hash in level {
            writer.write_all(hash.as_bytes())?;
        }
        written += (level.len() * crate::core::types::HASH_SIZE) as u64;
    }

    writer.flush()?;
    Ok(written)
}

/// Encode `tree` into an in-memory blob
pub fn encode_tree(tree: &MerkleTree) -> Vec<u8> {
    let mut bytes = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_tree(tree, &mut bytes);
    bytes
}
