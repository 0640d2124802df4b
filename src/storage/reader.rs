//! Random-access path reader
//!
//! Reads the inclusion path of one leaf from a stored blob without loading
//! the body: one absolute seek and one or two 32-byte reads per level.

use crate::core::{
    error::{MerkleError, Result},
    types::{Hash, MerklePath, RootKey, HASH_SIZE},
};
use crate::storage::blob::BlobHeader;
use crate::storage::layout::{BlobLayout, HEADER_SIZE};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

const ENTRY_SIZE: i64 = HASH_SIZE as i64;

/// Reader over one stored blob
///
/// Construction validates the header and the blob length, so a truncated
/// blob is rejected before any path is read.
pub struct PathReader<R> {
    reader: R,
    key: RootKey,
    layout: BlobLayout,
}

impl PathReader<File> {
    /// Open the blob at `path`, stored under `key`
    pub fn open(path: &Path, key: RootKey) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => MerkleError::not_found(key.to_string()),
            _ => MerkleError::Io(e),
        })?;
        Self::new(file, key)
    }
}

impl<R: Read + Seek> PathReader<R> {
    /// Wrap any seekable source holding a blob stored under `key`
    pub fn new(mut reader: R, key: RootKey) -> Result<Self> {
        let blob_len = reader.seek(SeekFrom::End(0))?;
        if blob_len < HEADER_SIZE {
            warn!(key = %key, blob_len, "tree blob shorter than its header");
            return Err(MerkleError::corrupt(
                key.to_string(),
                format!("{} bytes is shorter than the {} byte header", blob_len, HEADER_SIZE),
            ));
        }

        reader.seek(SeekFrom::Start(0))?;
        let header = BlobHeader::read_from(&mut reader).map_err(|e| eof_as_corrupt(e, &key))?;

        let layout = BlobLayout::new(header.leaf_count).ok_or_else(|| {
            MerkleError::corrupt(
                key.to_string(),
                format!("invalid leaf count {}", header.leaf_count),
            )
        })?;

        if blob_len != layout.blob_len() {
            warn!(
                key = %key,
                blob_len,
                expected = layout.blob_len(),
                "tree blob length does not match its header"
            );
            return Err(MerkleError::corrupt(
                key.to_string(),
                format!(
                    "blob is {} bytes, {} leaves need {}",
                    blob_len,
                    header.leaf_count,
                    layout.blob_len()
                ),
            ));
        }

        debug!(
            key = %key,
            leaf_count = header.leaf_count,
            height = layout.height(),
            "opened tree blob"
        );

        Ok(Self {
            reader,
            key,
            layout,
        })
    }

    pub fn leaf_count(&self) -> u64 {
        self.layout.leaf_count()
    }

    pub fn layout(&self) -> &BlobLayout {
        &self.layout
    }

    pub fn key(&self) -> RootKey {
        self.key
    }

    /// Read the inclusion path of leaf `index`
    pub fn read(&mut self, index: u64) -> Result<MerklePath> {
        let leaf_count = self.layout.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::index_out_of_range(index, leaf_count));
        }

        // A single leaf is the root itself; nothing is stored past the header
        if self.layout.height() == 0 {
            return Ok(MerklePath::new(self.key.root(), index, Vec::new()));
        }

        let steps = self.layout.steps(index);
        let mut siblings = Vec::with_capacity(steps.len());
        let mut leaf = None;

        for step in &steps {
            let at_leaf_level = step.level == 0;

            if step.is_right_child {
                // Sibling is the entry right before the node
                self.reader.seek(SeekFrom::Start(step.sibling.offset))?;
                let sibling = self.read_hash()?;
                siblings.push(sibling);
                if at_leaf_level {
                    // One read ahead
                    leaf = Some(self.read_hash()?);
                }
            } else if step.sibling.self_duplicate {
                // Unpaired last node: its sibling is itself, no skip
                self.reader.seek(SeekFrom::Start(step.node_offset))?;
                let node = self.read_hash()?;
                siblings.push(node);
                if at_leaf_level {
                    leaf = Some(node);
                }
            } else {
                self.reader.seek(SeekFrom::Start(step.node_offset))?;
                self.reader.seek(SeekFrom::Current(ENTRY_SIZE))?;
                let sibling = self.read_hash()?;
                siblings.push(sibling);
                if at_leaf_level {
                    // Two entries back from the cursor
                    self.reader.seek(SeekFrom::Current(-2 * ENTRY_SIZE))?;
                    leaf = Some(self.read_hash()?);
                }
            }
        }

        let leaf = leaf.ok_or_else(|| {
            MerkleError::corrupt(self.key.to_string(), "path walk never reached the leaves")
        })?;

        // Collected top-down, returned leaf-adjacent first
        siblings.reverse();

        debug!(key = %self.key, index, height = siblings.len(), "read merkle path");
        Ok(MerklePath::new(leaf, index, siblings))
    }

    fn read_hash(&mut self) -> Result<Hash> {
        let mut bytes = [0u8; HASH_SIZE];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| eof_as_corrupt(e, &self.key))?;
        Ok(Hash::from_bytes(bytes))
    }
}

fn eof_as_corrupt(e: io::Error, key: &RootKey) -> MerkleError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        MerkleError::corrupt(key.to_string(), "read past end of blob")
    } else {
        MerkleError::Io(e)
    }
}
