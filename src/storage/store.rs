//! Directory of tree blobs keyed by root

use crate::config::StoreConfig;
use crate::core::{
    error::{MerkleError, Result},
    types::{MerklePath, RootKey},
};
use crate::proofs::merkle::MerkleTree;
use crate::storage::blob::write_tree;
use crate::storage::reader::PathReader;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Directory holding one blob per stored tree, named by its root key
#[derive(Debug, Clone)]
pub struct TreeStore {
    /// Directory the blobs live in
    data_dir: PathBuf,
    /// Publish blobs through a temporary file and rename
    atomic_writes: bool,
}

/// Summary of a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobInfo {
    pub root: String,
    pub leaf_count: u64,
    pub height: u32,
    pub level_sizes: Vec<u64>,
    pub size_bytes: u64,
}

impl TreeStore {
    /// Open a store rooted at `data_dir`
    ///
    /// The directory does not have to exist yet; it is created by the first
    /// [`TreeStore::write`]. Reads against a missing directory find nothing.
    pub fn open(data_dir: &Path) -> Result<Self> {
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(MerkleError::InvalidDataDir {
                path: data_dir.to_path_buf(),
            });
        }
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            atomic_writes: true,
        })
    }

    /// Open the store described by `config`
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let data_dir = config.resolve_data_dir()?;
        Ok(Self::open(&data_dir)?.with_atomic_writes(config.atomic_writes))
    }

    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the blob for `key`
    pub fn blob_path(&self, key: &RootKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    pub fn contains(&self, key: &RootKey) -> bool {
        self.blob_path(key).is_file()
    }

    /// Store `tree`, replacing any blob already stored under its root
    pub fn write(&self, tree: &MerkleTree) -> Result<RootKey> {
        let key = tree.root_key();
        let path = self.blob_path(&key);
        std::fs::create_dir_all(&self.data_dir)?;

        let written = if self.atomic_writes {
            let temp = NamedTempFile::new_in(&self.data_dir)?;
            let mut writer = BufWriter::new(temp);
            let written = write_tree(tree, &mut writer)?;
            let temp = writer.into_inner().map_err(|e| e.into_error())?;
            temp.as_file().sync_all()?;
            temp.persist(&path).map_err(|e| MerkleError::Io(e.error))?;
            written
        } else {
            let mut writer = BufWriter::new(File::create(&path)?);
            write_tree(tree, &mut writer)?
        };

        info!(
            key = %key,
            leaf_count = tree.leaf_count(),
            bytes = written,
            "stored merkle tree"
        );
        Ok(key)
    }

    /// Read the inclusion path of leaf `index` from the tree stored under `key`
    pub fn read_path(&self, key: &RootKey, index: u64) -> Result<MerklePath> {
        let mut reader = PathReader::open(&self.blob_path(key), *key)?;
        reader.read(index)
    }

    /// Header-derived summary of the blob stored under `key`
    pub fn info(&self, key: &RootKey) -> Result<BlobInfo> {
        let reader = PathReader::open(&self.blob_path(key), *key)?;
        let layout = reader.layout();
        Ok(BlobInfo {
            root: key.to_string(),
            leaf_count: layout.leaf_count(),
            height: layout.height(),
            level_sizes: layout.level_sizes().to_vec(),
            size_bytes: layout.blob_len(),
        })
    }

    /// Keys of every blob in the store, sorted
    ///
    /// Files whose names are not root keys (temporary files included) are
    /// skipped.
    pub fn list(&self) -> Result<Vec<RootKey>> {
        let mut keys = Vec::new();
        if !self.data_dir.is_dir() {
            return Ok(keys);
        }
        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(key) = entry
                .file_name()
                .to_str()
                .and_then(|name| RootKey::parse(name).ok())
            {
                keys.push(key);
            }
        }
        keys.sort_by_key(|k| k.file_name());
        debug!(count = keys.len(), "listed stored trees");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha256;
    use crate::core::types::Hash;
    use tempfile::TempDir;

    fn leaves(n: u64) -> Vec<Hash> {
        (0..n).map(|i| sha256(format!("leaf {}", i).as_bytes())).collect()
    }

    #[test]
    fn test_write_names_blob_by_display_root() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap();
        let tree = MerkleTree::from_hashes(&leaves(5)).unwrap();

        let key = store.write(&tree).unwrap();
        assert_eq!(key.file_name(), tree.root().to_display_hex());
        assert!(dir.path().join(tree.root().to_display_hex()).is_file());
        assert!(store.contains(&key));
    }

    #[test]
    fn test_non_atomic_write_reads_back() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap().with_atomic_writes(false);
        let tree = MerkleTree::from_hashes(&leaves(11)).unwrap();
        let key = store.write(&tree).unwrap();
        for i in 0..11 {
            assert!(store.read_path(&key, i).unwrap().verify(&tree.root()));
        }
    }

    #[test]
    fn test_unknown_key_not_found() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap();
        let key = RootKey::from_root(sha256(b"missing"));
        assert!(matches!(
            store.read_path(&key, 0),
            Err(MerkleError::NotFound { .. })
        ));
    }

    #[test]
    fn test_info() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap();
        let tree = MerkleTree::from_hashes(&leaves(7)).unwrap();
        let key = store.write(&tree).unwrap();

        let info = store.info(&key).unwrap();
        assert_eq!(info.leaf_count, 7);
        assert_eq!(info.height, 3);
        assert_eq!(info.level_sizes, vec![7, 4, 2, 1]);
        assert_eq!(info.size_bytes, 8 + (7 + 4 + 2) * 32);
    }

    #[test]
    fn test_list_skips_foreign_files() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap();
        let a = store.write(&MerkleTree::from_hashes(&leaves(2)).unwrap()).unwrap();
        let b = store.write(&MerkleTree::from_hashes(&leaves(3)).unwrap()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let keys = store.list().unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&a));
        assert!(keys.contains(&b));
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path()).unwrap();
        let tree = MerkleTree::from_hashes(&leaves(6)).unwrap();
        let key = store.write(&tree).unwrap();
        let first = std::fs::read(store.blob_path(&key)).unwrap();
        store.write(&tree).unwrap();
        assert_eq!(std::fs::read(store.blob_path(&key)).unwrap(), first);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_reads_do_not_create_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("typo");
        let store = TreeStore::open(&missing).unwrap();
        let key = RootKey::from_root(sha256(b"anything"));

        assert_eq!(store.read_path(&key, 0).unwrap_err().kind(), crate::ErrorKind::NotFound);
        assert_eq!(store.info(&key).unwrap_err().kind(), crate::ErrorKind::NotFound);
        assert!(store.list().unwrap().is_empty());
        assert!(!missing.exists());
    }

    #[test]
    fn test_first_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = TreeStore::open(&nested).unwrap();
        let key = store.write(&MerkleTree::from_hashes(&leaves(4)).unwrap()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.list().unwrap(), vec![key]);
    }

    #[test]
    fn test_file_as_data_dir_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("blob");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            TreeStore::open(&file),
            Err(MerkleError::InvalidDataDir { .. })
        ));
    }
}
