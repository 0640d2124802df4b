//! CLI command implementations

pub mod build;
pub mod completion;
pub mod info;
pub mod list;
pub mod paths;
pub mod prove;
pub mod verify;

// Common utilities for commands
use crate::config::StoreConfig;
use crate::core::error::MerkleError;
use crate::storage::TreeStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Open the tree store, honouring `--store` over the config file
pub fn open_store(store: Option<PathBuf>) -> Result<TreeStore> {
    let config = match StoreConfig::load() {
        Ok(config) => config,
        // An explicit directory does not need a home directory
        Err(MerkleError::HomeDirectoryNotFound) if store.is_some() => StoreConfig::default(),
        Err(e) => return Err(e).context("failed to load configuration"),
    };
    let config = config.with_data_dir(store);
    let tree_store = TreeStore::from_config(&config).context("failed to open tree store")?;
    Ok(tree_store)
}
