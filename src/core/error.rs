//! Error types for merkle_store

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tree building, storage and path reads
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Input validation errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid root key: {key}")]
    InvalidRootKey { key: String },

    /// Lookup errors
    #[error("No tree stored for root {key}")]
    NotFound { key: String },

    #[error("Index {index} out of range: tree has {leaf_count} leaves")]
    IndexOutOfRange { index: u64, leaf_count: u64 },

    /// Blob is shorter or longer than its header says, or unreadable as a tree
    #[error("Corrupt tree blob {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Block input errors
    #[error("Merkle root mismatch: block declares {declared}, computed {computed}")]
    RootMismatch { declared: String, computed: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Data directory not usable: {path}")]
    InvalidDataDir { path: PathBuf },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),
}

/// The five failure classes every error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Io,
    NotFound,
    IndexOutOfRange,
    Corrupt,
}

impl MerkleError {
    /// Create a new invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a new invalid root key error
    pub fn invalid_root_key(key: impl Into<String>) -> Self {
        Self::InvalidRootKey { key: key.into() }
    }

    /// Create a new not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn index_out_of_range(index: u64, leaf_count: u64) -> Self {
        Self::IndexOutOfRange { index, leaf_count }
    }

    /// Create a new corrupt blob error
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidRootKey { .. }
            | Self::RootMismatch { .. }
            | Self::JsonSerialization(_)
            | Self::HexError(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::Corrupt { .. } => ErrorKind::Corrupt,
            Self::Io(_)
            | Self::ConfigurationError { .. }
            | Self::HomeDirectoryNotFound
            | Self::InvalidDataDir { .. } => ErrorKind::Io,
        }
    }
}

/// Result type alias for merkle_store operations
pub type Result<T> = std::result::Result<T, MerkleError>;
