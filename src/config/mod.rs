//! Configuration management for merkle_store
//!
//! Settings live in ~/.merkle-store/config.toml

pub mod store_config;

// Re-export commonly used items
pub use store_config::StoreConfig;
