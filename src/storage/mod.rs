//! On-disk tree blobs
//!
//! - [`layout`]: pure offset arithmetic for the blob format
//! - [`blob`]: header and tree encoding
//! - [`reader`]: seek-based inclusion path reads
//! - [`store`]: a directory of blobs keyed by root

pub mod blob;
pub mod layout;
pub mod reader;
pub mod store;

pub use blob::{encode_tree, write_tree, BlobHeader};
pub use layout::{BlobLayout, PathStep, SiblingLocation, HEADER_SIZE};
pub use reader::PathReader;
pub use store::{BlobInfo, TreeStore};
