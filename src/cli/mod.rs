//! Command-line interface for merkle_store

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// merkle-store - Merkle trees on disk with O(log n) inclusion path reads
#[derive(Parser)]
#[command(
    name = "merkle-store",
    version,
    about = "Build Merkle trees over transaction ids and read inclusion paths with a few seeks",
    long_about = "Builds a Merkle tree over a block's transaction ids, stores it in a compact file named by its root, and reads the inclusion path of any single transaction without loading the tree."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding tree blobs (overrides config)
    #[arg(long, global = true, env = "MERKLE_STORE_DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and store the tree for a block description
    Build {
        /// Block JSON file with `tx` and optionally `merkleroot`
        block: PathBuf,

        /// Skip checking the computed root against the block's merkleroot
        #[arg(long)]
        no_check: bool,
    },

    /// Read the inclusion path of one leaf
    Prove {
        /// Root of the stored tree (display hex)
        root: String,

        /// Leaf index
        index: u64,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verify the path against the root before printing it
        #[arg(long)]
        check: bool,
    },

    /// Verify an inclusion path against a root
    Verify {
        /// Path JSON file, or - for stdin
        proof: PathBuf,

        /// Expected root (display hex)
        #[arg(long)]
        root: String,

        /// Leaf count of the tree, enables the path length check
        #[arg(long)]
        leaf_count: Option<u64>,
    },

    /// Print a block with the inclusion path of every transaction
    Paths {
        /// Block JSON file with `tx` and optionally `merkleroot`
        block: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip checking the computed root against the block's merkleroot
        #[arg(long)]
        no_check: bool,
    },

    /// Show header information for a stored tree
    Info {
        /// Root of the stored tree (display hex)
        root: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored trees
    List,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
