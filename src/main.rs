//! merkle-store CLI
//!
//! Command-line interface for building stored Merkle trees and reading
//! inclusion paths from them.

use anyhow::Result;
use clap::Parser;
use merkle_store::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout stays machine-readable
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    match cli.command {
        Commands::Build { block, no_check } => {
            commands::build::execute(cli.store, block, no_check, cli.quiet)
        },
        Commands::Prove {
            root,
            index,
            output,
            check,
        } => commands::prove::execute(cli.store, root, index, output, check),
        Commands::Verify {
            proof,
            root,
            leaf_count,
        } => commands::verify::execute(proof, root, leaf_count, cli.quiet),
        Commands::Paths {
            block,
            output,
            no_check,
        } => commands::paths::execute(block, output, no_check),
        Commands::Info { root, json } => commands::info::execute(cli.store, root, json),
        Commands::List => commands::list::execute(cli.store),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
