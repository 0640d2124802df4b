use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

/// Generate shell completion scripts
///
/// The script goes to stdout, installation hints to stderr.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = "merkle-store";

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(merkle-store completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save to a file in your fpath:");
            eprintln!(
                "  {}",
                "merkle-store completion zsh > ~/.local/share/zsh/site-functions/_merkle-store"
                    .cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "merkle-store completion fish > ~/.config/fish/completions/merkle-store.fish"
                    .cyan()
            );
        },
        _ => {
            eprintln!("  Save the output where your shell loads completions from.");
        },
    }

    Ok(())
}
