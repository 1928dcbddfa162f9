//! Project automation tasks for crew-rs

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Project automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check formatting
    Fmt,
    /// Run clippy lints across the workspace
    Lint,
    /// Run all tests
    Test,
    /// Fmt + lint + test
    Ci,
}

fn run_cargo(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;

    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt => run_cargo(&["fmt", "--all", "--", "--check"]),
        Commands::Lint => run_cargo(&["clippy", "--workspace", "--all-targets"]),
        Commands::Test => run_cargo(&["test", "--workspace"]),
        Commands::Ci => {
            run_cargo(&["fmt", "--all", "--", "--check"])?;
            run_cargo(&["clippy", "--workspace", "--all-targets"])?;
            run_cargo(&["test", "--workspace"])
        }
    }
}
