//! CLI Argument Structures

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whole-program identifier shortening
#[derive(Parser)]
#[command(name = "identshrink")]
#[command(version = VERSION)]
#[command(about = "Rename every identifier of a program to a short generated name")]
#[command(long_about = "
Rename every eligible declaration of a program snapshot to a short generated
identifier, keeping references, interface implementations and constructor
calls consistent. Nothing is written when two renames disagree on a location.

Common Usage:

  # Rename a snapshot exported by the front end
  identshrink rename --snapshot build/program.json --out build/renamed

  # Keep additional host entry points
  identshrink rename --snapshot program.json --out out --config identshrink.yml

  # Show the default configuration
  identshrink print-default-config
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename all identifiers of a program snapshot
    Rename(RenameArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct RenameArgs {
    /// Program snapshot (JSON, or YAML with a .yml/.yaml extension)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Directory the renamed documents are written to
    #[arg(short, long)]
    pub out: PathBuf,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}
