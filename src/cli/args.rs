//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// asmago - pick an EC2 instance and open an SSM session or database tunnel.
#[derive(Debug, Parser)]
#[command(name = "asmago")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print the aws command instead of running it
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    /// Directory holding shortcuts and usage counters
    #[arg(long, global = true, env = "ASMAGO_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the RDS catalogue (rds.json)
    #[arg(long, global = true, env = "ASMAGO_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick a shortcut or walk profile, instance and action (default)
    #[command(visible_alias = "i")]
    Interactive,

    /// List the most used shortcuts
    #[command(visible_alias = "sc")]
    Shortcuts,

    /// Delete all stored shortcuts and usage counters
    Clean(CleanArgs),

    /// Refresh the SSO token of a profile
    Refresh(RefreshArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// Don't prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `refresh` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RefreshArgs {
    /// AWS profile to refresh
    pub profile: String,

    /// Log in even if the current token is still valid
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
