//! Command-line interface for asmago.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CleanArgs, Cli, Commands, CompletionsArgs, RefreshArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
