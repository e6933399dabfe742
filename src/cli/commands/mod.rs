//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod clean;
pub mod completions;
pub mod dispatcher;
pub mod interactive;
pub mod refresh;
pub mod shortcuts;

pub use dispatcher::{require_aws, Command, CommandDispatcher, CommandResult};
