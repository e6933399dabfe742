//! Runtime configuration.
//!
//! asmago has no configuration file of its own. What it needs to know comes
//! from CLI flags and environment variables and is resolved once in
//! `main`:
//!
//! - [`AppPaths`] - data, config and AWS profile file locations
//! - [`RunOptions`] - per-run switches such as dry-run
//!
//! Both are passed explicitly into the flows rather than read from globals.

pub mod options;
pub mod paths;

pub use options::RunOptions;
pub use paths::{AppPaths, APP_DIR};
