//! asmago - a picker for AWS Systems Manager sessions.
//!
//! asmago lists the running EC2 instances of an AWS profile, lets the
//! operator pick one and opens either an interactive SSM shell or a
//! port-forwarding tunnel to a database behind it. Every completed action
//! is remembered as a shortcut, and an expired SSO token is refreshed once
//! before an operation is retried.
//!
//! # Modules
//!
//! - [`aws`] - Commands for the `aws` client, failure classification and the retrying executor
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Paths and per-run options
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The interactive flow and action execution
//! - [`shell`] - External command execution
//! - [`state`] - Shortcut cache and usage counters
//! - [`targets`] - The RDS catalogue and its filters
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use asmago::targets::{
//!     environment_for_instance, filter_by_access, filter_by_environment, AccessType, Catalogue,
//!     TargetConfig,
//! };
//!
//! let targets: Vec<TargetConfig> = serde_json::from_str(r#"[
//!     {"key": "db1", "env": "dev", "type": "read", "endpoint": "db1.dev", "port": 5432, "local_port": 15432},
//!     {"key": "db1", "env": "dev", "type": "write", "endpoint": "db1-rw.dev", "port": 5432, "local_port": 15434},
//!     {"key": "db2", "env": "qa", "type": "read", "endpoint": "db2.qa", "port": 5432, "local_port": 15433}
//! ]"#).unwrap();
//! let catalogue = Catalogue::new(targets);
//!
//! let env = environment_for_instance(Some("dev-web-1"));
//! let candidates = filter_by_environment(catalogue.targets(), env).unwrap();
//! assert_eq!(candidates.len(), 2);
//!
//! let readable = filter_by_access(&candidates, AccessType::Read).unwrap();
//! assert_eq!(readable.len(), 1);
//! assert_eq!(readable[0].endpoint, "db1.dev");
//! ```

pub mod aws;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod state;
pub mod targets;
pub mod ui;

pub use error::{AsmagoError, Result};
