//! Error types for asmago operations.
//!
//! This module defines [`AsmagoError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every variant here is terminal: it propagates to `main` and ends the
//!   process with a non-zero exit code.
//! - Operator cancellation is not an error; prompts report it as
//!   [`PromptResult::Cancelled`](crate::ui::PromptResult::Cancelled).
//! - Failed writes to the data stores are not errors either; callers turn
//!   them into warnings and carry on.
//! - Captured output from the `aws` client is kept verbatim for diagnosis.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for asmago operations.
#[derive(Debug, Error)]
pub enum AsmagoError {
    /// A required configuration file or catalogue is absent.
    #[error("Configuration not found: {path} ({hint})")]
    ConfigurationMissing { path: PathBuf, hint: String },

    /// A configuration or data file exists but cannot be parsed.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A required executable is not on the search path.
    #[error("Dependency '{program}' not found: {hint}")]
    DependencyMissing { program: String, hint: String },

    /// The SSO credential was still expired after the single retry.
    #[error("SSO token for profile '{profile}' is still expired after re-authentication:\n{output}")]
    AuthenticationExpired { profile: String, output: String },

    /// The re-authentication flow itself failed.
    #[error("Failed to update SSO token for profile '{profile}':\n{output}")]
    AuthenticationFailed { profile: String, output: String },

    /// A selection stage had nothing left to offer.
    #[error("{message}")]
    NoCandidates { message: String },

    /// An external command failed for a reason other than an expired token.
    #[error("Command failed with exit code {code:?}: {command}\n{output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AsmagoError {
    /// Build a [`AsmagoError::NoCandidates`] from any displayable message.
    pub fn no_candidates(message: impl Into<String>) -> Self {
        Self::NoCandidates {
            message: message.into(),
        }
    }
}

/// Result type alias for asmago operations.
pub type Result<T> = std::result::Result<T, AsmagoError>;
