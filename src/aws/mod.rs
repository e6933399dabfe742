//! Everything asmago asks of the `aws` client.
//!
//! Commands are built here and executed through a
//! [`CommandRunner`](crate::shell::CommandRunner). Operations that can hit an
//! expired SSO token go through [`ResilientExecutor`].

pub mod auth;
pub mod ec2;
pub mod executor;
pub mod failure;
pub mod profiles;
pub mod reauth;
pub mod ssm;
pub mod sts;

pub use auth::AuthenticationState;
pub use ec2::{list_running_command, parse_instances, Instance};
pub use executor::{Outcome, ResilientExecutor, RETRY_BUDGET};
pub use failure::{classify, is_token_expired, FailureKind};
pub use profiles::{parse_profiles, ProfileConfig};
pub use reauth::ReauthenticationController;
pub use ssm::{port_forward_command, start_session_command};
pub use sts::{caller_identity, credentials_valid, CallerIdentity};

/// Name of the `aws` executable.
pub const AWS_PROGRAM: &str = "aws";
