//! External command execution.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandResult, CommandRunner, ExternalCommand, SystemRunner};
pub use mock::MockRunner;
pub use platform::{find_executable, InterruptGuard};
