//! Per-invocation settings threaded through the flows.

/// Settings that apply to a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the composed `aws` command instead of executing it.
    ///
    /// A dry run also leaves the shortcut cache and usage ledger untouched.
    pub dry_run: bool,
}

impl RunOptions {
    /// Options for a dry run.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}
