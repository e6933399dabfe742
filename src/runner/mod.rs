//! Flow orchestration: choosing an action and running it.

pub mod action;
pub mod flow;

pub use action::{perform, ActionOutcome, ActionPlan};
pub use flow::{keys, FlowOutcome, InteractiveFlow, DEFAULT_REGION, MANUAL_FLOW_LABEL};

use crate::error::AsmagoError;
use crate::ui::UserInterface;

/// Turn a failed data-store write into a warning; the run carries on.
pub(crate) fn report_persistence_failure(
    ui: &mut dyn UserInterface,
    what: &str,
    error: &AsmagoError,
) {
    tracing::warn!("Failed to save {}: {}", what, error);
    ui.warning(&format!("Failed to save {}: {}", what, error));
}
