//! Database targets reached through port forwarding.

pub mod catalogue;
pub mod filter;

pub use catalogue::{bootstrap, AccessType, Catalogue, TargetConfig, TargetId, CATALOGUE_FILE};
pub use filter::{
    environment_for_instance, filter_by_access, filter_by_environment, rank_targets, target_label,
};
