//! Narrowing the catalogue to targets that fit a chosen instance.

use crate::error::{AsmagoError, Result};
use crate::state::usage::{rank_by_count, UsageTable};

use super::catalogue::{AccessType, TargetConfig};

/// Environment implied by an instance's Name tag.
///
/// Names starting with `dev` map to `dev`, names starting with `qa` map to
/// `qa`. Anything else, including a missing name, applies no filter. The
/// prefix check is case-sensitive.
pub fn environment_for_instance(name: Option<&str>) -> Option<&'static str> {
    let name = name?;
    if name.starts_with("dev") {
        Some("dev")
    } else if name.starts_with("qa") {
        Some("qa")
    } else {
        None
    }
}

/// Keep targets in `env`, or all of them when `env` is `None`.
pub fn filter_by_environment<'a>(
    targets: &'a [TargetConfig],
    env: Option<&str>,
) -> Result<Vec<&'a TargetConfig>> {
    let matched: Vec<&TargetConfig> = targets
        .iter()
        .filter(|t| env.is_none_or(|env| t.env == env))
        .collect();

    if matched.is_empty() {
        return Err(AsmagoError::no_candidates(match env {
            Some(env) => format!("no RDS configurations found for environment '{}'", env),
            None => "no RDS configurations found".to_string(),
        }));
    }
    Ok(matched)
}

/// Keep targets of one access type.
pub fn filter_by_access<'a>(
    candidates: &[&'a TargetConfig],
    access: AccessType,
) -> Result<Vec<&'a TargetConfig>> {
    let matched: Vec<&TargetConfig> = candidates
        .iter()
        .copied()
        .filter(|t| t.access == access)
        .collect();

    if matched.is_empty() {
        return Err(AsmagoError::no_candidates(format!(
            "no RDS configurations found for type '{}'",
            access
        )));
    }
    Ok(matched)
}

/// Order targets by descending usage; ties keep catalogue order.
pub fn rank_targets<'a>(mut candidates: Vec<&'a TargetConfig>, usage: &UsageTable) -> Vec<&'a TargetConfig> {
    rank_by_count(&mut candidates, |t| usage.count(&t.id().to_string()));
    candidates
}

/// Picker label: `key (env)`.
pub fn target_label(target: &TargetConfig) -> String {
    format!("{} ({})", target.key, target.env)
}
