//! Persistent usage data.
//!
//! Everything asmago learns about the operator's habits lives as small JSON
//! files in the data directory:
//!
//! - [`ShortcutStore`]: remembered actions and the last-used pointer
//! - [`UsageLedger`]: instance and database target selection counts

pub mod shortcuts;
pub mod usage;

pub use shortcuts::{
    Action, RankedShortcut, Shortcut, ShortcutKey, ShortcutStore, LAST_SHORTCUT_FILE,
    MAX_SHORTCUTS, SHORTCUTS_FILE,
};
pub use usage::{rank_by_count, UsageKind, UsageLedger, UsageTable};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{AsmagoError, Result};

/// Backslash-escape the `;` and `|` separators used in rendered identities.
///
/// Fields without separators or backslashes render unchanged.
pub(crate) fn escape_key_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', ';', '|']) {
        return Cow::Borrowed(field);
    }
    let mut escaped = String::with_capacity(field.len() + 2);
    for c in field.chars() {
        if matches!(c, '\\' | ';' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AsmagoError::ConfigParseError {
            path: path.to_path_buf(),
            message: format!("{} (run `asmago clean` to reset stored data)", e),
        })
}

/// Serialize `value` as pretty JSON and write it atomically.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    write_atomic(path, &content)
}

/// Write to a temp file beside `path`, then rename over it.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);
    fs::write(temp_path, content)?;
    fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("shortcuts.json");

        write_atomic(&path, "{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!temp.path().join("nested").join("shortcuts.json.tmp").exists());
    }

    #[test]
    fn read_json_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let value: Option<BTreeMap<String, u64>> =
            read_json(&temp.path().join("absent.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_json_corrupt_suggests_clean() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("instance_usage.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json::<BTreeMap<String, u64>>(&path).unwrap_err();
        assert!(err.to_string().contains("asmago clean"));
    }
}
