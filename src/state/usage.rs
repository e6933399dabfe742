//! Usage counters for instances and database targets.
//!
//! Two independent tables live in the data directory:
//! `instance_usage.json` keyed by instance id, and `rds_usage.json` keyed by
//! `key|env|type`. Each is loaded the first time it is needed and written
//! back after every increment.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{read_json, write_json};

/// Which usage table to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Instance,
    Target,
}

impl UsageKind {
    /// File name in the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Instance => "instance_usage.json",
            Self::Target => "rds_usage.json",
        }
    }
}

/// Identifier to selection count. Absent identifiers count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageTable {
    counts: BTreeMap<String, u64>,
}

impl UsageTable {
    /// How often `id` has been selected.
    pub fn count(&self, id: &str) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Bump the count for `id` and return the new value.
    pub fn increment(&mut self, id: &str) -> u64 {
        let count = self.counts.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Number of identifiers with a count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sort `items` by descending count. The sort is stable, so ties keep
/// their incoming order.
pub fn rank_by_count<T>(items: &mut [T], count: impl Fn(&T) -> u64) {
    items.sort_by_key(|item| Reverse(count(item)));
}

/// Lazily loaded usage tables backed by the data directory.
#[derive(Debug)]
pub struct UsageLedger {
    data_dir: PathBuf,
    instances: Option<UsageTable>,
    targets: Option<UsageTable>,
}

impl UsageLedger {
    /// Create a ledger over `data_dir`. Nothing is read yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            instances: None,
            targets: None,
        }
    }

    /// Path of one table's file.
    pub fn file_path(&self, kind: UsageKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// The table for `kind`, loading it on first use.
    ///
    /// A missing file is an empty table. A corrupt file is an error.
    pub fn table(&mut self, kind: UsageKind) -> Result<&UsageTable> {
        Ok(self.table_mut(kind)?)
    }

    /// Record one selection of `id` and persist the table.
    ///
    /// The in-memory count is updated even if the write fails.
    pub fn record(&mut self, kind: UsageKind, id: &str) -> Result<u64> {
        let path = self.file_path(kind);
        let table = self.table_mut(kind)?;
        let count = table.increment(id);
        tracing::debug!("{} selected {} time(s)", id, count);
        write_json(&path, table)?;
        Ok(count)
    }

    fn table_mut(&mut self, kind: UsageKind) -> Result<&mut UsageTable> {
        let path = self.file_path(kind);
        let slot = match kind {
            UsageKind::Instance => &mut self.instances,
            UsageKind::Target => &mut self.targets,
        };
        if slot.is_none() {
            *slot = Some(load_table(&path)?);
        }
        Ok(slot.get_or_insert_with(UsageTable::default))
    }
}

fn load_table(path: &Path) -> Result<UsageTable> {
    Ok(read_json(path)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsmagoError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn absent_ids_count_zero() {
        let table = UsageTable::default();
        assert_eq!(table.count("i-0abc"), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn record_persists_and_reloads() {
        let temp = TempDir::new().unwrap();
        let mut ledger = UsageLedger::new(temp.path());
        assert_eq!(ledger.record(UsageKind::Instance, "i-1").unwrap(), 1);
        assert_eq!(ledger.record(UsageKind::Instance, "i-1").unwrap(), 2);
        ledger.record(UsageKind::Target, "db1|dev|read").unwrap();

        let mut reloaded = UsageLedger::new(temp.path());
        assert_eq!(reloaded.table(UsageKind::Instance).unwrap().count("i-1"), 2);
        assert_eq!(
            reloaded
                .table(UsageKind::Target)
                .unwrap()
                .count("db1|dev|read"),
            1
        );
    }

    #[test]
    fn tables_are_independent_files() {
        let temp = TempDir::new().unwrap();
        let mut ledger = UsageLedger::new(temp.path());
        ledger.record(UsageKind::Target, "db1|dev|write").unwrap();

        assert!(temp.path().join("rds_usage.json").exists());
        assert!(!temp.path().join("instance_usage.json").exists());
    }

    #[test]
    fn on_disk_format_is_a_flat_object() {
        let temp = TempDir::new().unwrap();
        let mut ledger = UsageLedger::new(temp.path());
        ledger.record(UsageKind::Instance, "i-9").unwrap();

        let content = fs::read_to_string(temp.path().join("instance_usage.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["i-9"], 1);
    }

    #[test]
    fn loading_is_lazy() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rds_usage.json"), "garbage").unwrap();

        let mut ledger = UsageLedger::new(temp.path());
        ledger.record(UsageKind::Instance, "i-1").unwrap();
        assert!(matches!(
            ledger.table(UsageKind::Target),
            Err(AsmagoError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let mut items = vec![("a", 0), ("b", 3), ("c", 0), ("d", 3)];
        rank_by_count(&mut items, |(_, n)| *n);
        let names: Vec<&str> = items.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }
}
