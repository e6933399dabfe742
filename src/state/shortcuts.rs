//! Usage-ranked shortcuts to previously completed actions.
//!
//! A shortcut remembers everything needed to rerun an action without
//! prompting: profile, instance, action and, for port forwarding, the
//! database target. Shortcuts are stored in `shortcuts.json`; the most
//! recent one is named in `last_shortcut.txt` so it can be pinned to the
//! top of the menu.
//!
//! On disk each record sits under its rendered key,
//! `profile;instance;action;key|env|type`. The rendered key is only a
//! label: records are re-keyed from their own fields when loaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::targets::TargetId;

use super::{escape_key_field, read_json, write_atomic, write_json};

/// Shortcut table file name.
pub const SHORTCUTS_FILE: &str = "shortcuts.json";

/// Last-used pointer file name.
pub const LAST_SHORTCUT_FILE: &str = "last_shortcut.txt";

/// Number of shortcuts offered in the menu.
pub const MAX_SHORTCUTS: usize = 5;

/// What a shortcut does once the instance is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Interactive shell on the instance.
    SessionStart,
    /// Forward a local port through the instance to a database.
    PortForward,
}

impl Action {
    /// Actions in picker order.
    pub const ALL: [Action; 2] = [Action::SessionStart, Action::PortForward];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SessionStart => "Start Session (SSM)",
            Self::PortForward => "Connect RDS",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortcutKey {
    pub profile: String,
    pub instance_id: String,
    pub action: Action,
    pub target: Option<TargetId>,
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};",
            escape_key_field(&self.profile),
            escape_key_field(&self.instance_id),
            self.action.label()
        )?;
        if let Some(target) = &self.target {
            write!(f, "{}", target)?;
        }
        Ok(())
    }
}

/// A remembered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub profile: String,
    pub instance_id: String,
    pub instance_name: String,
    pub action: Action,

    /// Database target; present only for [`Action::PortForward`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetId>,

    /// Menu label, derived from the other fields.
    #[serde(default)]
    pub display: String,

    #[serde(default)]
    pub usage_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Shortcut {
    /// A fresh, never-used shortcut.
    pub fn new(
        profile: impl Into<String>,
        instance_id: impl Into<String>,
        instance_name: impl Into<String>,
        action: Action,
        target: Option<TargetId>,
    ) -> Self {
        let mut shortcut = Self {
            profile: profile.into(),
            instance_id: instance_id.into(),
            instance_name: instance_name.into(),
            action,
            target,
            display: String::new(),
            usage_count: 0,
            last_used_at: None,
        };
        shortcut.display = shortcut.render_display();
        shortcut
    }

    /// This shortcut's identity.
    pub fn key(&self) -> ShortcutKey {
        ShortcutKey {
            profile: self.profile.clone(),
            instance_id: self.instance_id.clone(),
            action: self.action,
            target: self.target.clone(),
        }
    }

    fn render_display(&self) -> String {
        let base = format!(
            "{} -> {} -> {}",
            self.profile,
            self.instance_name,
            self.action.label()
        );
        match &self.target {
            Some(target) => format!("{} ({})", base, target.key),
            None => base,
        }
    }
}

/// One menu entry.
#[derive(Debug, Clone, Copy)]
pub struct RankedShortcut<'a> {
    pub shortcut: &'a Shortcut,
    /// Whether this is the most recently used shortcut.
    pub last_used: bool,
}

impl RankedShortcut<'_> {
    /// Menu label, marking the last-used entry.
    pub fn label(&self) -> String {
        if self.last_used {
            format!("{} (last used)", self.shortcut.display)
        } else {
            self.shortcut.display.clone()
        }
    }
}

/// The persisted shortcut table plus the last-used pointer.
#[derive(Debug)]
pub struct ShortcutStore {
    dir: PathBuf,
    entries: HashMap<ShortcutKey, Shortcut>,
    last_used: Option<ShortcutKey>,
}

impl ShortcutStore {
    /// An empty store that will save into `dir`.
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            entries: HashMap::new(),
            last_used: None,
        }
    }

    /// Load the store from `dir`. Missing files read as empty.
    ///
    /// A last-used pointer naming no stored shortcut is dropped.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::empty(dir);

        let stored: BTreeMap<String, Shortcut> =
            read_json(&store.shortcuts_path())?.unwrap_or_default();
        for (_, mut shortcut) in stored {
            shortcut.display = shortcut.render_display();
            store.entries.insert(shortcut.key(), shortcut);
        }

        if let Some(pointer) = read_pointer(&store.last_used_path())? {
            store.last_used = store
                .entries
                .keys()
                .find(|key| key.to_string() == pointer)
                .cloned();
            if store.last_used.is_none() {
                tracing::debug!("Ignoring stale last-used shortcut: {}", pointer);
            }
        }

        tracing::debug!("Loaded {} shortcuts", store.entries.len());
        Ok(store)
    }

    /// Write the table and the last-used pointer.
    pub fn save(&self) -> Result<()> {
        let table: BTreeMap<String, &Shortcut> = self
            .entries
            .iter()
            .map(|(key, shortcut)| (key.to_string(), shortcut))
            .collect();
        write_json(&self.shortcuts_path(), &table)?;

        if let Some(key) = &self.last_used {
            write_atomic(&self.last_used_path(), &key.to_string())?;
        }
        Ok(())
    }

    /// Count one more use of `shortcut`, mark it last used and persist.
    ///
    /// The in-memory update stands even if saving fails.
    pub fn record_usage(&mut self, shortcut: Shortcut) -> Result<()> {
        self.touch(shortcut, Utc::now());
        self.save()
    }

    fn touch(&mut self, shortcut: Shortcut, at: DateTime<Utc>) {
        let key = shortcut.key();
        let entry = self.entries.entry(key.clone()).or_insert_with(|| {
            let mut fresh = shortcut;
            fresh.usage_count = 0;
            fresh
        });
        entry.usage_count = entry.usage_count.saturating_add(1);
        entry.last_used_at = Some(at);
        entry.display = entry.render_display();
        self.last_used = Some(key);
    }

    /// Up to [`MAX_SHORTCUTS`] entries for the menu.
    ///
    /// The last-used shortcut comes first regardless of count; the rest
    /// follow by descending count, ties broken by label.
    pub fn ranked(&self) -> Vec<RankedShortcut<'_>> {
        let pinned = self.last_used.as_ref().and_then(|key| self.entries.get(key));

        let mut rest: Vec<&Shortcut> = self
            .entries
            .iter()
            .filter(|(key, _)| Some(*key) != self.last_used.as_ref())
            .map(|(_, shortcut)| shortcut)
            .collect();
        rest.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.display.cmp(&b.display))
        });

        pinned
            .map(|shortcut| RankedShortcut {
                shortcut,
                last_used: true,
            })
            .into_iter()
            .chain(rest.into_iter().map(|shortcut| RankedShortcut {
                shortcut,
                last_used: false,
            }))
            .take(MAX_SHORTCUTS)
            .collect()
    }

    /// Look up a shortcut by identity.
    pub fn get(&self, key: &ShortcutKey) -> Option<&Shortcut> {
        self.entries.get(key)
    }

    /// The most recently used shortcut.
    pub fn last_used(&self) -> Option<&Shortcut> {
        self.last_used.as_ref().and_then(|key| self.entries.get(key))
    }

    /// Number of stored shortcuts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no shortcut has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory the store saves into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn shortcuts_path(&self) -> PathBuf {
        self.dir.join(SHORTCUTS_FILE)
    }

    fn last_used_path(&self) -> PathBuf {
        self.dir.join(LAST_SHORTCUT_FILE)
    }
}

fn read_pointer(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let pointer = content.trim();
    Ok((!pointer.is_empty()).then(|| pointer.to_string()))
}
