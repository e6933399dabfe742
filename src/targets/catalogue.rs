//! The read-only catalogue of database targets.
//!
//! Targets are databases reachable only by port-forwarding through an
//! instance. They are described in `rds.json` in the config directory:
//!
//! ```json
//! [
//!   {
//!     "key": "orders",
//!     "env": "dev",
//!     "type": "read",
//!     "endpoint": "orders-ro.cluster-xyz.ap-southeast-1.rds.amazonaws.com",
//!     "port": 5432,
//!     "local_port": 15432
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::AppPaths;
use crate::error::{AsmagoError, Result};
use crate::state::escape_key_field;

/// Catalogue file name in the config directory.
pub const CATALOGUE_FILE: &str = "rds.json";

/// Whether a target is a reader or writer endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Read,
    Write,
}

impl AccessType {
    /// All access types, in picker order.
    pub const ALL: [AccessType; 2] = [AccessType::Read, AccessType::Write];

    /// Lowercase tag used in the catalogue.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            _ => Err(format!("unknown access type: {}", s)),
        }
    }
}

/// Identity of a catalogue entry: `(key, env, type)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId {
    pub key: String,
    pub env: String,
    #[serde(rename = "type")]
    pub access: AccessType,
}

impl TargetId {
    /// Create a target identity.
    pub fn new(key: impl Into<String>, env: impl Into<String>, access: AccessType) -> Self {
        Self {
            key: key.into(),
            env: env.into(),
            access,
        }
    }
}

/// `key|env|type`, the form used in the usage ledger.
impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            escape_key_field(&self.key),
            escape_key_field(&self.env),
            self.access
        )
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub key: String,
    pub env: String,
    #[serde(rename = "type")]
    pub access: AccessType,
    pub endpoint: String,
    pub port: u16,
    pub local_port: u16,
}

impl TargetConfig {
    /// The entry's identity.
    pub fn id(&self) -> TargetId {
        TargetId::new(&self.key, &self.env, self.access)
    }
}

/// The loaded catalogue. Never modified after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    targets: Vec<TargetConfig>,
}

impl Catalogue {
    /// Build a catalogue from entries.
    pub fn new(targets: Vec<TargetConfig>) -> Self {
        Self { targets }
    }

    /// Load `rds.json` from the config directory.
    pub fn load(paths: &AppPaths) -> Result<Self> {
        Self::load_file(&paths.config_file(CATALOGUE_FILE))
    }

    /// Load a catalogue file.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AsmagoError::ConfigurationMissing {
                path: path.to_path_buf(),
                hint: "create it, or place a template at config/rds.json next to the asmago binary"
                    .to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let targets: Vec<TargetConfig> =
            serde_json::from_str(&content).map_err(|e| AsmagoError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded {} targets from {}", targets.len(), path.display());
        Ok(Self { targets })
    }

    /// All entries in file order.
    pub fn targets(&self) -> &[TargetConfig] {
        &self.targets
    }

    /// Look up an entry by identity.
    pub fn find(&self, id: &TargetId) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.key == id.key && t.env == id.env && t.access == id.access)
    }
}

/// Copy a template catalogue into the config directory if none exists.
///
/// The template is looked up as `config/rds.json` beside `template_root`
/// (normally the directory of the running executable). Returns the path
/// written, or `None` if nothing was copied. A missing template is not an
/// error; loading the catalogue later reports it with a hint.
pub fn bootstrap(paths: &AppPaths, template_root: &Path) -> Result<Option<PathBuf>> {
    let target = paths.config_file(CATALOGUE_FILE);
    if target.exists() {
        return Ok(None);
    }

    let template = template_root.join("config").join(CATALOGUE_FILE);
    if !template.is_file() {
        return Ok(None);
    }

    fs::create_dir_all(&paths.config_dir)?;
    fs::copy(&template, &target)?;
    tracing::debug!("Copied {} to {}", template.display(), target.display());
    Ok(Some(target))
}
