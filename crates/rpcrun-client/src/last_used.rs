//! Remembers the last destination, authcode, command and shortcode between
//! CLI invocations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

const FILE_NAME: &str = "last_used.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUsed {
    #[serde(default)]
    pub dest: Option<String>,
    #[serde(default)]
    pub authcode: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

fn get_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("rpcrun"))
        .or_else(|| dirs::home_dir().map(|h| h.join(".rpcrun")))
        .unwrap_or_else(|| PathBuf::from("/tmp/rpcrun"))
}

/// Default location of the last-used file
pub fn default_path() -> PathBuf {
    get_state_dir().join(FILE_NAME)
}

impl LastUsed {
    /// Load remembered values. A missing or corrupt file yields defaults.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring unreadable {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
