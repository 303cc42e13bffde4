//! Session state persistence
//!
//! Remembers who is logged in and which section was open so the next
//! invocation can pick up from there. The access token lives in the system
//! keyring, not here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Config;

/// Persisted session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Logged-in learner
    #[serde(default)]
    pub username: Option<String>,
    /// Role reported at login ("admin" or a learner role)
    #[serde(default)]
    pub role: Option<String>,
    /// Section last opened
    #[serde(default)]
    pub active_section: Option<String>,
    /// Passing final quiz score, shown on the certificate
    #[serde(default)]
    pub final_score: Option<u8>,
}

impl Session {
    /// Load session from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::session_path()?)
    }

    /// Load session from a specific file, defaulting when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse session.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path()?)
    }

    /// Save session to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize session")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the session file
    fn session_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session.json"))
    }

    /// Whether the logged-in account is an admin
    pub fn is_admin(&self) -> bool {
        self.role.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("admin"))
    }

    /// Forget the learner and their place in the course
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
