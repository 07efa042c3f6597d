//! Configuration Management
//!
//! Handles persistent configuration storage for gcp-samples.

use crate::gcp::client::{ClientOptions, Endpoints};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Project to search jobs in
    #[serde(default)]
    pub project_id: Option<String>,
    /// Security Command Center source to create findings under
    #[serde(default)]
    pub source_name: Option<String>,
    /// Override for the Cloud Talent Solution endpoint
    #[serde(default)]
    pub talent_endpoint: Option<String>,
    /// Override for the Security Command Center endpoint
    #[serde(default)]
    pub securitycenter_endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gcp-samples").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective project (CLI > config > environment / gcloud default)
    pub fn effective_project(&self) -> Option<String> {
        self.project_id
            .clone()
            .or_else(crate::gcp::auth::get_default_project)
    }

    /// Client options with any configured endpoint overrides applied
    pub fn client_options(&self) -> ClientOptions {
        let defaults = Endpoints::default();
        ClientOptions {
            endpoints: Endpoints {
                talent: self.talent_endpoint.clone().unwrap_or(defaults.talent),
                securitycenter: self
                    .securitycenter_endpoint
                    .clone()
                    .unwrap_or(defaults.securitycenter),
            },
            ..Default::default()
        }
    }
}
