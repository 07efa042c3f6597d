//! GCP Authentication
//!
//! Handles authentication using Application Default Credentials (ADC)
//! or a literal OAuth access token.

use anyhow::{Context, Result};
use gcp_auth::TokenProvider;
use std::path::PathBuf;
use std::sync::Arc;

/// Default scopes for GCP API access
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform"];

/// Environment variable holding a pre-minted access token
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Where a client gets its access tokens from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Use `GOOGLE_OAUTH_ACCESS_TOKEN` if set, otherwise ADC
    #[default]
    FromEnv,
    /// Application Default Credentials
    ApplicationDefault,
    /// A literal bearer token, used as-is for every request
    AccessToken(String),
}

/// GCP credentials holder
///
/// ADC providers from `gcp_auth` cache and refresh tokens themselves.
#[derive(Clone)]
pub struct GcpCredentials {
    source: TokenSource,
}

#[derive(Clone)]
enum TokenSource {
    Provider(Arc<dyn TokenProvider>),
    Static(String),
}

impl GcpCredentials {
    /// Resolve credentials from the given source
    pub async fn new(credentials: &Credentials) -> Result<Self> {
        match credentials {
            Credentials::AccessToken(token) => Self::from_access_token(token),
            Credentials::ApplicationDefault => Self::application_default().await,
            Credentials::FromEnv => match std::env::var(ACCESS_TOKEN_ENV) {
                Ok(token) => {
                    tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                    Self::from_access_token(&token)
                }
                Err(_) => Self::application_default().await,
            },
        }
    }

    /// Create new GCP credentials using Application Default Credentials
    pub async fn application_default() -> Result<Self> {
        let provider = gcp_auth::provider().await.context(
            "Failed to initialize GCP authentication. Run 'gcloud auth application-default login'",
        )?;

        Ok(Self {
            source: TokenSource::Provider(provider),
        })
    }

    /// Wrap a pre-minted access token
    pub fn from_access_token(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Access token must not be empty");
        }

        Ok(Self {
            source: TokenSource::Static(token.to_string()),
        })
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        let provider = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::Provider(provider) => provider,
        };

        let token = provider
            .token(DEFAULT_SCOPES)
            .await
            .context("Failed to get access token")?;

        Ok(token.as_str().to_string())
    }
}

/// Get the gcloud configuration directory
pub fn get_gcloud_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CLOUDSDK_CONFIG") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|p| p.join("gcloud"))
}

/// Validate a GCP project ID format
/// Project IDs must be 6-30 characters, lowercase letters, digits, and hyphens
/// Must start with a letter and cannot end with a hyphen
pub fn validate_project_id(project: &str) -> bool {
    if project.len() < 6 || project.len() > 30 {
        return false;
    }

    match project.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }

    if project.ends_with('-') {
        return false;
    }

    project
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Find `project = ...` in an ini-style gcloud file, optionally inside one section
fn find_project_in(content: &str, section: Option<&str>) -> Option<String> {
    let mut in_section = section.is_none();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            in_section = section.map_or(true, |s| line == s);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let project = value.trim();
            if key.trim() == "project" && validate_project_id(project) {
                return Some(project.to_string());
            }
        }
    }
    None
}

/// Read the default project from the environment or gcloud configuration
/// Security: Validates project ID format before returning
pub fn get_default_project() -> Option<String> {
    for var in ["CLOUDSDK_CORE_PROJECT", "GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"] {
        if let Ok(project) = std::env::var(var) {
            if validate_project_id(&project) {
                return Some(project);
            }
            tracing::warn!("Invalid project ID format in {}", var);
        }
    }

    let config_dir = get_gcloud_config_dir()?;

    if let Ok(content) = std::fs::read_to_string(config_dir.join("properties")) {
        if let Some(project) = find_project_in(&content, None) {
            return Some(project);
        }
    }

    let active_config = std::fs::read_to_string(config_dir.join("active_config")).ok()?;
    let config_name = active_config.trim();

    // Security: Validate config name to prevent path traversal
    if !config_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        tracing::warn!("Invalid characters in active_config name");
        return None;
    }

    let config_path = config_dir
        .join("configurations")
        .join(format!("config_{}", config_name));

    let content = std::fs::read_to_string(config_path).ok()?;
    find_project_in(&content, Some("[core]"))
}
