//! Security Command Center messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Whether the issue a finding describes is still present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingState {
    #[default]
    StateUnspecified,
    Active,
    Inactive,
}

/// A security observation attached to a monitored resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Set by the server: `{parent}/findings/{finding_id}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    /// Full resource name of the affected resource
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub state: FindingState,
    /// Free-form taxonomy label, e.g. `XSS_FLASH_INJECTION`
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uri: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_properties: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// `organizations.sources.findings.create`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFindingRequest {
    /// `organizations/{org}/sources/{source}`
    pub parent: String,
    /// Unique within the source: 1-32 alphanumeric characters
    pub finding_id: String,
    pub finding: Finding,
}
