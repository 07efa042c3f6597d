//! Finding creation sample
//!
//! Findings live under a "source", the scanner or service that reported
//! them. The sample creates one finding stamped with the current time.

use super::api;
use super::model::{CreateFindingRequest, Finding, FindingState};
use crate::error::{Error, Result};
use crate::gcp::client::{ClientOptions, GcpClient};
use chrono::{DateTime, Datelike, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SAMPLE_FINDING_ID: &str = "samplefindingid";
pub const SAMPLE_CATEGORY: &str = "MEDIUM_RISK_ONE";
/// Any resource identifier can be used; this one names an organization
pub const SAMPLE_RESOURCE_NAME: &str = "//cloudresourcemanager.googleapis.com/organizations/11232";

/// Convert a wall-clock instant to a protobuf `Timestamp`
///
/// Valid timestamps span 0001-01-01T00:00:00Z through 9999-12-31T23:59:59.999999999Z.
pub fn timestamp_proto(time: SystemTime) -> Result<DateTime<Utc>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).ok(), d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).ok().map(|s| -s);
            match d.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - n),
            }
        }
    };

    let converted = secs
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, nanos))
        .ok_or_else(|| Error::TimestampConversion(format!("{:?} is out of range", time)))?;

    if !(1..=9999).contains(&converted.year()) {
        return Err(Error::TimestampConversion(format!(
            "{} is outside 0001-01-01 ..= 9999-12-31",
            converted
        )));
    }
    Ok(converted)
}

/// The finding the sample submits
pub fn sample_finding(event_time: DateTime<Utc>) -> Finding {
    Finding {
        state: FindingState::Active,
        resource_name: SAMPLE_RESOURCE_NAME.to_string(),
        category: SAMPLE_CATEGORY.to_string(),
        event_time: Some(event_time),
        ..Default::default()
    }
}

/// Create a finding under `source_name`
/// (e.g. `"organizations/111122222444/sources/1234"`) and return it as
/// confirmed by the server.
pub async fn create_finding(options: &ClientOptions, source_name: &str) -> Result<Finding> {
    // Dropped on every return path below, releasing its connections
    let client = GcpClient::new(options).await.map_err(Error::ClientInit)?;

    let event_time = timestamp_proto(SystemTime::now()).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    let request = CreateFindingRequest {
        parent: source_name.to_string(),
        finding_id: SAMPLE_FINDING_ID.to_string(),
        finding: sample_finding(event_time),
    };

    let finding = api::create_finding(&client, &request)
        .await
        .map_err(Error::request("creating finding"))?;

    Ok(finding)
}
