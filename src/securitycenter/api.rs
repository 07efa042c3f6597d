//! Security Command Center calls

use super::model::{CreateFindingRequest, Finding};
use crate::gcp::client::GcpClient;
use crate::gcp::http::{check_resource_name, RequestError};
use url::Url;

/// Collections a finding source can live under
const SOURCE_NAME: &[&[&str]] = &[&["organizations", "folders", "projects"], &["sources"]];

/// `POST {parent}/findings?findingId={finding_id}`
pub async fn create_finding(
    client: &GcpClient,
    request: &CreateFindingRequest,
) -> Result<Finding, RequestError> {
    check_resource_name("parent", &request.parent, SOURCE_NAME)?;

    let url = client.securitycenter_url(&format!("{}/findings", request.parent));
    let mut url = Url::parse(&url)
        .map_err(|e| RequestError::InvalidArgument(format!("invalid parent: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("findingId", &request.finding_id);

    let finding: Finding = client.post(url.as_str(), &request.finding).await?;
    tracing::info!("Created finding {}", finding.name);
    Ok(finding)
}
