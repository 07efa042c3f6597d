//! Job service calls

use super::model::{SearchJobsRequest, SearchJobsResponse};
use crate::gcp::client::GcpClient;
use crate::gcp::http::{check_resource_name, RequestError};

/// `POST {parent}/jobs:search`
pub async fn search_jobs(
    client: &GcpClient,
    request: &SearchJobsRequest,
) -> Result<SearchJobsResponse, RequestError> {
    check_resource_name("parent", &request.parent, &[&["projects"]])?;

    let url = client.talent_url(&format!("{}/jobs:search", request.parent));
    let response: SearchJobsResponse = client.post(&url, request).await?;

    tracing::debug!(
        "search_jobs: {} matching jobs, {} histogram results",
        response.matching_jobs.len(),
        response.histogram_query_results.len()
    );

    Ok(response)
}
