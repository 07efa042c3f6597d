//! Histogram search sample
//!
//! Searches the jobs of one company and prints how they are distributed
//! across a few histogram facets.

use super::api;
use super::model::{
    CompensationBucket, HistogramFacet, RequestMetadata, SearchJobsRequest, SearchJobsResponse,
};
use crate::error::{Error, Result};
use crate::gcp::client::{ClientOptions, GcpClient};
use std::io::Write;

/// Extract the company id from a company resource name
///
/// `"projects/p/companies/abc123"` and `"companies/abc123"` both yield `"abc123"`.
pub fn company_id_from_name(name: &str) -> Option<&str> {
    let (_, id) = name.split_once("companies/")?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

/// Facets the sample aggregates by
pub fn sample_facets() -> Vec<HistogramFacet> {
    vec![
        HistogramFacet::EmploymentType,
        HistogramFacet::BaseCompensation(vec![CompensationBucket::new(12.0, 20.0)]),
    ]
}

/// Search the jobs of `company_id` in `project_id` with histogram queries
/// and write a summary of the matching jobs and bucket counts to `w`.
pub async fn histogram_search<W: Write>(
    w: &mut W,
    options: &ClientOptions,
    project_id: &str,
    company_id: &str,
) -> Result<SearchJobsResponse> {
    let client = GcpClient::new(options).await.map_err(Error::ClientInit)?;

    let parent = format!("projects/{}", project_id);

    // The user and session ids identify the searcher so results can be personalized
    let metadata = RequestMetadata {
        domain: "www.example.com".to_string(),
        session_id: "sessionId".to_string(),
        user_id: "userId".to_string(),
    };

    let request = SearchJobsRequest::new(parent.as_str(), metadata)
        .with_company(format!("{}/companies/{}", parent, company_id))
        .with_facets(&sample_facets());

    let response = api::search_jobs(&client, &request)
        .await
        .map_err(Error::request("searching jobs"))?;

    write_summary(w, &response)?;
    Ok(response)
}

fn write_summary<W: Write>(w: &mut W, response: &SearchJobsResponse) -> std::io::Result<()> {
    writeln!(w, "Jobs:")?;
    for matching in &response.matching_jobs {
        writeln!(w, "\t{:?} ({})", matching.job.name, matching.job.title)?;
    }

    writeln!(w, "Histogram results:")?;
    for result in &response.histogram_query_results {
        writeln!(w, "\t{}:", result.histogram_query)?;
        for (key, count) in &result.histogram {
            writeln!(w, "\t\t{}: {}", key, count)?;
        }
    }
    Ok(())
}
