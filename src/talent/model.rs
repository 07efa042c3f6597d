//! Cloud Talent Solution request and response messages

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A facet to aggregate matching jobs by
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramFacet {
    CompanyId,
    CompanyDisplayName,
    CompanySize,
    EmploymentType,
    DatePublished,
    EducationLevel,
    ExperienceLevel,
    Admin1,
    Country,
    City,
    Language,
    Category,
    BaseCompensation(Vec<CompensationBucket>),
}

/// A `bucket(min, max)` range; `None` renders as the open `MIN`/`MAX` bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensationBucket {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl CompensationBucket {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl fmt::Display for CompensationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |v: Option<f64>, open: &'static str| match v {
            Some(v) => v.to_string(),
            None => open.to_string(),
        };
        write!(
            f,
            "bucket({}, {})",
            bound(self.min, "MIN"),
            bound(self.max, "MAX")
        )
    }
}

impl HistogramFacet {
    fn field(&self) -> &'static str {
        match self {
            HistogramFacet::CompanyId => "company_id",
            HistogramFacet::CompanyDisplayName => "company_display_name",
            HistogramFacet::CompanySize => "company_size",
            HistogramFacet::EmploymentType => "employment_type",
            HistogramFacet::DatePublished => "date_published",
            HistogramFacet::EducationLevel => "education_level",
            HistogramFacet::ExperienceLevel => "experience_level",
            HistogramFacet::Admin1 => "admin1",
            HistogramFacet::Country => "country",
            HistogramFacet::City => "city",
            HistogramFacet::Language => "language",
            HistogramFacet::Category => "category",
            HistogramFacet::BaseCompensation(_) => "base_compensation",
        }
    }

    /// Render the facet in the histogram query expression language
    pub fn to_query(&self) -> String {
        match self {
            HistogramFacet::BaseCompensation(buckets) if !buckets.is_empty() => {
                let buckets: Vec<String> = buckets.iter().map(|b| b.to_string()).collect();
                format!("count({}, [{}])", self.field(), buckets.join(", "))
            }
            _ => format!("count({})", self.field()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchMode {
    JobSearch,
    FeaturedJobSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub domain: String,
    pub session_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramQuery {
    pub histogram_query: String,
}

/// Body of `projects.jobs.search`; `parent` travels in the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchJobsRequest {
    #[serde(skip)]
    pub parent: String,
    pub request_metadata: RequestMetadata,
    pub search_mode: SearchMode,
    pub job_query: JobQuery,
    pub histogram_queries: Vec<HistogramQuery>,
}

impl SearchJobsRequest {
    pub fn new(parent: impl Into<String>, request_metadata: RequestMetadata) -> Self {
        Self {
            parent: parent.into(),
            request_metadata,
            search_mode: SearchMode::JobSearch,
            job_query: JobQuery::default(),
            histogram_queries: Vec::new(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.job_query.companies.push(company.into());
        self
    }

    pub fn with_facets(mut self, facets: &[HistogramFacet]) -> Self {
        self.histogram_queries.extend(facets.iter().map(|f| HistogramQuery {
            histogram_query: f.to_query(),
        }));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingJob {
    #[serde(default)]
    pub job: Job,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramQueryResult {
    #[serde(default)]
    pub histogram_query: String,
    /// Bucket key to count, in key order
    #[serde(default, deserialize_with = "deserialize_counts")]
    pub histogram: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchJobsResponse {
    #[serde(default)]
    pub matching_jobs: Vec<MatchingJob>,
    #[serde(default)]
    pub histogram_query_results: Vec<HistogramQueryResult>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

/// int64 values are strings in proto3 JSON, but numbers are accepted too
#[derive(Deserialize)]
#[serde(untagged)]
enum Int64 {
    Number(i64),
    Text(String),
}

fn deserialize_counts<'de, D>(deserializer: D) -> Result<BTreeMap<String, i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Int64>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let count = match value {
                Int64::Number(n) => n,
                Int64::Text(s) => s.parse().map_err(serde::de::Error::custom)?,
            };
            Ok((key, count))
        })
        .collect()
}
