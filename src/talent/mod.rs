//! Cloud Talent Solution
//!
//! - [`model`] - `SearchJobsRequest`, histogram facets, and the response
//! - [`api`] - the `projects.jobs.search` call
//! - [`histogram`] - the histogram search sample

pub mod api;
pub mod histogram;
pub mod model;

pub use histogram::{company_id_from_name, histogram_search};
pub use model::{CompensationBucket, HistogramFacet, SearchJobsResponse};
