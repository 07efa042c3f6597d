//! Samples for calling Google Cloud REST APIs.
//!
//! Each sample is a single async function that builds a request, makes one
//! call, and returns the result:
//!
//! - [`talent::histogram_search`] - job search with histogram queries
//! - [`securitycenter::create_finding`] - create a security finding
//!
//! ```ignore
//! use gcp_samples::{securitycenter, ClientOptions};
//!
//! async fn example() -> gcp_samples::Result<()> {
//!     let finding = securitycenter::create_finding(
//!         &ClientOptions::default(),
//!         "organizations/111122222444/sources/1234",
//!     )
//!     .await?;
//!     println!("{}", finding.name);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gcp;
pub mod securitycenter;
pub mod talent;

pub use error::{Error, Result};
pub use gcp::{ClientOptions, Credentials, Endpoints, RequestError};
