//! Security Command Center
//!
//! - [`model`] - `Finding` and `CreateFindingRequest`
//! - [`api`] - the `findings.create` call
//! - [`findings`] - the finding creation sample

pub mod api;
pub mod findings;
pub mod model;

pub use findings::{create_finding, timestamp_proto};
pub use model::{Finding, FindingState};
