//! GCP API interaction module
//!
//! This module provides the RPC client layer the samples build on:
//! authentication, HTTP transport, and endpoint URL helpers.
//!
//! # Module Structure
//!
//! - [`auth`] - Application Default Credentials or a literal access token
//! - [`client`] - Main GCP client and its construction options
//! - [`http`] - HTTP utilities and the per-call error type
//!
//! # Example
//!
//! ```ignore
//! use gcp_samples::gcp::client::{ClientOptions, GcpClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GcpClient::new(&ClientOptions::default()).await?;
//!     let url = client.securitycenter_url("organizations/123/sources/456/findings");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;

pub use auth::Credentials;
pub use client::{ClientOptions, Endpoints, GcpClient};
pub use http::{format_request_error, RequestError};
