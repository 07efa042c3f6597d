//! GCP Client
//!
//! Main client for interacting with GCP APIs, combining authentication
//! and HTTP functionality.

use super::auth::{Credentials, GcpCredentials};
use super::http::{GcpHttpClient, RequestError};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Default Cloud Talent Solution REST endpoint
pub const DEFAULT_TALENT_ENDPOINT: &str = "https://jobs.googleapis.com/v4beta1";

/// Default Security Command Center REST endpoint
pub const DEFAULT_SECURITYCENTER_ENDPOINT: &str = "https://securitycenter.googleapis.com/v1";

/// Base URLs for the services the samples talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub talent: String,
    pub securitycenter: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            talent: DEFAULT_TALENT_ENDPOINT.to_string(),
            securitycenter: DEFAULT_SECURITYCENTER_ENDPOINT.to_string(),
        }
    }
}

/// Everything needed to build a [`GcpClient`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl ClientOptions {
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_talent_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.talent = endpoint.into();
        self
    }

    pub fn with_securitycenter_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.securitycenter = endpoint.into();
        self
    }
}

/// Main GCP client
pub struct GcpClient {
    pub credentials: GcpCredentials,
    pub http: GcpHttpClient,
    talent_endpoint: String,
    securitycenter_endpoint: String,
}

/// Validate an endpoint and strip any trailing slash
fn parse_endpoint(name: &str, endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint).with_context(|| format!("Invalid {} endpoint", name))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Invalid {} endpoint: unsupported scheme '{}'", name, url.scheme());
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

impl GcpClient {
    /// Create a new GCP client
    pub async fn new(options: &ClientOptions) -> Result<Self> {
        let talent_endpoint = parse_endpoint("talent", &options.endpoints.talent)?;
        let securitycenter_endpoint =
            parse_endpoint("securitycenter", &options.endpoints.securitycenter)?;

        let credentials = GcpCredentials::new(&options.credentials)
            .await
            .context("Failed to initialize GCP credentials")?;

        let http = GcpHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            talent_endpoint,
            securitycenter_endpoint,
        })
    }

    /// Make a POST request to a GCP API
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self
            .credentials
            .get_token()
            .await
            .map_err(RequestError::Auth)?;
        self.http.post(url, &token, body).await
    }

    // =========================================================================
    // Cloud Talent Solution API helpers
    // =========================================================================

    /// Build Cloud Talent Solution API URL
    pub fn talent_url(&self, path: &str) -> String {
        format!("{}/{}", self.talent_endpoint, path)
    }

    // =========================================================================
    // Security Command Center API helpers
    // =========================================================================

    /// Build Security Command Center API URL
    pub fn securitycenter_url(&self, path: &str) -> String {
        format!("{}/{}", self.securitycenter_endpoint, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_options() -> ClientOptions {
        ClientOptions::default().with_credentials(Credentials::AccessToken("t".to_string()))
    }

    #[tokio::test]
    async fn test_url_helpers_strip_trailing_slash() {
        let options = token_options()
            .with_talent_endpoint("http://localhost:1234/v4beta1/")
            .with_securitycenter_endpoint("http://localhost:1234/v1");
        let client = GcpClient::new(&options).await.unwrap();

        assert_eq!(
            client.talent_url("projects/p/jobs:search"),
            "http://localhost:1234/v4beta1/projects/p/jobs:search"
        );
        assert_eq!(
            client.securitycenter_url("organizations/1/sources/2/findings"),
            "http://localhost:1234/v1/organizations/1/sources/2/findings"
        );
    }

    #[tokio::test]
    async fn test_invalid_endpoint_rejected() {
        let options = token_options().with_securitycenter_endpoint("not a url");
        let err = GcpClient::new(&options).await.err().unwrap();
        assert!(err.to_string().contains("securitycenter"));
    }

    #[tokio::test]
    async fn test_non_http_scheme_rejected() {
        let options = token_options().with_talent_endpoint("ftp://example.com");
        assert!(GcpClient::new(&options).await.is_err());
    }
}
