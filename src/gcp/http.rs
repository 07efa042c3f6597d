//! HTTP utilities for GCP REST API calls

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Errors from a single REST round trip
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status} {code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to obtain access token: {0}")]
    Auth(#[source] anyhow::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RequestError {
    /// HTTP status of the failed call, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// An id segment of a resource name: no separators, no `.`/`..`
fn is_valid_id(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

/// Check `name` against `{collection}/{id}/{collection}/{id}...`
///
/// `collections[i]` lists the literal collection names accepted at position `i`.
/// Names are spliced into request paths, so anything else is rejected locally.
pub fn check_resource_name(
    kind: &str,
    name: &str,
    collections: &[&[&str]],
) -> Result<(), RequestError> {
    let segments: Vec<&str> = name.split('/').collect();
    let well_formed = segments.len() == collections.len() * 2
        && segments
            .chunks(2)
            .zip(collections)
            .all(|(pair, accepted)| accepted.contains(&pair[0]) && is_valid_id(pair[1]));

    if well_formed {
        Ok(())
    } else {
        let expected: Vec<String> = collections
            .iter()
            .map(|c| format!("{}/{{id}}", c.join("|")))
            .collect();
        Err(RequestError::InvalidArgument(format!(
            "{} {:?} is not of the form {}",
            kind,
            name,
            expected.join("/")
        )))
    }
}

/// Google JSON error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Build a `RequestError::Status` from a non-success response body
fn status_error(status: reqwest::StatusCode, body: &str) -> RequestError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.status, envelope.error.message),
        Err(_) => (String::new(), String::new()),
    };

    RequestError::Status {
        status: status.as_u16(),
        code: if code.is_empty() {
            status.canonical_reason().unwrap_or("UNKNOWN").to_string()
        } else {
            code
        },
        message,
    }
}

/// HTTP client wrapper for GCP API calls
#[derive(Clone)]
pub struct GcpHttpClient {
    client: Client,
}

impl GcpHttpClient {
    /// Create a new HTTP client
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gcp-samples/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a POST request with a JSON body and decode the JSON response
    pub async fn post<B, T>(&self, url: &str, token: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(status_error(status, &response_body));
        }

        // Empty 2xx bodies decode as `{}` so all-default messages still parse
        let response_body = if response_body.trim().is_empty() {
            "{}"
        } else {
            response_body.as_str()
        };

        Ok(serde_json::from_str(response_body)?)
    }
}

/// Format a request error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_request_error(error: &RequestError) -> String {
    match error {
        RequestError::Status { status, .. } => match status {
            400 => "Invalid request. Check your parameters.".to_string(),
            401 => "Authentication failed. Run 'gcloud auth application-default login'.".to_string(),
            403 => "Permission denied. Check your GCP IAM permissions.".to_string(),
            404 => "Resource not found.".to_string(),
            409 => "Resource conflict. The resource may already exist.".to_string(),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500 | 503 => "GCP service temporarily unavailable. Please try again.".to_string(),
            _ => "Request failed. Check your network connection and try again.".to_string(),
        },
        RequestError::Transport(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        RequestError::Auth(_) => {
            "Authentication failed. Run 'gcloud auth application-default login'.".to_string()
        }
        other => {
            let error_str = other.to_string();
            let sanitized = error_str
                .chars()
                .filter(|c| c.is_ascii_graphic() || *c == ' ')
                .take(80)
                .collect::<String>();

            if sanitized.len() < error_str.len() {
                format!("{}...", sanitized)
            } else {
                sanitized
            }
        }
    }
}
