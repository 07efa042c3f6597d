//! Shared helpers for integration tests

#![allow(dead_code)]

use gcp_samples::{ClientOptions, Credentials};
use std::future::Future;
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Client options pointing both services at the mock server
pub fn mock_options(server: &MockServer) -> ClientOptions {
    ClientOptions::default()
        .with_credentials(Credentials::AccessToken(TEST_TOKEN.to_string()))
        .with_talent_endpoint(format!("{}/v4beta1", server.uri()))
        .with_securitycenter_endpoint(format!("{}/v1", server.uri()))
}

/// Run `f` until it succeeds, at most `attempts` times, sleeping `delay`
/// between attempts. Returns the last failure if every attempt failed.
pub async fn retry<F, Fut>(attempts: usize, delay: Duration, mut f: F) -> Result<usize, String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut last_error = String::from("no attempts made");
    for attempt in 1..=attempts {
        match f().await {
            Ok(()) => return Ok(attempt),
            Err(e) => last_error = format!("attempt {}: {}", attempt, e),
        }
        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }
    Err(last_error)
}
