//! Shared HTTP client construction.

use crate::error::{Result, TripmateError};
use std::time::Duration;

/// User agent sent with every outbound request.
const USER_AGENT: &str = concat!("tripmate/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client with the given request timeout.
pub fn create_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TripmateError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Create an HTTP client with a timeout given in whole seconds.
pub fn create_client_secs(timeout_secs: u64) -> Result<reqwest::Client> {
    create_client(Duration::from_secs(timeout_secs))
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a:8000/", "/run"), "http://a:8000/run");
        assert_eq!(join_url("http://a:8000", "run"), "http://a:8000/run");
        assert_eq!(
            join_url("https://api.frankfurter.dev/v1", "latest"),
            "https://api.frankfurter.dev/v1/latest"
        );
    }
}
