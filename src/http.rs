use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PipelineError, Service};

/// Outcome of a request that reached the remote side.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// 2xx response whose body decoded into `T`.
    Found(T),
    /// Any non-success HTTP status.
    Status(u16),
}

impl<T> Fetched<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::Status(_) => None,
        }
    }
}

/// Shared client for the lookup services. Every call made through it is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Sends `request` and decodes a successful body as `T`.
///
/// Transport failures and undecodable bodies become `PipelineError::Upstream`;
/// the URL is stripped from transport errors since it may carry an API key.
pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    service: Service,
) -> Result<Fetched<T>, PipelineError> {
    let response = request
        .send()
        .await
        .map_err(|e| PipelineError::upstream(service, describe(e)))?;

    let status = response.status();
    if !status.is_success() {
        debug!(%service, status = status.as_u16(), "non-success status");
        return Ok(Fetched::Status(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| PipelineError::upstream(service, describe(e)))?;

    serde_json::from_slice(&body)
        .map(Fetched::Found)
        .map_err(|e| PipelineError::upstream(service, format!("Failed to parse response: {}", e)))
}

fn describe(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        format!("Failed to send request: {}", error.without_url())
    }
}
