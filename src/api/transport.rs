//! HTTP transport seam
//!
//! The envelope client only needs "POST this JSON with this bearer token and
//! give me back status + body text". Keeping that behind a trait lets tests
//! swap in an in-memory transport.

use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for anything that can deliver an authenticated JSON POST
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` to `url`. Only transport-level failures are errors; any
    /// HTTP status, including 4xx/5xx, comes back as a `RawResponse`.
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<RawResponse, ClientError>;
}

/// reqwest-backed transport. No timeout or retry is configured.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Network error: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Network error: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
