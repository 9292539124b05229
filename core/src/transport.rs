//! The I/O seam between `PortalClient` and the network.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Executes an `HttpRequest` and returns whatever the server answered.
///
/// Implementations must return non-2xx responses as `Ok`; only failures
/// that produce no response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(RequestError::client_setup)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let HttpRequest {
            method,
            path,
            url,
            headers,
            body,
        } = request;

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| RequestError::transport(method, &path, err))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|err| RequestError::transport(method, &path, err))?;

        debug!(%method, %url, status, "portal response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
