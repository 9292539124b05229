//! Typed request wrapper for the portal API.
//!
//! # Design
//! `PortalClient` holds a `base_url` and a shared `Transport`, and carries no
//! mutable state between calls. Each call is split into a `build_*` step
//! that produces an `HttpRequest` and a `parse_*` step that unwraps the
//! response envelope; `get`, `post` and `post_with_optional_response` run
//! both around one transport round-trip. No retries, no caching.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::PortalConfig;
use crate::envelope::{Envelope, EnvelopeStatus};
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct PortalClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PortalClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Client over a reqwest transport using the configured timeout.
    pub fn from_config(config: &PortalConfig) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(&config.base_url, Arc::new(transport)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        let path = path.trim();
        if self.base_url.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: path.to_string(),
            url: self.url(path),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, RequestError> {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        let body = body
            .map(|body| {
                serde_json::to_string(body).map_err(|e| RequestError::serialization(path, &e))
            })
            .transpose()?;
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: path.to_string(),
            url: self.url(path),
            headers,
            body,
        })
    }

    /// Unwrap an envelope whose payload must be present. `""`, `0` and
    /// `false` count as absent; `{}` and `[]` do not.
    pub fn parse_required<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        response: &HttpResponse,
    ) -> Result<T, RequestError> {
        let data = self
            .unwrap_envelope(method, path, response)?
            .filter(|data| !is_empty_payload(data))
            .ok_or_else(|| RequestError::unexpected_response(path, response.status))?;
        decode_payload(path, response.status, data)
    }

    /// Unwrap an envelope whose payload may be absent.
    pub fn parse_optional<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        response: &HttpResponse,
    ) -> Result<Option<T>, RequestError> {
        self.unwrap_envelope(method, path, response)?
            .map(|data| decode_payload(path, response.status, data))
            .transpose()
    }

    fn unwrap_envelope(
        &self,
        method: HttpMethod,
        path: &str,
        response: &HttpResponse,
    ) -> Result<Option<Value>, RequestError> {
        if !response.is_success() {
            let reason = serde_json::from_str::<Envelope>(&response.body)
                .ok()
                .and_then(|envelope| envelope.message);
            return Err(RequestError::failed(
                method,
                path,
                response.status,
                reason.as_deref(),
            ));
        }

        // The payload stays untyped until the status says it is worth decoding.
        let envelope: Envelope<Value> = serde_json::from_str(&response.body)
            .map_err(|e| RequestError::decode(path, response.status, &e))?;

        match envelope.status {
            EnvelopeStatus::Ko => Err(RequestError::failed(
                method,
                path,
                response.status,
                envelope.message.as_deref(),
            )),
            EnvelopeStatus::Ok => Ok(envelope.data),
        }
    }

    /// `GET path`, requiring a payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.send(self.build_get(path)).await?;
        self.parse_required(HttpMethod::Get, path, &response)
    }

    /// `POST path` with an optional JSON body, requiring a payload.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.build_post(path, body)?).await?;
        self.parse_required(HttpMethod::Post, path, &response)
    }

    /// `POST path` with an optional JSON body, tolerating an absent payload.
    pub async fn post_with_optional_response<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.build_post(path, body)?).await?;
        self.parse_optional(HttpMethod::Post, path, &response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        debug!(method = %request.method, path = %request.path, "portal request");
        self.transport.execute(request).await
    }
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    }
}

fn decode_payload<T: DeserializeOwned>(
    path: &str,
    status: u16,
    data: Value,
) -> Result<T, RequestError> {
    serde_json::from_value(data).map_err(|e| RequestError::decode(path, status, &e))
}
