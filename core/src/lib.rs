//! Async client core for the authentication portal API.
//!
//! # Overview
//! Talks JSON to the portal backend, unwraps its `{status, data, message}`
//! envelope, and tracks each remote call's lifecycle for presentation code.
//!
//! # Design
//! - `PortalClient` holds only `base_url` and a shared `Transport`.
//! - Each call is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`); `get` / `post` /
//!   `post_with_optional_response` compose them around the transport.
//! - Every failure is a `RequestError`.
//! - `FetchTask` is the fetch hook: Idle, Loading, Succeeded or Failed,
//!   observable through a watch channel.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod consent;
pub mod envelope;
pub mod error;
pub mod hooks;
pub mod http;
pub mod services;
pub mod task;
pub mod transport;
pub mod types;

pub use client::PortalClient;
pub use config::{ConfigOverrides, PortalConfig};
pub use consent::{ConsentView, Notifier, TracingNotifier};
pub use envelope::{Envelope, EnvelopeStatus};
pub use error::RequestError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use task::{FetchState, FetchTask};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AuthenticationLevel, ConsentDecision, ConsentRequest, ConsentResponse, PortalState, Privilege,
    SecondFactorMethod, UserPreferences,
};
