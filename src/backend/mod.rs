//! Client for the managed backend-as-a-service.
//!
//! The service exposes two surfaces: an auth API (sign-up, password sign-in,
//! token introspection) and a row API addressed per table with query-string
//! filters. This layer never executes queries itself; everything here is a
//! network round-trip.

mod auth;
mod table;

pub use auth::{AuthApi, AuthUser, Session};
pub use table::TableQuery;

use std::time::Duration;

use reqwest::{Client, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to managed backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("managed backend returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("managed backend returned no rows for an insert")]
    MissingRow,

    #[error("refusing unfiltered mutation on table {0}")]
    UnfilteredMutation(String),
}

#[derive(Clone)]
pub struct Backend {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl Backend {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { backend: self }
    }

    /// Starts a row-API query against `table`.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }
}

/// Maps a non-2xx response to [`BackendError::Service`], surfacing the
/// service's own error message when the body carries one.
pub(crate) async fn check(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or(body);
    Err(BackendError::Service { status: status.as_u16(), message })
}
