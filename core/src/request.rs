//! Request building and response interpretation shared by all clients.
//!
//! # Design
//! `RequestHelper` turns `(method, path, body, requires_auth)` into an
//! `HttpRequest`, hands it to the transport, and folds every failure into one
//! `ApiError`. Building and checking stay as separate pure functions so they
//! can be exercised without a transport.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::session::SessionStore;
use crate::types::ErrorBody;

/// Builds, sends and checks requests against one API origin.
#[derive(Clone)]
pub struct RequestHelper {
    base_url: String,
    session: SessionStore,
    transport: Arc<dyn Transport>,
}

impl RequestHelper {
    pub fn new(base_url: &str, session: SessionStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            transport,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build a request for `path` relative to the base URL.
    ///
    /// Fails with `Unauthenticated` when `requires_auth` is set and no token
    /// is held.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        requires_auth: bool,
    ) -> Result<HttpRequest> {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("cache-control".to_string(), "no-store".to_string()),
        ];
        if requires_auth {
            let token = self.session.token()?.ok_or(ApiError::Unauthenticated)?;
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
        })
    }

    /// Send `request` and decode a JSON success body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        default_message: &str,
    ) -> Result<T> {
        let response = self.execute(request, default_message).await?;
        parse_body(&response)
    }

    /// Send `request` and discard the success body.
    pub async fn send_empty(&self, request: HttpRequest, default_message: &str) -> Result<()> {
        self.execute(request, default_message).await.map(|_| ())
    }

    async fn execute(&self, request: HttpRequest, default_message: &str) -> Result<HttpResponse> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, "sending request");

        let response = self.transport.execute(request).await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "transport failure");
        })?;

        check_status(&response, default_message).inspect_err(|e| {
            tracing::warn!(%method, %path, status = response.status, error = %e, "request failed");
        })?;
        Ok(response)
    }
}

impl std::fmt::Debug for RequestHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHelper")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Map a non-2xx response to `RequestFailed`, preferring the server's first
/// error message over `default_message`.
pub fn check_status(response: &HttpResponse, default_message: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        message: server_message(&response.body).unwrap_or_else(|| default_message.to_string()),
    })
}

/// First non-blank entry of an `{ "errors": [...] }` body.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .into_iter()
        .next()
        .filter(|message| !message.trim().is_empty())
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
