//! API client for communicating with the blog admin REST API.
//!
//! This module provides the `ApiClient` struct: the request hook that
//! attaches the bearer token, the response hook that unwraps payloads, and
//! the failure classification shared by every endpoint wrapper.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::config::Config;
use crate::events::{BusEvent, EventBus};

use super::error::{SESSION_EXPIRED_CODE, SESSION_EXPIRED_MESSAGE, UNKNOWN_ERROR_MESSAGE};
use super::expiry::ExpiryNotice;
use super::{ApiError, Notifier};

// ============================================================================
// Constants
// ============================================================================

/// How long a session-expired notice blocks further ones.
pub const DEFAULT_NOTICE_COOLDOWN: Duration = Duration::from_millis(3000);

/// Failure body sent by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: Option<i64>,
    #[serde(rename = "errMsg")]
    err_msg: Option<String>,
}

/// Page selection shared by the listing endpoints. 0/0 asks for everything.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct PageQuery {
    pub page: u32,
    pub size: u32,
}

/// API client for the blog admin API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and the session, bus and notifier are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    session: Arc<SessionStore>,
    bus: Arc<EventBus>,
    notifier: Arc<dyn Notifier>,
    expiry_notice: Arc<ExpiryNotice>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        config: &Config,
        session: Arc<SessionStore>,
        bus: Arc<EventBus>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: Arc::from(config.api_base_url.trim_end_matches('/')),
            session,
            bus,
            notifier,
            expiry_notice: ExpiryNotice::new(DEFAULT_NOTICE_COOLDOWN),
        })
    }

    /// Replace the session-expired notice cool-down.
    pub fn with_notice_cooldown(mut self, cooldown: Duration) -> Self {
        self.expiry_notice = ExpiryNotice::new(cooldown);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Whether a session-expired notice is currently showing
    pub fn is_expiry_notice_showing(&self) -> bool {
        self.expiry_notice.is_showing()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` followed by `segments`, each percent-encoded as a single
    /// path segment. For names that may contain `/`, `?` or `#`.
    pub(crate) fn segment_url(&self, path: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidUrl(self.url(path));
        let mut url = Url::parse(&self.url(path)).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ===== Hooks =====

    /// Request hook: attach the bearer token when logged in.
    /// A logged-out request goes out unchanged.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.network_failure(e))?;
        self.handle_response(response).await
    }

    /// Response hook: unwrap the payload on success, classify on failure.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await.map_err(|e| self.network_failure(e))?;

        if status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Request succeeded");
            // Endpoints that return nothing decode as `null`, which `()` accepts
            let body = if text.trim().is_empty() { "null" } else { text.as_str() };
            return serde_json::from_str(body).map_err(|e| {
                let err = ApiError::InvalidResponse(format!(
                    "{} from {}: {}",
                    e,
                    url,
                    ApiError::truncate_body(&text)
                ));
                warn!(url = %url, error = %err, "Failed to decode response");
                self.notifier.error(&err.message());
                err
            });
        }

        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) if envelope.code == Some(SESSION_EXPIRED_CODE) => {
                Err(self.session_expired())
            }
            Ok(envelope) => {
                let message = envelope
                    .err_msg
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| Self::status_message(status));
                let code = envelope.code.unwrap_or_else(|| i64::from(status.as_u16()));
                warn!(url = %url, code = code, message = %message, "Request rejected by server");
                Err(self.application_failure(code, message))
            }
            Err(_) => {
                let message = Self::status_message(status);
                warn!(
                    url = %url,
                    status = status.as_u16(),
                    body = %ApiError::truncate_body(&text),
                    "Request failed without an error envelope"
                );
                Err(self.application_failure(i64::from(status.as_u16()), message))
            }
        }
    }

    fn status_message(status: StatusCode) -> String {
        match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        }
    }

    /// The server no longer accepts our token.
    ///
    /// Every caller logs out and announces the expiry; only the first one per
    /// cool-down window shows a notice. Nothing here awaits, so the whole
    /// sequence completes before any other response is handled.
    fn session_expired(&self) -> ApiError {
        self.session.logout();
        self.bus.emit(BusEvent::LoginExpired);
        if self.expiry_notice.try_claim() {
            warn!("Session expired");
            self.notifier.error(SESSION_EXPIRED_MESSAGE);
        }
        ApiError::SessionExpired
    }

    fn application_failure(&self, code: i64, message: String) -> ApiError {
        self.notifier.error(&message);
        ApiError::Application { code, message }
    }

    fn network_failure(&self, source: reqwest::Error) -> ApiError {
        let code = ApiError::transport_code(&source);
        warn!(error = %source, code = ?code, "Request failed without a server response");
        self.notifier.error(code.unwrap_or(UNKNOWN_ERROR_MESSAGE));
        ApiError::Network { code, source }
    }

    // ===== Verbs =====

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.client.get(self.url(path))).await
    }

    /// GET `path` with percent-encoded trailing segments.
    pub async fn get_segments<T: DeserializeOwned>(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Result<T, ApiError> {
        let url = self.segment_url(path, segments)?;
        self.execute(self.client.get(url)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.client.get(self.url(path)).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.client.put(self.url(path)).json(body)).await
    }

    /// DELETE with a JSON body; the API takes id and slug arrays this way.
    pub async fn delete<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.client.delete(self.url(path)).json(body)).await
    }

    pub async fn delete_path<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.client.delete(self.url(path))).await
    }
}
