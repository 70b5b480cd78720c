//! REST client for the reporting backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each bounded by
//! `REQUEST_TIMEOUT` and optionally tied to an `AbortHandle`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthHeader` is the one piece of shared mutable request state. Every
//! `ApiClient` clone reads it when building a request; only the session store
//! writes it, so a logout is visible to the very next request.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::abort::AbortHandle;
use super::error::ApiError;
use super::types::{EmbedCredential, ReportSummary, User};
use crate::config;
use crate::state::roster::RosterAction;

/// Default `Authorization` value attached to every outgoing request.
#[derive(Clone, Debug, Default)]
pub struct AuthHeader(Arc<RwLock<Option<String>>>);

impl AuthHeader {
    /// Current header value, e.g. `Bearer abc`.
    pub fn value(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_set(&self) -> bool {
        self.0.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub(crate) fn set_credential(&self, credential: Option<&str>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = credential.map(bearer);
    }
}

/// Format a credential as a bearer header value.
pub fn bearer(credential: &str) -> String {
    format!("Bearer {credential}")
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Handle to the backend shared through context.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    auth: AuthHeader,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, auth: AuthHeader) -> Self {
        Self { base_url: base_url.into(), timeout, auth }
    }

    /// Client against the build-time configured backend.
    pub fn from_config(auth: AuthHeader) -> Self {
        Self::new(config::api_base_url(), config::REQUEST_TIMEOUT, auth)
    }

    pub fn auth_header(&self) -> &AuthHeader {
        &self.auth
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.base_url, path)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /reportes`.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; `ApiError::Cancelled` when `abort` fired.
    pub async fn list_reports(&self, abort: Option<&AbortHandle>) -> Result<Vec<ReportSummary>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorized(gloo_net::http::Request::get(&self.endpoint("/reportes")));
            let resp = self.dispatch(request, None, abort).await?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = abort;
            Err(unavailable())
        }
    }

    /// `POST /embed-token {reportId}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; `ApiError::RateLimited` on HTTP 429.
    pub async fn embed_credential(
        &self,
        report_id: i64,
        abort: Option<&AbortHandle>,
    ) -> Result<EmbedCredential, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::to_value(super::types::EmbedTokenRequest { report_id })
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let request = self.authorized(gloo_net::http::Request::post(&self.endpoint("/embed-token")));
            let resp = self.dispatch(request, Some(payload), abort).await?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (report_id, abort);
            Err(unavailable())
        }
    }

    /// `GET /auth/me` with an explicit credential, independent of the default
    /// header, so a login exchange can verify a token before it is installed.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; `ApiError::Unauthorized` for a bad token.
    pub async fn current_user(&self, credential: &str, abort: Option<&AbortHandle>) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&self.endpoint("/auth/me"))
                .header("Content-Type", "application/json")
                .header("Authorization", &bearer(credential));
            let resp = self.dispatch(request, None, abort).await?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credential, abort);
            Err(unavailable())
        }
    }

    /// `GET /auth/admin/users`.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; `ApiError::Forbidden` for non-admins,
    /// `ApiError::Cancelled` when `abort` fired.
    pub async fn list_users(&self, abort: Option<&AbortHandle>) -> Result<Vec<User>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorized(gloo_net::http::Request::get(&self.endpoint("/auth/admin/users")));
            let resp = self.dispatch(request, None, abort).await?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = abort;
            Err(unavailable())
        }
    }

    /// `PUT /auth/admin/users/{id}/{approve|reject|role}`. Only the status is
    /// inspected; any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure.
    pub async fn apply_roster_action(&self, user_id: i64, action: RosterAction) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorized(gloo_net::http::Request::put(&self.endpoint(&action.path(user_id))));
            self.dispatch(request, action.body(), None).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user_id, action);
            Err(unavailable())
        }
    }

    #[cfg(feature = "hydrate")]
    fn authorized(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match self.auth.value() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// Send with timeout and abort wiring, mapping non-2xx statuses to `ApiError`.
    #[cfg(feature = "hydrate")]
    async fn dispatch(
        &self,
        builder: gloo_net::http::RequestBuilder,
        body: Option<serde_json::Value>,
        abort: Option<&AbortHandle>,
    ) -> Result<gloo_net::http::Response, ApiError> {
        use futures::future::{Either, select};

        // Every request gets its own controller so the timeout can abort it
        // even when the caller passed no handle.
        let local = AbortHandle::new();
        let handle = abort.unwrap_or(&local);
        let signal = handle.signal();
        let builder = builder.abort_signal(signal.as_ref());
        let request = match body {
            Some(body) => builder.json(&body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let send = std::pin::pin!(request.send());
        let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(timeout_ms));
        let resp = match select(send, timer).await {
            Either::Left((Ok(resp), _)) => resp,
            Either::Left((Err(_), _)) if handle.is_aborted() => return Err(ApiError::Cancelled),
            Either::Left((Err(e), _)) => return Err(ApiError::Transport(e.to_string())),
            Either::Right(((), _)) => {
                handle.abort();
                return Err(ApiError::Timeout);
            }
        };

        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &text);
        leptos::logging::warn!("api error: url={} status={status} error={err}", resp.url());
        Err(err)
    }
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available on server".to_owned())
}
