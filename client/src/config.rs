//! Build-time client configuration.
//!
//! Values are baked in at compile time from `DASHBOARD_*` environment
//! variables, falling back to local-development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_CONTACT_EMAIL: &str = "jdatosanalitica@ucacue.edu.ec";

/// `localStorage` key holding the bearer credential.
pub const CREDENTIAL_STORAGE_KEY: &str = "auth_token";

/// Upper bound on every backend call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Automatic retries allowed after a rate-limited embed-token exchange.
pub const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Backoff grows by this many seconds per attempt.
pub const RATE_LIMIT_BACKOFF_STEP_SECS: u32 = 2;

/// Browser bundle of the report-visualization widget, loaded by the page shell.
pub const WIDGET_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/powerbi-client@2.23.1/dist/powerbi.min.js";

/// Backend base URL without a trailing slash.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("DASHBOARD_API_URL"))
}

/// External identity-provider login entry point.
pub fn login_url() -> String {
    resolve_login_url(option_env!("DASHBOARD_LOGIN_URL"), &api_base_url())
}

/// Address shown to users whose access request was rejected.
pub fn contact_email() -> &'static str {
    option_env!("DASHBOARD_CONTACT_EMAIL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_CONTACT_EMAIL)
}

fn normalize_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_owned()
}

fn resolve_login_url(raw: Option<&str>, api_base: &str) -> String {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(url) => url.to_owned(),
        None => format!("{api_base}/auth/login/microsoft"),
    }
}
