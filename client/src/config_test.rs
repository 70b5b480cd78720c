use super::*;

#[test]
fn base_url_defaults_when_unset_or_blank() {
    assert_eq!(normalize_base_url(None), DEFAULT_API_URL);
    assert_eq!(normalize_base_url(Some("  ")), DEFAULT_API_URL);
}

#[test]
fn base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url(Some("https://api.example.edu/")), "https://api.example.edu");
    assert_eq!(normalize_base_url(Some("https://api.example.edu//")), "https://api.example.edu");
}

#[test]
fn login_url_derives_from_api_base() {
    assert_eq!(
        resolve_login_url(None, "https://api.example.edu"),
        "https://api.example.edu/auth/login/microsoft"
    );
}

#[test]
fn explicit_login_url_wins() {
    assert_eq!(
        resolve_login_url(Some("https://idp.example.edu/start"), "https://api.example.edu"),
        "https://idp.example.edu/start"
    );
}

#[test]
fn retry_policy_constants() {
    assert_eq!(MAX_RATE_LIMIT_RETRIES, 3);
    assert_eq!(RATE_LIMIT_BACKOFF_STEP_SECS, 2);
    assert_eq!(REQUEST_TIMEOUT.as_secs(), 30);
}
