use super::*;

#[test]
fn bearer_formats_header_value() {
    assert_eq!(bearer("abc.def"), "Bearer abc.def");
}

#[test]
fn join_endpoint_normalizes_slashes() {
    assert_eq!(join_endpoint("http://localhost:3001", "/reportes"), "http://localhost:3001/reportes");
    assert_eq!(join_endpoint("http://localhost:3001/", "reportes"), "http://localhost:3001/reportes");
    assert_eq!(
        join_endpoint("https://api.example.edu", "/auth/admin/users/7/approve"),
        "https://api.example.edu/auth/admin/users/7/approve"
    );
}

#[test]
fn auth_header_starts_unset() {
    let header = AuthHeader::default();
    assert!(!header.is_set());
    assert_eq!(header.value(), None);
}

#[test]
fn auth_header_set_and_clear() {
    let header = AuthHeader::default();
    header.set_credential(Some("tok"));
    assert_eq!(header.value().as_deref(), Some("Bearer tok"));
    header.set_credential(None);
    assert!(!header.is_set());
}

#[test]
fn client_clones_share_one_header() {
    let client = ApiClient::new("http://localhost:3001", config::REQUEST_TIMEOUT, AuthHeader::default());
    let other = client.clone();
    client.auth_header().set_credential(Some("shared"));
    assert_eq!(other.auth_header().value().as_deref(), Some("Bearer shared"));
}

#[test]
fn client_endpoint_uses_base_url() {
    let client = ApiClient::new("https://api.example.edu/", config::REQUEST_TIMEOUT, AuthHeader::default());
    assert_eq!(client.endpoint("/embed-token"), "https://api.example.edu/embed-token");
    assert_eq!(client.timeout(), config::REQUEST_TIMEOUT);
}
