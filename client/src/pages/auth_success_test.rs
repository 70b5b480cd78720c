use super::*;

#[test]
fn extract_token_trims_value() {
    assert_eq!(extract_token(Some("  abc.def  ".to_owned())).as_deref(), Some("abc.def"));
}

#[test]
fn extract_token_rejects_missing_or_blank() {
    assert_eq!(extract_token(None), None);
    assert_eq!(extract_token(Some(String::new())), None);
    assert_eq!(extract_token(Some("   ".to_owned())), None);
}
