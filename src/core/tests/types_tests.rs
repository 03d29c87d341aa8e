use crate::core::types::{backend_key, split_backend_key, Field};

#[test]
fn test_backend_key_format() {
    assert_eq!(backend_key("http://example.com", Field::Username), "http://example.com!username");
    assert_eq!(backend_key("http://example.com", Field::Password), "http://example.com!password");
}

#[test]
fn test_split_uses_last_delimiter() {
    // The url itself contains '!' characters
    let key = backend_key("http://a!b.com", Field::Username);
    assert_eq!(split_backend_key(&key), Some(("http://a!b.com", Field::Username)));

    let key = backend_key("https://x.org/!/path!", Field::Password);
    assert_eq!(split_backend_key(&key), Some(("https://x.org/!/path!", Field::Password)));
}

#[test]
fn test_split_ignores_foreign_keys() {
    assert_eq!(split_backend_key("manualCreds.lastUrl"), None);
    assert_eq!(split_backend_key("http://x!token"), None);
    assert_eq!(split_backend_key("http://x!username!extra"), None);
}

#[test]
fn test_split_rejects_empty_url() {
    assert_eq!(split_backend_key("!username"), None);
    assert_eq!(split_backend_key("!password"), None);
}

#[test]
fn test_split_is_case_sensitive() {
    assert_eq!(split_backend_key("http://x!Username"), None);
}
