use qapp_core::is_valid_url;

#[test]
fn rejects_strings_that_are_not_absolute_urls() {
    for candidate in ["not a url", "", "ht!tp://x", "example.com", "/relative/path"] {
        assert!(!is_valid_url(candidate), "{candidate:?} should be rejected");
    }
}

#[test]
fn accepts_absolute_urls_with_authority() {
    for candidate in [
        "https://example.com",
        "http://localhost:8000/path?q=1",
        "https://sub.example.org:8443/a/b#frag",
    ] {
        assert!(is_valid_url(candidate), "{candidate:?} should be accepted");
    }
}

#[test]
fn rejects_urls_without_a_host() {
    assert!(!is_valid_url("mailto:someone@example.com"));
    assert!(!is_valid_url("data:text/plain,hello"));
}
