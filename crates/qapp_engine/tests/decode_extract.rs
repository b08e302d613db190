use pretty_assertions::assert_eq;
use qapp_engine::{decode_html, extract_title, ResourceStore};

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_replaces_bytes_invalid_for_declared_charset() {
    let decoded = decode_html(b"ok \xe9 done", Some("text/html; charset=\"utf-8\""));
    assert_eq!(decoded.html, "ok \u{FFFD} done");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn title_is_whitespace_collapsed() {
    let html = "<html><head><title>\n  Archived\n   page </title></head><body></body></html>";
    assert_eq!(extract_title(html).as_deref(), Some("Archived page"));
}

#[test]
fn blank_or_missing_title_is_none() {
    assert_eq!(extract_title("<html><head><title>  </title></head></html>"), None);
    assert_eq!(extract_title("<html><body>no head</body></html>"), None);
}

#[test]
fn store_tracks_live_handles() {
    let store = ResourceStore::new();
    let shared = store.clone();
    store.insert(1, "one");
    store.insert(2, String::from("two"));
    assert_eq!(shared.live_count(), 2);
    assert_eq!(shared.get(1).as_deref(), Some("one"));

    assert!(store.release(1));
    assert!(!store.release(1));
    assert_eq!(shared.get(1), None);
    assert_eq!(shared.live_count(), 1);
}
