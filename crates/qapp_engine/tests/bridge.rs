use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use qapp_engine::{
    fetch_identity, parse_host_message, read_theme, AccountInfo, ApiSettings, BridgeError,
    HostEvent, HttpHostBridge, StaticThemeSource, UnavailableBridge, IDENTITY_METHOD,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn bridge_answering(body: serde_json::Value) -> (MockServer, HttpHostBridge) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bridge"))
        .and(body_json(json!({ "method": IDENTITY_METHOD, "params": {} })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    let bridge = HttpHostBridge::new(&format!("{}/bridge", server.uri()), &ApiSettings::default())
        .expect("bridge");
    (server, bridge)
}

#[tokio::test]
async fn identity_prefers_full_account() {
    let (_server, bridge) =
        bridge_answering(json!({ "name": "alice", "address": "QdSnUy6sUiEnaN87dWmE92g1uQjrvPgrWG" }))
            .await;
    let account = fetch_identity(&bridge).await.expect("identity");
    assert_eq!(
        account,
        AccountInfo {
            name: Some("alice".into()),
            address: Some("QdSnUy6sUiEnaN87dWmE92g1uQjrvPgrWG".into()),
        }
    );
}

#[tokio::test]
async fn identity_with_address_only_is_accepted() {
    let (_server, bridge) = bridge_answering(json!({ "address": "Qaddr" })).await;
    let account = fetch_identity(&bridge).await.expect("identity");
    assert_eq!(account.name, None);
    assert_eq!(account.address.as_deref(), Some("Qaddr"));
}

#[tokio::test]
async fn identity_without_fields_is_malformed() {
    let (_server, bridge) = bridge_answering(json!({})).await;
    let err = fetch_identity(&bridge).await.unwrap_err();
    assert!(matches!(err, BridgeError::Malformed(_)));
}

#[tokio::test]
async fn host_error_field_is_a_rejection() {
    let (_server, bridge) = bridge_answering(json!({ "error": "User declined request" })).await;
    assert_eq!(
        fetch_identity(&bridge).await,
        Err(BridgeError::Rejected("User declined request".into()))
    );
}

#[tokio::test]
async fn missing_host_fails_identity() {
    assert_eq!(
        fetch_identity(&UnavailableBridge).await,
        Err(BridgeError::Unavailable)
    );
}

#[test]
fn host_messages_are_classified_by_type() {
    assert_eq!(
        parse_host_message(r#"{"type":"themeChange"}"#),
        Some(HostEvent::ThemeChange)
    );
    assert_eq!(
        parse_host_message(r#"{"type":"navigate","to":"x"}"#),
        Some(HostEvent::Other("navigate".into()))
    );
    assert_eq!(parse_host_message(r#"{"kind":"themeChange"}"#), None);
    assert_eq!(parse_host_message("not json"), None);
}

#[test]
fn theme_read_reports_absent_variables() {
    let mut values = BTreeMap::new();
    values.insert("--mdc-theme-primary".to_string(), "#6200ee".to_string());
    let source = StaticThemeSource::new(values);

    let readings = read_theme(&source, ["--mdc-theme-primary", "--mdc-theme-surface"]);
    assert_eq!(
        readings,
        vec![
            ("--mdc-theme-primary".to_string(), Some("#6200ee".to_string())),
            ("--mdc-theme-surface".to_string(), None),
        ]
    );
}
