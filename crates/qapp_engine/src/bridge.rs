//! Request/response channel to the embedding host application.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;

use crate::ApiSettings;

/// Host method that returns the signed-in account.
pub const IDENTITY_METHOD: &str = "GET_USER_ACCOUNT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("not running inside a host")]
    Unavailable,
    #[error("host rejected the request: {0}")]
    Rejected(String),
    #[error("host transport failed: {0}")]
    Transport(String),
    #[error("malformed host response: {0}")]
    Malformed(String),
}

#[async_trait::async_trait]
pub trait HostBridge: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, BridgeError>;
}

/// Bridge used when no host is configured; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBridge;

#[async_trait::async_trait]
impl HostBridge for UnavailableBridge {
    async fn request(&self, _method: &str, _params: Value) -> Result<Value, BridgeError> {
        Err(BridgeError::Unavailable)
    }
}

/// Bridge that posts `{method, params}` to a host endpoint and expects the
/// JSON result back. A body carrying an `error` field is a rejection.
#[derive(Debug, Clone)]
pub struct HttpHostBridge {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpHostBridge {
    pub fn new(endpoint: &str, settings: &ApiSettings) -> Result<Self, BridgeError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| BridgeError::Transport(err.to_string()))?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BridgeError::Transport(err.to_string()))?;
        Ok(Self { endpoint, http })
    }
}

#[async_trait::async_trait]
impl HostBridge for HttpHostBridge {
    async fn request(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        let body = serde_json::to_vec(&json!({ "method": method, "params": params }))
            .map_err(|err| BridgeError::Malformed(err.to_string()))?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| BridgeError::Transport(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| BridgeError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(BridgeError::Rejected(status.to_string()));
        }
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|err| BridgeError::Malformed(err.to_string()))?;
        if let Some(error) = value.get("error") {
            let reason = error
                .as_str()
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| error.to_string());
            return Err(BridgeError::Rejected(reason));
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

pub async fn fetch_identity(bridge: &dyn HostBridge) -> Result<AccountInfo, BridgeError> {
    let value = bridge.request(IDENTITY_METHOD, json!({})).await?;
    let account: AccountInfo =
        serde_json::from_value(value).map_err(|err| BridgeError::Malformed(err.to_string()))?;
    if account.name.is_none() && account.address.is_none() {
        return Err(BridgeError::Malformed("account has neither name nor address".into()));
    }
    Ok(account)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    ThemeChange,
    Other(String),
}

#[derive(Deserialize)]
struct RawHostMessage {
    #[serde(rename = "type")]
    kind: String,
}

/// Parses a cross-document message. Anything without a string `type` is not a
/// host message and yields `None`.
pub fn parse_host_message(raw: &str) -> Option<HostEvent> {
    let message: RawHostMessage = serde_json::from_str(raw).ok()?;
    Some(match message.kind.as_str() {
        "themeChange" => HostEvent::ThemeChange,
        _ => HostEvent::Other(message.kind),
    })
}
