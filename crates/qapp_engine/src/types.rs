use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::bridge::{AccountInfo, BridgeError};
use crate::resolve::Resolution;

/// Tab id as issued by the dashboard state. Kept as the same plain integer
/// so the engine stays independent of the state crate.
pub type TabId = u64;

/// Job as reported by the archive service.
///
/// Every field besides `id` is optional on the wire; scalar values of any JSON
/// type are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_hash: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

/// `op: "jobs"` answers with either an id-keyed object or a plain array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JobListing {
    Keyed(BTreeMap<String, JobRecord>),
    List(Vec<JobRecord>),
}

impl JobListing {
    /// Flattens the listing, filling missing ids from the object keys.
    /// Records without any id are dropped.
    pub fn into_records(self) -> Vec<JobRecord> {
        match self {
            JobListing::Keyed(map) => map
                .into_iter()
                .map(|(key, mut record)| {
                    if record.id.is_none() {
                        record.id = Some(key);
                    }
                    record
                })
                .collect(),
            JobListing::List(records) => records.into_iter().filter(|r| r.id.is_some()).collect(),
        }
    }
}

/// Body of `op: "new"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJobRequest {
    pub url: String,
    pub depth: u32,
    pub assets: bool,
}

/// Where the service extracted an archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveLocation {
    pub path: String,
    #[serde(default)]
    pub content_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Results reported back from the engine thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobSubmitted {
        result: Result<(), FetchError>,
    },
    JobsFetched {
        result: Result<Vec<JobRecord>, FetchError>,
    },
    JobRecordFetched {
        job_id: String,
        result: Result<String, FetchError>,
    },
    ArchiveLookedUp {
        url: String,
        result: Result<Option<ArchiveLocation>, FetchError>,
        at: String,
    },
    ContentResolved {
        tab_id: TabId,
        generation: u64,
        resolution: Resolution,
        at: String,
    },
    IdentityFetched {
        result: Result<AccountInfo, BridgeError>,
    },
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
