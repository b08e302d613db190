use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::client::map_reqwest_error;
use crate::{
    ApiClient, ArchiveLocation, FailureKind, FetchError, JobListing, JobRecord, NewJobRequest,
};

/// Operations of the `POST /job` endpoint, selected by the `op` field.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// `op: "new"`. The response payload is not interpreted.
    async fn submit_job(&self, request: &NewJobRequest) -> Result<(), FetchError>;

    /// `op: "jobs"`.
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, FetchError>;

    /// `op: "job"`, returned as pretty-printed JSON for the log panel.
    async fn job_record(&self, job_id: &str) -> Result<String, FetchError>;

    /// `op: "get"`. `Ok(None)` when no archive exists for `url`.
    async fn lookup_archive(&self, url: &str) -> Result<Option<ArchiveLocation>, FetchError>;
}

enum Reply {
    Body(Vec<u8>),
    NotFound,
}

impl ApiClient {
    async fn post_op(&self, body: Value) -> Result<Reply, FetchError> {
        let endpoint = self.endpoint("job")?;
        let payload = serde_json::to_vec(&body)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Reply::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(Reply::Body(bytes.to_vec()))
    }

    async fn post_op_expecting<T: DeserializeOwned>(&self, body: Value) -> Result<T, FetchError> {
        match self.post_op(body).await? {
            Reply::Body(bytes) => parse_json(&bytes),
            Reply::NotFound => Err(FetchError::new(FailureKind::HttpStatus(404), "not found")),
        }
    }
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
}

#[async_trait::async_trait]
impl JobApi for ApiClient {
    async fn submit_job(&self, request: &NewJobRequest) -> Result<(), FetchError> {
        let body = json!({
            "op": "new",
            "url": request.url,
            "depth": request.depth,
            "assets": request.assets,
        });
        match self.post_op(body).await? {
            Reply::Body(_) => Ok(()),
            Reply::NotFound => Err(FetchError::new(FailureKind::HttpStatus(404), "not found")),
        }
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, FetchError> {
        let listing: JobListing = self.post_op_expecting(json!({ "op": "jobs" })).await?;
        Ok(listing.into_records())
    }

    async fn job_record(&self, job_id: &str) -> Result<String, FetchError> {
        let record: Value = self
            .post_op_expecting(json!({ "op": "job", "id": job_id }))
            .await?;
        serde_json::to_string_pretty(&record)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    async fn lookup_archive(&self, url: &str) -> Result<Option<ArchiveLocation>, FetchError> {
        let bytes = match self.post_op(json!({ "op": "get", "url": url })).await? {
            Reply::Body(bytes) => bytes,
            Reply::NotFound => return Ok(None),
        };
        let value: Value = parse_json(&bytes)?;
        match value.get("path").and_then(Value::as_str) {
            Some(path) if !path.is_empty() => Ok(Some(ArchiveLocation {
                path: path.to_string(),
                content_hash: value
                    .get("content_hash")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
            })),
            _ => Ok(None),
        }
    }
}
