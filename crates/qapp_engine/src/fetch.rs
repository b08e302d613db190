use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::client::map_reqwest_error;
use crate::{ApiClient, FailureKind, FetchError, FetchOutput};

/// Read access to files of an extracted archive.
#[async_trait::async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Fetches one file. `Ok(None)` means the service answered with a
    /// non-success status, which callers treat as "try the next candidate";
    /// `Err` is a transport failure.
    async fn fetch_file(&self, file_path: &str) -> Result<Option<FetchOutput>, FetchError>;
}

#[async_trait::async_trait]
impl ArchiveSource for ApiClient {
    async fn fetch_file(&self, file_path: &str) -> Result<Option<FetchOutput>, FetchError> {
        let mut endpoint = self.endpoint("archive-content")?;
        endpoint.query_pairs_mut().append_pair("path", file_path);
        let max_bytes = self.settings.max_content_bytes;

        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            qapp_logging::qapp_debug!("{} answered {}", file_path, status);
            return Ok(None);
        }

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "archive file too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "archive file too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(Some(FetchOutput {
            bytes,
            content_type,
        }))
    }
}
