use qapp_logging::{qapp_debug, qapp_warn};

use crate::{decode_html, extract_title, ArchiveSource, FetchError};

/// Files that can stand for a rendered snapshot, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Snapshot,
    Index,
}

pub const CANDIDATES: [Candidate; 2] = [Candidate::Snapshot, Candidate::Index];

impl Candidate {
    pub fn relative_path(self) -> &'static str {
        match self {
            Candidate::Snapshot => "metadata/snapshot.html",
            Candidate::Index => "index.html",
        }
    }

    /// `{archive_path}/{relative_path}` without doubling the separator.
    pub fn file_path(self, archive_path: &str) -> String {
        format!(
            "{}/{}",
            archive_path.trim_end_matches('/'),
            self.relative_path()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        candidate: Candidate,
        text: String,
        title: Option<String>,
        encoding: String,
    },
    /// No candidate answered with a success status.
    NotFound,
    Failed(FetchError),
}

/// Walks [`CANDIDATES`] in order and stops at the first file the source
/// serves. A transport error ends the walk; there is no retry.
pub async fn resolve_archive(source: &dyn ArchiveSource, archive_path: &str) -> Resolution {
    for candidate in CANDIDATES {
        let file_path = candidate.file_path(archive_path);
        let output = match source.fetch_file(&file_path).await {
            Ok(Some(output)) => output,
            Ok(None) => {
                qapp_debug!("{} unavailable, trying next candidate", file_path);
                continue;
            }
            Err(err) => {
                qapp_warn!("resolving {} failed: {}", file_path, err);
                return Resolution::Failed(err);
            }
        };
        let decoded = decode_html(&output.bytes, output.content_type.as_deref());
        return Resolution::Found {
            candidate,
            title: extract_title(&decoded.html),
            text: decoded.html,
            encoding: decoded.encoding_label,
        };
    }
    Resolution::NotFound
}
