/// Which served file a resolution settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Snapshot,
    Index,
}

impl ContentSource {
    pub fn label(self) -> &'static str {
        match self {
            ContentSource::Snapshot => "snapshot",
            ContentSource::Index => "index",
        }
    }
}

/// Result of walking the candidate chain for one archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOutcome {
    Resolved {
        source: ContentSource,
        body: String,
        title: Option<String>,
    },
    /// Every candidate answered with a non-success status.
    NotFound,
    /// Transport failure; terminal for this attempt.
    Failed(String),
}

/// Fixed documents rendered in place of archive content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NotFound,
    Error,
}

const NOT_FOUND_DOCUMENT: &str = "<!DOCTYPE html><html><body>\
<p>No archived snapshot was found for this path.</p></body></html>";

const ERROR_DOCUMENT: &str = "<!DOCTYPE html><html><body>\
<p>Error loading archive content.</p></body></html>";

impl Placeholder {
    pub fn document(self) -> &'static str {
        match self {
            Placeholder::NotFound => NOT_FOUND_DOCUMENT,
            Placeholder::Error => ERROR_DOCUMENT,
        }
    }
}
