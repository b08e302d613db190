use crate::{ContentSource, JobId, Placeholder, TabId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub identity_label: String,
    pub alert: Option<String>,
    pub form: FormView,
    pub polling: PollingView,
    pub jobs: Vec<JobRowView>,
    pub log_text: String,
    pub active: ActivePane,
    pub tabs: Vec<TabView>,
    pub theme: Vec<(String, String)>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub url: String,
    pub depth: u32,
    pub assets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollingView {
    pub suspended: bool,
    pub in_flight: bool,
    pub status: Option<String>,
}

/// A summary row and its paired detail row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub summary: JobSummaryRow,
    pub detail: JobDetailRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummaryRow {
    pub job_id: JobId,
    pub status: String,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailRow {
    pub job_id: JobId,
    pub domain: String,
    pub url: String,
    pub url_hash: String,
    pub status: String,
    pub message: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePane {
    #[default]
    Controls,
    Tab(TabId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub tab_id: TabId,
    pub caption: String,
    pub url: String,
    pub path: String,
    pub created_at: String,
    pub refreshed_at: Option<String>,
    pub active: bool,
    pub frame: FrameView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameView {
    Blank,
    /// Nothing resolved yet, or a placeholder whose refresh is in flight.
    Loading,
    /// Resolved content; stays visible while a refresh is in flight.
    Resource {
        url: String,
        source: ContentSource,
    },
    Placeholder {
        placeholder: Placeholder,
        document: &'static str,
    },
}
