use crate::view_model::{
    ActivePane, AppViewModel, FormView, FrameView, JobDetailRow, JobRowView, JobSummaryRow,
    PollingView, TabView,
};
use crate::tabs::Shown;
use crate::{
    Identity, JobBoard, NewJob, QappError, TabManager, ThemeVars, IDENTITY_ERROR_LABEL,
    IDENTITY_LOADING_LABEL,
};

pub const DEFAULT_DEPTH: u32 = 1;

/// Values typed into the submit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitForm {
    pub url: String,
    pub depth: u32,
    pub assets: bool,
}

impl Default for SubmitForm {
    fn default() -> Self {
        Self {
            url: String::new(),
            depth: DEFAULT_DEPTH,
            assets: false,
        }
    }
}

impl SubmitForm {
    pub(crate) fn to_request(&self) -> NewJob {
        NewJob {
            url: self.url.trim().to_string(),
            depth: self.depth,
            assets: self.assets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IdentityState {
    Loading,
    Loaded(String),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) form: SubmitForm,
    pub(crate) board: JobBoard,
    pub(crate) tabs: TabManager,
    pub(crate) theme: ThemeVars,
    pub(crate) identity: IdentityState,
    pub(crate) log_text: String,
    pub(crate) alert: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: SubmitForm::default(),
            board: JobBoard::new(),
            tabs: TabManager::new(),
            theme: ThemeVars::default(),
            identity: IdentityState::Loading,
            log_text: String::new(),
            alert: None,
            dirty: false,
        }
    }

    pub fn board(&self) -> &JobBoard {
        &self.board
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn theme(&self) -> &ThemeVars {
        &self.theme
    }

    pub fn form(&self) -> &SubmitForm {
        &self.form
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_log(&mut self, text: impl Into<String>) {
        self.log_text = text.into();
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, err: &QappError) {
        self.alert = Some(err.to_string());
        self.mark_dirty();
    }

    pub(crate) fn apply_identity(&mut self, result: Result<Identity, QappError>) {
        self.identity = match result {
            Ok(identity) => match identity.display_label() {
                Some(label) => IdentityState::Loaded(label.to_string()),
                None => IdentityState::Failed,
            },
            Err(_) => IdentityState::Failed,
        };
        self.mark_dirty();
    }

    pub fn view(&self) -> AppViewModel {
        let expanded = self.board.expanded();
        let jobs = self
            .board
            .jobs()
            .iter()
            .map(|job| JobRowView {
                summary: JobSummaryRow {
                    job_id: job.id.clone(),
                    status: job.status.clone(),
                    domain: job.domain.clone().unwrap_or_default(),
                },
                detail: JobDetailRow {
                    job_id: job.id.clone(),
                    domain: job.domain.clone().unwrap_or_default(),
                    url: job.url.clone().unwrap_or_default(),
                    url_hash: job.url_hash.clone().unwrap_or_default(),
                    status: job.status.clone(),
                    message: job.message.clone().unwrap_or_default(),
                    expanded: expanded == Some(job.id.as_str()),
                },
            })
            .collect();

        let active_tab = self.tabs.active();
        let tabs = self
            .tabs
            .iter()
            .map(|tab| TabView {
                tab_id: tab.id,
                caption: tab.title.clone().unwrap_or_else(|| tab.url.clone()),
                url: tab.url.clone(),
                path: tab.path.clone(),
                created_at: tab.created_at.clone(),
                refreshed_at: tab.refreshed_at.clone(),
                active: active_tab == Some(tab.id),
                frame: match (&tab.frame.shown, tab.frame.resolving) {
                    (Shown::Blank | Shown::Placeholder(_), true) => FrameView::Loading,
                    (Shown::Blank, false) => FrameView::Blank,
                    (Shown::Resource(handle, source), _) => FrameView::Resource {
                        url: handle.url(),
                        source: *source,
                    },
                    (Shown::Placeholder(placeholder), false) => FrameView::Placeholder {
                        placeholder: *placeholder,
                        document: placeholder.document(),
                    },
                },
            })
            .collect();

        let identity_label = match &self.identity {
            IdentityState::Loading => IDENTITY_LOADING_LABEL.to_string(),
            IdentityState::Loaded(label) => label.clone(),
            IdentityState::Failed => IDENTITY_ERROR_LABEL.to_string(),
        };

        AppViewModel {
            identity_label,
            alert: self.alert.clone(),
            form: FormView {
                url: self.form.url.clone(),
                depth: self.form.depth,
                assets: self.form.assets,
            },
            polling: PollingView {
                suspended: self.board.is_suspended(),
                in_flight: self.board.is_in_flight(),
                status: self.board.status().map(ToOwned::to_owned),
            },
            jobs,
            log_text: self.log_text.clone(),
            active: match active_tab {
                Some(tab_id) => ActivePane::Tab(tab_id),
                None => ActivePane::Controls,
            },
            tabs,
            theme: self
                .theme
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            dirty: self.dirty,
        }
    }
}
