//! Q-app core: pure session state machine and view-model helpers.
mod content;
mod effect;
mod error;
mod identity;
mod jobs;
mod msg;
mod state;
mod tabs;
mod theme;
mod update;
mod validate;
mod view_model;

pub use content::{ContentOutcome, ContentSource, Placeholder};
pub use effect::Effect;
pub use error::QappError;
pub use identity::{Identity, IDENTITY_ERROR_LABEL, IDENTITY_LOADING_LABEL};
pub use jobs::{Job, JobBoard, JobId, NewJob};
pub use msg::{HostMessage, Msg};
pub use state::{AppState, SubmitForm, DEFAULT_DEPTH};
pub use tabs::{Assignment, ResolveRequest, ResourceHandle, ResourceId, TabId, TabManager};
pub use theme::{apply_theme, ThemeReading, ThemeVars, THEME_VARIABLES};
pub use update::update;
pub use validate::is_valid_url;
pub use view_model::{
    ActivePane, AppViewModel, FormView, FrameView, JobDetailRow, JobRowView, JobSummaryRow,
    PollingView, TabView,
};
