use crate::{JobId, NewJob, ResourceHandle, TabId};

/// Work the core asks the outside world to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitJob(NewJob),
    FetchJobs,
    FetchJobRecord {
        job_id: JobId,
    },
    LookupArchive {
        url: String,
    },
    ResolveContent {
        tab_id: TabId,
        generation: u64,
        path: String,
    },
    /// Store `body` under `handle` and point the tab frame at it.
    AttachResource {
        tab_id: TabId,
        handle: ResourceHandle,
        body: String,
    },
    ReleaseResource {
        handle: ResourceHandle,
    },
    /// Open the resource in a new top-level browsing context.
    OpenExternal {
        tab_id: TabId,
        handle: ResourceHandle,
        url: String,
        title: Option<String>,
    },
    LoadIdentity,
    ReadTheme,
}
