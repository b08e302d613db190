use crate::{ContentOutcome, Identity, Job, JobId, QappError, ResourceHandle, TabId, ThemeReading};

/// Cross-document message received from the embedding host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    ThemeChange,
    /// Any other `type`; ignored.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Panel finished loading; kicks off identity, theme and the first poll.
    Started,
    /// User edited the URL field.
    UrlInputChanged(String),
    /// User edited the crawl depth field.
    DepthChanged(u32),
    /// User toggled the "include assets" checkbox.
    AssetsToggled(bool),
    /// User clicked Submit.
    SubmitClicked,
    /// Create-job request finished.
    JobSubmitted(Result<(), QappError>),
    /// Poll timer fired.
    PollTick,
    /// Panel hidden; stop honouring poll ticks.
    PollingSuspended,
    /// Panel visible again; poll immediately and keep polling.
    PollingResumed,
    /// Job list fetch finished.
    JobsLoaded(Result<Vec<Job>, QappError>),
    /// User clicked a summary row.
    JobRowClicked(JobId),
    /// User clicked "View Logs" in a detail row.
    ViewLogsClicked(JobId),
    /// Raw job record fetched for the log panel.
    JobRecordLoaded {
        job_id: JobId,
        result: Result<String, QappError>,
    },
    /// User clicked "Get Archive" in a detail row.
    GetArchiveClicked(JobId),
    /// Archive lookup finished. `Ok(None)` means no archive exists.
    ArchiveLookedUp {
        url: String,
        result: Result<Option<String>, QappError>,
        at: String,
    },
    /// User clicked a tab button.
    TabSelected(TabId),
    /// User clicked the controls tab button.
    ControlsSelected,
    TabCloseClicked(TabId),
    TabRefreshClicked(TabId),
    TabPopOutClicked(TabId),
    /// Content resolution for a tab finished.
    ContentResolved {
        tab_id: TabId,
        generation: u64,
        outcome: ContentOutcome,
        at: String,
    },
    /// The tab frame finished loading a resource.
    FrameLoaded {
        tab_id: TabId,
        handle: ResourceHandle,
    },
    HostMessageReceived(HostMessage),
    /// Best-effort reads of the host theme variables.
    ThemeRead(Vec<ThemeReading>),
    IdentityLoaded(Result<Identity, QappError>),
    /// User acknowledged the alert.
    AlertDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
