use qapp_logging::{qapp_debug, qapp_info};

use crate::tabs::Assignment;
use crate::{
    apply_theme, is_valid_url, AppState, Effect, HostMessage, Msg, QappError, ResolveRequest,
    TabId,
};

const NO_ARCHIVE_MESSAGE: &str = "No archive found for this URL";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let mut effects = vec![Effect::LoadIdentity, Effect::ReadTheme];
            if state.board.begin_poll() {
                effects.push(Effect::FetchJobs);
            }
            state.mark_dirty();
            effects
        }
        Msg::UrlInputChanged(text) => {
            state.form.url = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::DepthChanged(depth) => {
            state.form.depth = depth;
            state.mark_dirty();
            Vec::new()
        }
        Msg::AssetsToggled(assets) => {
            state.form.assets = assets;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => {
            let request = state.form.to_request();
            if is_valid_url(&request.url) {
                state.alert = None;
                state.mark_dirty();
                qapp_info!("submitting job for {}", request.url);
                vec![Effect::SubmitJob(request)]
            } else {
                state.set_alert(&QappError::Validation(request.url));
                Vec::new()
            }
        }
        Msg::JobSubmitted(result) => {
            if let Err(err) = result {
                state.set_log(err.to_string());
            }
            repoll(&mut state)
        }
        Msg::PollTick => {
            if state.board.begin_poll() {
                state.mark_dirty();
                vec![Effect::FetchJobs]
            } else {
                Vec::new()
            }
        }
        Msg::PollingSuspended => {
            if state.board.suspend() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PollingResumed => {
            if state.board.resume() {
                state.mark_dirty();
                repoll(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::JobsLoaded(result) => {
            let again = state.board.finish_poll(result);
            state.mark_dirty();
            if again {
                vec![Effect::FetchJobs]
            } else {
                Vec::new()
            }
        }
        Msg::JobRowClicked(job_id) => {
            if state.board.toggle_detail(&job_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewLogsClicked(job_id) => vec![Effect::FetchJobRecord { job_id }],
        Msg::JobRecordLoaded { job_id, result } => {
            match result {
                Ok(record) => state.set_log(record),
                Err(err) => state.set_log(format!("Could not load job {job_id}: {err}")),
            }
            Vec::new()
        }
        Msg::GetArchiveClicked(job_id) => {
            match state.board.find(&job_id).and_then(|job| job.url.clone()) {
                Some(url) => vec![Effect::LookupArchive { url }],
                None => {
                    state.set_log(NO_ARCHIVE_MESSAGE);
                    Vec::new()
                }
            }
        }
        Msg::ArchiveLookedUp { url, result, at } => match result {
            Ok(Some(path)) => {
                let tab_id = state.tabs.open(&url, &path, &at);
                state.tabs.switch_to(tab_id);
                state.set_log(format!("Archive extracted to: {path}"));
                start_resolution(&mut state, tab_id)
            }
            Ok(None) | Err(QappError::NotFound(_)) => {
                state.set_log(NO_ARCHIVE_MESSAGE);
                Vec::new()
            }
            Err(err) => {
                state.set_log(format!("Could not look up archive for {url}: {err}"));
                Vec::new()
            }
        },
        Msg::TabSelected(tab_id) => {
            if state.tabs.switch_to(tab_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ControlsSelected => {
            state.tabs.show_controls();
            state.mark_dirty();
            Vec::new()
        }
        Msg::TabCloseClicked(tab_id) => match state.tabs.close(tab_id) {
            Some(released) => {
                state.mark_dirty();
                released
                    .into_iter()
                    .map(|handle| Effect::ReleaseResource { handle })
                    .collect()
            }
            None => Vec::new(),
        },
        Msg::TabRefreshClicked(tab_id) => start_resolution(&mut state, tab_id),
        Msg::TabPopOutClicked(tab_id) => match state.tabs.pop_out(tab_id) {
            Some(handle) => vec![Effect::OpenExternal {
                tab_id,
                url: state.tabs.url(tab_id).unwrap_or_default().to_string(),
                title: state.tabs.title(tab_id).map(ToOwned::to_owned),
                handle,
            }],
            None => {
                qapp_debug!("pop-out ignored, tab {} has no resolved content", tab_id);
                Vec::new()
            }
        },
        Msg::ContentResolved {
            tab_id,
            generation,
            outcome,
            at,
        } => match state.tabs.complete_resolution(tab_id, generation, outcome, &at) {
            Some(assignment) => {
                state.mark_dirty();
                assignment_effects(tab_id, assignment)
            }
            None => Vec::new(),
        },
        Msg::FrameLoaded { tab_id, handle } => {
            let released = state.tabs.frame_loaded(tab_id, &handle);
            state.mark_dirty();
            released
                .into_iter()
                .map(|handle| Effect::ReleaseResource { handle })
                .collect()
        }
        Msg::HostMessageReceived(HostMessage::ThemeChange) => vec![Effect::ReadTheme],
        Msg::HostMessageReceived(HostMessage::Other(kind)) => {
            qapp_debug!("ignoring host message of type {}", kind);
            Vec::new()
        }
        Msg::ThemeRead(readings) => {
            if apply_theme(&mut state.theme, &readings) > 0 {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::IdentityLoaded(result) => {
            state.apply_identity(result);
            Vec::new()
        }
        Msg::AlertDismissed => {
            if state.alert.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn repoll(state: &mut AppState) -> Vec<Effect> {
    if state.board.request_repoll() {
        state.mark_dirty();
        vec![Effect::FetchJobs]
    } else {
        Vec::new()
    }
}

fn start_resolution(state: &mut AppState, tab_id: TabId) -> Vec<Effect> {
    match state.tabs.refresh(tab_id) {
        Some(ResolveRequest {
            tab_id,
            generation,
            path,
        }) => {
            state.mark_dirty();
            vec![Effect::ResolveContent {
                tab_id,
                generation,
                path,
            }]
        }
        None => Vec::new(),
    }
}

fn assignment_effects(tab_id: TabId, assignment: Assignment) -> Vec<Effect> {
    let mut effects: Vec<Effect> = assignment
        .release
        .into_iter()
        .map(|handle| Effect::ReleaseResource { handle })
        .collect();
    if let Some((handle, body)) = assignment.attach {
        effects.push(Effect::AttachResource {
            tab_id,
            handle,
            body,
        });
    }
    effects
}
