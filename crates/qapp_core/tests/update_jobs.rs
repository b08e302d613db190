use std::sync::Once;

use pretty_assertions::assert_eq;
use qapp_core::{update, AppState, Effect, Job, Msg, NewJob, QappError};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(qapp_logging::initialize_for_tests);
}

fn job(id: &str, url: &str) -> Job {
    Job {
        id: id.to_string(),
        status: "queued".to_string(),
        domain: Some("example.com".to_string()),
        url: Some(url.to_string()),
        url_hash: Some(format!("url-sha256:{id}")),
        message: None,
    }
}

fn started() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    state
}

fn loaded(jobs: Vec<Job>) -> AppState {
    let (state, _) = update(started(), Msg::JobsLoaded(Ok(jobs)));
    state
}

fn submit(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(url.to_string()));
    update(state, Msg::SubmitClicked)
}

#[test]
fn start_requests_identity_theme_and_first_poll() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![Effect::LoadIdentity, Effect::ReadTheme, Effect::FetchJobs]
    );
    assert!(state.board().is_in_flight());
}

#[test]
fn invalid_url_alerts_and_sends_nothing() {
    init_logging();
    for bad in ["not a url", "", "ht!tp://x"] {
        let (state, effects) = submit(AppState::new(), bad);
        assert!(effects.is_empty(), "no request for {bad:?}");
        assert_eq!(state.view().alert, Some(format!("Invalid URL {bad}")));
    }
}

#[test]
fn valid_submission_emits_create_request_with_form_values() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DepthChanged(3));
    let (state, _) = update(state, Msg::AssetsToggled(true));
    let (state, effects) = submit(state, " https://example.com/page ");

    assert_eq!(
        effects,
        vec![Effect::SubmitJob(NewJob {
            url: "https://example.com/page".to_string(),
            depth: 3,
            assets: true,
        })]
    );
    assert_eq!(state.view().alert, None);
}

#[test]
fn submission_result_triggers_immediate_repoll() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com");
    let (_, effects) = update(state, Msg::JobSubmitted(Ok(())));
    assert_eq!(effects, vec![Effect::FetchJobs]);

    let (state, _) = submit(AppState::new(), "https://example.com");
    let (state, effects) = update(
        state,
        Msg::JobSubmitted(Err(QappError::Transport("connection refused".into()))),
    );
    assert_eq!(effects, vec![Effect::FetchJobs]);
    assert!(state.view().log_text.contains("connection refused"));
}

#[test]
fn repoll_during_inflight_poll_is_queued_behind_it() {
    init_logging();
    let state = started();
    let (state, effects) = update(state, Msg::JobSubmitted(Ok(())));
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::JobsLoaded(Ok(vec![])));
    assert_eq!(effects, vec![Effect::FetchJobs]);
    assert!(state.board().is_in_flight());
}

#[test]
fn loaded_jobs_render_paired_rows_all_collapsed() {
    init_logging();
    let state = loaded(vec![
        job("a1", "https://a.example.com"),
        job("b2", "https://b.example.com"),
        job("c3", "https://c.example.com"),
    ]);
    let view = state.view();

    assert_eq!(view.jobs.len(), 3);
    for row in &view.jobs {
        assert_eq!(row.summary.job_id, row.detail.job_id);
        assert!(!row.detail.expanded);
    }
    assert_eq!(view.jobs[1].summary.domain, "example.com");
    assert_eq!(view.jobs[1].detail.url, "https://b.example.com");
    assert_eq!(view.jobs[1].detail.url_hash, "url-sha256:b2");
}

#[test]
fn expanding_one_row_collapses_every_other() {
    init_logging();
    let ids = ["a", "b", "c"];
    let jobs = ids.iter().map(|id| job(id, "https://x.example.com")).collect();
    let base = loaded(jobs);

    for first in ids {
        for second in ids.iter().filter(|id| **id != first) {
            let (state, _) = update(base.clone(), Msg::JobRowClicked(first.to_string()));
            let (state, _) = update(state, Msg::JobRowClicked(second.to_string()));
            let expanded: Vec<_> = state
                .view()
                .jobs
                .iter()
                .filter(|row| row.detail.expanded)
                .map(|row| row.detail.job_id.clone())
                .collect();
            assert_eq!(expanded, vec![second.to_string()]);
        }
    }
}

#[test]
fn clicking_the_open_row_closes_it() {
    init_logging();
    let state = loaded(vec![job("a", "https://a.example.com")]);
    let (state, _) = update(state, Msg::JobRowClicked("a".into()));
    let (state, _) = update(state, Msg::JobRowClicked("a".into()));
    assert!(state.view().jobs.iter().all(|row| !row.detail.expanded));
}

#[test]
fn poll_rebuild_collapses_expanded_detail() {
    init_logging();
    let jobs = vec![job("a", "https://a.example.com")];
    let state = loaded(jobs.clone());
    let (state, _) = update(state, Msg::JobRowClicked("a".into()));
    assert_eq!(state.board().expanded(), Some("a"));

    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::FetchJobs]);
    let (state, _) = update(state, Msg::JobsLoaded(Ok(jobs)));
    assert_eq!(state.board().expanded(), None);
}

#[test]
fn tick_is_skipped_while_a_poll_is_in_flight() {
    init_logging();
    let state = started();
    let (state, effects) = update(state, Msg::PollTick);
    assert!(effects.is_empty());
    assert_eq!(state.board().polls_started(), 1);
}

#[test]
fn failed_poll_keeps_rows_and_polling_continues() {
    init_logging();
    let state = loaded(vec![job("a", "https://a.example.com")]);
    let (state, _) = update(state, Msg::PollTick);
    let (state, _) = update(
        state,
        Msg::JobsLoaded(Err(QappError::Transport("timeout".into()))),
    );

    let view = state.view();
    assert_eq!(view.jobs.len(), 1);
    assert!(view.polling.status.unwrap().contains("timeout"));

    let (_, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::FetchJobs]);
}

#[test]
fn suspended_poller_ignores_ticks_and_repolls_on_resume() {
    init_logging();
    let state = loaded(vec![]);
    let (state, _) = update(state, Msg::PollingSuspended);
    let (state, effects) = update(state, Msg::PollTick);
    assert!(effects.is_empty());
    assert!(state.view().polling.suspended);

    let (state, effects) = update(state, Msg::PollingResumed);
    assert_eq!(effects, vec![Effect::FetchJobs]);
    assert!(!state.view().polling.suspended);
}

#[test]
fn view_logs_fetches_record_and_shows_it() {
    init_logging();
    let state = loaded(vec![job("a", "https://a.example.com")]);
    let (state, effects) = update(state, Msg::ViewLogsClicked("a".into()));
    assert_eq!(
        effects,
        vec![Effect::FetchJobRecord {
            job_id: "a".into()
        }]
    );

    let record = "{\n  \"id\": \"a\"\n}".to_string();
    let (state, _) = update(
        state,
        Msg::JobRecordLoaded {
            job_id: "a".into(),
            result: Ok(record.clone()),
        },
    );
    assert_eq!(state.view().log_text, record);
}

#[test]
fn get_archive_looks_up_the_job_url() {
    init_logging();
    let state = loaded(vec![job("a", "https://a.example.com")]);
    let (_, effects) = update(state, Msg::GetArchiveClicked("a".into()));
    assert_eq!(
        effects,
        vec![Effect::LookupArchive {
            url: "https://a.example.com".into()
        }]
    );
}

#[test]
fn missing_archive_is_reported_distinctly_from_transport_failure() {
    init_logging();
    let (state, effects) = update(
        started(),
        Msg::ArchiveLookedUp {
            url: "https://a.example.com".into(),
            result: Ok(None),
            at: "2024-01-01T00:00:00Z".into(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().log_text, "No archive found for this URL");
    assert!(state.view().tabs.is_empty());

    let (state, _) = update(
        state,
        Msg::ArchiveLookedUp {
            url: "https://a.example.com".into(),
            result: Err(QappError::Transport("connection reset".into())),
            at: "2024-01-01T00:00:00Z".into(),
        },
    );
    let log = state.view().log_text;
    assert_ne!(log, "No archive found for this URL");
    assert!(log.contains("connection reset"));
}
