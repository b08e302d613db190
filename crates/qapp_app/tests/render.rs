use qapp_app::platform::ui::render::render;
use qapp_core::{
    update, ActivePane, AppState, AppViewModel, ContentOutcome, ContentSource, FrameView, Job,
    Msg, Placeholder, ResourceHandle, TabView,
};

fn tab(tab_id: u64, active: bool, frame: FrameView) -> TabView {
    TabView {
        tab_id,
        caption: format!("Snapshot {tab_id}"),
        url: "https://a.example.com".into(),
        path: "./jobs/extracted/abc".into(),
        created_at: "2026-10-18T09:00:00Z".into(),
        refreshed_at: None,
        active,
        frame,
    }
}

#[test]
fn controls_pane_lists_jobs_and_alert() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::UrlInputChanged("nope".into()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::JobsLoaded(Ok(vec![Job {
            id: "5f2c".into(),
            status: "done".into(),
            domain: Some("a.example.com".into()),
            url: Some("https://a.example.com".into()),
            ..Job::default()
        }])),
    );
    let (state, _) = update(state, Msg::JobRowClicked("5f2c".into()));

    let text = render(&state.view());
    assert!(text.contains("Archive Q-app | Loading identity..."));
    assert!(text.contains("[*controls]"));
    assert!(text.contains("!! Invalid URL nope"));
    assert!(text.contains("v 5f2c"));
    assert!(text.contains("url:      https://a.example.com"));
    assert!(text.contains("(logs 5f2c | archive 5f2c)"));
    assert!(text.ends_with('\n'));
}

#[test]
fn empty_board_says_so() {
    let text = render(&AppViewModel::default());
    assert!(text.contains("(no jobs)"));
    assert!(!text.contains("Log:"));
}

#[test]
fn active_tab_replaces_controls() {
    let view = AppViewModel {
        active: ActivePane::Tab(2),
        tabs: vec![
            tab(1, false, FrameView::Blank),
            tab(
                2,
                true,
                FrameView::Placeholder {
                    placeholder: Placeholder::NotFound,
                    document: Placeholder::NotFound.document(),
                },
            ),
        ],
        ..AppViewModel::default()
    };

    let text = render(&view);
    assert!(text.contains("[controls] [1: Snapshot 1] [*2: Snapshot 2]"));
    assert!(text.contains("frame:     no archived snapshot was found"));
    assert!(!text.contains("(no jobs)"));
}

#[test]
fn resolved_tab_shows_its_resource() {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::ArchiveLookedUp {
            url: "https://a.example.com".into(),
            result: Ok(Some("./jobs/extracted/abc".into())),
            at: "t0".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::ContentResolved {
            tab_id: 1,
            generation: 1,
            outcome: ContentOutcome::Resolved {
                source: ContentSource::Snapshot,
                body: "<html></html>".into(),
                title: Some("Example".into()),
            },
            at: "t1".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FrameLoaded {
            tab_id: 1,
            handle: ResourceHandle::new(1),
        },
    );

    let text = render(&state.view());
    assert!(text.contains("[*1: Example]"));
    assert!(text.contains("refreshed: t1"));
    assert!(text.contains("frame:     showing blob:qapp/1 (snapshot)"));
}
