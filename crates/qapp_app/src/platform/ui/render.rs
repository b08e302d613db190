use std::fmt::Write;

use qapp_core::{ActivePane, AppViewModel, FrameView, JobRowView, Placeholder, TabView};

const RULE: &str = "----------------------------------------------------------------";

/// Renders the whole panel as text. The output always ends with a newline.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Archive Q-app | {}", view.identity_label);
    let _ = writeln!(out, "{}", tab_strip(view));
    let _ = writeln!(out, "{RULE}");

    match view.active {
        ActivePane::Controls => render_controls(&mut out, view),
        ActivePane::Tab(tab_id) => match view.tabs.iter().find(|tab| tab.tab_id == tab_id) {
            Some(tab) => render_tab(&mut out, tab),
            None => render_controls(&mut out, view),
        },
    }

    out
}

fn tab_strip(view: &AppViewModel) -> String {
    let mut strip = String::new();
    let controls_marker = if view.active == ActivePane::Controls { "*" } else { "" };
    let _ = write!(strip, "[{controls_marker}controls]");
    for tab in &view.tabs {
        let marker = if tab.active { "*" } else { "" };
        let _ = write!(strip, " [{marker}{}: {}]", tab.tab_id, tab.caption);
    }
    strip
}

fn render_controls(out: &mut String, view: &AppViewModel) {
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "!! {alert} (type `dismiss`)");
    }

    let _ = writeln!(
        out,
        "New job: url={:?} depth={} assets={}",
        view.form.url,
        view.form.depth,
        if view.form.assets { "on" } else { "off" }
    );

    let polling = if view.polling.suspended {
        "paused"
    } else if view.polling.in_flight {
        "refreshing"
    } else {
        "idle"
    };
    match &view.polling.status {
        Some(status) => {
            let _ = writeln!(out, "Jobs ({polling}): {status}");
        }
        None => {
            let _ = writeln!(out, "Jobs ({polling}): {}", view.jobs.len());
        }
    }

    if view.jobs.is_empty() {
        let _ = writeln!(out, "  (no jobs)");
    }
    for row in &view.jobs {
        render_job(out, row);
    }

    if !view.log_text.is_empty() {
        let _ = writeln!(out, "Log:");
        for line in view.log_text.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if !view.theme.is_empty() {
        let _ = writeln!(out, "Theme: {} variables", view.theme.len());
    }
}

fn render_job(out: &mut String, row: &JobRowView) {
    let marker = if row.detail.expanded { "v" } else { ">" };
    let _ = writeln!(
        out,
        "  {marker} {:<34} {:<10} {}",
        row.summary.job_id, row.summary.status, row.summary.domain
    );
    if !row.detail.expanded {
        return;
    }
    let detail = &row.detail;
    let _ = writeln!(out, "      domain:   {}", detail.domain);
    let _ = writeln!(out, "      url:      {}", detail.url);
    let _ = writeln!(out, "      url hash: {}", detail.url_hash);
    let _ = writeln!(out, "      status:   {}", detail.status);
    let _ = writeln!(out, "      message:  {}", detail.message);
    let _ = writeln!(
        out,
        "      (logs {id} | archive {id})",
        id = detail.job_id
    );
}

fn render_tab(out: &mut String, tab: &TabView) {
    let _ = writeln!(out, "{}", tab.caption);
    let _ = writeln!(out, "  url:       {}", tab.url);
    let _ = writeln!(out, "  path:      {}", tab.path);
    let _ = writeln!(out, "  created:   {}", tab.created_at);
    if let Some(refreshed) = &tab.refreshed_at {
        let _ = writeln!(out, "  refreshed: {refreshed}");
    }
    let frame = match &tab.frame {
        FrameView::Blank => "blank".to_string(),
        FrameView::Loading => "loading...".to_string(),
        FrameView::Resource { url, source } => format!("showing {url} ({})", source.label()),
        FrameView::Placeholder { placeholder, .. } => match placeholder {
            Placeholder::NotFound => "no archived snapshot was found".to_string(),
            Placeholder::Error => "error loading archive content".to_string(),
        },
    };
    let _ = writeln!(out, "  frame:     {frame}");
    let _ = writeln!(
        out,
        "  (refresh {id} | popout {id} | close {id} | controls)",
        id = tab.tab_id
    );
}
