use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use qapp_core::{
    ContentOutcome, ContentSource, Effect, Identity, Job, Msg, QappError, ResourceHandle, TabId,
    ThemeReading, THEME_VARIABLES,
};
use qapp_engine::{
    read_theme, BridgeError, Candidate, EngineEvent, EngineHandle, FailureKind, FetchError,
    JobRecord, NewJobRequest, PopOutWriter, Resolution, ResourceStore, StaticThemeSource,
};
use qapp_logging::{qapp_debug, qapp_info, qapp_warn};

/// Runs the core's effects: network work goes to the engine, resource and
/// theme work is done in place. Engine results come back as [`Msg`]s.
pub struct EffectRunner {
    engine: EngineHandle,
    resources: ResourceStore,
    popouts: PopOutWriter,
    theme: StaticThemeSource,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        popout_dir: PathBuf,
        theme: StaticThemeSource,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            engine,
            resources: ResourceStore::new(),
            popouts: PopOutWriter::new(popout_dir),
            theme,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitJob(job) => {
                    qapp_info!("SubmitJob url={} depth={} assets={}", job.url, job.depth, job.assets);
                    self.engine.submit_job(NewJobRequest {
                        url: job.url,
                        depth: job.depth,
                        assets: job.assets,
                    });
                }
                Effect::FetchJobs => self.engine.fetch_jobs(),
                Effect::FetchJobRecord { job_id } => self.engine.fetch_job_record(job_id),
                Effect::LookupArchive { url } => {
                    qapp_info!("LookupArchive url={}", url);
                    self.engine.lookup_archive(url);
                }
                Effect::ResolveContent {
                    tab_id,
                    generation,
                    path,
                } => {
                    qapp_debug!("ResolveContent tab={} gen={} path={}", tab_id, generation, path);
                    self.engine.resolve_content(tab_id, generation, path);
                }
                Effect::AttachResource {
                    tab_id,
                    handle,
                    body,
                } => {
                    self.resources.insert(handle.id(), body);
                    // The console frame has nothing to paint, so it is loaded
                    // as soon as the body is stored.
                    self.send(Msg::FrameLoaded { tab_id, handle });
                }
                Effect::ReleaseResource { handle } => {
                    if !self.resources.release(handle.id()) {
                        qapp_warn!("released {} which was not live", handle.url());
                    }
                }
                Effect::OpenExternal {
                    tab_id,
                    handle,
                    url,
                    title,
                } => self.open_external(tab_id, &handle, &url, title.as_deref()),
                Effect::LoadIdentity => self.engine.fetch_identity(),
                Effect::ReadTheme => {
                    let readings = read_theme(&self.theme, THEME_VARIABLES)
                        .into_iter()
                        .map(|(name, value)| ThemeReading { name, value })
                        .collect();
                    self.send(Msg::ThemeRead(readings));
                }
            }
        }
    }

    fn open_external(&self, tab_id: TabId, handle: &ResourceHandle, url: &str, title: Option<&str>) {
        let Some(body) = self.resources.get(handle.id()) else {
            qapp_warn!("pop-out of tab {} skipped: {} not live", tab_id, handle.url());
            return;
        };
        match self.popouts.write(title, url, &body) {
            Ok(path) => {
                qapp_info!("tab {} popped out to {:?}", tab_id, path);
                println!("Opened tab {} in {}", tab_id, path.display());
            }
            Err(err) => qapp_warn!("pop-out of tab {} failed: {}", tab_id, err),
        }
    }

    fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_err() {
            qapp_debug!("app loop gone, message dropped");
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        });
    }
}

/// Translates an engine result into the core message that consumes it.
pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobSubmitted { result } => Msg::JobSubmitted(result.map_err(map_fetch_error)),
        EngineEvent::JobsFetched { result } => Msg::JobsLoaded(
            result
                .map(|records| records.into_iter().filter_map(map_job).collect())
                .map_err(map_fetch_error),
        ),
        EngineEvent::JobRecordFetched { job_id, result } => Msg::JobRecordLoaded {
            job_id,
            result: result.map_err(map_fetch_error),
        },
        EngineEvent::ArchiveLookedUp { url, result, at } => Msg::ArchiveLookedUp {
            url,
            result: result
                .map(|location| location.map(|location| location.path))
                .map_err(map_fetch_error),
            at,
        },
        EngineEvent::ContentResolved {
            tab_id,
            generation,
            resolution,
            at,
        } => Msg::ContentResolved {
            tab_id,
            generation,
            outcome: map_resolution(resolution),
            at,
        },
        EngineEvent::IdentityFetched { result } => Msg::IdentityLoaded(
            result
                .map(|account| Identity {
                    name: account.name,
                    address: account.address,
                })
                .map_err(map_bridge_error),
        ),
    }
}

fn map_job(record: JobRecord) -> Option<Job> {
    Some(Job {
        id: record.id?,
        status: record.status.unwrap_or_default(),
        domain: record.domain,
        url: record.url,
        url_hash: record.url_hash,
        message: record.message,
    })
}

fn map_resolution(resolution: Resolution) -> ContentOutcome {
    match resolution {
        Resolution::Found {
            candidate,
            text,
            title,
            ..
        } => ContentOutcome::Resolved {
            source: map_candidate(candidate),
            body: text,
            title,
        },
        Resolution::NotFound => ContentOutcome::NotFound,
        Resolution::Failed(err) => ContentOutcome::Failed(err.to_string()),
    }
}

fn map_candidate(candidate: Candidate) -> ContentSource {
    match candidate {
        Candidate::Snapshot => ContentSource::Snapshot,
        Candidate::Index => ContentSource::Index,
    }
}

fn map_fetch_error(err: FetchError) -> QappError {
    match err.kind {
        FailureKind::HttpStatus(404) => QappError::NotFound(err.to_string()),
        _ => QappError::Transport(err.to_string()),
    }
}

fn map_bridge_error(err: BridgeError) -> QappError {
    QappError::HostBridge(err.to_string())
}
