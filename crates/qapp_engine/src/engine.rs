use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use qapp_logging::{poll_tick, qapp_debug, qapp_info, with_poll_tick};
use thiserror::Error;

use crate::{
    fetch_identity, resolve_archive, ApiClient, ApiSettings, EngineEvent, FetchError, HostBridge,
    JobApi, NewJobRequest, TabId,
};

pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub bridge: Arc<dyn HostBridge>,
    /// Timestamp label attached to lookups and resolutions.
    pub clock: Clock,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("could not build api client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    SubmitJob(NewJobRequest),
    FetchJobs,
    FetchJobRecord { job_id: String },
    LookupArchive { url: String },
    ResolveContent {
        tab_id: TabId,
        generation: u64,
        path: String,
    },
    FetchIdentity,
}

struct Services {
    api: ApiClient,
    bridge: Arc<dyn HostBridge>,
    clock: Clock,
}

/// Front of the IO thread. Commands are queued and run concurrently on a
/// tokio runtime; each produces exactly one [`EngineEvent`]. A command's log
/// lines carry the poll tick of the thread that sent it.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<(u64, EngineCommand)>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("qapp-engine")
            .build()?;
        let services = Arc::new(Services {
            api: ApiClient::new(config.api)?,
            bridge: config.bridge,
            clock: config.clock,
        });

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok((tick, command)) = cmd_rx.recv() {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(with_poll_tick(tick, async move {
                    let event = handle_command(&services, command).await;
                    let _ = event_tx.send(event);
                }));
            }
            qapp_info!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send((poll_tick(), command)).is_err() {
            qapp_debug!("engine thread gone, command dropped");
        }
    }

    pub fn submit_job(&self, request: NewJobRequest) {
        self.send(EngineCommand::SubmitJob(request));
    }

    pub fn fetch_jobs(&self) {
        self.send(EngineCommand::FetchJobs);
    }

    pub fn fetch_job_record(&self, job_id: impl Into<String>) {
        self.send(EngineCommand::FetchJobRecord {
            job_id: job_id.into(),
        });
    }

    pub fn lookup_archive(&self, url: impl Into<String>) {
        self.send(EngineCommand::LookupArchive { url: url.into() });
    }

    pub fn resolve_content(&self, tab_id: TabId, generation: u64, path: impl Into<String>) {
        self.send(EngineCommand::ResolveContent {
            tab_id,
            generation,
            path: path.into(),
        });
    }

    pub fn fetch_identity(&self) {
        self.send(EngineCommand::FetchIdentity);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout)
            .ok()
    }
}

async fn handle_command(services: &Services, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::SubmitJob(request) => EngineEvent::JobSubmitted {
            result: services.api.submit_job(&request).await,
        },
        EngineCommand::FetchJobs => EngineEvent::JobsFetched {
            result: services.api.list_jobs().await,
        },
        EngineCommand::FetchJobRecord { job_id } => {
            let result = services.api.job_record(&job_id).await;
            EngineEvent::JobRecordFetched { job_id, result }
        }
        EngineCommand::LookupArchive { url } => {
            let result = services.api.lookup_archive(&url).await;
            EngineEvent::ArchiveLookedUp {
                url,
                result,
                at: (services.clock)(),
            }
        }
        EngineCommand::ResolveContent {
            tab_id,
            generation,
            path,
        } => {
            let resolution = resolve_archive(&services.api, &path).await;
            EngineEvent::ContentResolved {
                tab_id,
                generation,
                resolution,
                at: (services.clock)(),
            }
        }
        EngineCommand::FetchIdentity => EngineEvent::IdentityFetched {
            result: fetch_identity(services.bridge.as_ref()).await,
        },
    }
}
