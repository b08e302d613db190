use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use qapp_core::{update, AppState, Msg};
use qapp_engine::{
    EngineConfig, EngineError, EngineHandle, HostBridge, HttpHostBridge, StaticThemeSource,
    UnavailableBridge,
};
use qapp_logging::{qapp_info, qapp_warn};
use thiserror::Error;

use super::config::{load_config, QappConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub fn run_app() -> Result<(), AppError> {
    let (config, config_error) = match load_config(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (QappConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        qapp_warn!("{}; using defaults", err);
    }

    let api = config.api_settings();
    let bridge: Arc<dyn HostBridge> = match &config.bridge_url {
        Some(endpoint) => match HttpHostBridge::new(endpoint, &api) {
            Ok(bridge) => Arc::new(bridge),
            Err(err) => {
                qapp_warn!("host bridge {} unusable: {}", endpoint, err);
                Arc::new(UnavailableBridge)
            }
        },
        None => Arc::new(UnavailableBridge),
    };

    let engine = EngineHandle::new(EngineConfig {
        api,
        bridge,
        clock: Arc::new(|| Utc::now().to_rfc3339()),
    })?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        engine,
        config.popout_dir.clone(),
        StaticThemeSource::new(config.theme.clone()),
        msg_tx.clone(),
    );
    let quit = Arc::new(AtomicBool::new(false));

    spawn_poll_ticker(config.poll_interval(), msg_tx.clone());
    spawn_console_reader(msg_tx.clone(), quit.clone());
    drop(msg_tx);

    qapp_info!("qapp started against {}", config.api_base);
    let mut app = App {
        state: AppState::new(),
        runner,
    };
    app.dispatch_msg(Msg::Started);

    while !quit.load(Ordering::Relaxed) {
        match msg_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(msg) => app.dispatch_msg(msg),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    qapp_info!(
        "qapp stopped with {} live resources",
        app.runner.resources().live_count()
    );
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        qapp_logging::set_poll_tick(state.board().polls_started());
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;

        self.runner.enqueue(effects);
        if let Some(view) = view {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(render(&view).as_bytes());
            let _ = stdout.flush();
        }
    }
}

fn spawn_poll_ticker(interval: Duration, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if msg_tx.send(Msg::PollTick).is_err() {
            break;
        }
    });
}

fn spawn_console_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Ok(Some(Command::Dispatch(msg))) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
        quit.store(true, Ordering::Relaxed);
    });
}
