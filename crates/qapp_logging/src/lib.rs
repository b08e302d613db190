#![deny(missing_docs)]
//! Shared logging utilities for the Q-app workspace.
//!
//! Every crate logs through the `qapp_*` macros below. Each record is prefixed
//! with the poll tick the emitting thread last observed, so engine output can
//! be lined up with the dashboard refresh that caused it.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

thread_local! {
    /// Poll tick last observed by the current thread.
    static POLL_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Records the poll tick for the current thread.
/// The app loop calls this once per dispatched poll.
pub fn set_poll_tick(tick: u64) {
    POLL_TICK.with(|v| v.set(tick));
}

/// Returns the poll tick recorded for the current thread, or 0 if unset.
pub fn poll_tick() -> u64 {
    POLL_TICK.with(|v| v.get())
}

/// Runs `fut` with the poll tick set to `tick` on whichever thread polls it.
///
/// Engine tasks hop between runtime workers, so the tick of the command that
/// started a task is reapplied before every poll.
pub fn with_poll_tick<F: Future>(tick: u64, fut: F) -> WithPollTick<F> {
    WithPollTick {
        tick,
        inner: Box::pin(fut),
    }
}

/// Future returned by [`with_poll_tick`].
pub struct WithPollTick<F> {
    tick: u64,
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for WithPollTick<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<F::Output> {
        set_poll_tick(self.tick);
        self.inner.as_mut().poll(cx)
    }
}

/// Logs a trace-level message tagged with the current poll tick.
#[macro_export]
macro_rules! qapp_trace {
    ($($arg:tt)*) => {{
        log::trace!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current poll tick.
#[macro_export]
macro_rules! qapp_debug {
    ($($arg:tt)*) => {{
        log::debug!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current poll tick.
#[macro_export]
macro_rules! qapp_info {
    ($($arg:tt)*) => {{
        log::info!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current poll tick.
#[macro_export]
macro_rules! qapp_warn {
    ($($arg:tt)*) => {{
        log::warn!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current poll tick.
#[macro_export]
macro_rules! qapp_error {
    ($($arg:tt)*) => {{
        log::error!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    );
}
