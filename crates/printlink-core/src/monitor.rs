// ── Poll loop ──
//
// Drives a `Context` from a `StatusSource`: one status poll per tick, plus
// the info endpoint until a descriptor has been seen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use printlink_api::PrinterClient;

use crate::collab::{ErrorSink, LogErrorSink, StatusSource};
use crate::config::MonitorConfig;
use crate::context::{Context, Polled, Update};
use crate::error::CoreError;

/// Polls one printer and keeps its [`Context`] current.
///
/// Cheaply cloneable; clones share the same context and background task.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    source: Arc<dyn StatusSource>,
    context: Context,
    poll_interval: Duration,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    printer_known: AtomicBool,
    running: AtomicBool,
}

impl Monitor {
    pub fn new(source: Arc<dyn StatusSource>, context: Context, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                source,
                context,
                poll_interval,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
                printer_known: AtomicBool::new(false),
                running: AtomicBool::new(false),
            }),
        }
    }

    /// Build a monitor backed by an HTTP [`PrinterClient`] that serves
    /// both status polls and detail fetches.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, CoreError> {
        Self::from_config_with_sink(config, Arc::new(LogErrorSink))
    }

    pub fn from_config_with_sink(
        config: &MonitorConfig,
        errors: Arc<dyn ErrorSink>,
    ) -> Result<Self, CoreError> {
        let client = Arc::new(PrinterClient::new(config.url.clone(), &config.transport())?);
        let context = Context::with_error_sink(client.clone(), errors);
        Ok(Self::new(client, context, config.poll_interval))
    }

    pub fn context(&self) -> &Context {
        &self.inner.context
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// Poll once and apply the result.
    ///
    /// A failed status poll is still handed to the context (as a failed
    /// [`Polled`]) before the error is returned. An info failure only
    /// logs; it is retried on the next poll.
    pub async fn poll_once(&self) -> Result<(), CoreError> {
        let source = &self.inner.source;
        let want_info = !self.inner.printer_known.load(Ordering::Acquire);

        let (status, info) = tokio::join!(source.fetch_status(), async {
            if want_info {
                Some(source.fetch_info().await)
            } else {
                None
            }
        });

        let printer = match info {
            Some(Ok(info)) => {
                self.inner.printer_known.store(true, Ordering::Release);
                Some(info)
            }
            Some(Err(e)) => {
                warn!(error = %e, "printer info fetch failed");
                None
            }
            None => None,
        };

        let (polled, outcome) = match status {
            Ok(status) => (Polled::ok(status), Ok(())),
            Err(e) => (Polled::failed(), Err(CoreError::from(e))),
        };
        self.inner.context.update(Update {
            status: Some(polled),
            printer,
        });
        outcome
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the background poll task. Calling it again while running is
    /// a no-op.
    pub async fn start(&self) {
        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            return;
        }
        info!(interval = ?self.inner.poll_interval, "monitor started");
        let monitor = self.clone();
        let cancel = self.inner.cancel.clone();
        handles.push(tokio::spawn(poll_task(monitor, cancel)));
        self.inner.running.store(true, Ordering::Release);
    }

    /// Stop polling and wait for in-flight detail fetches.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.running.store(false, Ordering::Release);

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        drop(handles);

        self.inner.context.settle().await;
        info!("monitor stopped");
    }

    /// Whether the background poll task has been started and not yet
    /// shut down.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }
}

async fn poll_task(monitor: Monitor, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(monitor.inner.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!("status poll");
                if let Err(e) = monitor.poll_once().await {
                    warn!(error = %e, "status poll failed");
                }
            }
        }
    }
}
