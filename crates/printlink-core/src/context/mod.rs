// ── Printer context ──
//
// The aggregate root of the view-model. `update()` applies a poll result
// synchronously and kicks off detail fetches; those complete later and are
// folded back in only if they still match what is being tracked.

mod detail;
mod reconcile;
mod update;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub use update::{Polled, Update};

use crate::collab::{DetailTransport, ErrorSink, LogErrorSink};
use crate::model::{LinkState, Snapshot};

/// Live view-model for one printer.
///
/// Cheaply cloneable via `Arc<ContextInner>`. All clones share the same
/// snapshot and in-flight fetches.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    view: watch::Sender<Arc<Snapshot>>,
    transport: Arc<dyn DetailTransport>,
    errors: Arc<dyn ErrorSink>,
    fetches: Mutex<Vec<JoinHandle<()>>>,
}

impl Context {
    /// Create an empty context whose fetch failures are logged.
    pub fn new(transport: Arc<dyn DetailTransport>) -> Self {
        Self::with_error_sink(transport, Arc::new(LogErrorSink))
    }

    pub fn with_error_sink(transport: Arc<dyn DetailTransport>, errors: Arc<dyn ErrorSink>) -> Self {
        let (view, _) = watch::channel(Arc::new(Snapshot::default()));
        Self {
            inner: Arc::new(ContextInner {
                view,
                transport,
                errors,
                fetches: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Apply one poll result.
    ///
    /// A failed status poll leaves the status-derived view untouched. The
    /// printer branch is applied independently. Returns without waiting
    /// for any detail fetch it starts.
    pub fn update(&self, update: Update) {
        let Update { status, printer } = update;
        let status = status.and_then(Polled::into_payload);
        if status.is_none() && printer.is_none() {
            return;
        }

        let mut requests = Vec::new();
        self.inner.view.send_modify(|snap| {
            let snapshot = Arc::make_mut(snap);
            if let Some(status) = status {
                requests = snapshot.apply_status(status);
            }
            if let Some(info) = printer {
                snapshot.apply_printer(info);
            }
        });

        for request in requests {
            self.spawn_detail(request);
        }
    }

    // ── Read access ──────────────────────────────────────────────────

    /// Current snapshot (shared, never torn).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.view.borrow())
    }

    pub fn state(&self) -> LinkState {
        self.inner.view.borrow().state
    }

    /// Receiver notified after every applied update or attached detail.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.view.subscribe()
    }

    // ── Detail fetch bookkeeping ─────────────────────────────────────

    /// Wait for every detail fetch started so far to complete.
    pub async fn settle(&self) {
        loop {
            let pending = std::mem::take(&mut *self.lock_fetches());
            if pending.is_empty() {
                return;
            }
            for handle in pending {
                // A panicked fetch has nothing left to apply.
                let _ = handle.await;
            }
        }
    }

    /// Number of detail fetches not yet finished.
    pub fn pending_fetches(&self) -> usize {
        self.lock_fetches()
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut fetches = self.lock_fetches();
        fetches.retain(|h| !h.is_finished());
        fetches.push(handle);
    }

    fn lock_fetches(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state())
            .field("pending_fetches", &self.pending_fetches())
            .finish_non_exhaustive()
    }
}
