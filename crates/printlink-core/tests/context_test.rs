#![allow(clippy::unwrap_used)]

// Detail-fetch ordering tests for `Context`.
//
// The scripted transport hands out one oneshot receiver per fetch call, so
// each test decides exactly when (and with what) every fetch resolves.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

use printlink_api::models::{
    InfoResponse, JobResponse, JobSummary, PrinterTelemetry, StatusResponse, StorageEntry,
    StorageField, TransferResponse, TransferSummary,
};
use printlink_core::{
    Context, CoreError, DetailTransport, ErrorSink, LinkState, Polled, ResourceId, Update,
};

type Reply<T> = oneshot::Sender<Result<T, printlink_api::Error>>;
type Pending<T> = oneshot::Receiver<Result<T, printlink_api::Error>>;

// ── Test doubles ────────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedTransport {
    jobs: Mutex<VecDeque<Pending<JobResponse>>>,
    transfers: Mutex<VecDeque<Pending<TransferResponse>>>,
    job_calls: AtomicUsize,
    transfer_calls: AtomicUsize,
}

impl ScriptedTransport {
    fn script_job(&self) -> Reply<JobResponse> {
        let (tx, rx) = oneshot::channel();
        self.jobs.lock().unwrap().push_back(rx);
        tx
    }

    fn script_transfer(&self) -> Reply<TransferResponse> {
        let (tx, rx) = oneshot::channel();
        self.transfers.lock().unwrap().push_back(rx);
        tx
    }

    fn job_calls(&self) -> usize {
        self.job_calls.load(Ordering::SeqCst)
    }

    fn transfer_calls(&self) -> usize {
        self.transfer_calls.load(Ordering::SeqCst)
    }
}

async fn resolve<T>(pending: Option<Pending<T>>, path: &str) -> Result<T, printlink_api::Error> {
    let no_content = || printlink_api::Error::NoContent {
        path: path.to_owned(),
    };
    match pending {
        Some(rx) => rx.await.unwrap_or_else(|_| Err(no_content())),
        None => Err(no_content()),
    }
}

impl DetailTransport for ScriptedTransport {
    fn fetch_job(&self) -> BoxFuture<'_, Result<JobResponse, printlink_api::Error>> {
        self.job_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.jobs.lock().unwrap().pop_front();
        Box::pin(resolve(pending, "api/v1/job"))
    }

    fn fetch_transfer(&self) -> BoxFuture<'_, Result<TransferResponse, printlink_api::Error>> {
        self.transfer_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.transfers.lock().unwrap().pop_front();
        Box::pin(resolve(pending, "api/v1/transfer"))
    }
}

#[derive(Default)]
struct RecordingSink {
    seen: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn messages(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn handle(&self, error: &CoreError) {
        self.seen.lock().unwrap().push(error.to_string());
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn setup() -> (Context, Arc<ScriptedTransport>, Arc<RecordingSink>) {
    let transport = Arc::new(ScriptedTransport::default());
    let sink = Arc::new(RecordingSink::default());
    let ctx = Context::with_error_sink(transport.clone(), sink.clone());
    (ctx, transport, sink)
}

fn status_with_job(id: Option<u64>, progress: f64) -> Update {
    Update::status(StatusResponse {
        printer: PrinterTelemetry {
            state: Some(if id.is_some() { "PRINTING" } else { "IDLE" }.into()),
            ..PrinterTelemetry::default()
        },
        job: id.map(|id| JobSummary {
            id: Some(id),
            progress: Some(progress),
            ..JobSummary::default()
        }),
        ..StatusResponse::default()
    })
}

fn job_detail(id: u64, name: &str) -> JobResponse {
    JobResponse {
        id: Some(id),
        display_name: Some(name.to_owned()),
        ..JobResponse::default()
    }
}

/// Let spawned fetches run until the transport has seen `calls` job calls.
async fn wait_for_job_calls(transport: &ScriptedTransport, calls: usize) {
    for _ in 0..1000 {
        if transport.job_calls() >= calls {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("expected {calls} job fetches, saw {}", transport.job_calls());
}

fn job_name(ctx: &Context) -> Option<String> {
    ctx.snapshot()
        .job
        .file()
        .and_then(|f| f.display_name.clone())
}

// ── Job detail ──────────────────────────────────────────────────────

#[tokio::test]
async fn matching_detail_is_attached() {
    let (ctx, transport, sink) = setup();
    let reply = transport.script_job();

    ctx.update(status_with_job(Some(7), 10.0));
    wait_for_job_calls(&transport, 1).await;
    reply.send(Ok(job_detail(7, "benchy.gcode"))).unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert_eq!(snap.job.id(), Some(ResourceId::new(7)));
    assert_eq!(snap.job.progress(), Some(10.0));
    assert_eq!(job_name(&ctx).as_deref(), Some("benchy.gcode"));
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn detail_for_cleared_job_is_discarded() {
    let (ctx, transport, _sink) = setup();
    let reply = transport.script_job();

    ctx.update(status_with_job(Some(7), 10.0));
    wait_for_job_calls(&transport, 1).await;
    ctx.update(status_with_job(None, 0.0));
    reply.send(Ok(job_detail(7, "benchy.gcode"))).unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert!(snap.job.is_absent());
    assert_eq!(snap.state, LinkState::Idle);
}

#[tokio::test]
async fn late_detail_for_replaced_job_is_discarded() {
    let (ctx, transport, _sink) = setup();
    let reply_a = transport.script_job();
    let reply_b = transport.script_job();

    ctx.update(status_with_job(Some(1), 90.0));
    wait_for_job_calls(&transport, 1).await;
    ctx.update(status_with_job(Some(2), 0.0));
    wait_for_job_calls(&transport, 2).await;

    reply_b.send(Ok(job_detail(2, "b.gcode"))).unwrap();
    reply_a.send(Ok(job_detail(1, "a.gcode"))).unwrap();
    ctx.settle().await;

    assert_eq!(ctx.snapshot().job.id(), Some(ResourceId::new(2)));
    assert_eq!(job_name(&ctx).as_deref(), Some("b.gcode"));
}

#[tokio::test]
async fn old_detail_is_dropped_when_job_changes() {
    let (ctx, transport, _sink) = setup();
    let reply_a = transport.script_job();
    let _reply_b = transport.script_job();

    ctx.update(status_with_job(Some(1), 50.0));
    wait_for_job_calls(&transport, 1).await;
    reply_a.send(Ok(job_detail(1, "a.gcode"))).unwrap();
    ctx.settle().await;
    assert_eq!(job_name(&ctx).as_deref(), Some("a.gcode"));

    ctx.update(status_with_job(Some(2), 0.0));

    assert_eq!(ctx.snapshot().job.id(), Some(ResourceId::new(2)));
    assert_eq!(job_name(&ctx), None);
}

#[tokio::test]
async fn detail_describing_another_job_is_discarded() {
    let (ctx, transport, _sink) = setup();
    let reply = transport.script_job();

    ctx.update(status_with_job(Some(7), 10.0));
    wait_for_job_calls(&transport, 1).await;
    reply.send(Ok(job_detail(8, "other.gcode"))).unwrap();
    ctx.settle().await;

    assert_eq!(ctx.snapshot().job.id(), Some(ResourceId::new(7)));
    assert_eq!(job_name(&ctx), None);
}

#[tokio::test]
async fn same_job_is_fetched_once_and_keeps_detail() {
    let (ctx, transport, _sink) = setup();
    let reply = transport.script_job();

    ctx.update(status_with_job(Some(7), 10.0));
    wait_for_job_calls(&transport, 1).await;
    reply.send(Ok(job_detail(7, "benchy.gcode"))).unwrap();
    ctx.settle().await;

    ctx.update(status_with_job(Some(7), 20.0));
    ctx.update(status_with_job(Some(7), 30.0));
    ctx.settle().await;

    assert_eq!(transport.job_calls(), 1);
    assert_eq!(ctx.snapshot().job.progress(), Some(30.0));
    assert_eq!(job_name(&ctx).as_deref(), Some("benchy.gcode"));
}

#[tokio::test]
async fn failed_fetch_reports_and_keeps_summary() {
    let (ctx, transport, sink) = setup();
    let reply = transport.script_job();

    ctx.update(status_with_job(Some(7), 10.0));
    wait_for_job_calls(&transport, 1).await;
    reply
        .send(Err(printlink_api::Error::Http {
            status: 500,
            path: "api/v1/job".into(),
            body: String::new(),
        }))
        .unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert_eq!(snap.job.id(), Some(ResourceId::new(7)));
    assert_eq!(snap.job.progress(), Some(10.0));
    assert!(snap.job.file().is_none());

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("job detail for id 7"), "{messages:?}");
}

// ── Transfer detail ─────────────────────────────────────────────────

fn status_with_transfer(id: Option<u64>, progress: f64) -> Update {
    Update::status(StatusResponse {
        transfer: id.map(|id| TransferSummary {
            id: Some(id),
            progress: Some(progress),
            ..TransferSummary::default()
        }),
        ..StatusResponse::default()
    })
}

fn transfer_detail(id: u64, name: &str) -> TransferResponse {
    TransferResponse {
        id: Some(id),
        display_name: Some(name.to_owned()),
        ..TransferResponse::default()
    }
}

async fn wait_for_transfer_calls(transport: &ScriptedTransport, calls: usize) {
    for _ in 0..1000 {
        if transport.transfer_calls() >= calls {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!(
        "expected {calls} transfer fetches, saw {}",
        transport.transfer_calls()
    );
}

fn transfer_name(ctx: &Context) -> Option<String> {
    ctx.snapshot()
        .transfer
        .file()
        .and_then(|f| f.display_name.clone())
}

#[tokio::test]
async fn matching_transfer_detail_is_attached() {
    let (ctx, transport, sink) = setup();
    let reply = transport.script_transfer();

    ctx.update(status_with_transfer(Some(4), 25.0));
    wait_for_transfer_calls(&transport, 1).await;
    reply.send(Ok(transfer_detail(4, "upload.gcode"))).unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert_eq!(snap.transfer.id(), Some(ResourceId::new(4)));
    assert_eq!(snap.transfer.progress(), Some(25.0));
    assert_eq!(transfer_name(&ctx).as_deref(), Some("upload.gcode"));
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn detail_for_cleared_transfer_is_discarded() {
    let (ctx, transport, _sink) = setup();
    let reply = transport.script_transfer();

    ctx.update(status_with_transfer(Some(4), 25.0));
    wait_for_transfer_calls(&transport, 1).await;
    ctx.update(status_with_transfer(None, 0.0));
    reply.send(Ok(transfer_detail(4, "upload.gcode"))).unwrap();
    ctx.settle().await;

    assert_eq!(transport.transfer_calls(), 1);
    assert!(ctx.snapshot().transfer.is_absent());
}

#[tokio::test]
async fn late_transfer_detail_for_replaced_transfer_is_discarded() {
    let (ctx, transport, _sink) = setup();
    let reply_a = transport.script_transfer();
    let reply_b = transport.script_transfer();

    ctx.update(status_with_transfer(Some(1), 80.0));
    wait_for_transfer_calls(&transport, 1).await;
    ctx.update(status_with_transfer(Some(2), 5.0));
    wait_for_transfer_calls(&transport, 2).await;

    reply_b.send(Ok(transfer_detail(2, "b.gcode"))).unwrap();
    reply_a.send(Ok(transfer_detail(1, "a.gcode"))).unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert_eq!(snap.transfer.id(), Some(ResourceId::new(2)));
    assert_eq!(snap.transfer.progress(), Some(5.0));
    assert_eq!(transfer_name(&ctx).as_deref(), Some("b.gcode"));
}

#[tokio::test]
async fn failed_transfer_fetch_reports_and_keeps_summary() {
    let (ctx, transport, sink) = setup();
    let reply = transport.script_transfer();

    ctx.update(status_with_transfer(Some(4), 25.0));
    wait_for_transfer_calls(&transport, 1).await;
    reply
        .send(Err(printlink_api::Error::NoContent {
            path: "api/v1/transfer".into(),
        }))
        .unwrap();
    ctx.settle().await;

    let snap = ctx.snapshot();
    assert_eq!(snap.transfer.id(), Some(ResourceId::new(4)));
    assert_eq!(snap.transfer.progress(), Some(25.0));
    assert!(snap.transfer.file().is_none());

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("transfer detail for id 4"), "{messages:?}");
}

// ── Update semantics ────────────────────────────────────────────────

#[tokio::test]
async fn failed_status_poll_changes_nothing() {
    let (ctx, transport, _sink) = setup();
    let _reply = transport.script_job();
    ctx.update(status_with_job(Some(7), 10.0));
    let before = ctx.snapshot();

    ctx.update(Update {
        status: Some(Polled::failed()),
        printer: None,
    });

    assert_eq!(*ctx.snapshot(), *before);
}

#[tokio::test]
async fn printer_branch_applies_without_status() {
    let (ctx, _transport, _sink) = setup();

    ctx.update(Update {
        status: Some(Polled::failed()),
        printer: Some(InfoResponse {
            name: Some("MK4".into()),
            ..InfoResponse::default()
        }),
    });

    let snap = ctx.snapshot();
    assert_eq!(
        snap.printer.as_ref().and_then(|p| p.name.as_deref()),
        Some("MK4")
    );
    assert_eq!(snap.updated_at, None);
}

#[tokio::test]
async fn telemetry_is_replaced_not_merged() {
    let (ctx, _transport, _sink) = setup();
    ctx.update(Update::status(StatusResponse {
        printer: PrinterTelemetry {
            temp_nozzle: Some(215.0),
            temp_bed: Some(60.0),
            ..PrinterTelemetry::default()
        },
        ..StatusResponse::default()
    }));
    ctx.update(Update::status(StatusResponse {
        printer: PrinterTelemetry {
            temp_nozzle: Some(200.0),
            ..PrinterTelemetry::default()
        },
        ..StatusResponse::default()
    }));

    let telemetry = ctx.snapshot().telemetry;
    assert_eq!(telemetry.temperature.nozzle.current, Some(200.0));
    assert_eq!(telemetry.temperature.bed.current, None);
}

#[tokio::test]
async fn storage_keeps_positions_across_updates() {
    let (ctx, _transport, _sink) = setup();
    let entry = |path: &str, free: u64| StorageEntry {
        path: path.to_owned(),
        name: Some(path.trim_start_matches('/').to_owned()),
        read_only: Some(false),
        free_space: Some(free),
    };

    ctx.update(Update::status(StatusResponse {
        storage: Some(StorageField::Many(vec![entry("/local", 10), entry("/usb", 20)])),
        ..StatusResponse::default()
    }));
    ctx.update(Update::status(StatusResponse {
        storage: Some(StorageField::One(entry("/usb", 5))),
        ..StatusResponse::default()
    }));

    let snap = ctx.snapshot();
    assert_eq!(snap.storage.len(), 2);
    assert_eq!(snap.storage.position("/usb"), Some(1));
    assert_eq!(snap.storage.get("/usb").unwrap().free_space, Some(5));
    assert_eq!(snap.storage.get("/local").unwrap().free_space, Some(10));
}

#[tokio::test]
async fn subscribers_see_applied_updates() {
    let (ctx, _transport, _sink) = setup();
    let mut rx = ctx.subscribe();

    ctx.update(Update::status(StatusResponse {
        printer: PrinterTelemetry {
            state: Some("paused".into()),
            ..PrinterTelemetry::default()
        },
        ..StatusResponse::default()
    }));

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().state, LinkState::Paused);
}

#[test]
fn update_outside_runtime_reports_instead_of_panicking() {
    let (ctx, transport, sink) = setup();

    ctx.update(status_with_job(Some(7), 10.0));

    assert_eq!(transport.job_calls(), 0);
    assert_eq!(ctx.snapshot().job.id(), Some(ResourceId::new(7)));
    assert_eq!(sink.messages().len(), 1);
    assert!(sink.messages()[0].contains("No async runtime"));
}
