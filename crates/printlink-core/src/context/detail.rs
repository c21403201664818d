// ── Detail fetch binding ──
//
// A detail response is attached only if, when it lands, the slot still
// tracks the identity it was requested for and the response describes
// that same identity. Everything else is dropped on the floor.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use printlink_api::models::{JobResponse, TransferResponse};

use super::Context;
use crate::collab::DetailTransport;
use crate::error::CoreError;
use crate::model::{
    JobFile, JobProgress, ResourceId, Snapshot, Tracked, TransferFile, TransferProgress,
};

/// A detail fetch triggered by a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailRequest {
    Job(ResourceId),
    Transfer(ResourceId),
}

/// Ties a detail endpoint to the snapshot slot it fills.
trait Binding: 'static {
    const RESOURCE: &'static str;

    type Response: Send + 'static;
    type Summary;
    type Detail;

    fn fetch(
        transport: &dyn DetailTransport,
    ) -> BoxFuture<'_, Result<Self::Response, printlink_api::Error>>;

    fn reported_id(response: &Self::Response) -> Option<ResourceId>;

    fn into_detail(response: Self::Response) -> Self::Detail;

    fn slot(snapshot: &Snapshot) -> &Tracked<Self::Summary, Self::Detail>;

    fn slot_mut(snapshot: &mut Snapshot) -> &mut Tracked<Self::Summary, Self::Detail>;
}

struct JobBinding;

impl Binding for JobBinding {
    const RESOURCE: &'static str = "job";

    type Response = JobResponse;
    type Summary = JobProgress;
    type Detail = JobFile;

    fn fetch(
        transport: &dyn DetailTransport,
    ) -> BoxFuture<'_, Result<JobResponse, printlink_api::Error>> {
        transport.fetch_job()
    }

    fn reported_id(response: &JobResponse) -> Option<ResourceId> {
        ResourceId::from_raw(response.id)
    }

    fn into_detail(response: JobResponse) -> JobFile {
        JobFile::from(response)
    }

    fn slot(snapshot: &Snapshot) -> &Tracked<Self::Summary, JobFile> {
        &snapshot.job
    }

    fn slot_mut(snapshot: &mut Snapshot) -> &mut Tracked<Self::Summary, JobFile> {
        &mut snapshot.job
    }
}

struct TransferBinding;

impl Binding for TransferBinding {
    const RESOURCE: &'static str = "transfer";

    type Response = TransferResponse;
    type Summary = TransferProgress;
    type Detail = TransferFile;

    fn fetch(
        transport: &dyn DetailTransport,
    ) -> BoxFuture<'_, Result<TransferResponse, printlink_api::Error>> {
        transport.fetch_transfer()
    }

    fn reported_id(response: &TransferResponse) -> Option<ResourceId> {
        ResourceId::from_raw(response.id)
    }

    fn into_detail(response: TransferResponse) -> TransferFile {
        TransferFile::from(response)
    }

    fn slot(snapshot: &Snapshot) -> &Tracked<Self::Summary, TransferFile> {
        &snapshot.transfer
    }

    fn slot_mut(snapshot: &mut Snapshot) -> &mut Tracked<Self::Summary, TransferFile> {
        &mut snapshot.transfer
    }
}

impl Context {
    /// Start the fetch for `request` in the background.
    ///
    /// Outside a Tokio runtime nothing is spawned; the error sink is told
    /// and the slot stays summary-only.
    pub(super) fn spawn_detail(&self, request: DetailRequest) {
        let Ok(runtime) = Handle::try_current() else {
            self.inner.errors.handle(&CoreError::NoRuntime {
                operation: "fetch detail",
            });
            return;
        };

        let handle = match request {
            DetailRequest::Job(id) => self.spawn_fetch::<JobBinding>(&runtime, id),
            DetailRequest::Transfer(id) => self.spawn_fetch::<TransferBinding>(&runtime, id),
        };
        self.track(handle);
    }

    fn spawn_fetch<B: Binding>(&self, runtime: &Handle, requested: ResourceId) -> JoinHandle<()> {
        debug!(resource = B::RESOURCE, id = %requested, "fetching detail");
        let ctx = self.clone();
        runtime.spawn(async move {
            let result = B::fetch(ctx.inner.transport.as_ref()).await;
            ctx.complete::<B>(requested, result);
        })
    }

    fn complete<B: Binding>(
        &self,
        requested: ResourceId,
        result: Result<B::Response, printlink_api::Error>,
    ) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.inner.errors.handle(&CoreError::DetailFetch {
                    resource: B::RESOURCE,
                    id: requested,
                    source: Box::new(e.into()),
                });
                return;
            }
        };

        let reported = B::reported_id(&response);
        let detail = B::into_detail(response);
        let attached = self.inner.view.send_if_modified(|snap| {
            // Stale responses leave the shared snapshot untouched.
            if !B::slot(snap).accepts(requested, reported) {
                return false;
            }
            B::slot_mut(Arc::make_mut(snap)).attach_detail(requested, reported, detail)
        });

        if attached {
            debug!(resource = B::RESOURCE, id = %requested, "detail attached");
        } else {
            debug!(
                resource = B::RESOURCE,
                requested = %requested,
                reported = ?reported,
                "discarding stale detail"
            );
        }
    }
}
