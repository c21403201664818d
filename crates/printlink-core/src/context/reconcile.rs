// ── Status reconciliation ──
//
// Pure, synchronous folding of one status payload into a snapshot. The
// caller decides what to do with the returned detail requests.

use chrono::Utc;
use tracing::debug;

use printlink_api::models::{InfoResponse, StatusResponse};

use super::detail::DetailRequest;
use crate::model::{
    CameraRef, JobProgress, LinkState, PrinterDescriptor, ResourceId, Snapshot, StorageLocation,
    Telemetry, Transition, TransferProgress,
};

impl Snapshot {
    /// Apply an ok status payload. Returns the detail fetches it triggers,
    /// at most one per resource kind.
    pub(crate) fn apply_status(&mut self, status: StatusResponse) -> Vec<DetailRequest> {
        let mut requests = Vec::new();

        self.state = status
            .printer
            .state
            .as_deref()
            .map_or(LinkState::Unknown, LinkState::normalize);
        self.telemetry = Telemetry::from(&status.printer);

        let job = status.job.unwrap_or_default();
        match self
            .job
            .observe(ResourceId::from_raw(job.id), JobProgress::from(&job))
        {
            Transition::Started(id) => {
                debug!(job_id = %id, "job started");
                requests.push(DetailRequest::Job(id));
            }
            Transition::Cleared => debug!("job cleared"),
            Transition::Idle | Transition::Refreshed => {}
        }

        if let Some(storage) = status.storage {
            self.storage
                .merge(storage.into_entries().into_iter().map(StorageLocation::from));
        }

        let transfer = status.transfer.unwrap_or_default();
        match self.transfer.observe(
            ResourceId::from_raw(transfer.id),
            TransferProgress::from(&transfer),
        ) {
            Transition::Started(id) => {
                debug!(transfer_id = %id, "transfer started");
                requests.push(DetailRequest::Transfer(id));
            }
            Transition::Cleared => debug!("transfer cleared"),
            Transition::Idle | Transition::Refreshed => {}
        }

        self.camera = status.camera.map(CameraRef::from);
        self.updated_at = Some(Utc::now());

        requests
    }

    /// Replace the printer descriptor wholesale.
    pub(crate) fn apply_printer(&mut self, info: InfoResponse) {
        self.printer = Some(PrinterDescriptor::from(info));
    }
}
