// ── Update payload ──

use printlink_api::models::{InfoResponse, StatusResponse};

/// Outcome of one poll of an endpoint.
///
/// Mirrors what a transport hands the dashboard: a success flag and,
/// when it succeeded, the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Polled<T> {
    pub ok: bool,
    pub payload: Option<T>,
}

impl<T> Polled<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
        }
    }

    pub fn failed() -> Self {
        Self {
            ok: false,
            payload: None,
        }
    }

    /// The payload, only if the poll succeeded.
    pub fn into_payload(self) -> Option<T> {
        if self.ok { self.payload } else { None }
    }
}

impl<T, E> From<Result<T, E>> for Polled<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(_) => Self::failed(),
        }
    }
}

/// Combined payload accepted by [`Context::update`](super::Context::update).
///
/// The status and printer branches touch disjoint parts of the view-model;
/// either may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub status: Option<Polled<StatusResponse>>,
    pub printer: Option<InfoResponse>,
}

impl Update {
    /// An update carrying a successful status poll.
    pub fn status(status: StatusResponse) -> Self {
        Self {
            status: Some(Polled::ok(status)),
            printer: None,
        }
    }

    /// An update carrying only a printer descriptor.
    pub fn printer(info: InfoResponse) -> Self {
        Self {
            status: None,
            printer: Some(info),
        }
    }

    pub fn with_printer(mut self, info: InfoResponse) -> Self {
        self.printer = Some(info);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.printer.is_none()
    }
}
