// ── Identity-tracked resources ──
//
// Jobs and transfers arrive in two halves: a lightweight summary on every
// status poll and a heavier detail record behind its own endpoint. The
// `Tracked` slot keeps both halves tied to the identity they belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a job or transfer as assigned by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Interpret a raw API id. The printer reports "no resource" either by
    /// omitting the id or by sending `0`.
    pub fn from_raw(raw: Option<u64>) -> Option<Self> {
        raw.filter(|id| *id != 0).map(Self)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What [`Tracked::observe`] did with an incoming summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing was tracked and nothing arrived.
    Idle,
    /// A new identity appeared; its detail should be fetched.
    Started(ResourceId),
    /// Same identity as before; summary refreshed, detail kept.
    Refreshed,
    /// The identity went away; summary and detail dropped.
    Cleared,
}

/// A resource slot keyed by identity.
///
/// Detail only ever exists next to the identity it was fetched for, so a
/// summary can never be paired with another resource's detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Tracked<S, D> {
    Absent,
    SummaryOnly {
        id: ResourceId,
        summary: S,
    },
    WithDetail {
        id: ResourceId,
        summary: S,
        detail: D,
    },
}

impl<S, D> Default for Tracked<S, D> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<S, D> Tracked<S, D> {
    pub fn id(&self) -> Option<ResourceId> {
        match self {
            Self::Absent => None,
            Self::SummaryOnly { id, .. } | Self::WithDetail { id, .. } => Some(*id),
        }
    }

    pub fn summary(&self) -> Option<&S> {
        match self {
            Self::Absent => None,
            Self::SummaryOnly { summary, .. } | Self::WithDetail { summary, .. } => Some(summary),
        }
    }

    pub fn detail(&self) -> Option<&D> {
        match self {
            Self::WithDetail { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Fold the summary half of a status poll into the slot.
    ///
    /// - no identity: the slot is cleared, detail included
    /// - same identity: only the summary is replaced
    /// - new identity: any previous detail is dropped and the caller is
    ///   told to fetch detail for the new identity
    pub fn observe(&mut self, id: Option<ResourceId>, summary: S) -> Transition {
        match (self.id(), id) {
            (None, None) => Transition::Idle,
            (Some(_), None) => {
                *self = Self::Absent;
                Transition::Cleared
            }
            (Some(live), Some(incoming)) if live == incoming => {
                if let Self::SummaryOnly { summary: current, .. }
                | Self::WithDetail { summary: current, .. } = self
                {
                    *current = summary;
                }
                Transition::Refreshed
            }
            (_, Some(incoming)) => {
                *self = Self::SummaryOnly {
                    id: incoming,
                    summary,
                };
                Transition::Started(incoming)
            }
        }
    }

    /// Whether a detail response fetched for `requested` and claiming to
    /// describe `reported` may be attached right now.
    pub fn accepts(&self, requested: ResourceId, reported: Option<ResourceId>) -> bool {
        self.id() == Some(requested) && reported == Some(requested)
    }

    /// Attach detail if [`accepts`](Self::accepts) holds. Returns `false`
    /// (leaving the slot untouched) for stale or mismatched responses.
    pub fn attach_detail(
        &mut self,
        requested: ResourceId,
        reported: Option<ResourceId>,
        detail: D,
    ) -> bool {
        if !self.accepts(requested, reported) {
            return false;
        }
        *self = match std::mem::take(self) {
            Self::SummaryOnly { id, summary } | Self::WithDetail { id, summary, .. } => {
                Self::WithDetail {
                    id,
                    summary,
                    detail,
                }
            }
            Self::Absent => Self::Absent,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Slot = Tracked<u32, &'static str>;

    fn id(raw: u64) -> ResourceId {
        ResourceId::new(raw)
    }

    #[test]
    fn zero_and_missing_ids_are_absent() {
        assert_eq!(ResourceId::from_raw(None), None);
        assert_eq!(ResourceId::from_raw(Some(0)), None);
        assert_eq!(ResourceId::from_raw(Some(5)), Some(id(5)));
    }

    #[test]
    fn new_identity_starts_summary_only() {
        let mut slot = Slot::default();
        assert_eq!(slot.observe(Some(id(1)), 10), Transition::Started(id(1)));
        assert_eq!(slot.id(), Some(id(1)));
        assert_eq!(slot.summary(), Some(&10));
        assert_eq!(slot.detail(), None);
    }

    #[test]
    fn same_identity_refreshes_summary_and_keeps_detail() {
        let mut slot = Slot::default();
        slot.observe(Some(id(1)), 10);
        assert!(slot.attach_detail(id(1), Some(id(1)), "benchy"));

        assert_eq!(slot.observe(Some(id(1)), 55), Transition::Refreshed);
        assert_eq!(slot.summary(), Some(&55));
        assert_eq!(slot.detail(), Some(&"benchy"));
    }

    #[test]
    fn identity_change_drops_old_detail() {
        let mut slot = Slot::default();
        slot.observe(Some(id(1)), 10);
        slot.attach_detail(id(1), Some(id(1)), "benchy");

        assert_eq!(slot.observe(Some(id(2)), 0), Transition::Started(id(2)));
        assert_eq!(slot.detail(), None);
        assert_eq!(slot, Slot::SummaryOnly { id: id(2), summary: 0 });
    }

    #[test]
    fn missing_identity_clears() {
        let mut slot = Slot::default();
        assert_eq!(slot.observe(None, 0), Transition::Idle);
        slot.observe(Some(id(3)), 1);
        assert_eq!(slot.observe(None, 0), Transition::Cleared);
        assert!(slot.is_absent());
    }

    #[test]
    fn stale_detail_is_rejected() {
        let mut slot = Slot::default();
        slot.observe(Some(id(2)), 0);

        // Fetched for a previous identity.
        assert!(!slot.attach_detail(id(1), Some(id(1)), "old"));
        // Fetched for the live identity, but the printer already moved on.
        assert!(!slot.attach_detail(id(2), Some(id(3)), "other"));
        assert_eq!(slot.detail(), None);
    }

    #[test]
    fn detail_on_absent_slot_is_rejected() {
        let mut slot = Slot::default();
        assert!(!slot.attach_detail(id(1), Some(id(1)), "late"));
        assert!(slot.is_absent());
    }
}
