// ── Printer lifecycle state ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::warn;

use crate::collab::Translator;

/// Normalized printer state as reported by the status endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LinkState {
    #[default]
    Unknown,
    Idle,
    Ready,
    Busy,
    Printing,
    Paused,
    Finished,
    Stopped,
    Error,
    Attention,
}

impl LinkState {
    /// Map a raw API state string onto the closed set.
    ///
    /// Matching is case-insensitive but otherwise exact, so surrounding
    /// whitespace is not accepted. Anything unrecognized becomes
    /// [`Unknown`](Self::Unknown) and is logged; it is never an error.
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(state = raw, "unsupported printer state");
            Self::Unknown
        })
    }

    /// Whether the printer accepts new work in this state.
    pub fn is_operational(self) -> bool {
        matches!(self, Self::Idle | Self::Ready | Self::Finished)
    }

    /// Translation key of the display label for this state.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Unknown => "prop.st-unknown",
            Self::Idle => "prop.st-idle",
            Self::Ready => "prop.st-ready",
            Self::Busy => "prop.st-busy",
            Self::Printing => "prop.st-printing",
            Self::Paused => "prop.st-paused",
            Self::Finished => "prop.st-finished",
            Self::Stopped => "prop.st-stopped",
            Self::Error => "prop.st-error",
            Self::Attention => "prop.st-attention",
        }
    }

    /// Display label for this state, resolved through `translator`.
    pub fn translate(self, translator: &dyn Translator) -> String {
        translator.translate(self.label_key())
    }
}
