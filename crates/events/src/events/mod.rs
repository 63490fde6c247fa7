//! Domain event definitions

use serde::{Deserialize, Serialize};

pub mod download;
pub mod general;
pub mod install;

pub use download::DownloadEvent;
pub use general::GeneralEvent;
pub use install::InstallEvent;

use crate::EventLevel;

/// Top-level event type wrapping all domains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain")]
pub enum AppEvent {
    Download(DownloadEvent),
    General(GeneralEvent),
    Install(InstallEvent),
}

impl AppEvent {
    /// Severity level used for console rendering and tracing
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::Download(event) => event.level(),
            Self::General(event) => event.level(),
            Self::Install(event) => event.level(),
        }
    }
}
