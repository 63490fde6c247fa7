//! Install domain events

use crate::EventLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use winst_types::ExitClass;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Installer invocation started
    Started {
        package: PathBuf,
        log_path: PathBuf,
    },

    /// Installer exited; the raw status has been classified
    Completed {
        code: i32,
        classification: ExitClass,
        log_path: PathBuf,
    },

    /// Downloaded artifact removed after the attempt
    CleanupCompleted { path: PathBuf },

    /// Downloaded artifact could not be removed; non-fatal
    CleanupFailed { path: PathBuf, error: String },
}

impl InstallEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::Started { .. } => EventLevel::Info,
            // Completed takes its level from the classification severity
            Self::Completed { classification, .. } => classification.severity().into(),
            Self::CleanupCompleted { .. } => EventLevel::Debug,
            Self::CleanupFailed { .. } => EventLevel::Warning,
        }
    }
}
