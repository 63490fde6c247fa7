//! Installer exit-code classification and attempt outcome

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity bucket for rendering and logging a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Classification of a raw installer exit status
///
/// The lookup is closed but extensible: codes the table does not know
/// fall through to `Unknown` instead of aborting, so a future installer
/// version introducing a new code never crashes the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitClass {
    Success,
    SuccessRebootInitiated,
    SuccessRebootRequired,
    UserCanceled,
    FatalError,
    InvalidPackage,
    InvalidArguments,
    Unknown,
}

impl ExitClass {
    /// Classify a raw installer exit status
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Success,
            1641 => Self::SuccessRebootInitiated,
            3010 => Self::SuccessRebootRequired,
            1602 => Self::UserCanceled,
            1603 => Self::FatalError,
            1619 => Self::InvalidPackage,
            1639 => Self::InvalidArguments,
            _ => Self::Unknown,
        }
    }

    /// True for every `Success*` variant
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Success | Self::SuccessRebootInitiated | Self::SuccessRebootRequired
        )
    }

    /// Severity bucket used for event levels and console rendering
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Success | Self::SuccessRebootInitiated | Self::SuccessRebootRequired => {
                Severity::Info
            }
            Self::UserCanceled | Self::Unknown => Severity::Warning,
            Self::FatalError | Self::InvalidPackage | Self::InvalidArguments => Severity::Error,
        }
    }
}

impl std::fmt::Display for ExitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::SuccessRebootInitiated => "success, reboot initiated",
            Self::SuccessRebootRequired => "success, reboot required",
            Self::UserCanceled => "canceled by user",
            Self::FatalError => "fatal error",
            Self::InvalidPackage => "invalid package",
            Self::InvalidArguments => "invalid arguments",
            Self::Unknown => "unknown status",
        };
        write!(f, "{name}")
    }
}

/// Result of one install attempt
///
/// Created once per attempt and immutable after creation. Not persisted
/// anywhere beyond the installer's own log file and the process exit code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallOutcome {
    /// Raw exit status reported by the installer process
    pub code: i32,
    /// Classification bucket for the raw status
    pub classification: ExitClass,
    /// Path to the structured log written by the installer itself
    pub log_path: PathBuf,
}

impl InstallOutcome {
    /// Build the outcome for a raw installer exit status
    #[must_use]
    pub fn new(code: i32, log_path: PathBuf) -> Self {
        Self {
            code,
            classification: ExitClass::from_code(code),
            log_path,
        }
    }
}
