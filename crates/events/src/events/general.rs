//! General utility events for warnings, errors, and operations

use crate::EventLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// Generic warning message with optional context
    Warning {
        message: String,
        context: Option<String>,
    },

    /// Generic error message with optional details
    Error {
        message: String,
        details: Option<String>,
    },

    /// Debug logging
    DebugLog { message: String },

    /// Generic operation started notification
    OperationStarted { operation: String },

    /// Generic operation completion with success status
    OperationCompleted { operation: String, success: bool },

    /// Generic operation failure with error details
    OperationFailed { operation: String, error: String },
}

impl GeneralEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::DebugLog { .. } => EventLevel::Debug,
            Self::OperationStarted { .. } | Self::OperationCompleted { .. } => EventLevel::Info,
            Self::Warning { .. } => EventLevel::Warning,
            Self::Error { .. } | Self::OperationFailed { .. } => EventLevel::Error,
        }
    }
}
