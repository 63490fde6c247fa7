//! Download domain events

use crate::EventLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Download started
    Started {
        url: String,
        total_size: Option<u64>,
    },

    /// Download completed successfully
    Completed { url: String, final_size: u64 },

    /// Download failed
    Failed { url: String, error: String },
}

impl DownloadEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::Started { .. } | Self::Completed { .. } => EventLevel::Info,
            Self::Failed { .. } => EventLevel::Error,
        }
    }
}
