//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields so
//! observability tooling sees the same stream the console does.

use tracing::{debug, error, info, warn};
use winst_events::{AppEvent, DownloadEvent, GeneralEvent, InstallEvent};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event(event: &AppEvent) {
    match event {
        AppEvent::Download(download_event) => match download_event {
            DownloadEvent::Started { url, total_size } => {
                info!(url = %url, total_size = ?total_size, "Download started");
            }
            DownloadEvent::Completed { url, final_size } => {
                info!(url = %url, final_size = final_size, "Download completed");
            }
            DownloadEvent::Failed { url, error } => {
                error!(url = %url, error = %error, "Download failed");
            }
        },

        AppEvent::Install(install_event) => match install_event {
            InstallEvent::Started { package, log_path } => {
                info!(package = %package.display(), log = %log_path.display(), "Installer started");
            }
            InstallEvent::Completed {
                code,
                classification,
                log_path,
            } => match winst_events::EventLevel::from(classification.severity()) {
                winst_events::EventLevel::Error => {
                    error!(code = code, classification = %classification, log = %log_path.display(), "Installer completed");
                }
                winst_events::EventLevel::Warning => {
                    warn!(code = code, classification = %classification, log = %log_path.display(), "Installer completed");
                }
                _ => {
                    info!(code = code, classification = %classification, log = %log_path.display(), "Installer completed");
                }
            },
            InstallEvent::CleanupCompleted { path } => {
                debug!(path = %path.display(), "Artifact removed");
            }
            InstallEvent::CleanupFailed { path, error } => {
                warn!(path = %path.display(), error = %error, "Artifact removal failed");
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::DebugLog { message } => debug!("{message}"),
            GeneralEvent::Warning { message, context } => {
                warn!(context = ?context, "{message}");
            }
            GeneralEvent::Error { message, details } => {
                error!(details = ?details, "{message}");
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(operation = %operation, "Operation started");
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(operation = %operation, success = success, "Operation completed");
            }
            GeneralEvent::OperationFailed { operation, error } => {
                error!(operation = %operation, error = %error, "Operation failed");
            }
        },
    }
}
