//! Event handling and console output

use winst_events::{AppEvent, DownloadEvent, GeneralEvent, InstallEvent};

/// Event handler rendering one timestamped console line per event
pub struct EventHandler {
    debug: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Handle incoming event
    pub fn handle_event(&self, event: &AppEvent) {
        crate::logging::log_event(event);

        let level = event.level();
        if level == winst_events::EventLevel::Debug && !self.debug {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level.label(),
            Self::describe(event)
        );

        match level {
            winst_events::EventLevel::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    fn describe(event: &AppEvent) -> String {
        match event {
            AppEvent::Download(download) => match download {
                DownloadEvent::Started { url, total_size } => match total_size {
                    Some(size) => format!("Downloading {url} ({size} bytes)"),
                    None => format!("Downloading {url}"),
                },
                DownloadEvent::Completed { url, final_size } => {
                    format!("Downloaded {url} ({final_size} bytes)")
                }
                DownloadEvent::Failed { url, error } => {
                    format!("Download failed for {url}: {error}")
                }
            },
            AppEvent::Install(install) => match install {
                InstallEvent::Started { package, log_path } => format!(
                    "Running installer on {} (log: {})",
                    package.display(),
                    log_path.display()
                ),
                InstallEvent::Completed {
                    code,
                    classification,
                    log_path,
                } => format!(
                    "Installer exited with status {code} ({classification}); log: {}",
                    log_path.display()
                ),
                InstallEvent::CleanupCompleted { path } => {
                    format!("Removed artifact {}", path.display())
                }
                InstallEvent::CleanupFailed { path, error } => {
                    format!("Could not remove artifact {}: {error}", path.display())
                }
            },
            AppEvent::General(general) => match general {
                GeneralEvent::Warning { message, context } => match context {
                    Some(context) => format!("{message} ({context})"),
                    None => message.clone(),
                },
                GeneralEvent::Error { message, details } => match details {
                    Some(details) => format!("{message}: {details}"),
                    None => message.clone(),
                },
                GeneralEvent::DebugLog { message } => message.clone(),
                GeneralEvent::OperationStarted { operation } => format!("Starting {operation}"),
                GeneralEvent::OperationCompleted { operation, success } => {
                    if *success {
                        format!("Completed {operation}")
                    } else {
                        format!("Completed {operation} (not successful)")
                    }
                }
                GeneralEvent::OperationFailed { operation, error } => {
                    format!("Failed {operation}: {error}")
                }
            },
        }
    }
}
