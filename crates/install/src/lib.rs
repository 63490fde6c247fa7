#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Install orchestration for winst
//!
//! Drives one installation end-to-end: resolve a unique staging path,
//! download the artifact, invoke the platform installer, classify the
//! raw exit status, and remove the artifact on every exit path. No step
//! is ever retried.

mod artifact;
mod launcher;

pub use artifact::ArtifactStaging;
pub use launcher::{InstallerLauncher, MsiExecLauncher};

use std::path::PathBuf;
use std::time::Duration;

use winst_config::Config;
use winst_errors::{Error, InstallError};
use winst_events::{AppEvent, EventEmitter, EventSender, InstallEvent};
use winst_net::{download_file, NetClient};
use winst_types::{InstallOutcome, InstallRequest};

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct InstallerOptions {
    /// Directory staging directories are created under
    pub temp_root: PathBuf,
    /// Directory installer log files are written to
    pub log_dir: PathBuf,
    /// Bound on the installer wait; `None` means wait forever
    pub install_timeout: Option<Duration>,
}

impl Default for InstallerOptions {
    fn default() -> Self {
        Self {
            temp_root: std::env::temp_dir(),
            log_dir: std::env::temp_dir(),
            install_timeout: None,
        }
    }
}

impl From<&Config> for InstallerOptions {
    fn from(config: &Config) -> Self {
        Self {
            temp_root: config.temp_dir(),
            log_dir: config.log_dir(),
            install_timeout: config.install.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// Drives one installation end-to-end and reports a typed outcome
///
/// Never leaves a downloaded artifact behind: once the staging directory
/// exists, cleanup runs whatever the attempt produced.
pub struct Installer {
    client: NetClient,
    launcher: Box<dyn InstallerLauncher>,
    options: InstallerOptions,
}

impl Installer {
    /// Create an orchestrator from its collaborators
    #[must_use]
    pub fn new(
        client: NetClient,
        launcher: Box<dyn InstallerLauncher>,
        options: InstallerOptions,
    ) -> Self {
        Self {
            client,
            launcher,
            options,
        }
    }

    /// Run one install attempt
    ///
    /// A completed installer run always returns the classified outcome,
    /// whatever the raw status was; the caller decides what a
    /// non-success classification warrants.
    ///
    /// # Errors
    ///
    /// Returns an error when the installer never ran: the staging
    /// directory could not be created, the download failed or left no
    /// file behind, the installer process could not be started, or a
    /// configured timeout elapsed.
    pub async fn install(
        &self,
        request: &InstallRequest,
        tx: &EventSender,
    ) -> Result<InstallOutcome, Error> {
        let operation = format!("install {}", request.url());
        tx.emit_operation_started(&operation);

        let temp_root = request
            .target_dir()
            .map_or_else(|| self.options.temp_root.clone(), PathBuf::from);
        let staging =
            ArtifactStaging::create(&temp_root, &self.options.log_dir, request.url()).await?;

        let result = self.run_attempt(request, &staging, tx).await;

        // Cleanup runs whatever happened above
        staging.cleanup(tx).await;

        match &result {
            Ok(outcome) => {
                tx.emit_operation_completed(&operation, outcome.classification.is_success());
            }
            Err(error) => tx.emit_operation_failed(&operation, error.to_string()),
        }

        result
    }

    async fn run_attempt(
        &self,
        request: &InstallRequest,
        staging: &ArtifactStaging,
        tx: &EventSender,
    ) -> Result<InstallOutcome, Error> {
        download_file(&self.client, request.url(), staging.package_path(), tx).await?;

        let args = request.installer_args(staging.package_path(), staging.log_path());
        tx.emit(AppEvent::Install(InstallEvent::Started {
            package: staging.package_path().to_path_buf(),
            log_path: staging.log_path().to_path_buf(),
        }));

        let code = self.launch(&args).await?;

        let outcome = InstallOutcome::new(code, staging.log_path().to_path_buf());
        tx.emit(AppEvent::Install(InstallEvent::Completed {
            code: outcome.code,
            classification: outcome.classification,
            log_path: outcome.log_path.clone(),
        }));

        Ok(outcome)
    }

    async fn launch(&self, args: &[String]) -> Result<i32, Error> {
        match self.options.install_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.launcher.launch(args))
                .await
                .map_err(|_| {
                    Error::from(InstallError::OperationTimeout {
                        message: format!(
                            "installer did not exit within {}s",
                            timeout.as_secs()
                        ),
                    })
                })?,
            None => self.launcher.launch(args).await,
        }
    }
}
