//! Installer process launch seam

use async_trait::async_trait;
use tokio::process::Command;
use winst_errors::{Error, InstallError};

/// Trait for launching the platform installer
///
/// The orchestrator hands the fully built argument list to this seam and
/// reads back only the raw exit status; stdout/stderr are expected to
/// land in the installer's own log file.
#[async_trait]
pub trait InstallerLauncher: Send + Sync {
    /// Run the installer to completion and return its raw exit status
    async fn launch(&self, args: &[String]) -> Result<i32, Error>;
}

/// Production launcher invoking the configured installer program
///
/// The program (default `msiexec`) and its leading arguments (default
/// `/i`) come from configuration; the per-request argument list is
/// appended untouched.
pub struct MsiExecLauncher {
    program: String,
    leading_args: Vec<String>,
}

impl MsiExecLauncher {
    /// Create a launcher for the given program and leading arguments
    #[must_use]
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Build the launcher from install configuration
    #[must_use]
    pub fn from_config(config: &winst_config::InstallConfig) -> Self {
        Self::new(config.program.clone(), config.leading_args.clone())
    }
}

#[async_trait]
impl InstallerLauncher for MsiExecLauncher {
    async fn launch(&self, args: &[String]) -> Result<i32, Error> {
        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .status()
            .await
            .map_err(|e| InstallError::LaunchFailed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        // A child killed by a signal reports no exit code
        status.code().ok_or_else(|| InstallError::Interrupted.into())
    }
}
