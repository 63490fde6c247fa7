//! Install request description

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use winst_errors::{Error, InstallError};

/// Immutable description of one install attempt
///
/// The request carries the package source URL, the silent/reboot toggles,
/// and a free-form string of extra installer arguments. The destination
/// path is never part of the request; it is always derived inside a
/// writable temp directory by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallRequest {
    url: String,
    silent: bool,
    suppress_reboot: bool,
    extra_args: String,
    target_dir: Option<PathBuf>,
}

impl InstallRequest {
    /// Create a request for the given package URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(InstallError::EmptyUrl.into());
        }
        Ok(Self {
            url,
            silent: false,
            suppress_reboot: false,
            extra_args: String::new(),
            target_dir: None,
        })
    }

    /// Request a silent install (`/quiet`)
    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Request reboot suppression (`/norestart`)
    #[must_use]
    pub fn with_suppress_reboot(mut self, suppress: bool) -> Self {
        self.suppress_reboot = suppress;
        self
    }

    /// Attach extra installer arguments, passed through verbatim
    #[must_use]
    pub fn with_extra_args(mut self, args: impl Into<String>) -> Self {
        self.extra_args = args.into();
        self
    }

    /// Override the temp directory the artifact is staged under
    ///
    /// When absent, the orchestrator derives the target inside its
    /// configured temp root.
    #[must_use]
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    /// Package source URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Temp directory override, if any
    #[must_use]
    pub fn target_dir(&self) -> Option<&Path> {
        self.target_dir.as_deref()
    }

    /// Whether a silent install was requested
    #[must_use]
    pub fn silent(&self) -> bool {
        self.silent
    }

    /// Whether reboot suppression was requested
    #[must_use]
    pub fn suppress_reboot(&self) -> bool {
        self.suppress_reboot
    }

    /// Extra installer arguments as given by the caller
    #[must_use]
    pub fn extra_args(&self) -> &str {
        &self.extra_args
    }

    /// Build the installer argument list for this request
    ///
    /// The order is fixed: package path, `/quiet` if silent, `/norestart`
    /// if reboot suppression was requested, the caller's extra arguments
    /// verbatim, then `/log` with the generated log path.
    #[must_use]
    pub fn installer_args(&self, package: &Path, log_path: &Path) -> Vec<String> {
        let mut args = vec![package.display().to_string()];
        if self.silent {
            args.push("/quiet".to_string());
        }
        if self.suppress_reboot {
            args.push("/norestart".to_string());
        }
        args.extend(self.extra_args.split_whitespace().map(str::to_string));
        args.push("/log".to_string());
        args.push(log_path.display().to_string());
        args
    }
}
