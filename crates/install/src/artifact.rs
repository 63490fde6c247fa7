//! Artifact staging and cleanup

use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use winst_errors::{Error, InstallError};
use winst_events::{AppEvent, EventEmitter, EventSender, InstallEvent};

/// Transient on-disk home of one install attempt
///
/// Owns a freshly created, uniquely named directory under the temp root
/// that holds the downloaded package. The installer log lives outside
/// this directory so it survives cleanup.
#[derive(Debug)]
pub struct ArtifactStaging {
    dir: PathBuf,
    package_path: PathBuf,
    log_path: PathBuf,
}

impl ArtifactStaging {
    /// Create the staging directory for one attempt
    ///
    /// # Errors
    ///
    /// Returns an error if the staging or log directory cannot be created.
    pub async fn create(temp_root: &Path, log_dir: &Path, url: &str) -> Result<Self, Error> {
        let attempt_id = Uuid::new_v4();
        let dir = temp_root.join(format!("winst-{attempt_id}"));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| InstallError::TempFileError {
                message: format!("create {}: {e}", dir.display()),
            })?;
        tokio::fs::create_dir_all(log_dir)
            .await
            .map_err(|e| InstallError::TempFileError {
                message: format!("create {}: {e}", log_dir.display()),
            })?;

        let package_path = dir.join(artifact_file_name(url));
        let log_path = log_dir.join(format!("winst-{attempt_id}.log"));

        Ok(Self {
            dir,
            package_path,
            log_path,
        })
    }

    /// Destination path for the downloaded package
    #[must_use]
    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Path handed to the installer for its own structured log
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Remove the staging directory and everything in it
    ///
    /// Removal failure is reported as a warning event and swallowed; it
    /// never changes the outcome of the attempt.
    pub async fn cleanup(&self, tx: &EventSender) {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => tx.emit(AppEvent::Install(InstallEvent::CleanupCompleted {
                path: self.dir.clone(),
            })),
            Err(error) => tx.emit(AppEvent::Install(InstallEvent::CleanupFailed {
                path: self.dir.clone(),
                error: error.to_string(),
            })),
        }
    }
}

/// Derive the artifact file name from the URL path
///
/// The final path segment is used when it carries a file extension;
/// otherwise a timestamped name is synthesized so the local artifact
/// cannot silently collide with another in-flight download.
fn artifact_file_name(url: &str) -> String {
    let segment = url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();

    if Path::new(&segment).extension().is_some() {
        segment
    } else {
        format!("package-{}.msi", Utc::now().format("%Y%m%d%H%M%S%3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_from_url_path() {
        assert_eq!(artifact_file_name("http://x/test.msi"), "test.msi");
        assert_eq!(
            artifact_file_name("https://host/dir/agent-1.2.exe?token=abc"),
            "agent-1.2.exe"
        );
    }

    #[test]
    fn extensionless_path_synthesizes_timestamped_name() {
        for url in ["http://x/download", "http://x/", "http://x.example.com"] {
            let name = artifact_file_name(url);
            assert!(name.starts_with("package-"), "{url} -> {name}");
            assert!(name.ends_with(".msi"), "{url} -> {name}");
        }
    }

    #[tokio::test]
    async fn staging_paths_are_unique_per_attempt() {
        let temp = tempfile::tempdir().unwrap();
        let logs = temp.path().join("logs");
        let url = "http://x/test.msi";

        let first = ArtifactStaging::create(temp.path(), &logs, url).await.unwrap();
        let second = ArtifactStaging::create(temp.path(), &logs, url).await.unwrap();

        assert_ne!(first.package_path(), second.package_path());
        assert_ne!(first.log_path(), second.log_path());
    }

    #[tokio::test]
    async fn cleanup_removes_directory() {
        let temp = tempfile::tempdir().unwrap();
        let logs = temp.path().join("logs");
        let staging = ArtifactStaging::create(temp.path(), &logs, "http://x/test.msi")
            .await
            .unwrap();

        tokio::fs::write(staging.package_path(), b"payload").await.unwrap();
        assert!(staging.package_path().exists());

        let (tx, mut rx) = winst_events::channel();
        staging.cleanup(&tx).await;

        assert!(!staging.package_path().exists());
        match rx.try_recv().unwrap() {
            AppEvent::Install(InstallEvent::CleanupCompleted { .. }) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
