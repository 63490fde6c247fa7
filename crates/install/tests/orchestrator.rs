//! End-to-end orchestrator tests against a scripted installer launcher

use async_trait::async_trait;
use httpmock::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use winst_errors::{Error, InstallError, NetworkError};
use winst_events::{channel, AppEvent, EventReceiver, InstallEvent};
use winst_install::{Installer, InstallerLauncher, InstallerOptions};
use winst_net::NetClient;
use winst_types::{ExitClass, InstallRequest};

/// Launcher double that records every argument list and returns a scripted code
struct ScriptedLauncher {
    code: i32,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

type CallLog = Arc<Mutex<Vec<Vec<String>>>>;

impl ScriptedLauncher {
    fn new(code: i32) -> (Self, CallLog) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                code,
                delay: None,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn hanging(delay: Duration) -> Self {
        Self {
            code: 0,
            delay: Some(delay),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl InstallerLauncher for ScriptedLauncher {
    async fn launch(&self, args: &[String]) -> Result<i32, Error> {
        self.calls.lock().unwrap().push(args.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.code)
    }
}

fn options(temp: &Path) -> InstallerOptions {
    InstallerOptions {
        temp_root: temp.to_path_buf(),
        log_dir: temp.join("logs"),
        install_timeout: None,
    }
}

fn installer(temp: &Path, launcher: ScriptedLauncher) -> Installer {
    Installer::new(
        NetClient::with_defaults().unwrap(),
        Box::new(launcher),
        options(temp),
    )
}

/// Staging directories left under the temp root after an attempt
fn staging_dirs(temp: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(temp)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with("winst-"))
        })
        .collect()
}

fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn mock_package(server: &MockServer) -> String {
    server.mock(|when, then| {
        when.method(GET).path("/test.msi");
        then.status(200).body(b"not really an msi");
    });
    server.url("/test.msi")
}

#[tokio::test]
async fn classification_matches_table() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();

    let table = [
        (0, ExitClass::Success),
        (1641, ExitClass::SuccessRebootInitiated),
        (3010, ExitClass::SuccessRebootRequired),
        (1602, ExitClass::UserCanceled),
        (1603, ExitClass::FatalError),
        (1619, ExitClass::InvalidPackage),
        (1639, ExitClass::InvalidArguments),
    ];

    for (code, expected) in table {
        let (tx, _rx) = channel();
        let (launcher, _calls) = ScriptedLauncher::new(code);
        let request = InstallRequest::new(&url).unwrap();

        let outcome = installer(temp.path(), launcher)
            .install(&request, &tx)
            .await
            .unwrap();

        assert_eq!(outcome.code, code);
        assert_eq!(outcome.classification, expected, "code {code}");
    }
}

#[tokio::test]
async fn unrecognized_code_maps_to_unknown_without_aborting() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, _rx) = channel();
    let (launcher, _calls) = ScriptedLauncher::new(42);

    let request = InstallRequest::new(&url).unwrap();
    let outcome = installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    assert_eq!(outcome.code, 42);
    assert_eq!(outcome.classification, ExitClass::Unknown);
}

#[tokio::test]
async fn artifact_removed_after_success() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, mut rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(0);

    let request = InstallRequest::new(&url).unwrap();
    installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    let package_path = PathBuf::from(&calls.lock().unwrap()[0][0]);
    assert!(!package_path.exists());
    assert!(staging_dirs(temp.path()).is_empty());

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Install(InstallEvent::CleanupCompleted { .. }))));
}

#[tokio::test]
async fn artifact_removed_after_installer_failure() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, _rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(1603);

    let request = InstallRequest::new(&url).unwrap();
    let outcome = installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    assert_eq!(outcome.classification, ExitClass::FatalError);
    let package_path = PathBuf::from(&calls.lock().unwrap()[0][0]);
    assert!(!package_path.exists());
    assert!(staging_dirs(temp.path()).is_empty());
}

#[tokio::test]
async fn download_failure_never_invokes_installer() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone.msi");
        then.status(404);
    });
    let temp = tempfile::tempdir().unwrap();
    let (tx, _rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(0);

    let request = InstallRequest::new(server.url("/gone.msi")).unwrap();
    let error = installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        Error::Network(NetworkError::HttpError { status: 404, .. })
    ));
    assert!(calls.lock().unwrap().is_empty());
    assert!(staging_dirs(temp.path()).is_empty());
}

#[tokio::test]
async fn argument_list_is_built_in_fixed_order() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, _rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(0);

    let request = InstallRequest::new(&url)
        .unwrap()
        .with_silent(true)
        .with_suppress_reboot(true)
        .with_extra_args("X=1");

    installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let args = &calls[0];

    assert_eq!(args.len(), 6);
    assert!(args[0].ends_with("test.msi"), "package path: {}", args[0]);
    assert_eq!(args[1], "/quiet");
    assert_eq!(args[2], "/norestart");
    assert_eq!(args[3], "X=1");
    assert_eq!(args[4], "/log");
    assert!(args[5].ends_with(".log"), "log path: {}", args[5]);
}

#[tokio::test]
async fn repeated_requests_use_independent_artifacts() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let request = InstallRequest::new(&url).unwrap();

    let mut package_paths = Vec::new();
    for _ in 0..2 {
        let (tx, _rx) = channel();
        let (launcher, calls) = ScriptedLauncher::new(0);
        let outcome = installer(temp.path(), launcher)
            .install(&request, &tx)
            .await
            .unwrap();
        assert_eq!(outcome.classification, ExitClass::Success);
        package_paths.push(calls.lock().unwrap()[0][0].clone());
    }

    assert_ne!(package_paths[0], package_paths[1]);
}

#[tokio::test]
async fn end_to_end_success_scenario() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, mut rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(0);

    let request = InstallRequest::new(&url).unwrap().with_silent(true);
    let outcome = installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    assert_eq!(outcome.classification, ExitClass::Success);
    assert_eq!(outcome.code, 0);
    assert!(!outcome.log_path.as_os_str().is_empty());

    let package_path = PathBuf::from(&calls.lock().unwrap()[0][0]);
    assert!(!package_path.exists());

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Install(InstallEvent::Started { .. }))));
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::Install(InstallEvent::Completed {
            code: 0,
            classification: ExitClass::Success,
            ..
        })
    )));
}

#[tokio::test]
async fn install_timeout_bounds_the_wait_when_configured() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let (tx, _rx) = channel();

    let installer = Installer::new(
        NetClient::with_defaults().unwrap(),
        Box::new(ScriptedLauncher::hanging(Duration::from_secs(30))),
        InstallerOptions {
            install_timeout: Some(Duration::from_millis(50)),
            ..options(temp.path())
        },
    );

    let request = InstallRequest::new(&url).unwrap();
    let error = installer.install(&request, &tx).await.unwrap_err();

    assert!(matches!(
        error,
        Error::Install(InstallError::OperationTimeout { .. })
    ));
    // The artifact is removed even when the wait is abandoned
    assert!(staging_dirs(temp.path()).is_empty());
}

#[tokio::test]
async fn target_dir_override_stages_under_it() {
    let server = MockServer::start();
    let url = mock_package(&server);
    let temp = tempfile::tempdir().unwrap();
    let override_dir = temp.path().join("override");
    let (tx, _rx) = channel();
    let (launcher, calls) = ScriptedLauncher::new(0);

    let request = InstallRequest::new(&url)
        .unwrap()
        .with_target_dir(&override_dir);
    installer(temp.path(), launcher)
        .install(&request, &tx)
        .await
        .unwrap();

    let package_path = PathBuf::from(&calls.lock().unwrap()[0][0]);
    assert!(package_path.starts_with(&override_dir));
    assert!(staging_dirs(&override_dir).is_empty());
}
