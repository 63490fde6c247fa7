//! winst - package install orchestrator for Windows server provisioning
//!
//! This is the CLI application that drives one install attempt end-to-end
//! through the install crate and renders its event stream.

mod cli;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::process;
use tokio::select;
use tracing::{error, info};
use winst_config::Config;
use winst_events::{EventReceiver, EventSender};
use winst_install::{Installer, InstallerOptions, MsiExecLauncher};
use winst_net::{NetClient, NetConfig};
use winst_types::{InstallOutcome, InstallRequest};

/// Exit status reported when the workflow fails before the installer runs
const EXIT_WORKFLOW_FAILED: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("Workflow error: {}", e);
        eprintln!("Error: {e}");
    }
    process::exit(exit_code(&result));
}

/// Process exit status for a finished workflow
///
/// A completed installer reports its raw exit code, recognized or not;
/// any failure before the installer ran reports the fixed sentinel so
/// callers can tell "installer failed" from "installer never ran".
fn exit_code(result: &Result<InstallOutcome, CliError>) -> i32 {
    match result {
        Ok(outcome) => outcome.code,
        Err(_) => EXIT_WORKFLOW_FAILED,
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<InstallOutcome, CliError> {
    info!("Starting winst v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    let request = build_request(&cli)?;

    let client = NetClient::new(NetConfig::from(&config.network))?;
    let launcher = MsiExecLauncher::from_config(&config.install);
    let installer = Installer::new(client, Box::new(launcher), InstallerOptions::from(&config));

    let (event_sender, event_receiver) = winst_events::channel();
    let handler = EventHandler::new(cli.debug);

    let outcome =
        install_with_events(&installer, &request, &event_sender, event_receiver, &handler).await?;

    info!("Install finished with status {}", outcome.code);
    Ok(outcome)
}

/// Execute the install with concurrent event handling
async fn install_with_events(
    installer: &Installer,
    request: &InstallRequest,
    tx: &EventSender,
    mut rx: EventReceiver,
    handler: &EventHandler,
) -> Result<InstallOutcome, CliError> {
    let mut install_future = Box::pin(installer.install(request, tx));

    loop {
        select! {
            // Install completed
            result = &mut install_future => {
                // Drain any remaining events
                while let Ok(event) = rx.try_recv() {
                    handler.handle_event(&event);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = rx.recv() => {
                if let Some(event) = event {
                    handler.handle_event(&event);
                }
            }
        }
    }
}

/// Apply CLI flags on top of file and environment configuration
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.temp_dir {
        config.install.temp_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.log_dir {
        config.install.log_dir = Some(dir.clone());
    }
}

fn build_request(cli: &Cli) -> Result<InstallRequest, CliError> {
    let request = InstallRequest::new(&cli.url)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?
        .with_silent(cli.silent)
        .with_suppress_reboot(cli.no_restart)
        .with_extra_args(&cli.extra_args);
    Ok(request)
}

fn init_tracing(debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    let filter = if debug_enabled {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"))
    } else {
        // The event handler owns the console; keep tracing quiet by default
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
