//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// winst - package install orchestrator for Windows server provisioning
#[derive(Parser)]
#[command(name = "winst")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download a package and drive its installation to a typed outcome")]
#[command(long_about = None)]
pub struct Cli {
    /// Package source URL (http or https)
    pub url: String,

    /// Request a silent install (/quiet)
    #[arg(long)]
    pub silent: bool,

    /// Suppress installer-initiated reboots (/norestart)
    #[arg(long = "no-restart")]
    pub no_restart: bool,

    /// Extra installer arguments, passed through verbatim
    #[arg(long = "args", value_name = "STRING", default_value = "")]
    pub extra_args: String,

    /// Directory for the downloaded artifact
    #[arg(long, value_name = "PATH")]
    pub temp_dir: Option<PathBuf>,

    /// Directory for installer log files
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
