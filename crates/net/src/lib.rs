#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for winst
//!
//! This crate handles the HTTP side of the install workflow: a thin
//! client wrapper and a streaming file download. One attempt per
//! transfer - the workflow never retries.

mod client;
mod download;

pub use client::{NetClient, NetConfig};
pub use download::{download_file, DownloadResult};

use url::Url;
use winst_errors::{Error, NetworkError};

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}
