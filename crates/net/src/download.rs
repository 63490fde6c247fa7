//! Streaming file download

use crate::{parse_url, NetClient};
use futures::StreamExt;
use std::path::Path;
use winst_errors::{Error, NetworkError};
use winst_events::{AppEvent, DownloadEvent, EventEmitter, EventSender};

/// Result of a completed download
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Bytes written to the destination
    pub size: u64,
}

/// Download a file to a destination path
///
/// Streams the response body to `dest` and verifies that a file exists
/// there afterward. The transfer content itself is not validated.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the server responds with a
/// non-success status, the transfer does not complete, or no file is
/// present at `dest` after the transfer.
pub async fn download_file(
    client: &NetClient,
    url: &str,
    dest: &Path,
    tx: &EventSender,
) -> Result<DownloadResult, Error> {
    parse_url(url)?;

    match execute(client, url, dest, tx).await {
        Ok(result) => {
            tx.emit(AppEvent::Download(DownloadEvent::Completed {
                url: url.to_string(),
                final_size: result.size,
            }));
            Ok(result)
        }
        Err(error) => {
            tx.emit(AppEvent::Download(DownloadEvent::Failed {
                url: url.to_string(),
                error: error.to_string(),
            }));
            Err(error)
        }
    }
}

async fn execute(
    client: &NetClient,
    url: &str,
    dest: &Path,
    tx: &EventSender,
) -> Result<DownloadResult, Error> {
    let response = client.get(url).await?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            message: response.status().to_string(),
        }
        .into());
    }

    tx.emit(AppEvent::Download(DownloadEvent::Started {
        url: url.to_string(),
        total_size: response.content_length(),
    }));

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| Error::io_with_path(&e, dest))?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;
        tokio::io::AsyncWriteExt::write_all(&mut file, &chunk)
            .await
            .map_err(|e| Error::io_with_path(&e, dest))?;
        downloaded += chunk.len() as u64;
    }

    tokio::io::AsyncWriteExt::flush(&mut file)
        .await
        .map_err(|e| Error::io_with_path(&e, dest))?;
    drop(file);

    // A transfer that "succeeded" must leave a file behind
    if !dest.exists() {
        return Err(NetworkError::ArtifactMissing {
            path: dest.display().to_string(),
        }
        .into());
    }

    Ok(DownloadResult { size: downloaded })
}
