//! Install workflow error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum InstallError {
    #[error("installer launch failed: {program}: {message}")]
    LaunchFailed { program: String, message: String },

    #[error("package URL is empty")]
    EmptyUrl,

    #[error("temporary file error: {message}")]
    TempFileError { message: String },

    #[error("operation timeout: {message}")]
    OperationTimeout { message: String },

    #[error("installer terminated without an exit code")]
    Interrupted,
}
