use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure that aborts a run. Each variant names the path it concerns.
#[derive(Error, Debug)]
pub enum CopierError {
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Interactive prompt I/O failed")]
    Prompt(#[source] io::Error),

    #[error("Failed to compress output for {path}")]
    Compression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopierError {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type CopierResult<T> = Result<T, CopierError>;
