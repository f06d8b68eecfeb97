//! Error taxonomy shared by every step of a sync run.
//!
//! Nothing here is retried: every variant aborts the run where it is raised.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Coarse classification of a [`SyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    Filesystem,
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// libcurl failed before a response was received (DNS, connect, TLS, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// A response body, version string or URL could not be understood.
    #[error("malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Transport { .. } | SyncError::Http { .. } => ErrorKind::Network,
            SyncError::Parse { .. } => ErrorKind::Parse,
            SyncError::Io { .. } => ErrorKind::Filesystem,
        }
    }

    pub(crate) fn transport(url: &str) -> impl FnOnce(curl::Error) -> SyncError + '_ {
        move |source| SyncError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn parse(what: &'static str, detail: impl ToString) -> SyncError {
        SyncError::Parse {
            what,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SyncError {
        let path = path.to_path_buf();
        move |source| SyncError::Io {
            action,
            path,
            source,
        }
    }
}
