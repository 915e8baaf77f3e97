use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a publish call. Without a destination nothing can be
/// published, so these propagate to the caller.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no unused staging directory name available under {0}")]
    NoFreshName(PathBuf),
}

/// Failures scoped to one file. Reported as issues; the batch keeps going.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to enumerate files under {root}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to resolve absolute path of {path}")]
    Identity {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to expand archive {path}")]
    Expand {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("failed to hand off {path} to the host")]
    Upload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
