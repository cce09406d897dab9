use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::checksum::ChecksumError;
use crate::record::RecordError;

/// Unified error type for the generator
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checksum error: {0}")]
    Checksum(#[from] ChecksumError),

    #[error("version record error: {0}")]
    Record(#[from] RecordError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
