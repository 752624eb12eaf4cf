use std::fmt;
use std::io;
use std::path::PathBuf;

use super::CodecError;

/// Error type for collection store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The collection has no data file.
    NotFound { path: PathBuf },
    /// Reading or writing the data file failed.
    Io { path: PathBuf, source: io::Error },
    /// The data file's contents could not be decoded, or the new contents
    /// could not be encoded.
    Codec { path: PathBuf, source: CodecError },
    /// The queue map was poisoned by a panicking holder.
    QueuePoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { .. } => write!(f, "No such entity"),
            StoreError::Io { path, source } => {
                write!(f, "i/o error on {}: {}", path.display(), source)
            }
            StoreError::Codec { path, source } => {
                write!(f, "codec error on {}: {}", path.display(), source)
            }
            StoreError::QueuePoisoned(operation) => {
                write!(f, "collection queue poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NotFound { .. } | StoreError::QueuePoisoned(_) => None,
            StoreError::Io { source, .. } => Some(source),
            StoreError::Codec { source, .. } => Some(source),
        }
    }
}
