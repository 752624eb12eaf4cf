use std::fmt;
use std::io;

use crate::broadcast::SinkError;
use crate::store::StoreError;

/// Error type for starting or running the server.
#[derive(Debug)]
pub enum ServerError {
    /// The data directory could not be opened.
    Store(StoreError),
    /// Binding or serving failed.
    Io(io::Error),
    /// A log listener could not be registered.
    Sink(SinkError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Store(e) => write!(f, "cannot open data directory: {}", e),
            ServerError::Io(e) => write!(f, "server error: {}", e),
            ServerError::Sink(e) => write!(f, "cannot register log listener: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Store(e) => Some(e),
            ServerError::Io(e) => Some(e),
            ServerError::Sink(e) => Some(e),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        ServerError::Store(err)
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        ServerError::Io(err)
    }
}

impl From<SinkError> for ServerError {
    fn from(err: SinkError) -> Self {
        ServerError::Sink(err)
    }
}
