use std::fmt;

/// Error type for resolving a request path into a resource address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The path does not match the REST grammar.
    InvalidPath(String),
}

impl AddressError {
    pub(crate) fn invalid(path: impl Into<String>) -> Self {
        AddressError::InvalidPath(path.into())
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidPath(_) => write!(f, "invalid REST path"),
        }
    }
}

impl std::error::Error for AddressError {}
