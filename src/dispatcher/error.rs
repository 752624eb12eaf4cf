use std::error::Error;
use std::fmt;

use axum::http::StatusCode;

use super::StatusPolicy;
use crate::address::AddressError;
use crate::store::StoreError;

/// Error type for request dispatch. Each variant ends the request with
/// exactly one plain-text response.
#[derive(Debug)]
pub enum ApiError {
    /// The path does not address a resource.
    Path(AddressError),
    /// A singular address matched no record.
    NotFound(String),
    /// Wrong body shape, or a method that does not fit the address.
    Validation(String),
    /// The request body is not JSON.
    Decode(String),
    /// The collection cannot take the write, e.g. its ids are used up.
    Conflict(String),
    /// The collection file could not be read or written.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Path(e) => write!(f, "{}", e),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::Decode(msg) => write!(f, "invalid JSON body: {}", msg),
            ApiError::Conflict(msg) => write!(f, "{}", msg),
            ApiError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Path(e) => Some(e),
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AddressError> for ApiError {
    fn from(err: AddressError) -> Self {
        ApiError::Path(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl ApiError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    /// Map this error to an HTTP status under the given policy.
    ///
    /// Client errors are 400 and conflicts 409 under [`StatusPolicy::Strict`].
    /// Under [`StatusPolicy::Legacy`], and for lookup or store errors, the
    /// answer is always 404.
    pub fn status_code(&self, policy: StatusPolicy) -> StatusCode {
        match self {
            ApiError::Path(_) | ApiError::NotFound(_) | ApiError::Store(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Validation(_) | ApiError::Decode(_) => match policy {
                StatusPolicy::Strict => StatusCode::BAD_REQUEST,
                StatusPolicy::Legacy => StatusCode::NOT_FOUND,
            },
            ApiError::Conflict(_) => match policy {
                StatusPolicy::Strict => StatusCode::CONFLICT,
                StatusPolicy::Legacy => StatusCode::NOT_FOUND,
            },
        }
    }
}
