//! HTTP server wiring: configuration, router and the serve loop.
//!
//! Requests under the API prefix go to the [`Dispatcher`](crate::Dispatcher);
//! everything else would be static content, which this server does not
//! serve and answers with a plain 404.

mod config;
mod error;
mod http;

pub use config::{normalize_prefix, CliArgs, ServerConfig};
pub use error::ServerError;
pub use http::{router, AppState, MockServer};
