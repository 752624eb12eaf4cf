//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::dispatcher::StatusPolicy;
use crate::store::Format;

/// Default path prefix under which the API is served.
pub const DEFAULT_PREFIX: &str = "/api/";

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "mockrest")]
#[command(about = "Mock RESTful JSON API backed by one data file per collection")]
pub struct CliArgs {
    /// Directory holding one data file per collection
    #[arg(short, long, default_value = ".", env = "MOCKREST_DATA")]
    pub data: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "MOCKREST_PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "MOCKREST_BIND")]
    pub bind: IpAddr,

    /// Path prefix of the API
    #[arg(long, default_value = DEFAULT_PREFIX, env = "MOCKREST_PREFIX")]
    pub prefix: String,

    /// On-disk format of the collection files (yaml or json)
    #[arg(short, long, default_value = "yaml", env = "MOCKREST_FORMAT")]
    pub format: Format,

    /// Answer client errors with 404 instead of 400
    #[arg(long, env = "MOCKREST_LEGACY_STATUS")]
    pub legacy_status: bool,

    /// Broadcast each request line to stdout through the event emitter
    #[arg(long, env = "MOCKREST_BROADCAST")]
    pub broadcast: bool,
}

/// Everything needed to start a [`MockServer`](super::MockServer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Always starts and ends with `/`.
    pub prefix: String,
    pub format: Format,
    pub status_policy: StatusPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            data_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            format: Format::default(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            bind: args.bind,
            port: args.port,
            data_dir: args.data.clone(),
            prefix: normalize_prefix(&args.prefix),
            format: args.format,
            status_policy: if args.legacy_status {
                StatusPolicy::Legacy
            } else {
                StatusPolicy::Strict
            },
        }
    }
}

/// Make sure the prefix starts and ends with a slash: `api` -> `/api/`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
