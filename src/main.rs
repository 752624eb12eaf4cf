//! mockrest binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mockrest::{CliArgs, MockServer, ServerConfig, ServerError};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = ServerConfig::from(&args);

    tracing::info!("Starting with config: {:?}", config);

    let server = match MockServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let server = if args.broadcast {
        match broadcast_to_stdout(server) {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        server
    };

    if let Err(e) = server.run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "emitter")]
fn broadcast_to_stdout(server: MockServer) -> Result<MockServer, ServerError> {
    server.with_listener(|line| println!("{}", line))
}

#[cfg(not(feature = "emitter"))]
fn broadcast_to_stdout(server: MockServer) -> Result<MockServer, ServerError> {
    tracing::warn!("--broadcast needs the `emitter` feature; request lines stay in the log");
    Ok(server)
}
