//! mockrest: a RESTful JSON API without a database.
//!
//! Each resource collection is one data file in a directory. Requests under
//! the API prefix are resolved into a [`ResourceAddress`], dispatched to a
//! list/get, create, replace or delete against the [`CollectionStore`], and
//! answered with the status codes a real backend would use.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mockrest::{CollectionStore, Dispatcher, Format, TracingSink};
//!
//! let store = Arc::new(CollectionStore::open("fixtures", Format::Yaml)?);
//! let dispatcher = Arc::new(Dispatcher::new(store, "/api/"));
//! let app = mockrest::server::router(dispatcher, Arc::new(TracingSink));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod address;
pub mod broadcast;
pub mod dispatcher;
pub mod record;
pub mod server;
pub mod store;

pub use address::{resolve, AddressError, CollectionKey, Filter, ParentScope, ResourceAddress};
pub use broadcast::{BufferSink, LogSink, SinkError, TracingSink};
pub use dispatcher::{ApiError, ApiResponse, Dispatcher, ResponseBody, StatusPolicy};
pub use record::{next_id, Record};
pub use server::{CliArgs, MockServer, ServerConfig, ServerError};
pub use store::{Codec, CodecError, CollectionStore, Format, JsonCodec, StoreError, YamlCodec};

#[cfg(feature = "emitter")]
pub use broadcast::EmitterSink;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
