//! File-backed collection storage.
//!
//! Each collection lives in one data file named after its key. Every
//! operation against a key goes through that key's queue, so a
//! read-modify-write never interleaves with another operation on the same
//! file. Different keys never contend.

mod codec;
mod collection_store;
mod error;
mod queue;

pub use codec::{Codec, CodecError, Format, JsonCodec, YamlCodec};
pub use collection_store::CollectionStore;
pub use error::StoreError;
pub use queue::{KeyQueue, QueueGuard};
