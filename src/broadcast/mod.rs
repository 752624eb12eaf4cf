//! Request log broadcast.
//!
//! Every request produces one human-readable line (`REST: GET /api/widgets`)
//! that is handed to a [`LogSink`]. Sinks mirror those lines to whoever is
//! watching: the tracing output, an in-memory buffer, or in-process
//! listeners registered on an `EventEmitter`.

mod sink;

pub use sink::{BufferSink, LogSink, SinkError, TracingSink};

#[cfg(feature = "emitter")]
pub use sink::EmitterSink;

/// Event name under which emitter listeners receive log lines.
pub const LOG_EVENT: &str = "log";
