use std::fmt;
use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    BufferPoisoned,
    EmitterPoisoned,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::BufferPoisoned => write!(f, "log sink buffer poisoned"),
            SinkError::EmitterPoisoned => write!(f, "log sink emitter poisoned"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Receives one line per handled request.
///
/// Failures are reported to the caller but never fail the request itself.
pub trait LogSink: Send + Sync {
    fn send(&self, line: &str) -> Result<(), SinkError>;
}

/// Writes lines to the tracing output at info level. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn send(&self, line: &str) -> Result<(), SinkError> {
        tracing::info!("{}", line);
        Ok(())
    }
}

/// Collects lines into a shared buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        BufferSink { buffer }
    }

    /// Snapshot of everything received so far.
    pub fn lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogSink for BufferSink {
    fn send(&self, line: &str) -> Result<(), SinkError> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| SinkError::BufferPoisoned)?;
        buffer.push(line.to_string());
        Ok(())
    }
}

/// Emits lines to in-process listeners under [`LOG_EVENT`](super::LOG_EVENT).
///
/// Listeners run on their own threads, so `send` returns without waiting
/// for them.
#[cfg(feature = "emitter")]
pub struct EmitterSink {
    emitter: Mutex<EventEmitter>,
}

#[cfg(feature = "emitter")]
impl EmitterSink {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterSink {
            emitter: Mutex::new(emitter),
        }
    }

    /// Register a listener for log lines.
    pub fn on_line<F>(&self, listener: F) -> Result<String, SinkError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| SinkError::EmitterPoisoned)?;
        Ok(emitter.on(super::LOG_EVENT, listener))
    }
}

#[cfg(feature = "emitter")]
impl LogSink for EmitterSink {
    fn send(&self, line: &str) -> Result<(), SinkError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| SinkError::EmitterPoisoned)?;
        emitter.emit(super::LOG_EVENT, line.to_string());
        Ok(())
    }
}
