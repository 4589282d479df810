//! Output destinations for `puts`, `eputs` and template text.
//!
//! A run writes to two handlers, one per stream:
//! - `Stream`: straight to the process stdout or stderr (CLI)
//! - `Buffer`: captured for the caller to inspect (embedding, tests, `dance`)
//!
//! Enum dispatch keeps the hot path free of vtables.

use std::io::Write;

use parking_lot::Mutex;

/// Which process stream a [`StreamPrintHandler`] writes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes straight to a process stream.
pub struct StreamPrintHandler {
    stream: Stream,
}

impl StreamPrintHandler {
    pub fn new(stream: Stream) -> Self {
        StreamPrintHandler { stream }
    }

    pub fn print(&self, msg: &str) {
        // A closed pipe is not an evaluation error.
        let _ = match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(msg.as_bytes()),
            Stream::Stderr => std::io::stderr().lock().write_all(msg.as_bytes()),
        };
    }
}

/// Captures output in memory.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub enum PrintHandlerImpl {
    Stream(StreamPrintHandler),
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stream(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
        }
    }

    /// Captured output. Empty for stream handlers.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stream(_) => String::new(),
            Self::Buffer(h) => h.get_output(),
        }
    }

    /// Clear captured output. No-op for stream handlers.
    pub fn clear(&self) {
        match self {
            Self::Stream(_) => {}
            Self::Buffer(h) => h.clear(),
        }
    }
}

/// Shared print handler, handed to every interpreter of a run including
/// the ones created for imports.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stream_handler(stream: Stream) -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stream(StreamPrintHandler::new(stream)))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}
