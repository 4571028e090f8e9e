//! Trace listener trait definition

use std::sync::Arc;

use thiserror::Error;

/// Errors a listener can report from its underlying sink
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The underlying sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The listener was closed and can no longer accept output
    #[error("listener is closed")]
    Closed,

    /// Listener-specific error
    #[error("{0}")]
    Other(String),
}

pub type ListenerResult<T> = Result<T, ListenerError>;

/// A sink that receives forwarded trace output
///
/// Implementations:
/// - `ConsoleListener`: writes to stdout
/// - `FileListener`: appends to a file
/// - `MemoryListener`: captures lines in memory (testing, ephemeral capture)
/// - `NoOpListener`: discards everything
///
/// Listeners are shared as `Arc<dyn TraceListener>` and dispatched to from
/// any thread, so implementations take `&self` and use interior mutability.
pub trait TraceListener: Send + Sync {
    /// Stable identifier for this listener, used by `Tracer::remove_listener`
    fn name(&self) -> &str;

    /// Write a message without a trailing newline
    fn write(&self, message: &str, category: Option<&str>) -> ListenerResult<()>;

    /// Write a message followed by a newline
    fn write_line(&self, message: &str, category: Option<&str>) -> ListenerResult<()>;

    /// Flush buffered output to the underlying sink
    fn flush(&self) -> ListenerResult<()>;

    /// Flush and release the underlying sink
    ///
    /// Writes after `close` may fail with `ListenerError::Closed`.
    fn close(&self) -> ListenerResult<()>;

    /// Current indent level
    fn indent_level(&self) -> usize;

    /// Set the indent level
    fn set_indent_level(&self, level: usize);

    /// Number of spaces per indent level
    fn indent_size(&self) -> usize;

    /// Set the number of spaces per indent level
    fn set_indent_size(&self, size: usize);
}

/// Type alias for a shared listener
pub type SharedListener = Arc<dyn TraceListener>;
