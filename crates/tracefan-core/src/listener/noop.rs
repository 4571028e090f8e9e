//! No-op listener implementation

use super::traits::{ListenerResult, TraceListener};

/// A listener that discards everything
///
/// Useful for testing or when a registered slot should stay silent.
/// Indent state is discarded along with the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl NoOpListener {
    /// Create a new no-op listener
    pub fn new() -> Self {
        Self
    }
}

impl TraceListener for NoOpListener {
    fn name(&self) -> &str {
        "noop"
    }

    fn write(&self, _message: &str, _category: Option<&str>) -> ListenerResult<()> {
        Ok(())
    }

    fn write_line(&self, _message: &str, _category: Option<&str>) -> ListenerResult<()> {
        Ok(())
    }

    fn flush(&self) -> ListenerResult<()> {
        Ok(())
    }

    fn close(&self) -> ListenerResult<()> {
        Ok(())
    }

    fn indent_level(&self) -> usize {
        0
    }

    fn set_indent_level(&self, _level: usize) {}

    fn indent_size(&self) -> usize {
        0
    }

    fn set_indent_size(&self, _size: usize) {}
}
