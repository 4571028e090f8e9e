//! In-memory capturing listener

use parking_lot::Mutex;

use super::traits::{ListenerError, ListenerResult, TraceListener};

#[derive(Debug, Default)]
struct MemoryState {
    entries: Vec<String>,
    partial: String,
    flush_count: usize,
    closed: bool,
    indent_level: usize,
    indent_size: usize,
}

/// A listener that captures completed lines in memory
///
/// Lines are recorded in dispatch order, so the capture reflects exactly
/// what was forwarded and when. Partial output from `write` accumulates
/// until the next `write_line` completes the entry.
///
/// # Example
///
/// ```
/// use tracefan_core::listener::{MemoryListener, TraceListener};
///
/// let listener = MemoryListener::new();
/// listener.write("hello, ", None).unwrap();
/// listener.write_line("world", None).unwrap();
/// assert_eq!(listener.entries(), vec!["hello, world".to_string()]);
/// ```
#[derive(Debug)]
pub struct MemoryListener {
    name: String,
    state: Mutex<MemoryState>,
}

impl Default for MemoryListener {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryListener {
    /// Create a new empty memory listener
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    /// Create a memory listener with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// All completed lines, in the order they were received
    pub fn entries(&self) -> Vec<String> {
        self.state.lock().entries.clone()
    }

    /// Number of `flush` calls received
    pub fn flush_count(&self) -> usize {
        self.state.lock().flush_count
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Discard all captured lines and any partial output
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.partial.clear();
    }

    fn format(message: &str, category: Option<&str>) -> String {
        match category {
            Some(category) => format!("{}: {}", category, message),
            None => message.to_string(),
        }
    }
}

impl TraceListener for MemoryListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ListenerError::Closed);
        }
        let formatted = Self::format(message, category);
        state.partial.push_str(&formatted);
        Ok(())
    }

    fn write_line(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ListenerError::Closed);
        }
        let formatted = Self::format(message, category);
        let entry = if state.partial.is_empty() {
            formatted
        } else {
            let mut entry = std::mem::take(&mut state.partial);
            entry.push_str(&formatted);
            entry
        };
        state.entries.push(entry);
        Ok(())
    }

    fn flush(&self) -> ListenerResult<()> {
        self.state.lock().flush_count += 1;
        Ok(())
    }

    fn close(&self) -> ListenerResult<()> {
        self.state.lock().closed = true;
        Ok(())
    }

    fn indent_level(&self) -> usize {
        self.state.lock().indent_level
    }

    fn set_indent_level(&self, level: usize) {
        self.state.lock().indent_level = level;
    }

    fn indent_size(&self) -> usize {
        self.state.lock().indent_size
    }

    fn set_indent_size(&self, size: usize) {
        self.state.lock().indent_size = size;
    }
}
