//! Console listener implementation

use std::io::{self, Write};

use parking_lot::Mutex;

use super::traits::{ListenerResult, TraceListener};

#[derive(Debug)]
struct ConsoleState {
    indent_level: usize,
    indent_size: usize,
    at_line_start: bool,
}

/// A listener that writes to stdout
///
/// Indentation (`indent_level * indent_size` spaces) is emitted at the start
/// of each line, and categories are rendered as a `category: ` prefix.
/// `close` only flushes; stdout itself is never released.
#[derive(Debug)]
pub struct ConsoleListener {
    state: Mutex<ConsoleState>,
}

impl Default for ConsoleListener {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleListener {
    /// Create a new console listener with no indentation
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                indent_level: 0,
                indent_size: 4,
                at_line_start: true,
            }),
        }
    }

    fn emit(&self, message: &str, category: Option<&str>, newline: bool) -> ListenerResult<()> {
        let mut state = self.state.lock();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if state.at_line_start {
            let indent = state.indent_level * state.indent_size;
            write!(out, "{}", " ".repeat(indent))?;
        }
        match category {
            Some(category) => write!(out, "{}: {}", category, message)?,
            None => write!(out, "{}", message)?,
        }
        if newline {
            writeln!(out)?;
        }
        state.at_line_start = newline;
        Ok(())
    }
}

impl TraceListener for ConsoleListener {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        self.emit(message, category, false)
    }

    fn write_line(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        self.emit(message, category, true)
    }

    fn flush(&self) -> ListenerResult<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn close(&self) -> ListenerResult<()> {
        self.flush()
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
