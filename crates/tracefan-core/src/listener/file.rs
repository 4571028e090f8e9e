//! File-backed trace listener
//!
//! Appends trace output to a file. Useful when stdout isn't visible
//! (daemons, embedded hosts) or when output must survive the process.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::traits::{ListenerError, ListenerResult, TraceListener};

#[derive(Debug)]
struct FileState {
    file: Option<File>,
    indent_level: usize,
    indent_size: usize,
    at_line_start: bool,
}

/// A listener that appends to a file
///
/// The file is opened in append mode at construction and released by
/// `close`; writes after `close` fail with `ListenerError::Closed`.
#[derive(Debug)]
pub struct FileListener {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl FileListener {
    /// Open (or create) the file at `path` for appending
    pub fn new(path: impl AsRef<Path>) -> ListenerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            state: Mutex::new(FileState {
                file: Some(file),
                indent_level: 0,
                indent_size: 4,
                at_line_start: true,
            }),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn emit(&self, message: &str, category: Option<&str>, newline: bool) -> ListenerResult<()> {
        let mut state = self.state.lock();
        let indent = state.indent_level * state.indent_size;
        let at_line_start = state.at_line_start;

        let file = state.file.as_mut().ok_or(ListenerError::Closed)?;
        if at_line_start {
            write!(file, "{}", " ".repeat(indent))?;
        }
        match category {
            Some(category) => write!(file, "{}: {}", category, message)?,
            None => write!(file, "{}", message)?,
        }
        if newline {
            writeln!(file)?;
        }
        state.at_line_start = newline;
        Ok(())
    }
}

impl TraceListener for FileListener {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        self.emit(message, category, false)
    }

    fn write_line(&self, message: &str, category: Option<&str>) -> ListenerResult<()> {
        self.emit(message, category, true)
    }

    fn flush(&self) -> ListenerResult<()> {
        let mut state = self.state.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn close(&self) -> ListenerResult<()> {
        let mut state = self.state.lock();
        if let Some(mut file) = state.file.take() {
            file.flush()?;
        }
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
