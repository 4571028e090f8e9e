//! Trace listener abstractions and built-in sinks

mod traits;
mod noop;
mod console;
mod memory;
mod file;

pub use traits::{TraceListener, SharedListener, ListenerError, ListenerResult};
pub use noop::NoOpListener;
pub use console::ConsoleListener;
pub use memory::MemoryListener;
pub use file::FileListener;
