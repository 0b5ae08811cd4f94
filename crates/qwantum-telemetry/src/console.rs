//! Line-buffered writer that forwards formatted events to the browser console.
//!
//! # Design
//! - `tracing-subscriber` writes each event through a fresh writer; the
//!   writer buffers bytes and emits one console call when dropped.
//! - Severity picks the console method so devtools filtering keeps working.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Console method an event is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleMethod {
    /// `console.error`
    Error,
    /// `console.warn`
    Warn,
    /// `console.log`
    Log,
}

impl ConsoleMethod {
    /// Method for a tracing level.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else {
            Self::Log
        }
    }
}

/// Writer produced by [`MakeConsoleWriter`].
#[derive(Debug)]
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(method: ConsoleMethod) -> Self {
        Self {
            method,
            buffer: Vec::new(),
        }
    }

    /// Buffered text without the trailing newline, or `None` when empty.
    #[must_use]
    pub fn pending_line(&self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        (!line.is_empty()).then(|| line.to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.pending_line() {
            emit(self.method, line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(method: ConsoleMethod, line: String) {
    use gloo::console;

    match method {
        ConsoleMethod::Error => console::error!(line),
        ConsoleMethod::Warn => console::warn!(line),
        ConsoleMethod::Log => console::log!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(method: ConsoleMethod, line: String) {
    use std::io::Write as _;

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "[{method:?}] {line}");
}

/// [`MakeWriter`] routing events to the console by severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::for_level(*meta.level()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleMethod::for_level(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(Level::INFO), ConsoleMethod::Log);
        assert_eq!(ConsoleMethod::for_level(Level::TRACE), ConsoleMethod::Log);
    }

    #[test]
    fn writer_buffers_a_single_line() -> io::Result<()> {
        let mut writer = MakeConsoleWriter.make_writer();
        assert!(writer.pending_line().is_none());
        write!(writer, "modal opened")?;
        writer.write_all(b" id=signup\n")?;
        writer.flush()?;
        assert_eq!(writer.pending_line().as_deref(), Some("modal opened id=signup"));
        Ok(())
    }
}
