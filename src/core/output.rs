use std::sync::{Mutex, PoisonError};

use console::{Term, style};

/// Where user-visible notices go, independent of the log level
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str);

    fn warning(&self, line: &str) {
        self.write_line(line);
    }
}

/// Writes to stderr so notices interleave correctly with progress bars
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    term: Term,
    colored: bool,
}

impl ConsoleOutput {
    pub fn new(colored: bool) -> Self {
        Self {
            term: Term::stderr(),
            colored,
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(console::colors_enabled_stderr())
    }
}

impl OutputSink for ConsoleOutput {
    fn write_line(&self, line: &str) {
        // Nothing sensible to do if stderr is gone
        let _ = self.term.write_line(line);
    }

    fn warning(&self, line: &str) {
        if self.colored {
            self.write_line(&style(line).yellow().bold().to_string());
        } else {
            self.write_line(line);
        }
    }
}

/// Keeps every line in memory; used by tests and by callers that render later
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Mutex<Vec<String>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for BufferedOutput {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
