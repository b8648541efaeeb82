//! Logging abstraction for testable output.
//!
//! The snapshot creator and rotator receive a [`Logger`] as an explicit
//! collaborator rather than writing to a process-global sink. Destinations
//! are a file or stdout, selected by configuration; tests capture output
//! with [`MockLogger`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Routine progress output.
    Info,
    /// Unrecoverable error; the run is about to terminate.
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Trait for leveled log output.
///
/// Implementations must be thread-safe; a single sink instance is shared by
/// every component of a run.
pub trait Logger: Send + Sync {
    /// Log a message at the given level.
    fn log(&self, level: Level, message: &str);

    /// Log at info level.
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Log at fatal level.
    fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

/// Render one timestamped log line.
fn stamped(level: Level, message: &str) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} {} {}", now, level, message)
}

/// Logger that writes timestamped lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLogger;

impl StdoutLogger {
    /// Create a new stdout logger.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for StdoutLogger {
    fn log(&self, level: Level, message: &str) {
        let _ = writeln!(io::stdout(), "{}", stamped(level, message));
    }
}

/// Logger that appends timestamped lines to a file.
#[derive(Debug)]
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Open `path` for appending, creating the file if it does not exist.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, level: Level, message: &str) {
        // A sink write failure must not take down the run.
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", stamped(level, message));
        }
    }
}

/// Mock logger for testing that captures all messages.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

impl MockLogger {
    /// Create a new mock logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured log entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Get all captured messages (just the text).
    pub fn messages(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.message.clone()).collect()
    }

    /// Get messages at a specific level.
    pub fn messages_at_level(&self, level: Level) -> Vec<String> {
        self.entries()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.messages().iter().any(|m| m.contains(substring))
    }

    /// Clear all captured messages.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Get count of captured messages.
    pub fn count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries.write().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl NullLogger {
    /// Create a new null logger.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {
        // Discard
    }
}
