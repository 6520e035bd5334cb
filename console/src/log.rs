//! Log sink and command history.
//!
//! The sink is the console's only output channel: an ordered, append-only
//! list of timestamped entries. Handles are cheap clones sharing the same
//! list, so background tasks can append after the submitting call returned.
//! Appends are atomic; nothing ever rewrites or reorders existing entries.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Originator tag of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// The command dispatcher and its handlers.
    Command,
    /// The hub itself (startup banners, channel state).
    Hub,
    /// Asynchronous timer results.
    Timer,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Hub => write!(f, "hub"),
            Self::Timer => write!(f, "timer"),
        }
    }
}

/// Severity tag of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    /// Regular command output.
    Command,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Command => write!(f, "command"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One console entry.
///
/// `markup` distinguishes the two write modes: plain text, or text carrying
/// the console's inline markup (`<br />` line breaks and the `&lt;`/`&gt;`/
/// `&nbsp;` entity escapes) that a downstream renderer interprets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleLine {
    /// Submission time; set at append unless the writer supplies one.
    pub timestamp: DateTime<Utc>,
    pub origin: Origin,
    pub severity: Severity,
    pub message: String,
    pub markup: bool,
}

/// Append-only destination for console entries.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    lines: Arc<Mutex<Vec<ConsoleLine>>>,
}

impl LogSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain-text entry, timestamped now.
    pub fn print(&self, origin: Origin, severity: Severity, message: impl Into<String>) {
        self.append(origin, severity, message.into(), false);
    }

    /// Appends a markup entry, timestamped now.
    pub fn print_markup(&self, origin: Origin, severity: Severity, message: impl Into<String>) {
        self.append(origin, severity, message.into(), true);
    }

    /// Appends a fully built entry, e.g. one carrying its original
    /// submission timestamp instead of the append time.
    pub fn push(&self, line: ConsoleLine) {
        self.lock().push(line);
    }

    fn append(&self, origin: Origin, severity: Severity, message: String, markup: bool) {
        self.push(ConsoleLine {
            timestamp: Utc::now(),
            origin,
            severity,
            message,
            markup,
        });
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<ConsoleLine> {
        self.lock().clone()
    }

    /// Removes and returns all entries, oldest first.
    pub fn take(&self) -> Vec<ConsoleLine> {
        std::mem::take(&mut *self.lock())
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the sink holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ConsoleLine>> {
        // A writer can only have panicked mid-append of an owned line; the
        // list itself is always consistent, so poisoning is ignorable.
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Ordered history of submitted command lines, most recent first.
///
/// Inserting the same line twice in a row is suppressed; any other
/// repetition is kept.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CommandHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a raw command line unless it equals the current head.
    pub fn record(&self, line: &str) {
        let mut lines = self.lock();
        if lines.first().map(String::as_str) == Some(line) {
            return;
        }
        lines.insert(0, line.to_string());
    }

    /// Snapshot of the history, most recent first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}
