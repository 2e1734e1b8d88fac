//! Logging handed to a reduce task by its caller.
//!
//! The task never reaches for a global logger on its own. Callers pass a
//! [`TaskLog`] in, so a worker can route lines to its configured sink while
//! tests capture or drop them.
//!
//! # Example
//! ```
//! use mrreduce::tasklog::{MemoryLog, TaskLog};
//!
//! let log = MemoryLog::default();
//! log.info(format_args!("reading {} shards", 3));
//! assert_eq!(log.lines(), vec!["INFO: reading 3 shards".to_string()]);
//! ```

use std::fmt;
use std::sync::Mutex;

/// A sink for informational and error lines.
///
/// Implementations must not panic.
pub trait TaskLog {
    fn info(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
}

impl<T: TaskLog + ?Sized> TaskLog for &T {
    fn info(&self, args: fmt::Arguments<'_>) {
        (**self).info(args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }
}

/// Forwards to the [`log`] facade, so whatever logger the process installed
/// receives the lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl TaskLog for LogFacade {
    fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: "mrreduce", "{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: "mrreduce", "{}", args);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl TaskLog for NullLog {
    fn info(&self, _args: fmt::Arguments<'_>) {}

    fn error(&self, _args: fmt::Arguments<'_>) {}
}

/// Keeps every line in memory, prefixed with its level.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    /// A snapshot of the lines captured so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, level: &str, args: fmt::Arguments<'_>) {
        // A poisoned lock still holds usable lines.
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(format!("{}: {}", level, args));
    }
}

impl TaskLog for MemoryLog {
    fn info(&self, args: fmt::Arguments<'_>) {
        self.push("INFO", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.push("ERROR", args);
    }
}
