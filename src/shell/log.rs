/*!
 * Terminal Log Types
 * Outcome records produced by the command executor
 */

use serde::{Deserialize, Serialize};

/// Severity of a terminal log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    System,
}

impl LogLevel {
    /// ANSI color sequence used when rendering to a terminal
    pub fn ansi_color(&self) -> &'static str {
        match self {
            LogLevel::Info => "\x1b[37m",
            LogLevel::Success => "\x1b[32m",
            LogLevel::Warning => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
            LogLevel::System => "\x1b[1;34m",
        }
    }
}

/// A single entry in the terminal log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(LogLevel::System, message)
    }
}
