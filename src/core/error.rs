// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robosplit.
//!
//! Provides error types for splitting operations:
//! - Log container access (open, map, read, write)
//! - Summary index consistency
//! - Header probing

use std::fmt;

/// Errors that can occur while splitting or scanning MCAP logs.
#[derive(Debug, Clone)]
pub enum SplitError {
    /// I/O failure while opening, mapping, or writing a file
    Io {
        /// What was being done
        context: String,
        /// Error message
        message: String,
    },

    /// Error surfaced by the MCAP reader or writer
    Mcap {
        /// What was being done
        context: String,
        /// Error message
        message: String,
    },

    /// File is not a valid MCAP log
    InvalidLog {
        /// Path to the offending file
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// The log carries no summary index
    MissingSummary {
        /// Path to the offending file
        path: String,
    },

    /// A streamed message references a topic absent from the summary index
    SummaryMismatch {
        /// Topic seen in the message stream
        topic: String,
    },

    /// Other error
    Other(String),
}

impl SplitError {
    /// Create an I/O error.
    pub fn io(context: impl Into<String>, message: impl Into<String>) -> Self {
        SplitError::Io {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an MCAP reader/writer error.
    pub fn mcap(context: impl Into<String>, message: impl Into<String>) -> Self {
        SplitError::Mcap {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-log error.
    pub fn invalid_log(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SplitError::InvalidLog {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-summary error.
    pub fn missing_summary(path: impl Into<String>) -> Self {
        SplitError::MissingSummary { path: path.into() }
    }

    /// Create a summary-mismatch error.
    pub fn summary_mismatch(topic: impl Into<String>) -> Self {
        SplitError::SummaryMismatch {
            topic: topic.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            SplitError::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            SplitError::Mcap { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            SplitError::InvalidLog { path, reason } => {
                vec![("path", path.clone()), ("reason", reason.clone())]
            }
            SplitError::MissingSummary { path } => vec![("path", path.clone())],
            SplitError::SummaryMismatch { topic } => vec![("topic", topic.clone())],
            SplitError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::Io { context, message } => {
                write!(f, "I/O error in {context}: {message}")
            }
            SplitError::Mcap { context, message } => {
                write!(f, "MCAP error in {context}: {message}")
            }
            SplitError::InvalidLog { path, reason } => {
                write!(f, "Invalid MCAP log '{path}': {reason}")
            }
            SplitError::MissingSummary { path } => {
                write!(f, "No summary index in '{path}'")
            }
            SplitError::SummaryMismatch { topic } => write!(
                f,
                "Message stream contains topic '{topic}' absent from the summary index"
            ),
            SplitError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for SplitError {}

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        SplitError::Io {
            context: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<mcap::McapError> for SplitError {
    fn from(err: mcap::McapError) -> Self {
        SplitError::Mcap {
            context: "mcap".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for robosplit operations.
pub type Result<T> = std::result::Result<T, SplitError>;
