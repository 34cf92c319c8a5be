// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for command dispatch

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure reported while handing a command to the Cubit interpreter.
///
/// Nothing is validated locally: every variant originates from the executor,
/// and [`CommandError::Rejected`] carries the interpreter's message as-is.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The interpreter refused a command (unknown id, bad scheme name, ...).
    #[error("command rejected: `{command}`: {message}")]
    Rejected { command: String, message: String },

    /// The interpreter process exited unsuccessfully without naming a command.
    #[error("cubit exited with {status}")]
    Interpreter { status: String, output: String },

    #[error("cubit executable not available: {}", path.display())]
    Unavailable { path: PathBuf },

    #[error("cubit did not finish within {}s", limit.as_secs_f64())]
    Timeout { limit: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Build a rejection for `command` with the interpreter's message.
    pub fn rejected(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            command: command.into(),
            message: message.into(),
        }
    }

    /// The offending command, when the failure can be tied to one.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Rejected { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Convenience alias for dispatch results.
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = CommandError::rejected("curve 99 interval 5", "Curve 99 does not exist");
        assert_eq!(
            err.to_string(),
            "command rejected: `curve 99 interval 5`: Curve 99 does not exist"
        );
        assert_eq!(err.command(), Some("curve 99 interval 5"));
    }

    #[test]
    fn test_io_has_no_command() {
        let err: CommandError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(err.command().is_none());
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_timeout_display_keeps_fractions() {
        let err = CommandError::Timeout {
            limit: Duration::from_millis(300),
        };
        assert_eq!(err.to_string(), "cubit did not finish within 0.3s");
        let err = CommandError::Timeout {
            limit: Duration::from_secs(600),
        };
        assert_eq!(err.to_string(), "cubit did not finish within 600s");
    }
}
