//! Error types for automation interpreter operations.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OsascriptError>;

/// Main error type for script invocation and application control.
#[derive(Debug, Error)]
pub enum OsascriptError {
    /// The interpreter could not be launched, or another I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The interpreter exited with a nonzero status in capturing mode.
    #[error("{}", failure_message(.code, .stderr))]
    ProcessFailure {
        /// Exit code, absent when the process was killed by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// A script was built from zero statements.
    #[error("Script must contain at least one statement")]
    EmptyScript,

    /// Neither a running nor an installed editor could be found.
    #[error("No editor found.")]
    NoEditorFound,
}

fn failure_message(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    };
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("osascript {}", status)
    } else {
        format!("osascript {}: {}", status, stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failure_message_includes_stderr() {
        let err = OsascriptError::ProcessFailure {
            code: Some(1),
            stdout: String::new(),
            stderr: "execution error: Can't get application \"Nope\". (-1728)\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "osascript exited with code 1: execution error: Can't get application \"Nope\". (-1728)"
        );
    }

    #[test]
    fn test_process_failure_message_signal_without_stderr() {
        let err = OsascriptError::ProcessFailure {
            code: None,
            stdout: String::new(),
            stderr: "  ".to_string(),
        };
        assert_eq!(err.to_string(), "osascript was terminated by a signal");
    }

    #[test]
    fn test_no_editor_message() {
        assert_eq!(OsascriptError::NoEditorFound.to_string(), "No editor found.");
    }
}
