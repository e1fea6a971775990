//! Error types for the pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while driving the coverage pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// External tool failure
    #[error("Command failed: {message}")]
    Tool {
        /// Error message
        message: String,
    },

    /// Test executable missing from the build tree
    #[error("Test executable not found at {}", path.display())]
    MissingExecutable {
        /// Expected executable path
        path: PathBuf,
    },

    /// Coverage instrumentation artifacts missing after the test run
    #[error("{message}")]
    MissingArtifacts {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an external tool failure
    #[must_use]
    pub fn tool(message: impl Into<String>) -> Self {
        Self::Tool {
            message: message.into(),
        }
    }

    /// Create a missing-executable error
    #[must_use]
    pub fn missing_executable(path: impl Into<PathBuf>) -> Self {
        Self::MissingExecutable { path: path.into() }
    }

    /// Create a missing-artifacts error
    #[must_use]
    pub fn missing_artifacts(message: impl Into<String>) -> Self {
        Self::MissingArtifacts {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = PipelineError::config("bad project dir");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad project dir"));
    }

    #[test]
    fn test_tool_error() {
        let err = PipelineError::tool("make exited with status 2");
        assert!(err.to_string().contains("Command failed"));
        assert!(err.to_string().contains("make"));
    }

    #[test]
    fn test_missing_executable_error() {
        let err = PipelineError::missing_executable("/proj/build/tests/unit_tests");
        assert!(err.to_string().contains("Test executable not found"));
        assert!(err.to_string().contains("build/tests/unit_tests"));
    }

    #[test]
    fn test_missing_artifacts_error() {
        let err = PipelineError::missing_artifacts("No .gcno files found.");
        assert_eq!(err.to_string(), "No .gcno files found.");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "dir not found");
        let err: PipelineError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
