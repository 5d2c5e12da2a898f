// Fanout - Matrix expansion for YAML configuration
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the Fanout CLI.
//!
//! All CLI operations return `Result<T, CliError>` for consistent error reporting.

use fanout_core::ExpandError;
use fanout_yaml::YamlError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Fanout CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use fanout_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file exceeds the maximum allowed size.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// Decoding or encoding YAML failed, or the document is not a mapping.
    #[error(transparent)]
    Yaml(#[from] YamlError),

    /// A matrix could not be expanded.
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    ///
    /// ```rust
    /// use fanout_cli::error::CliError;
    ///
    /// let err = CliError::file_too_large("huge.yaml", 3 * 1024 * 1024, 2 * 1024 * 1024);
    /// assert!(err.to_string().contains("(2 MB)"));
    /// ```
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "ci.yaml",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("ci.yaml"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.yaml", 200_000_000, 100 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("big.yaml"));
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("100 MB"));
    }

    #[test]
    fn test_yaml_error_is_transparent() {
        let err: CliError = YamlError::ParseError("bad indent".to_string()).into();
        assert_eq!(err.to_string(), "YAML parse error: bad indent");
    }

    #[test]
    fn test_expand_error_is_transparent() {
        let err: CliError = ExpandError::PassLimitExceeded { limit: 3 }.into();
        assert_eq!(
            err.to_string(),
            "expansion did not reach a fixpoint within 3 passes"
        );
    }

    #[test]
    fn test_error_cloning() {
        let err = CliError::file_too_large("a.yaml", 10, 5);
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
