// Dweve BEACON - Link Dump Toolkit
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

//! Structured error types for the BEACON CLI.
//!
//! All CLI operations return `Result<T, CliError>` for consistent error
//! reporting.

use beacon_core::BeaconError;
use beacon_stream::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for BEACON CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use beacon_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file open or read).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The dump could not be parsed.
    #[error("Parse error in '{path}': {message}")]
    Parse {
        /// The file being parsed
        path: PathBuf,
        /// The parser's message, including the line when known
        message: String,
    },

    /// A caller-supplied meta value was rejected.
    #[error("Invalid meta value: {0}")]
    InvalidMetaValue(String),

    /// Writing results to stdout failed.
    #[error("Output error: {0}")]
    Output(String),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Validation found problems in strict mode.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a parse error with file path context.
    ///
    /// I/O failures from the parser keep their [`CliError::Io`] shape.
    pub fn parse(path: impl Into<PathBuf>, source: StreamError) -> Self {
        match source {
            StreamError::Io(e) => Self::io_error(path, e),
            other => Self::Parse {
                path: path.into(),
                message: other.to_string(),
            },
        }
    }
}

impl From<BeaconError> for CliError {
    fn from(err: BeaconError) -> Self {
        Self::InvalidMetaValue(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Output(err.to_string())
    }
}
