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

//! Error types for the streaming parser.
//!
//! # Error Categories
//!
//! - **I/O Errors**: Problems reading the input stream
//! - **Syntax Errors**: Malformed meta-lines
//! - **Format Errors**: Meta values rejected by their field's value type
//! - **Timeout Errors**: Parsing exceeded the configured time limit
//! - **Usage Errors**: Pulling past the last link, or using a closed parser
//!
//! Malformed body lines are never errors; they are reported as
//! [`LinkEvent::Unparsable`](crate::LinkEvent::Unparsable).
//!
//! # Error Handling Examples
//!
//! ```rust
//! use beacon_stream::{BeaconParser, StreamError};
//! use std::io::Cursor;
//!
//! let bad_input = "#PREFIX: http://example.org/{bogus}\n123\n";
//!
//! match BeaconParser::new(Cursor::new(bad_input)) {
//!     Err(StreamError::Format { line, source }) => {
//!         assert_eq!(line, 1);
//!         assert!(source.to_string().contains("{bogus}"));
//!     }
//!     other => panic!("unexpected result: {:?}", other.map(|_| ())),
//! }
//! ```

use beacon_core::BeaconError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during streaming parsing.
///
/// Use the [`line()`](Self::line) method to extract the physical line number
/// uniformly when one is known.
///
/// # Examples
///
/// ```rust
/// use beacon_stream::StreamError;
///
/// let err = StreamError::syntax(42, "invalid meta line");
/// assert_eq!(err.line(), Some(42));
/// assert!(err.is_fatal());
/// assert!(err.to_string().contains("line 42"));
///
/// assert!(!StreamError::NoMoreLinks.is_fatal());
/// ```
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed meta-line.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A meta value was rejected.
    #[error("Format error at line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: BeaconError,
    },

    /// Timeout exceeded during parsing.
    #[error("Parsing timeout: elapsed {elapsed:?} exceeded limit {limit:?}")]
    Timeout { elapsed: Duration, limit: Duration },

    /// `next_link` was called with no link left.
    #[error("No more links")]
    NoMoreLinks,

    /// The parser was closed.
    #[error("Parser is closed")]
    Closed,
}

impl StreamError {
    /// Create a syntax error.
    #[inline]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create a format error.
    #[inline]
    pub fn format(line: usize, source: BeaconError) -> Self {
        Self::Format { line, source }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::Format { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether the error means the dump cannot be read any further.
    ///
    /// `NoMoreLinks` and `Closed` only report misuse of an otherwise healthy
    /// parser.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NoMoreLinks | Self::Closed)
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
