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

//! Line reader for the streaming parser.
//!
//! Provides buffered line-by-line reading with line number tracking.

use crate::error::{StreamError, StreamResult};
use std::borrow::Cow;
use std::io::{BufRead, BufReader, Read};
use tracing::warn;

/// Buffered line reader with line number tracking.
///
/// Reads input line-by-line, stripping LF and CRLF endings, and numbers
/// physical lines from 1. Invalid UTF-8 sequences are replaced with
/// U+FFFD so one badly encoded line does not end the stream.
///
/// # Examples
///
/// ```rust
/// use beacon_stream::LineReader;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("#NAME: x\r\n123\n"));
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "#NAME: x".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "123".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// assert_eq!(reader.line_number(), 2);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of physical lines read from the underlying stream so far.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        self.buffer.clear();

        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;

                if self.buffer.ends_with(b"\n") {
                    self.buffer.pop();
                    if self.buffer.ends_with(b"\r") {
                        self.buffer.pop();
                    }
                }

                let line = match String::from_utf8_lossy(&self.buffer) {
                    Cow::Borrowed(line) => line.to_string(),
                    Cow::Owned(line) => {
                        warn!("Replaced invalid UTF-8 on line {}", self.line_number);
                        line
                    }
                };
                Ok(Some((self.line_number, line)))
            }
            Err(e) => Err(StreamError::Io(e)),
        }
    }
}
