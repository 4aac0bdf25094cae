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

//! Streaming parser implementation.
//!
//! The parser reads the header eagerly when it is created, then hands out one
//! [`LinkEvent`] per non-blank body line. Only the current lookahead line is
//! kept in memory.
//!
//! # Design Philosophy
//!
//! - **Memory Efficiency**: One buffered line, one shared meta field store
//! - **Iterator-Based**: Standard Rust iterator interface for easy composition
//! - **Error Recovery**: Bad body lines become events, never errors
//! - **Safety**: Optional timeout and line length limits for untrusted input
//!
//! # Basic Usage
//!
//! ```rust
//! use beacon_stream::{BeaconParser, LinkEvent};
//! use std::io::Cursor;
//!
//! let input = "\
//! #PREFIX: http://example.org/{+ID}
//! #TARGET: http://viaf.org/viaf/{+ID}
//!
//! 123|See also|456
//! ";
//!
//! let parser = BeaconParser::new(Cursor::new(input)).unwrap();
//!
//! for event in parser {
//!     match event.unwrap() {
//!         LinkEvent::Link { link, .. } => {
//!             assert_eq!(link.source_identifier().unwrap(), "http://example.org/123");
//!             assert_eq!(link.target_identifier().unwrap(), "http://viaf.org/viaf/456");
//!             assert_eq!(link.annotation(), "See also");
//!         }
//!         LinkEvent::Unparsable { line, reason, .. } => {
//!             eprintln!("line {}: {}", line, reason);
//!         }
//!     }
//! }
//! ```

use crate::error::{StreamError, StreamResult};
use crate::event::{LinkEvent, UnparsableReason};
use crate::reader::LineReader;
use beacon_core::lex;
use beacon_core::{Link, MetaField, MetaFields, DEFAULT_META_VALUE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// `#NAME` followed by a colon or horizontal whitespace, then the value.
///
/// The whitespace class matches `lex::is_horizontal_whitespace`.
static META_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([A-Z]+)[:\t\p{Zs}\x{180E}][\t\p{Zs}\x{180E}]*(.*)$").expect("meta line pattern is valid")
});

static HTTP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?:").expect("http prefix pattern is valid"));

/// Body lines between timeout checks.
const TIMEOUT_CHECK_INTERVAL: usize = 100;

/// Configuration options for the streaming parser.
///
/// # Examples
///
/// ```rust
/// use beacon_stream::ParserConfig;
/// use std::time::Duration;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.max_line_length, 1_000_000);
/// assert_eq!(config.buffer_size, 64 * 1024);
/// assert_eq!(config.timeout, None);
///
/// // Untrusted input
/// let config = ParserConfig {
///     max_line_length: 100_000,
///     timeout: Some(Duration::from_secs(10)),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum line length in bytes.
    ///
    /// A longer meta-line is a syntax error. A longer body line is reported
    /// as `UnparsableReason::LineTooLong`.
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,

    /// Buffer size for reading input.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Timeout for parsing.
    ///
    /// Checked on every header line and every 100 body lines, so the actual
    /// time spent may slightly exceed the limit.
    ///
    /// Default: None (no timeout)
    pub timeout: Option<Duration>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: 1_000_000,
            buffer_size: 64 * 1024,
            timeout: None,
        }
    }
}

/// Phase of a [`BeaconParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// Reading meta-lines. Only observable while the parser is being built.
    Header,
    /// Handing out body lines.
    Body,
    /// The underlying stream has been released.
    Closed,
}

/// Streaming BEACON parser.
///
/// The header is parsed when the parser is created; construction fails if a
/// meta-line is malformed or carries an invalid value. Afterwards the parser
/// is a pull iterator over body lines: [`has_next`](Self::has_next) tells
/// whether a line is buffered and [`next_link`](Self::next_link) turns it
/// into a [`LinkEvent`].
///
/// Exhausting the body does not release the stream; call
/// [`close`](Self::close) or drop the parser.
///
/// # Examples
///
/// ## Pulling links manually
///
/// ```rust
/// use beacon_stream::{BeaconParser, StreamError};
/// use std::io::Cursor;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut parser = BeaconParser::new(Cursor::new("#NAME: Example\n\na\nb|c|d|e\n"))?;
/// assert_eq!(parser.link_no(), 1);
///
/// let first = parser.next_link()?;
/// assert!(first.is_link());
///
/// let second = parser.next_link()?;
/// assert!(!second.is_link());
/// assert_eq!(second.link_no(), 2);
///
/// assert!(!parser.has_next());
/// assert!(matches!(parser.next_link(), Err(StreamError::NoMoreLinks)));
/// parser.close();
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
///
/// ## Seeding defaults
///
/// ```rust
/// use beacon_core::{MetaField, MetaFields};
/// use beacon_stream::{BeaconParser, ParserConfig};
/// use std::io::Cursor;
///
/// let defaults = MetaFields::builder()
///     .with(MetaField::Prefix, "http://example.org/{ID}")
///     .unwrap()
///     .build();
///
/// let mut parser = BeaconParser::with_defaults(
///     Cursor::new("42\n"),
///     ParserConfig::default(),
///     &defaults,
/// )
/// .unwrap();
///
/// let link = parser.next_link().unwrap().into_link().unwrap();
/// assert_eq!(link.source_identifier().unwrap(), "http://example.org/42");
/// ```
pub struct BeaconParser<R: Read> {
    reader: Option<LineReader<R>>,
    config: ParserConfig,
    meta_fields: Arc<MetaFields>,
    state: ParserState,
    /// Next non-blank body line.
    lookahead: Option<(usize, String)>,
    /// Read failure hit while filling the lookahead, reported on the next pull.
    deferred: Option<StreamError>,
    offset: usize,
    start_time: Instant,
    operations_count: usize,
}

impl<R: Read> BeaconParser<R> {
    /// Create a parser with default configuration and no seeded meta fields.
    ///
    /// # Errors
    ///
    /// - `StreamError::Io`: the header could not be read
    /// - `StreamError::Syntax`: a line starting with `#` is not a meta-line
    /// - `StreamError::Format`: a meta value failed validation
    pub fn new(reader: R) -> StreamResult<Self> {
        Self::with_config(reader, ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    ///
    /// Same errors as [`new()`](Self::new), plus `StreamError::Timeout` when
    /// header parsing exceeds the configured limit.
    pub fn with_config(reader: R, config: ParserConfig) -> StreamResult<Self> {
        Self::with_defaults(reader, config, &MetaFields::new())
    }

    /// Create a parser whose meta fields start from `defaults`.
    ///
    /// Meta-lines in the dump override seeded values.
    pub fn with_defaults(
        reader: R,
        config: ParserConfig,
        defaults: &MetaFields,
    ) -> StreamResult<Self> {
        let mut parser = Self {
            reader: Some(LineReader::with_capacity(reader, config.buffer_size)),
            config,
            meta_fields: Arc::new(MetaFields::new()),
            state: ParserState::Header,
            lookahead: None,
            deferred: None,
            offset: 0,
            start_time: Instant::now(),
            operations_count: 0,
        };

        parser.parse_header(defaults)?;

        Ok(parser)
    }

    /// Check if timeout has been exceeded.
    #[inline]
    fn check_timeout(&self) -> StreamResult<()> {
        if let Some(timeout) = self.config.timeout {
            let elapsed = self.start_time.elapsed();
            if elapsed > timeout {
                return Err(StreamError::Timeout {
                    elapsed,
                    limit: timeout,
                });
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        match self.reader.as_mut() {
            Some(reader) => reader.next_line(),
            None => Err(StreamError::Closed),
        }
    }

    /// Parse the header section.
    fn parse_header(&mut self, defaults: &MetaFields) -> StreamResult<()> {
        let mut builder = defaults.to_builder();
        let mut seen = HashSet::new();

        while let Some((line_num, line)) = self.read_line()? {
            self.check_timeout()?;

            if !line.starts_with('#') {
                if lex::is_blank(&line) {
                    continue;
                }
                debug!("Header ends at line {}", line_num);
                self.lookahead = Some((line_num, line));
                break;
            }

            if line.len() > self.config.max_line_length {
                return Err(StreamError::syntax(
                    line_num,
                    format!(
                        "meta line length {} exceeds limit {}",
                        line.len(),
                        self.config.max_line_length
                    ),
                ));
            }

            let captures = META_LINE
                .captures(&line)
                .ok_or_else(|| StreamError::syntax(line_num, format!("invalid meta line '{}'", line)))?;
            let name = captures.get(1).map_or("", |m| m.as_str());
            let raw_value = captures.get(2).map_or("", |m| m.as_str());

            let field = match MetaField::from_name(name) {
                Some(field) => field,
                None => {
                    warn!("Skipping unrecognized meta field {} at line {}", name, line_num);
                    continue;
                }
            };

            if !seen.insert(field) {
                warn!(
                    "Meta field {} repeated at line {}, last value wins",
                    field, line_num
                );
            }

            let mut value = lex::normalize_or(raw_value, DEFAULT_META_VALUE);
            match field {
                MetaField::Format if line_num != 1 => {
                    warn!("FORMAT meta field should be on line 1, found at line {}", line_num);
                }
                MetaField::Prefix | MetaField::Target => {
                    value = lex::normalize_template_pattern(&value)
                        .map_err(|e| StreamError::format(line_num, e))?;
                }
                _ => {}
            }

            builder
                .put(field, value)
                .map_err(|e| StreamError::format(line_num, e))?;
        }

        self.offset = match &self.lookahead {
            Some((line_num, _)) => line_num - 1,
            None => self.reader.as_ref().map_or(0, LineReader::line_number),
        };

        let meta_fields = builder.build();
        debug!(
            "Parsed header with {} explicit meta fields, body starts after line {}",
            meta_fields.explicit_count(),
            self.offset
        );
        self.meta_fields = Arc::new(meta_fields);
        self.state = ParserState::Body;
        Ok(())
    }

    /// Buffer the next non-blank line, or remember why that failed.
    fn advance(&mut self) {
        loop {
            match self.read_line() {
                Ok(Some((_, line))) if lex::is_blank(&line) => continue,
                Ok(next) => {
                    self.lookahead = next;
                    return;
                }
                Err(e) => {
                    self.deferred = Some(e);
                    return;
                }
            }
        }
    }

    /// Current parser phase.
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The sealed meta fields shared by every link of this dump.
    #[inline]
    pub fn meta_fields(&self) -> &Arc<MetaFields> {
        &self.meta_fields
    }

    /// Physical line number of the buffered line, or of the last line read
    /// once the body is exhausted.
    pub fn line_no(&self) -> usize {
        match &self.lookahead {
            Some((line_num, _)) => *line_num,
            None => self.reader.as_ref().map_or(0, LineReader::line_number),
        }
    }

    /// Link number of the buffered line: its physical line number minus the
    /// header lines.
    #[inline]
    pub fn link_no(&self) -> usize {
        self.line_no().saturating_sub(self.offset)
    }

    /// Whether [`next_link`](Self::next_link) would return a result rather
    /// than `NoMoreLinks`.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.state == ParserState::Body && (self.lookahead.is_some() || self.deferred.is_some())
    }

    /// Parse the buffered line and buffer the one after it.
    ///
    /// # Errors
    ///
    /// - `StreamError::Io`: reading the stream failed
    /// - `StreamError::Timeout`: the configured limit was exceeded
    /// - `StreamError::NoMoreLinks`: no line is buffered
    /// - `StreamError::Closed`: the parser was closed
    pub fn next_link(&mut self) -> StreamResult<LinkEvent> {
        if self.state == ParserState::Closed {
            return Err(StreamError::Closed);
        }
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        if self.lookahead.is_none() {
            return Err(StreamError::NoMoreLinks);
        }

        self.operations_count += 1;
        if self.operations_count % TIMEOUT_CHECK_INTERVAL == 0 {
            if let Err(e) = self.check_timeout() {
                self.lookahead = None;
                return Err(e);
            }
        }

        let (line_num, line) = self.lookahead.take().ok_or(StreamError::NoMoreLinks)?;
        let link_no = line_num - self.offset;

        let outcome = if line.len() > self.config.max_line_length {
            Err(UnparsableReason::LineTooLong(line.len()))
        } else {
            try_parse_line(&line, &self.meta_fields)
        };

        let event = match outcome {
            Ok(link) => LinkEvent::Link {
                link_no,
                line: line_num,
                link,
            },
            Err(reason) => {
                debug!("Unparsable link line {}: {}", line_num, reason);
                LinkEvent::Unparsable {
                    link_no,
                    line: line_num,
                    reason,
                }
            }
        };

        self.advance();
        Ok(event)
    }

    /// Release the underlying stream.
    ///
    /// Every later call to [`next_link`](Self::next_link) fails with
    /// `StreamError::Closed`. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.state != ParserState::Closed {
            debug!("Closing parser at line {}", self.line_no());
        }
        self.reader = None;
        self.lookahead = None;
        self.deferred = None;
        self.state = ParserState::Closed;
    }
}

impl<R: Read> Iterator for BeaconParser<R> {
    type Item = StreamResult<LinkEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_link())
        } else {
            None
        }
    }
}

/// Parse one link line against a meta field store.
///
/// Returns `None` when the line cannot be turned into a link; see
/// [`try_parse_line`] for the reason.
///
/// # Examples
///
/// ```rust
/// use beacon_core::MetaFields;
/// use beacon_stream::parse_line;
/// use std::sync::Arc;
///
/// let fields = Arc::new(MetaFields::new());
///
/// let link = parse_line("x|http://example.org/y", &fields).unwrap();
/// assert_eq!(link.target_token(), "http://example.org/y");
///
/// assert!(parse_line("a|b|c|d", &fields).is_none());
/// ```
pub fn parse_line(line: &str, meta_fields: &Arc<MetaFields>) -> Option<Link> {
    try_parse_line(line, meta_fields).ok()
}

/// Parse one link line, reporting why it produced no link.
///
/// - one token: source and target are that token
/// - two tokens: an `http:` or `https:` second token is the target when no
///   TARGET pattern is declared, otherwise it is the annotation
/// - three tokens: source, annotation and target
pub fn try_parse_line(line: &str, meta_fields: &Arc<MetaFields>) -> Result<Link, UnparsableReason> {
    let tokens = lex::tokenize(line);

    let (source, annotation, target) = match tokens.as_slice() {
        [only] => (only.clone(), None, only.clone()),
        [first, second] => match second {
            Some(candidate)
                if meta_fields.is_default(MetaField::Target)
                    && HTTP_PREFIX.is_match(candidate) =>
            {
                (first.clone(), None, second.clone())
            }
            _ => (first.clone(), second.clone(), first.clone()),
        },
        [source, annotation, target] => (source.clone(), annotation.clone(), target.clone()),
        other => return Err(UnparsableReason::TokenCount(other.len())),
    };

    let source = source.ok_or(UnparsableReason::EmptySource)?;
    let target = target.ok_or(UnparsableReason::EmptyTarget)?;

    Ok(Link::new(source, annotation, target, Arc::clone(meta_fields)))
}
