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

//! Streaming BEACON Parser
//!
//! This crate reads BEACON link dumps line by line. The header is parsed into
//! a sealed [`MetaFields`] store when the parser is created; body lines are
//! then pulled one at a time, each yielding a [`LinkEvent`].
//!
//! # Features
//!
//! - **Memory Efficient**: Dumps with millions of links are never loaded whole
//! - **Iterator-based**: Standard Rust iterator interface
//! - **Resilient**: Malformed body lines are reported, not fatal
//! - **Timeout Protection**: Bound the time spent on untrusted input
//!
//! # Usage
//!
//! ```rust,no_run
//! use beacon_stream::{BeaconParser, LinkEvent};
//! use std::fs::File;
//!
//! let file = File::open("links.txt").unwrap();
//! let parser = BeaconParser::new(file).unwrap();
//!
//! for event in parser {
//!     match event {
//!         Ok(LinkEvent::Link { link, .. }) => {
//!             println!("{} -> {}", link.source_token(), link.target_token());
//!         }
//!         Ok(LinkEvent::Unparsable { line, reason, .. }) => {
//!             eprintln!("Skipping line {}: {}", line, reason);
//!         }
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! # Timeout Protection for Untrusted Input
//!
//! ```rust,no_run
//! use beacon_stream::{BeaconParser, ParserConfig};
//! use std::io::Cursor;
//! use std::time::Duration;
//!
//! let config = ParserConfig {
//!     timeout: Some(Duration::from_secs(10)),
//!     ..Default::default()
//! };
//!
//! let parser = BeaconParser::with_config(Cursor::new("..."), config).unwrap();
//!
//! // Parser returns StreamError::Timeout if parsing exceeds 10 seconds
//! for event in parser {
//!     # break;
//! }
//! ```

mod error;
mod event;
mod parser;
mod reader;

pub use error::{StreamError, StreamResult};
pub use event::{LinkEvent, UnparsableReason};
pub use parser::{parse_line, try_parse_line, BeaconParser, ParserConfig, ParserState};
pub use reader::LineReader;

/// Re-export core types for convenience.
pub use beacon_core::{Link, MetaField, MetaFields};
