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

//! URI patterns: the RFC 6570 subset used by BEACON.
//!
//! A pattern is literal text interleaved with expressions. Only two
//! expressions are allowed, both over the single variable `ID`:
//!
//! - `{ID}`: simple expansion, every character outside the unreserved set
//!   is percent-encoded.
//! - `{+ID}`: reserved expansion, reserved characters and existing
//!   percent-encoded triplets pass through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::UriPattern;
//!
//! let simple = UriPattern::parse("http://example.org/{ID}").unwrap();
//! assert_eq!(simple.expand("a/b c"), "http://example.org/a%2Fb%20c");
//!
//! let reserved = UriPattern::parse("http://example.org/{+ID}").unwrap();
//! assert_eq!(reserved.expand("a/b c"), "http://example.org/a/b%20c");
//! ```

use crate::error::{BeaconError, BeaconResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Reserved expansion of the `ID` variable.
pub const RESERVED_EXPANSION: &str = "{+ID}";

/// Simple expansion of the `ID` variable.
pub const SIMPLE_EXPANSION: &str = "{ID}";

/// Kind of expansion applied to the `ID` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expansion {
    Simple,
    Reserved,
}

impl Expansion {
    /// The expression text for this expansion, braces included.
    pub fn as_str(self) -> &'static str {
        match self {
            Expansion::Simple => SIMPLE_EXPANSION,
            Expansion::Reserved => RESERVED_EXPANSION,
        }
    }

    fn from_body(body: &str) -> Option<Self> {
        match body {
            "ID" => Some(Expansion::Simple),
            "+ID" => Some(Expansion::Reserved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Part {
    Literal(String),
    Expression(Expansion),
}

/// A piece of a scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between expressions.
    Literal(&'a str),
    /// An expression, braces stripped.
    Expression {
        body: &'a str,
        /// Byte offset of the opening brace.
        position: usize,
    },
}

/// Split a template into literal runs and raw expressions.
///
/// Only brace structure is checked here. Expression bodies are returned as
/// written; deciding which ones are acceptable is up to the caller.
pub fn scan(template: &str) -> BeaconResult<Vec<Segment<'_>>> {
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut open: Option<usize> = None;

    for (i, c) in template.char_indices() {
        match (c, open) {
            ('{', None) => {
                if literal_start < i {
                    parts.push(Segment::Literal(&template[literal_start..i]));
                }
                open = Some(i);
            }
            ('{', Some(_)) => {
                return Err(BeaconError::malformed_template(i, "nested '{'"));
            }
            ('}', Some(start)) => {
                parts.push(Segment::Expression {
                    body: &template[start + 1..i],
                    position: start,
                });
                open = None;
                literal_start = i + 1;
            }
            ('}', None) => {
                return Err(BeaconError::malformed_template(i, "unmatched '}'"));
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        return Err(BeaconError::malformed_template(
            start,
            "unclosed expression",
        ));
    }
    if literal_start < template.len() {
        parts.push(Segment::Literal(&template[literal_start..]));
    }
    Ok(parts)
}

/// Count the expressions of a template without checking their bodies.
pub fn expression_count(template: &str) -> BeaconResult<usize> {
    Ok(scan(template)?
        .iter()
        .filter(|segment| matches!(segment, Segment::Expression { .. }))
        .count())
}

/// A validated URI pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriPattern {
    source: String,
    parts: Vec<Part>,
}

impl UriPattern {
    /// Parse and validate a pattern.
    ///
    /// # Errors
    ///
    /// - `BeaconError::MalformedTemplate` for unbalanced or nested braces
    /// - `BeaconError::InvalidExpression` for any expression other than
    ///   `{ID}` and `{+ID}`
    pub fn parse(template: &str) -> BeaconResult<Self> {
        let parts = scan(template)?
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => Ok(Part::Literal(literal.to_string())),
                Segment::Expression { body, position } => Expansion::from_body(body)
                    .map(Part::Expression)
                    .ok_or_else(|| BeaconError::InvalidExpression {
                        expression: format!("{{{}}}", body),
                        position,
                    }),
            })
            .collect::<BeaconResult<Vec<_>>>()?;

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// The pattern as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of `ID` expressions in the pattern.
    pub fn expression_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, Part::Expression(_)))
            .count()
    }

    /// Whether the pattern is plain literal text.
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.expression_count() == 0
    }

    /// Expand the pattern, substituting `id` for every expression.
    pub fn expand(&self, id: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + id.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Expression(expansion) => encode_into(&mut out, id, *expansion),
            }
        }
        out
    }
}

/// Characters left as is by `{ID}`: the unreserved set.
const SIMPLE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters left as is by `{+ID}`: unreserved plus gen-delims and sub-delims.
const RESERVED: &AsciiSet = &SIMPLE
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

#[inline]
fn is_pct_triplet(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

fn encode_into(out: &mut String, value: &str, expansion: Expansion) {
    if expansion == Expansion::Simple {
        out.extend(utf8_percent_encode(value, SIMPLE));
        return;
    }

    // Existing triplets pass through; everything between them is encoded.
    let bytes = value.as_bytes();
    let mut run_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_pct_triplet(&bytes[i..]) {
            out.extend(utf8_percent_encode(&value[run_start..i], RESERVED));
            out.push_str(&value[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }
    out.extend(utf8_percent_encode(&value[run_start..], RESERVED));
}
