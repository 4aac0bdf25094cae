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

//! Generic URI references.
//!
//! Identifiers built from a link dump are usually absolute HTTP URIs, but
//! with the default `{+ID}` pattern they are whatever the dump wrote, so the
//! check here is the generic URI-reference syntax: optional scheme, optional
//! authority, path, query and fragment, each restricted to its legal
//! characters. Non-ASCII characters outside the control and space classes
//! are accepted in every component except the scheme.

use crate::error::{BeaconError, BeaconResult};
use std::fmt;
use std::str::FromStr;

/// A syntactically valid URI reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
    /// Validate `value` as a URI reference.
    pub fn parse(value: &str) -> BeaconResult<Self> {
        if is_uri(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(BeaconError::InvalidIdentifier {
                value: value.to_string(),
            })
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The scheme, if the URI is absolute.
    pub fn scheme(&self) -> Option<&str> {
        split_scheme(&self.0).map(|(scheme, _)| scheme)
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.scheme().is_some()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uri {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Check `value` against the generic URI-reference syntax.
pub fn is_uri(value: &str) -> bool {
    let (rest, fragment) = match value.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (value, None),
    };
    if let Some(fragment) = fragment {
        if !valid_chars(fragment, is_uric) {
            return false;
        }
    }

    if let Some((_, ssp)) = split_scheme(rest) {
        if ssp.is_empty() {
            return false;
        }
        return if ssp.starts_with('/') {
            is_hierarchical(ssp)
        } else {
            // Opaque part, e.g. `urn:isbn:...` or `mailto:...`.
            valid_chars(ssp, is_uric)
        };
    }

    // A colon in the first segment must introduce a valid scheme.
    let first_segment = rest.split(['/', '?']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return false;
    }
    is_hierarchical(rest)
}

/// Split off a syntactically valid scheme.
fn split_scheme(value: &str) -> Option<(&str, &str)> {
    let colon = value.find([':', '/', '?', '#'])?;
    if !value[colon..].starts_with(':') {
        return None;
    }
    let scheme = &value[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme, &value[colon + 1..]))
}

fn is_hierarchical(value: &str) -> bool {
    let (before_query, query) = match value.split_once('?') {
        Some((before, query)) => (before, Some(query)),
        None => (value, None),
    };
    if let Some(query) = query {
        if !valid_chars(query, is_uric) {
            return false;
        }
    }

    let path = match before_query.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            if !valid_chars(&after[..end], is_authority_char) {
                return false;
            }
            &after[end..]
        }
        None => before_query,
    };
    valid_chars(path, is_path_char)
}

/// Check every character, treating `%` as the start of an escape triplet.
fn valid_chars(value: &str, allowed: fn(char) -> bool) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let hex = (chars.next(), chars.next());
            match hex {
                (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => {}
                _ => return false,
            }
        } else if !(allowed(c) || is_other(c)) {
            return false;
        }
    }
    true
}

#[inline]
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

#[inline]
fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '[' | ']'
    )
}

#[inline]
fn is_uric(c: char) -> bool {
    is_unreserved(c) || is_reserved(c)
}

#[inline]
fn is_authority_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, ';' | ':' | '&' | '=' | '+' | '$' | ',' | '@' | '[' | ']')
}

#[inline]
fn is_path_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, '/' | ';' | ':' | '@' | '&' | '=' | '+' | '$' | ',')
}

#[inline]
fn is_other(c: char) -> bool {
    !c.is_ascii() && !c.is_control() && !c.is_whitespace()
}
