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

//! Value types for meta field values.
//!
//! Each [`ValueType`] is bound to a pure validator function. Validators never
//! fail; they classify a raw string as valid or invalid and leave it to the
//! caller to turn a rejection into a [`BeaconError`](crate::BeaconError).

use crate::template::UriPattern;
use crate::update::UpdateFrequency;
use crate::uri;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The literal value of the FORMAT meta field.
pub const BEACON_LITERAL: &str = "BEACON";

/// Calendar date with optional local time, as in ISO-8601 extended format.
static TIMESTAMP_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d{1,9})?)?)?$")
        .expect("timestamp pattern is valid")
});

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// The type of a meta field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    /// Exactly the literal `BEACON`.
    Beacon,
    /// Any string, including the empty string.
    FreeString,
    /// ISO-8601 calendar date, or calendar date and local time.
    Timestamp,
    /// One of the update frequency names.
    Update,
    /// Generic URI reference; a scheme is optional.
    Uri,
    /// URI template restricted to `{ID}` and `{+ID}` expressions.
    UriPattern,
    /// Absolute URL with scheme and authority.
    Url,
}

impl ValueType {
    /// All value types.
    pub const ALL: [ValueType; 7] = [
        ValueType::Beacon,
        ValueType::FreeString,
        ValueType::Timestamp,
        ValueType::Update,
        ValueType::Uri,
        ValueType::UriPattern,
        ValueType::Url,
    ];

    /// The validator function for this type.
    pub fn validator(self) -> fn(&str) -> bool {
        match self {
            ValueType::Beacon => is_beacon_literal,
            ValueType::FreeString => is_free_string,
            ValueType::Timestamp => is_timestamp,
            ValueType::Update => is_update_frequency,
            ValueType::Uri => is_uri,
            ValueType::UriPattern => is_uri_pattern,
            ValueType::Url => is_url,
        }
    }

    /// Check `value` against this type.
    #[inline]
    pub fn validate(self, value: &str) -> bool {
        (self.validator())(value)
    }

    /// Upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Beacon => "BEACON",
            ValueType::FreeString => "STRING",
            ValueType::Timestamp => "TIMESTAMP",
            ValueType::Update => "UPDATE",
            ValueType::Uri => "URI",
            ValueType::UriPattern => "URI_PATTERN",
            ValueType::Url => "URL",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts only the literal `BEACON`.
pub fn is_beacon_literal(value: &str) -> bool {
    value == BEACON_LITERAL
}

/// Accepts every string.
pub fn is_free_string(_value: &str) -> bool {
    true
}

/// Accepts `YYYY-MM-DD` and `YYYY-MM-DDThh:mm[:ss[.fraction]]`.
pub fn is_timestamp(value: &str) -> bool {
    parse_timestamp(value).is_some()
}

/// Accepts the canonical (lower-case) update frequency names.
pub fn is_update_frequency(value: &str) -> bool {
    UpdateFrequency::ALL.iter().any(|f| f.as_str() == value)
}

/// Accepts generic URI references.
pub fn is_uri(value: &str) -> bool {
    uri::is_uri(value)
}

/// Accepts URI templates whose expressions are all `{ID}` or `{+ID}`.
pub fn is_uri_pattern(value: &str) -> bool {
    UriPattern::parse(value).is_ok()
}

/// Accepts absolute URLs that carry an authority.
pub fn is_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => !url.cannot_be_a_base() && url.has_host(),
        Err(_) => false,
    }
}

/// Parse a timestamp value; a bare date is taken as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_SHAPE.is_match(value) {
        return None;
    }
    if value.len() == 10 {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
