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

//! Update frequencies declared by the UPDATE meta field.

use chrono::{Duration, Months, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How often a link dump is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UpdateFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

/// The interval bound to an [`UpdateFrequency`].
///
/// Months and years are calendar amounts and cannot be expressed as a fixed
/// [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePeriod {
    /// A fixed amount of time.
    Fixed(Duration),
    /// A number of calendar months.
    Months(u32),
    /// The dump is never updated.
    Never,
}

/// Error returned when a string names no update frequency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown update frequency: {0}")]
pub struct ParseUpdateFrequencyError(pub String);

impl UpdateFrequency {
    /// All frequencies, shortest interval first.
    pub const ALL: [UpdateFrequency; 7] = [
        UpdateFrequency::Always,
        UpdateFrequency::Hourly,
        UpdateFrequency::Daily,
        UpdateFrequency::Weekly,
        UpdateFrequency::Monthly,
        UpdateFrequency::Yearly,
        UpdateFrequency::Never,
    ];

    /// Canonical lower-case name, as written in dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateFrequency::Always => "always",
            UpdateFrequency::Hourly => "hourly",
            UpdateFrequency::Daily => "daily",
            UpdateFrequency::Weekly => "weekly",
            UpdateFrequency::Monthly => "monthly",
            UpdateFrequency::Yearly => "yearly",
            UpdateFrequency::Never => "never",
        }
    }

    /// The interval between updates.
    pub fn period(self) -> UpdatePeriod {
        match self {
            UpdateFrequency::Always => UpdatePeriod::Fixed(Duration::zero()),
            UpdateFrequency::Hourly => UpdatePeriod::Fixed(Duration::hours(1)),
            UpdateFrequency::Daily => UpdatePeriod::Fixed(Duration::days(1)),
            UpdateFrequency::Weekly => UpdatePeriod::Fixed(Duration::weeks(1)),
            UpdateFrequency::Monthly => UpdatePeriod::Months(1),
            UpdateFrequency::Yearly => UpdatePeriod::Months(12),
            UpdateFrequency::Never => UpdatePeriod::Never,
        }
    }

    /// When a dump published at `from` is next expected to change.
    ///
    /// Returns `None` for [`Never`](Self::Never) and when the result would
    /// fall outside the representable calendar.
    pub fn next_update(self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.period() {
            UpdatePeriod::Fixed(delta) => from.checked_add_signed(delta),
            UpdatePeriod::Months(months) => from.checked_add_months(Months::new(months)),
            UpdatePeriod::Never => None,
        }
    }
}

impl fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateFrequency {
    type Err = ParseUpdateFrequencyError;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UpdateFrequency::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseUpdateFrequencyError(s.to_string()))
    }
}
