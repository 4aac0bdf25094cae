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

//! Event types for the streaming parser.
//!
//! Every non-blank body line yields exactly one [`LinkEvent`]: either a
//! constructed [`Link`] or an `Unparsable` marker saying why no link could be
//! built from it.
//!
//! # Example Event Sequence
//!
//! For this dump:
//!
//! ```text
//! #TARGET: http://viaf.org/viaf/{ID}
//! 123|See also|456
//! a|b|c|d
//!
//! 789
//! ```
//!
//! The parser yields:
//!
//! ```text
//! Link { link_no: 1, line: 2, .. }
//! Unparsable { link_no: 2, line: 3, reason: TokenCount(4) }
//! Link { link_no: 4, line: 5, .. }
//! ```

use beacon_core::Link;
use std::fmt;

/// Why a body line produced no link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnparsableReason {
    /// The line had zero or more than three tokens.
    TokenCount(usize),
    /// The source token normalized to nothing.
    EmptySource,
    /// The target token normalized to nothing.
    EmptyTarget,
    /// The line exceeded the configured maximum length.
    LineTooLong(usize),
}

impl UnparsableReason {
    /// Short machine-readable name of the reason.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TokenCount(_) => "token_count",
            Self::EmptySource => "empty_source",
            Self::EmptyTarget => "empty_target",
            Self::LineTooLong(_) => "line_too_long",
        }
    }
}

impl fmt::Display for UnparsableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount(n) => write!(f, "expected 1 to 3 tokens, found {}", n),
            Self::EmptySource => f.write_str("empty source token"),
            Self::EmptyTarget => f.write_str("empty target token"),
            Self::LineTooLong(len) => write!(f, "line length {} exceeds limit", len),
        }
    }
}

/// Outcome of parsing one body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A link was constructed.
    Link {
        /// Ordinal of the line within the body.
        link_no: usize,
        /// Physical line number.
        line: usize,
        link: Link,
    },

    /// The line could not be turned into a link.
    Unparsable {
        /// Ordinal of the line within the body.
        link_no: usize,
        /// Physical line number.
        line: usize,
        reason: UnparsableReason,
    },
}

impl LinkEvent {
    /// Check if this event carries a link.
    #[inline]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Get the link if this event carries one.
    #[inline]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link { link, .. } => Some(link),
            Self::Unparsable { .. } => None,
        }
    }

    /// Take the link out of the event.
    #[inline]
    pub fn into_link(self) -> Option<Link> {
        match self {
            Self::Link { link, .. } => Some(link),
            Self::Unparsable { .. } => None,
        }
    }

    #[inline]
    pub fn link_no(&self) -> usize {
        match self {
            Self::Link { link_no, .. } | Self::Unparsable { link_no, .. } => *link_no,
        }
    }

    /// Physical line the event came from.
    #[inline]
    pub fn line(&self) -> usize {
        match self {
            Self::Link { line, .. } | Self::Unparsable { line, .. } => *line,
        }
    }

    /// The failure reason, for unparsable lines.
    #[inline]
    pub fn reason(&self) -> Option<UnparsableReason> {
        match self {
            Self::Link { .. } => None,
            Self::Unparsable { reason, .. } => Some(*reason),
        }
    }
}
