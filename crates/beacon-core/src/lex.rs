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

//! Lexical helpers: whitespace normalization, tokenizing and URI pattern
//! normalization.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::lex::{normalize, normalize_template_pattern, tokenize};
//!
//! assert_eq!(normalize("  a \t  b "), Some("a b".to_string()));
//! assert_eq!(normalize(" \t "), None);
//!
//! assert_eq!(
//!     tokenize("a||c"),
//!     vec![Some("a".to_string()), None, Some("c".to_string())]
//! );
//!
//! assert_eq!(normalize_template_pattern("").unwrap(), "{+ID}");
//! assert_eq!(
//!     normalize_template_pattern("http://x.org/").unwrap(),
//!     "http://x.org/{ID}"
//! );
//! ```

use crate::error::BeaconResult;
use crate::template::{UriPattern, RESERVED_EXPANSION, SIMPLE_EXPANSION};
use unicode_normalization::UnicodeNormalization;

/// Separator between the tokens of a link line.
pub const TOKEN_SEPARATOR: char = '|';

/// Horizontal whitespace: tab and the Unicode space separators.
#[inline]
pub fn is_horizontal_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Normalize a raw value.
///
/// Runs of horizontal whitespace collapse to one space, leading and trailing
/// whitespace and control characters are trimmed, and the result is brought
/// to Unicode NFKC. Returns `None` when nothing is left, so callers can tell
/// an absent value from an empty one.
pub fn normalize(raw: &str) -> Option<String> {
    let mut collapsed = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if is_horizontal_whitespace(c) {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    let trimmed = collapsed.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.nfkc().collect())
    }
}

/// [`normalize`] with a fallback for absent values.
pub fn normalize_or(raw: &str, fallback: &str) -> String {
    normalize(raw).unwrap_or_else(|| fallback.to_string())
}

/// Whether a line is blank after normalization.
///
/// Equivalent to `normalize(line).is_none()` without allocating.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.chars()
        .all(|c| c <= ' ' || is_horizontal_whitespace(c))
}

/// Split a link line on `|` and normalize every token.
///
/// Empty segments are kept, including trailing ones, so the token count
/// always equals the number of separators plus one.
pub fn tokenize(line: &str) -> Vec<Option<String>> {
    line.split(TOKEN_SEPARATOR).map(normalize).collect()
}

/// Normalize the value of a PREFIX or TARGET meta field.
///
/// - An empty value becomes `{+ID}`.
/// - A value without expressions is a literal prefix and gets `{ID}`
///   appended.
/// - Anything else must be a valid URI pattern and is returned unchanged.
///
/// # Errors
///
/// `BeaconError::InvalidExpression` or `BeaconError::MalformedTemplate` when
/// the value is not a valid URI pattern.
pub fn normalize_template_pattern(raw: &str) -> BeaconResult<String> {
    if raw.is_empty() {
        return Ok(RESERVED_EXPANSION.to_string());
    }
    let pattern = UriPattern::parse(raw)?;
    if pattern.is_literal() {
        Ok(format!("{}{}", raw, SIMPLE_EXPANSION))
    } else {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BeaconError;

    // ==================== Normalization tests ====================

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a  \t b"), Some("a b".to_string()));
        assert_eq!(normalize("\u{00A0}a\u{3000}\u{2003}b\t"), Some("a b".to_string()));
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  abc  "), Some("abc".to_string()));
        assert_eq!(normalize("abc\r"), Some("abc".to_string()));
    }

    #[test]
    fn test_normalize_empty_is_none() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("\t\u{00A0}"), None);
    }

    #[test]
    fn test_normalize_nfkc() {
        // U+FB01 LATIN SMALL LIGATURE FI
        assert_eq!(normalize("\u{FB01}le"), Some("file".to_string()));
        // Combining sequence composes.
        assert_eq!(normalize("e\u{0301}"), Some("\u{00E9}".to_string()));
    }

    #[test]
    fn test_normalize_keeps_inner_newline_free_text() {
        assert_eq!(normalize("See also"), Some("See also".to_string()));
    }

    #[test]
    fn test_normalize_or() {
        assert_eq!(normalize_or("  ", ""), "");
        assert_eq!(normalize_or(" x ", ""), "x");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank(" a "));
        for line in ["", "\t\u{3000}", "\r", "x", " \u{FB01} "] {
            assert_eq!(is_blank(line), normalize(line).is_none(), "{:?}", line);
        }
    }

    // ==================== Tokenize tests ====================

    #[test]
    fn test_tokenize_three() {
        assert_eq!(
            tokenize("a|b|c"),
            vec![
                Some("a".to_string()),
                Some("b".to_string()),
                Some("c".to_string())
            ]
        );
    }

    #[test]
    fn test_tokenize_empty_middle() {
        assert_eq!(
            tokenize("a||c"),
            vec![Some("a".to_string()), None, Some("c".to_string())]
        );
    }

    #[test]
    fn test_tokenize_keeps_trailing_empty() {
        assert_eq!(tokenize("a|"), vec![Some("a".to_string()), None]);
        assert_eq!(tokenize("a|b|"), vec![Some("a".to_string()), Some("b".to_string()), None]);
    }

    #[test]
    fn test_tokenize_normalizes_tokens() {
        assert_eq!(
            tokenize("  x  y | z "),
            vec![Some("x y".to_string()), Some("z".to_string())]
        );
    }

    #[test]
    fn test_tokenize_empty_line() {
        assert_eq!(tokenize(""), vec![None]);
    }

    // ==================== Template normalization tests ====================

    #[test]
    fn test_template_empty() {
        assert_eq!(normalize_template_pattern("").unwrap(), "{+ID}");
    }

    #[test]
    fn test_template_literal_prefix() {
        assert_eq!(
            normalize_template_pattern("http://x.org/").unwrap(),
            "http://x.org/{ID}"
        );
    }

    #[test]
    fn test_template_valid_unchanged() {
        assert_eq!(
            normalize_template_pattern("http://x.org/{+ID}").unwrap(),
            "http://x.org/{+ID}"
        );
        assert_eq!(
            normalize_template_pattern("http://x.org/{ID}.html").unwrap(),
            "http://x.org/{ID}.html"
        );
    }

    #[test]
    fn test_template_invalid_expression() {
        let err = normalize_template_pattern("http://x.org/{bogus}").unwrap_err();
        assert_eq!(
            err,
            BeaconError::InvalidExpression {
                expression: "{bogus}".to_string(),
                position: 13
            }
        );
        assert!(err.is_format_violation());
    }

    #[test]
    fn test_template_malformed() {
        let err = normalize_template_pattern("http://x.org/{ID").unwrap_err();
        assert!(matches!(err, BeaconError::MalformedTemplate { .. }));
    }
}
