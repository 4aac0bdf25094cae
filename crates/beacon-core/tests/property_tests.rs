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

//! Property-based tests for tokenizing, normalization and URI patterns.

use beacon_core::lex::{normalize, normalize_template_pattern, tokenize};
use beacon_core::{is_uri, MetaField, MetaFields, UpdateFrequency, UriPattern};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: Token count is always the separator count plus one.
    #[test]
    fn prop_tokenize_count(line in "[a-z |\t]{0,60}") {
        let separators = line.matches('|').count();
        prop_assert_eq!(tokenize(&line).len(), separators + 1);
    }

    /// Property: Tokens never contain the separator or surrounding spaces.
    #[test]
    fn prop_tokens_are_trimmed(line in "[a-z0-9 |\t\u{00A0}]{0,60}") {
        for token in tokenize(&line).into_iter().flatten() {
            prop_assert!(!token.contains('|'));
            prop_assert!(!token.starts_with(' '));
            prop_assert!(!token.ends_with(' '));
            prop_assert!(!token.is_empty());
        }
    }

    /// Property: Normalization is idempotent.
    #[test]
    fn prop_normalize_idempotent(raw in "[a-zA-Z0-9 \t\u{00A0}\u{3000}\u{2003}\u{FB01}]{0,40}") {
        if let Some(once) = normalize(&raw) {
            prop_assert_eq!(normalize(&once), Some(once.clone()));
        }
    }

    /// Property: Normalized values contain no runs of spaces.
    #[test]
    fn prop_normalize_collapses(raw in "[a-z \t\u{00A0}]{0,40}") {
        if let Some(value) = normalize(&raw) {
            prop_assert!(!value.contains("  "));
            prop_assert!(!value.contains('\t'));
        }
    }

    /// Property: A literal prefix gets a simple expansion appended.
    #[test]
    fn prop_literal_prefix_gets_simple_expansion(prefix in "http://[a-z]{1,10}\\.org/[a-z/]{0,10}") {
        let pattern = normalize_template_pattern(&prefix).unwrap();
        prop_assert_eq!(&pattern, &format!("{}{{ID}}", prefix));
        prop_assert_eq!(normalize_template_pattern(&pattern).unwrap(), pattern);
    }

    /// Property: Simple expansion always yields a valid URI.
    #[test]
    fn prop_simple_expansion_is_uri(id in "\\PC{0,30}") {
        let pattern = UriPattern::parse("http://example.org/{ID}").unwrap();
        let expanded = pattern.expand(&id);
        prop_assert!(is_uri(&expanded), "{:?} expanded to {:?}", id, expanded);
    }

    /// Property: Reserved expansion leaves unreserved and path characters alone.
    #[test]
    fn prop_reserved_expansion_keeps_path(id in "[a-zA-Z0-9/:@._~-]{0,30}") {
        let pattern = UriPattern::parse("{+ID}").unwrap();
        prop_assert_eq!(pattern.expand(&id), id);
    }

    /// Property: Unknown expressions are always rejected.
    #[test]
    fn prop_other_expressions_rejected(body in "[a-z+#./;?&]{0,8}") {
        prop_assume!(body != "ID" && body != "+ID");
        let template = format!("http://x.org/{{{}}}", body);
        prop_assert!(UriPattern::parse(&template).is_err());
        prop_assert!(!MetaField::Prefix.validate(&template));
    }

    /// Property: Store order does not affect equality or representation.
    #[test]
    fn prop_store_order_independent(name in "[a-zA-Z ]{1,20}", contact in "[a-z@.]{1,20}") {
        let a = MetaFields::builder()
            .with(MetaField::Name, name.clone())
            .and_then(|b| b.with(MetaField::Contact, contact.clone()))
            .unwrap()
            .build();
        let b = MetaFields::builder()
            .with(MetaField::Contact, contact)
            .and_then(|b| b.with(MetaField::Name, name))
            .unwrap()
            .build();
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a, b);
    }

    /// Property: Update frequencies parse case-insensitively.
    #[test]
    fn prop_update_frequency_case_insensitive(index in 0usize..7, upper in proptest::bool::ANY) {
        let frequency = UpdateFrequency::ALL[index];
        let text = if upper {
            frequency.as_str().to_uppercase()
        } else {
            frequency.as_str().to_string()
        };
        prop_assert_eq!(text.parse::<UpdateFrequency>().unwrap(), frequency);
    }
}
