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

//! Property-based tests for link line classification and streaming.

use beacon_core::{MetaField, MetaFields};
use beacon_stream::{parse_line, try_parse_line, BeaconParser, UnparsableReason};
use proptest::prelude::*;
use std::io::Cursor;
use std::sync::Arc;

fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,15}"
}

fn with_message() -> Arc<MetaFields> {
    Arc::new(
        MetaFields::builder()
            .with(MetaField::Message, "default message")
            .unwrap()
            .build(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: One token is both source and target, annotated by MESSAGE.
    #[test]
    fn prop_one_token(id in token()) {
        let link = parse_line(&id, &with_message()).unwrap();
        prop_assert_eq!(link.source_token(), link.target_token());
        prop_assert_eq!(link.annotation(), "default message");
    }

    /// Property: An http(s) second token is the target when TARGET is undeclared.
    #[test]
    fn prop_two_tokens_http(
        id in token(),
        scheme in prop::sample::select(vec!["http:", "HTTP:", "https:", "HTTPS:", "Http:"]),
        path in "//[a-z]{1,10}\\.org/[a-z0-9]{0,10}",
    ) {
        let target = format!("{}{}", scheme, path);
        let link = parse_line(&format!("{}|{}", id, target), &with_message()).unwrap();
        prop_assert_eq!(link.source_token(), id.as_str());
        prop_assert_eq!(link.target_token(), target.as_str());
        prop_assert_eq!(link.annotation_token(), None);
    }

    /// Property: Any other second token is an annotation.
    #[test]
    fn prop_two_tokens_annotation(id in token(), note in "[a-gi-z][a-z]{0,20}") {
        let link = parse_line(&format!("{}|{}", id, note), &with_message()).unwrap();
        prop_assert_eq!(link.source_token(), id.as_str());
        prop_assert_eq!(link.target_token(), id.as_str());
        prop_assert_eq!(link.annotation(), note.as_str());
    }

    /// Property: A declared TARGET turns every second token into an annotation.
    #[test]
    fn prop_two_tokens_with_target(id in token(), path in "[a-z]{1,10}") {
        let meta = Arc::new(
            MetaFields::builder()
                .with(MetaField::Target, "http://viaf.org/viaf/{ID}")
                .unwrap()
                .build(),
        );
        let second = format!("http://example.org/{}", path);
        let link = parse_line(&format!("{}|{}", id, second), &meta).unwrap();
        prop_assert_eq!(link.target_token(), id.as_str());
        prop_assert_eq!(link.annotation_token(), Some(second.as_str()));
    }

    /// Property: Three tokens map positionally.
    #[test]
    fn prop_three_tokens(a in token(), b in token(), c in token()) {
        let link = parse_line(&format!("{}|{}|{}", a, b, c), &with_message()).unwrap();
        prop_assert_eq!(link.source_token(), a.as_str());
        prop_assert_eq!(link.annotation_token(), Some(b.as_str()));
        prop_assert_eq!(link.target_token(), c.as_str());
    }

    /// Property: Four or more tokens never produce a link.
    #[test]
    fn prop_too_many_tokens(tokens in prop::collection::vec(token(), 4..8)) {
        let line = tokens.join("|");
        prop_assert_eq!(
            try_parse_line(&line, &with_message()).unwrap_err(),
            UnparsableReason::TokenCount(tokens.len())
        );
    }

    /// Property: Blank source tokens never produce a link.
    #[test]
    fn prop_blank_source(blank in "[ \t]{0,5}", rest in token()) {
        let line = format!("{}|{}|{}", blank, rest, rest);
        prop_assert!(parse_line(&line, &with_message()).is_none());
    }

    /// Property: Every non-blank body line yields exactly one event.
    #[test]
    fn prop_one_event_per_line(lines in prop::collection::vec("[a-z|]{1,12}", 0..40)) {
        let input = lines.join("\n");
        let events: Vec<_> = BeaconParser::new(Cursor::new(input))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(events.len(), lines.len());
        for (i, event) in events.iter().enumerate() {
            prop_assert_eq!(event.link_no(), i + 1);
        }
    }
}
