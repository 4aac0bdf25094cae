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

//! Integration tests for beacon-stream

use beacon_core::{MetaField, DEFAULT_RELATION};
use beacon_stream::{BeaconParser, LinkEvent, ParserConfig, StreamError, UnparsableReason};
use std::io::{self, Cursor, Read, Write};

// ==================== End-to-end Tests ====================

#[test]
fn test_end_to_end_scenario() {
    let input = "#PREFIX: http://example.org/{+ID}\n#TARGET: http://viaf.org/viaf/{+ID}\n\n123|See also|456\n";

    let mut parser = BeaconParser::new(Cursor::new(input)).unwrap();
    assert!(parser.has_next());

    let event = parser.next_link().unwrap();
    assert_eq!(event.link_no(), 1);
    assert_eq!(event.line(), 4);

    let link = event.into_link().unwrap();
    assert_eq!(link.source_identifier().unwrap(), "http://example.org/123");
    assert_eq!(link.target_identifier().unwrap(), "http://viaf.org/viaf/456");
    assert_eq!(link.annotation(), "See also");
    assert_eq!(link.relation_type().unwrap(), DEFAULT_RELATION);

    assert!(!parser.has_next());
    parser.close();
}

#[test]
fn test_full_dump() {
    let input = "\
#FORMAT: BEACON
#PREFIX: http://d-nb.info/gnd/
#TARGET: http://www.wikidata.org/entity/
#RELATION: http://example.org/rel/{ID}
#MESSAGE: Same entity
#NAME: Example dump
#UPDATE: weekly
#TIMESTAMP: 2024-03-01T12:00:00

118540238|Q5879
118540238|sameAs|Q5879
118540238
|Q1
a|b|c|d
118529579||Q1631
";

    let parser = BeaconParser::new(Cursor::new(input)).unwrap();
    let meta = parser.meta_fields().clone();
    assert_eq!(meta.value(MetaField::Prefix), "http://d-nb.info/gnd/{ID}");
    assert_eq!(meta.update_frequency().map(|f| f.as_str()), Some("weekly"));
    assert!(meta.timestamp().is_some());

    let events: Vec<LinkEvent> = parser.collect::<Result<_, _>>().unwrap();
    assert_eq!(events.len(), 6);

    // TARGET is declared, so the second token is an annotation.
    let first = events[0].as_link().unwrap();
    assert_eq!(first.annotation(), "Q5879");
    assert_eq!(
        first.target_identifier().unwrap(),
        "http://www.wikidata.org/entity/118540238"
    );
    assert_eq!(
        first.relation_type().unwrap(),
        "http://example.org/rel/Q5879"
    );

    let second = events[1].as_link().unwrap();
    assert_eq!(second.source_identifier().unwrap(), "http://d-nb.info/gnd/118540238");
    assert_eq!(second.target_identifier().unwrap(), "http://www.wikidata.org/entity/Q5879");
    assert_eq!(second.relation_type().unwrap(), "http://example.org/rel/sameAs");

    let third = events[2].as_link().unwrap();
    assert_eq!(third.annotation(), "Same entity");
    assert_eq!(third.relation_type().unwrap(), "http://example.org/rel/");

    assert_eq!(events[3].reason(), Some(UnparsableReason::EmptySource));
    assert_eq!(events[4].reason(), Some(UnparsableReason::TokenCount(4)));

    let last = events[5].as_link().unwrap();
    assert_eq!(last.annotation(), "Same entity");
    assert_eq!(events[5].link_no(), 6);
    assert_eq!(events[5].line(), 15);
}

#[test]
fn test_headerless_dump_with_http_targets() {
    let input = "alice|http://example.org/a\nbob|HTTPS://example.org/b\ncarol|note\n";
    let links: Vec<_> = BeaconParser::new(Cursor::new(input))
        .unwrap()
        .map(|e| e.unwrap().into_link().unwrap())
        .collect();

    assert_eq!(links[0].target_identifier().unwrap(), "http://example.org/a");
    assert_eq!(links[1].target_token(), "HTTPS://example.org/b");
    assert_eq!(links[2].target_token(), "carol");
    assert_eq!(links[2].annotation(), "note");
}

#[test]
fn test_crlf_dump() {
    let input = "#NAME: Windows\r\n\r\na|b\r\n";
    let mut parser = BeaconParser::new(Cursor::new(input)).unwrap();
    assert_eq!(parser.meta_fields().value(MetaField::Name), "Windows");
    let link = parser.next_link().unwrap().into_link().unwrap();
    assert_eq!(link.annotation_token(), Some("b"));
}

// ==================== File Tests ====================

#[test]
fn test_parse_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "#PREFIX: http://example.org/").unwrap();
    writeln!(file).unwrap();
    for i in 0..1000 {
        writeln!(file, "{}|http://other.org/{}", i, i).unwrap();
    }
    file.flush().unwrap();

    let reader = std::fs::File::open(file.path()).unwrap();
    let parser = BeaconParser::new(reader).unwrap();

    let mut count = 0;
    for event in parser {
        let event = event.unwrap();
        count += 1;
        assert_eq!(event.link_no(), count);
        let link = event.into_link().unwrap();
        // PREFIX is declared but TARGET is not, so the URL is the target.
        assert_eq!(
            link.target_identifier().unwrap().as_str(),
            format!("http://other.org/{}", count - 1)
        );
    }
    assert_eq!(count, 1000);
}

// ==================== Error Tests ====================

/// Serves `data`, then fails every later read.
struct FailAfter {
    data: Cursor<Vec<u8>>,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_io_error_in_header_is_fatal() {
    let reader = FailAfter {
        data: Cursor::new(b"#NAME: x\n".to_vec()),
    };
    let err = BeaconParser::new(reader).err().unwrap();
    assert!(matches!(err, StreamError::Io(_)));
}

#[test]
fn test_io_error_in_body_is_reported_after_last_link() {
    let reader = FailAfter {
        data: Cursor::new(b"a\nb\n".to_vec()),
    };
    let config = ParserConfig {
        buffer_size: 2,
        ..Default::default()
    };
    let mut parser = BeaconParser::with_config(reader, config).unwrap();

    assert!(parser.next_link().unwrap().is_link());
    assert!(parser.next_link().unwrap().is_link());

    assert!(parser.has_next());
    let err = parser.next_link().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("connection reset"));

    assert!(!parser.has_next());
    assert!(matches!(parser.next_link(), Err(StreamError::NoMoreLinks)));
}

#[test]
fn test_invalid_utf8_in_body_does_not_end_dump() {
    let mut data = b"a\n".to_vec();
    data.extend_from_slice(&[0xC3, 0x28, b'\n']);
    data.extend_from_slice(b"b\nc\n");

    let events: Vec<LinkEvent> = BeaconParser::new(Cursor::new(data))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(events.len(), 4);

    let damaged = events[1].as_link().unwrap();
    assert_eq!(damaged.source_token(), "\u{FFFD}(");
    assert_eq!(events[1].line(), 2);

    let tail: Vec<&str> = events[2..]
        .iter()
        .map(|e| e.as_link().unwrap().source_token())
        .collect();
    assert_eq!(tail, vec!["b", "c"]);
}

#[test]
fn test_malformed_meta_line_aborts() {
    let err = BeaconParser::new(Cursor::new("#NAME: ok\n#broken\n1\n"))
        .err()
        .unwrap();
    assert_eq!(err.line(), Some(2));
    assert!(err.is_fatal());
}

#[test]
fn test_iterator_collects_unparsable_lines() {
    let input = "a|b|c|d|e\n|\n ok \n";
    let events: Vec<_> = BeaconParser::new(Cursor::new(input))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        events.iter().map(LinkEvent::reason).collect::<Vec<_>>(),
        vec![
            Some(UnparsableReason::TokenCount(5)),
            Some(UnparsableReason::EmptySource),
            None
        ]
    );
}
