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

//! Stats command - link dump statistics

use super::open_parser;
use crate::cli::ParseArgs;
use crate::error::CliError;
use beacon_stream::{LinkEvent, StreamResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Counts gathered from one pass over a dump.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct DumpStats {
    /// Non-blank body lines.
    pub body_lines: usize,
    /// Lines that produced a link.
    pub links: usize,
    /// Links whose source or target identifier is not a URI.
    pub invalid_identifiers: usize,
    /// Unparsable lines keyed by reason.
    pub unparsable: BTreeMap<&'static str, usize>,
    /// Distinct valid target identifiers.
    pub distinct_targets: usize,
}

impl DumpStats {
    /// Gather statistics from a stream of link events.
    ///
    /// Stops at the first error.
    pub fn collect<I>(events: I) -> StreamResult<Self>
    where
        I: IntoIterator<Item = StreamResult<LinkEvent>>,
    {
        let mut stats = Self::default();
        let mut targets = HashSet::new();

        for event in events {
            stats.body_lines += 1;
            match event? {
                LinkEvent::Link { link, .. } => {
                    stats.links += 1;
                    match (link.source_identifier(), link.target_identifier()) {
                        (Ok(_), Ok(target)) => {
                            targets.insert(target.into_string());
                        }
                        _ => stats.invalid_identifiers += 1,
                    }
                }
                LinkEvent::Unparsable { reason, .. } => {
                    *stats.unparsable.entry(reason.kind()).or_insert(0) += 1;
                }
            }
        }

        stats.distinct_targets = targets.len();
        Ok(stats)
    }

    /// Total number of unparsable lines.
    pub fn unparsable_total(&self) -> usize {
        self.unparsable.values().sum()
    }
}

/// Print statistics about a BEACON dump.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, parsing fails, or JSON
/// serialization fails.
///
/// # Output
///
/// Text mode prints body line, link and unparsable counts, followed by a
/// breakdown per unparsable reason and the number of distinct targets.
pub fn stats(args: &ParseArgs, json: bool) -> Result<(), CliError> {
    let mut parser = open_parser(args)?;
    let stats = DumpStats::collect(parser.by_ref()).map_err(|e| CliError::parse(&args.file, e))?;
    parser.close();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Dump statistics: {}", args.file);
    println!();
    println!("  Body lines:          {}", stats.body_lines);
    println!("  Links:               {}", stats.links);
    println!("  Invalid identifiers: {}", stats.invalid_identifiers);
    println!("  Unparsable:          {}", stats.unparsable_total());
    for (reason, count) in &stats.unparsable {
        println!("    {:<18} {}", reason, count);
    }
    println!("  Distinct targets:    {}", stats.distinct_targets);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_stream::{BeaconParser, StreamError};
    use std::io::Cursor;

    fn collect(input: &str) -> DumpStats {
        DumpStats::collect(BeaconParser::new(Cursor::new(input)).unwrap()).unwrap()
    }

    // ==================== Counting tests ====================

    #[test]
    fn test_counts() {
        let stats = collect("a|http://x.org/1\nb|http://x.org/1\nc\n|x\n1|2|3|4\n5|6|7|8\n");
        assert_eq!(stats.body_lines, 6);
        assert_eq!(stats.links, 3);
        assert_eq!(stats.unparsable_total(), 3);
        assert_eq!(stats.unparsable["token_count"], 2);
        assert_eq!(stats.unparsable["empty_source"], 1);
        assert_eq!(stats.distinct_targets, 2);
    }

    #[test]
    fn test_blank_lines_not_counted() {
        let stats = collect("\n\na\n\n  \nb\n");
        assert_eq!(stats.body_lines, 2);
        assert_eq!(stats.links, 2);
    }

    #[test]
    fn test_invalid_identifier_counted() {
        let stats = collect("a#b#c\n");
        assert_eq!(stats.links, 1);
        assert_eq!(stats.invalid_identifiers, 1);
        assert_eq!(stats.distinct_targets, 0);
    }

    #[test]
    fn test_stops_at_error() {
        let events = vec![Err(StreamError::syntax(1, "broken"))];
        assert!(DumpStats::collect(events).is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(collect("a\n|b\n")).unwrap();
        assert_eq!(json["links"], 1);
        assert_eq!(json["unparsable"]["empty_source"], 1);
    }
}
