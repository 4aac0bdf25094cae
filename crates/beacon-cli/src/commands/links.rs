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

//! Links command - export links as NDJSON

use super::open_parser;
use crate::cli::ParseArgs;
use crate::error::CliError;
use beacon_core::{BeaconResult, Link};
use beacon_stream::LinkEvent;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

/// One NDJSON output line.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Record {
    Link {
        link_no: usize,
        line: usize,
        source: String,
        target: String,
        relation: String,
        annotation: String,
    },
    Unparsable {
        link_no: usize,
        line: usize,
        reason: &'static str,
        message: String,
    },
    InvalidIdentifier {
        link_no: usize,
        line: usize,
        message: String,
    },
}

fn link_record(link_no: usize, line: usize, link: &Link) -> BeaconResult<Record> {
    Ok(Record::Link {
        link_no,
        line,
        source: link.source_identifier()?.into_string(),
        target: link.target_identifier()?.into_string(),
        relation: link.relation_type()?.into_string(),
        annotation: link.annotation().to_string(),
    })
}

fn to_record(event: LinkEvent) -> Record {
    match event {
        LinkEvent::Link {
            link_no,
            line,
            link,
        } => link_record(link_no, line, &link).unwrap_or_else(|e| {
            debug!("Invalid identifier on line {}: {}", line, e);
            Record::InvalidIdentifier {
                link_no,
                line,
                message: e.to_string(),
            }
        }),
        LinkEvent::Unparsable {
            link_no,
            line,
            reason,
        } => Record::Unparsable {
            link_no,
            line,
            reason: reason.kind(),
            message: reason.to_string(),
        },
    }
}

/// Export the links of a BEACON dump as NDJSON.
///
/// Each valid link becomes one JSON object with `status: "link"`, its link
/// number, physical line, source and target identifiers, relation type and
/// annotation. With `include_unparsable`, lines that yield no valid link are
/// emitted as `unparsable` or `invalid_identifier` records instead of being
/// skipped. `limit` caps the number of `link` records.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, the header is malformed, a
/// fatal error interrupts the body, or stdout cannot be written.
pub fn links(args: &ParseArgs, limit: Option<usize>, include_unparsable: bool) -> Result<(), CliError> {
    let mut parser = open_parser(args)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut emitted = 0usize;

    while limit.map_or(true, |max| emitted < max) && parser.has_next() {
        let event = parser
            .next_link()
            .map_err(|e| CliError::parse(&args.file, e))?;
        let record = to_record(event);
        match record {
            Record::Link { .. } => emitted += 1,
            _ if !include_unparsable => continue,
            _ => {}
        }
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    parser.close();

    info!("Exported {} links from {}", emitted, args.file);
    Ok(())
}
