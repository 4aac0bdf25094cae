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

//! Validate command - BEACON dump header and body validation

use super::open_parser;
use crate::cli::ParseArgs;
use crate::error::CliError;
use beacon_stream::LinkEvent;
use colored::Colorize;
use tracing::{debug, info};

/// Validate a BEACON dump.
///
/// Parses the header and every body line. A malformed header or an I/O
/// failure is an error. Unparsable body lines and links whose identifiers
/// are not valid URIs are counted; in strict mode either one fails the
/// validation.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file cannot be read
/// - The header contains a malformed meta-line or an invalid meta value
/// - Parsing exceeds `--timeout-secs`
/// - In strict mode, if any body line produced no valid link
///
/// # Examples
///
/// ```no_run
/// use beacon_cli::cli::ParseArgs;
/// use beacon_cli::commands::validate;
///
/// # fn main() -> Result<(), beacon_cli::error::CliError> {
/// validate(&ParseArgs::new("links.txt"), false)?;
/// # Ok(())
/// # }
/// ```
///
/// # Output
///
/// Prints a summary to stdout including:
/// - File validation status (✓ or ✗)
/// - Count of explicit meta fields
/// - Count of links, unparsable lines, and invalid identifiers
pub fn validate(args: &ParseArgs, strict: bool) -> Result<(), CliError> {
    let mut parser = match open_parser(args) {
        Ok(parser) => parser,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), args.file);
            return Err(e);
        }
    };
    let meta_count = parser.meta_fields().explicit_count();

    let mut links = 0usize;
    let mut unparsable = 0usize;
    let mut invalid = 0usize;

    for event in parser.by_ref() {
        match event {
            Ok(LinkEvent::Link { line, link, .. }) => {
                links += 1;
                if let Err(e) = link
                    .source_identifier()
                    .and_then(|_| link.target_identifier())
                {
                    debug!("Invalid identifier on line {}: {}", line, e);
                    invalid += 1;
                }
            }
            Ok(LinkEvent::Unparsable { .. }) => unparsable += 1,
            Err(e) => {
                println!("{} {}", "✗".red().bold(), args.file);
                return Err(CliError::parse(&args.file, e));
            }
        }
    }
    parser.close();
    info!("Validated {} links in {}", links, args.file);

    let failed = strict && (unparsable > 0 || invalid > 0);
    let mark = if failed {
        "✗".red().bold()
    } else {
        "✓".green().bold()
    };
    println!("{} {}", mark, args.file);
    println!("  Meta fields: {}", meta_count);
    println!("  Links: {}", links);
    println!("  Unparsable: {}", unparsable);
    println!("  Invalid identifiers: {}", invalid);
    if strict {
        println!("  Mode: strict (every line must yield a valid link)");
    }

    if failed {
        return Err(CliError::ValidationFailed(format!(
            "{} unparsable lines and {} invalid identifiers in '{}'",
            unparsable, invalid, args.file
        )));
    }
    Ok(())
}
