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

//! CLI command implementations

mod links;
mod meta;
mod stats;
mod validate;

pub use links::links;
pub use meta::meta;
pub use stats::stats;
pub use validate::validate;

use crate::cli::ParseArgs;
use crate::error::CliError;
use beacon_core::lex::normalize_template_pattern;
use beacon_core::{MetaField, MetaFields};
use beacon_stream::{BeaconParser, ParserConfig};
use std::fs::File;
use std::time::Duration;
use tracing::debug;

/// Build the parser configuration from command-line options.
pub fn parser_config(args: &ParseArgs) -> ParserConfig {
    ParserConfig {
        max_line_length: args.max_line_length,
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..ParserConfig::default()
    }
}

/// Build the seeded meta fields from `--prefix` and `--target`.
///
/// Values are normalized like the corresponding meta-lines, so a literal
/// prefix gets `{ID}` appended.
///
/// # Errors
///
/// Returns `CliError::InvalidMetaValue` if a value is not a valid URI pattern.
pub fn seeded_defaults(args: &ParseArgs) -> Result<MetaFields, CliError> {
    let mut builder = MetaFields::builder();
    for (field, value) in [
        (MetaField::Prefix, &args.prefix),
        (MetaField::Target, &args.target),
    ] {
        if let Some(raw) = value {
            builder.put(field, normalize_template_pattern(raw)?)?;
        }
    }
    Ok(builder.build())
}

/// Open `args.file` and parse its header.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened, a seeded default is invalid,
/// or the header is malformed.
pub fn open_parser(args: &ParseArgs) -> Result<BeaconParser<File>, CliError> {
    let defaults = seeded_defaults(args)?;
    let file = File::open(&args.file).map_err(|e| CliError::io_error(&args.file, e))?;
    let parser = BeaconParser::with_defaults(file, parser_config(args), &defaults)
        .map_err(|e| CliError::parse(&args.file, e))?;
    debug!(
        "Opened {} with {} explicit meta fields",
        args.file,
        parser.meta_fields().explicit_count()
    );
    Ok(parser)
}
