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

//! BEACON Command Line Interface

use beacon_cli::cli::Commands;
use clap::{ArgAction, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// BEACON - link dump toolkit
///
/// Reads BEACON link dumps, validates their header, and turns every body line
/// into a link between two identifiers.
///
/// # Examples
///
/// ```bash
/// # Validate a dump
/// beacon validate gnd-wikidata.txt
///
/// # Show the header as JSON
/// beacon meta gnd-wikidata.txt --json
///
/// # Export the first 100 links as NDJSON
/// beacon links gnd-wikidata.txt --limit 100
/// ```
#[derive(Parser)]
#[command(name = "beacon")]
#[command(author, version, about = "BEACON - link dump toolkit", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so NDJSON on stdout stays clean
    let level = log_level(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    format!("beacon_stream={}", level)
                        .parse()
                        .expect("valid log directive"),
                )
                .add_directive(
                    format!("beacon_cli={}", level)
                        .parse()
                        .expect("valid log directive"),
                ),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
