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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};

/// Parser options shared by every command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ParseArgs {
    /// Input dump path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Maximum line length in bytes
    #[arg(long, default_value_t = 1_000_000)]
    pub max_line_length: usize,

    /// Abort parsing after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Default PREFIX when the dump declares none
    #[arg(long)]
    pub prefix: Option<String>,

    /// Default TARGET when the dump declares none
    #[arg(long)]
    pub target: Option<String>,
}

impl ParseArgs {
    /// Options for `file` with every other setting at its default.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            max_line_length: 1_000_000,
            timeout_secs: None,
            prefix: None,
            target: None,
        }
    }
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use beacon_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a BEACON dump
    ///
    /// Parses the header and every body line, then prints the number of
    /// links and of lines that could not be turned into links.
    Validate {
        #[command(flatten)]
        args: ParseArgs,

        /// Strict mode (fail on unparsable lines or invalid identifiers)
        #[arg(short, long)]
        strict: bool,
    },

    /// Print the dump's meta fields
    Meta {
        #[command(flatten)]
        args: ParseArgs,

        /// Include fields left at their default value
        #[arg(short, long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export links as NDJSON
    Links {
        #[command(flatten)]
        args: ParseArgs,

        /// Stop after this many links
        #[arg(short, long)]
        limit: Option<usize>,

        /// Also emit records for lines that produced no valid link
        #[arg(long)]
        include_unparsable: bool,
    },

    /// Show statistics about a dump
    Stats {
        #[command(flatten)]
        args: ParseArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Validate { args, strict } => commands::validate(&args, strict),
            Commands::Meta { args, all, json } => commands::meta(&args, all, json),
            Commands::Links {
                args,
                limit,
                include_unparsable,
            } => commands::links(&args, limit, include_unparsable),
            Commands::Stats { args, json } => commands::stats(&args, json),
        }
    }
}
