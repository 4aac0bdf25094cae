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

//! BEACON CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **validate**: Parse a dump end to end and summarize links and problems
//! - **meta**: Print the header's meta fields as text or JSON
//! - **links**: Export links as NDJSON, one object per line
//! - **stats**: Count body lines, links, unparsable lines per reason, and
//!   distinct targets
//!
//! All commands accept `--prefix` and `--target` to seed defaults for dumps
//! that omit those meta-lines, plus `--max-line-length` and `--timeout-secs`
//! to bound work on untrusted input.
//!
//! # Examples
//!
//! ```no_run
//! use beacon_cli::cli::ParseArgs;
//! use beacon_cli::commands::validate;
//!
//! # fn main() -> Result<(), beacon_cli::error::CliError> {
//! let args = ParseArgs::new("links.txt");
//! validate(&args, false)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
