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

//! Meta command - print a dump's header

use super::open_parser;
use crate::cli::ParseArgs;
use crate::error::CliError;
use beacon_core::{MetaField, MetaFields};
use std::collections::BTreeMap;

/// Print the meta fields of a BEACON dump.
///
/// Only the header is read. By default fields left at their default value
/// are omitted; `all` prints every field in canonical order.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, the header is malformed, or
/// JSON serialization fails.
pub fn meta(args: &ParseArgs, all: bool, json: bool) -> Result<(), CliError> {
    let mut parser = open_parser(args)?;
    let fields = selected_fields(parser.meta_fields(), all);
    parser.close();

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        for (field, value) in &fields {
            println!("{}: {}", field, value);
        }
    }
    Ok(())
}

fn selected_fields(meta_fields: &MetaFields, all: bool) -> BTreeMap<MetaField, String> {
    let collect = |(field, value): (MetaField, &str)| (field, value.to_string());
    if all {
        meta_fields.iter().map(collect).collect()
    } else {
        meta_fields.explicit().map(collect).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Field selection tests ====================

    #[test]
    fn test_selected_fields_explicit_only() {
        let meta = MetaFields::builder()
            .with(MetaField::Name, "Example")
            .unwrap()
            .build();

        let fields = selected_fields(&meta, false);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[&MetaField::Name], "Example");
    }

    #[test]
    fn test_selected_fields_all() {
        let fields = selected_fields(&MetaFields::new(), true);
        assert_eq!(fields.len(), MetaField::ALL.len());
        assert_eq!(fields[&MetaField::Format], "BEACON");
    }

    #[test]
    fn test_json_keys_are_field_names() {
        let meta = MetaFields::builder()
            .with(MetaField::Message, "Hello")
            .unwrap()
            .build();

        let json = serde_json::to_string(&selected_fields(&meta, false)).unwrap();
        assert_eq!(json, r#"{"MESSAGE":"Hello"}"#);
    }
}
