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

//! Data model for BEACON link dumps.
//!
//! This crate holds everything that does not touch a byte stream: the meta
//! field registry and its value types, the meta field store, the URI pattern
//! subset used for identity construction, and the [`Link`] record.
//!
//! # Lexical Analysis
//!
//! The [`lex`] module provides whitespace normalization, tokenizing of link
//! lines and normalization of PREFIX/TARGET patterns. The [`template`]
//! module provides scanning and expansion of `{ID}` and `{+ID}` patterns.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::{lex, Link, MetaField, MetaFields};
//! use std::sync::Arc;
//!
//! let mut builder = MetaFields::builder();
//! let prefix = lex::normalize_template_pattern("http://example.org/").unwrap();
//! builder.put(MetaField::Prefix, prefix).unwrap();
//! let fields = Arc::new(builder.build());
//!
//! let link = Link::new("42", None, "http://other.org/7", fields);
//! assert_eq!(link.source_identifier().unwrap(), "http://example.org/42");
//! ```

mod error;
mod link;
mod meta_field;
mod meta_fields;
mod update;
mod uri;
mod value_type;

pub mod lex;
pub mod template;

pub use error::{BeaconError, BeaconResult};
pub use link::Link;
pub use meta_field::{
    FieldCategory, MetaField, MetaFieldSpec, UnknownMetaField, DEFAULT_META_VALUE,
    DEFAULT_RELATION,
};
pub use meta_fields::{MetaFields, MetaFieldsBuilder};
pub use template::{UriPattern, RESERVED_EXPANSION, SIMPLE_EXPANSION};
pub use update::{ParseUpdateFrequencyError, UpdateFrequency, UpdatePeriod};
pub use uri::{is_uri, Uri};
pub use value_type::{parse_timestamp, ValueType, BEACON_LITERAL};
