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

//! Meta field stores.
//!
//! A store is written through [`MetaFieldsBuilder`] while a header is being
//! read and then sealed into a [`MetaFields`], which has no write access at
//! all. Sealed stores are shared by the parser and every link it produces.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::{MetaField, MetaFields};
//!
//! let mut builder = MetaFields::builder();
//! builder.put(MetaField::Prefix, "http://example.org/{+ID}").unwrap();
//! builder.put(MetaField::Name, "Example").unwrap();
//! let fields = builder.build();
//!
//! assert_eq!(fields.value(MetaField::Prefix), "http://example.org/{+ID}");
//! assert_eq!(fields.value(MetaField::Target), "{+ID}");
//! assert!(fields.is_default(MetaField::Target));
//! assert!(!fields.is_default(MetaField::Name));
//!
//! // Values are validated on write.
//! let mut builder = fields.to_builder();
//! assert!(builder.put(MetaField::Feed, "not a url").is_err());
//! ```

use crate::error::{BeaconError, BeaconResult};
use crate::meta_field::MetaField;
use crate::update::UpdateFrequency;
use crate::value_type::parse_timestamp;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;

/// Explicit values keyed by field; fields at their default are not stored.
type FieldMap = BTreeMap<MetaField, String>;

fn value_of(fields: &FieldMap, field: MetaField) -> &str {
    fields
        .get(&field)
        .map(String::as_str)
        .unwrap_or_else(|| field.default_value())
}

/// Writable meta field store used while a header is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaFieldsBuilder {
    fields: FieldMap,
}

impl MetaFieldsBuilder {
    /// Create an empty builder; every field reports its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`, replacing any previous value.
    ///
    /// Setting a field to its default value clears it.
    ///
    /// # Errors
    ///
    /// `BeaconError::InvalidMetaValue` when `value` fails the field's value
    /// type. The builder is left unchanged.
    pub fn put(&mut self, field: MetaField, value: impl Into<String>) -> BeaconResult<()> {
        let value = value.into();
        if !field.validate(&value) {
            return Err(BeaconError::invalid_meta_value(field, value));
        }
        if value == field.default_value() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, value);
        }
        Ok(())
    }

    /// Chaining form of [`put`](Self::put).
    pub fn with(mut self, field: MetaField, value: impl Into<String>) -> BeaconResult<Self> {
        self.put(field, value)?;
        Ok(self)
    }

    /// Current effective value of `field`.
    #[inline]
    pub fn value(&self, field: MetaField) -> &str {
        value_of(&self.fields, field)
    }

    /// Whether `field` currently reports its default.
    #[inline]
    pub fn is_default(&self, field: MetaField) -> bool {
        !self.fields.contains_key(&field)
    }

    /// Seal the store.
    pub fn build(self) -> MetaFields {
        MetaFields {
            fields: self.fields,
        }
    }
}

/// Read-only meta field store.
///
/// Every stored value passed its field's validator when it was written, and
/// absent fields report their default. Equality, hashing and the textual
/// representation all depend on effective values only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MetaFields {
    fields: FieldMap,
}

impl MetaFields {
    /// A store where every field has its default value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty builder.
    #[inline]
    pub fn builder() -> MetaFieldsBuilder {
        MetaFieldsBuilder::new()
    }

    /// Start a builder seeded with this store's values.
    pub fn to_builder(&self) -> MetaFieldsBuilder {
        MetaFieldsBuilder {
            fields: self.fields.clone(),
        }
    }

    /// Effective value of `field`: the stored value or the field default.
    #[inline]
    pub fn value(&self, field: MetaField) -> &str {
        value_of(&self.fields, field)
    }

    /// Whether `field` is unset or set to its default value.
    #[inline]
    pub fn is_default(&self, field: MetaField) -> bool {
        !self.fields.contains_key(&field)
    }

    /// Effective values of all fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MetaField, &str)> + '_ {
        MetaField::ALL
            .iter()
            .map(move |&field| (field, self.value(field)))
    }

    /// Explicitly set fields in canonical order.
    pub fn explicit(&self) -> impl Iterator<Item = (MetaField, &str)> + '_ {
        self.fields
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Number of explicitly set fields.
    #[inline]
    pub fn explicit_count(&self) -> usize {
        self.fields.len()
    }

    /// The declared UPDATE frequency.
    pub fn update_frequency(&self) -> Option<UpdateFrequency> {
        self.fields
            .get(&MetaField::Update)
            .and_then(|value| value.parse().ok())
    }

    /// The declared TIMESTAMP.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.fields
            .get(&MetaField::Timestamp)
            .and_then(|value| parse_timestamp(value))
    }

    /// When the dump is next expected to change, from TIMESTAMP and UPDATE.
    pub fn next_update(&self) -> Option<NaiveDateTime> {
        self.update_frequency()?.next_update(self.timestamp()?)
    }
}

impl fmt::Display for MetaFields {
    /// `{ANNOTATION=, CONTACT=, ...}` with every field in canonical order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field, value)?;
        }
        f.write_str("}")
    }
}
