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

//! Registry of recognized meta fields.
//!
//! The set of meta fields is closed. Each [`MetaField`] indexes a static
//! [`MetaFieldSpec`] record holding its name, category, default value and
//! value type; nothing about a field is decided at runtime.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::{FieldCategory, MetaField, ValueType};
//!
//! let field: MetaField = "PREFIX".parse().unwrap();
//! assert_eq!(field, MetaField::Prefix);
//! assert_eq!(field.category(), FieldCategory::LinkConstruction);
//! assert_eq!(field.default_value(), "{+ID}");
//! assert_eq!(field.value_type(), ValueType::UriPattern);
//! assert!(!field.validate("http://example.org/{bogus}"));
//! ```

use crate::template::RESERVED_EXPANSION;
use crate::value_type::{ValueType, BEACON_LITERAL};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default value of every field that declares none.
pub const DEFAULT_META_VALUE: &str = "";

/// Default relation type: `rdfs:seeAlso`.
pub const DEFAULT_RELATION: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";

/// What a meta field describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldCategory {
    /// Rules that turn tokens into identifiers and relation types.
    LinkConstruction,
    /// Metadata about the dump itself.
    LinkDump,
    /// Metadata about the source dataset.
    SourceDataset,
    /// Metadata about the target dataset.
    TargetDataset,
}

/// A recognized BEACON meta field.
///
/// Variants are declared in canonical order, which is also their `Ord`
/// order and the order used by textual representations of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum MetaField {
    Annotation,
    Contact,
    Creator,
    Description,
    Feed,
    Format,
    Homepage,
    Institution,
    Message,
    Name,
    Prefix,
    Relation,
    Sourceset,
    Target,
    Targetset,
    Timestamp,
    Update,
}

/// Static description of a meta field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaFieldSpec {
    pub name: &'static str,
    pub category: FieldCategory,
    pub default_value: &'static str,
    pub value_type: ValueType,
}

const fn spec(
    name: &'static str,
    category: FieldCategory,
    default_value: &'static str,
    value_type: ValueType,
) -> MetaFieldSpec {
    MetaFieldSpec {
        name,
        category,
        default_value,
        value_type,
    }
}

use FieldCategory::{LinkConstruction, LinkDump, SourceDataset, TargetDataset};

/// Indexed by `MetaField as usize`.
static REGISTRY: [MetaFieldSpec; 17] = [
    spec("ANNOTATION", LinkConstruction, DEFAULT_META_VALUE, ValueType::Uri),
    spec("CONTACT", LinkDump, DEFAULT_META_VALUE, ValueType::FreeString),
    spec("CREATOR", LinkDump, DEFAULT_META_VALUE, ValueType::FreeString),
    spec("DESCRIPTION", LinkDump, DEFAULT_META_VALUE, ValueType::FreeString),
    spec("FEED", LinkDump, DEFAULT_META_VALUE, ValueType::Url),
    spec("FORMAT", LinkDump, BEACON_LITERAL, ValueType::Beacon),
    spec("HOMEPAGE", LinkDump, DEFAULT_META_VALUE, ValueType::Url),
    spec("INSTITUTION", TargetDataset, DEFAULT_META_VALUE, ValueType::Uri),
    spec("MESSAGE", LinkConstruction, DEFAULT_META_VALUE, ValueType::FreeString),
    spec("NAME", TargetDataset, DEFAULT_META_VALUE, ValueType::FreeString),
    spec("PREFIX", LinkConstruction, RESERVED_EXPANSION, ValueType::UriPattern),
    spec("RELATION", LinkConstruction, DEFAULT_RELATION, ValueType::UriPattern),
    spec("SOURCESET", SourceDataset, DEFAULT_META_VALUE, ValueType::Uri),
    spec("TARGET", LinkConstruction, RESERVED_EXPANSION, ValueType::UriPattern),
    spec("TARGETSET", TargetDataset, DEFAULT_META_VALUE, ValueType::Uri),
    spec("TIMESTAMP", LinkDump, DEFAULT_META_VALUE, ValueType::Timestamp),
    spec("UPDATE", LinkDump, DEFAULT_META_VALUE, ValueType::Update),
];

/// Error returned when a name matches no meta field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized meta field: {0}")]
pub struct UnknownMetaField(pub String);

impl MetaField {
    /// All meta fields in canonical order.
    pub const ALL: [MetaField; 17] = [
        MetaField::Annotation,
        MetaField::Contact,
        MetaField::Creator,
        MetaField::Description,
        MetaField::Feed,
        MetaField::Format,
        MetaField::Homepage,
        MetaField::Institution,
        MetaField::Message,
        MetaField::Name,
        MetaField::Prefix,
        MetaField::Relation,
        MetaField::Sourceset,
        MetaField::Target,
        MetaField::Targetset,
        MetaField::Timestamp,
        MetaField::Update,
    ];

    /// The registry record for this field.
    #[inline]
    pub fn spec(self) -> &'static MetaFieldSpec {
        &REGISTRY[self as usize]
    }

    /// Upper-case field name as written in meta lines.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    #[inline]
    pub fn category(self) -> FieldCategory {
        self.spec().category
    }

    #[inline]
    pub fn default_value(self) -> &'static str {
        self.spec().default_value
    }

    #[inline]
    pub fn value_type(self) -> ValueType {
        self.spec().value_type
    }

    /// Check `value` against this field's value type.
    #[inline]
    pub fn validate(self, value: &str) -> bool {
        self.value_type().validate(value)
    }

    /// Whether the field's value is a URI pattern expanded per link.
    #[inline]
    pub fn is_pattern(self) -> bool {
        self.value_type() == ValueType::UriPattern
    }

    /// Look up a field by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<MetaField> {
        MetaField::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetaField {
    type Err = UnknownMetaField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaField::from_name(s).ok_or_else(|| UnknownMetaField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Registry tests ====================

    #[test]
    fn test_registry_matches_declaration_order() {
        for (index, field) in MetaField::ALL.iter().enumerate() {
            assert_eq!(*field as usize, index);
            assert_eq!(field.spec().name, REGISTRY[index].name);
        }
    }

    #[test]
    fn test_canonical_order_is_sorted_by_name() {
        let names: Vec<_> = MetaField::ALL.iter().map(|f| f.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_defaults_are_valid_values() {
        for field in MetaField::ALL {
            let default = field.default_value();
            if field.value_type() == ValueType::Url
                || field.value_type() == ValueType::Timestamp
                || field.value_type() == ValueType::Update
            {
                // Empty defaults stand for "undeclared" and are never validated.
                assert_eq!(default, DEFAULT_META_VALUE, "{}", field);
            } else {
                assert!(field.validate(default), "{} default {:?}", field, default);
            }
        }
    }

    #[test]
    fn test_link_construction_fields() {
        let fields: Vec<_> = MetaField::ALL
            .iter()
            .copied()
            .filter(|f| f.category() == FieldCategory::LinkConstruction)
            .collect();
        assert_eq!(
            fields,
            vec![
                MetaField::Annotation,
                MetaField::Message,
                MetaField::Prefix,
                MetaField::Relation,
                MetaField::Target
            ]
        );
    }

    #[test]
    fn test_pattern_fields() {
        assert!(MetaField::Prefix.is_pattern());
        assert!(MetaField::Target.is_pattern());
        assert!(MetaField::Relation.is_pattern());
        assert!(!MetaField::Annotation.is_pattern());
    }

    // ==================== Name lookup tests ====================

    #[test]
    fn test_from_str_exact_names() {
        for field in MetaField::ALL {
            assert_eq!(field.name().parse::<MetaField>(), Ok(field));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!(
            "prefix".parse::<MetaField>(),
            Err(UnknownMetaField("prefix".to_string()))
        );
        assert!(MetaField::from_name("REVISIT").is_none());
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(MetaField::Targetset.to_string(), "TARGETSET");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MetaField::Format.default_value(), "BEACON");
        assert_eq!(MetaField::Prefix.default_value(), "{+ID}");
        assert_eq!(MetaField::Target.default_value(), "{+ID}");
        assert_eq!(MetaField::Relation.default_value(), DEFAULT_RELATION);
        assert_eq!(MetaField::Message.default_value(), "");
    }
}
