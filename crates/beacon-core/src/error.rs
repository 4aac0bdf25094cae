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

//! Error types for meta fields and link construction.

use crate::meta_field::MetaField;
use crate::value_type::ValueType;
use thiserror::Error;

/// An error raised while ingesting meta fields or constructing identifiers.
///
/// Every variant except [`InvalidIdentifier`](Self::InvalidIdentifier) is a
/// format violation: the dump declares a construction rule or dataset value
/// that the BEACON format does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeaconError {
    /// A meta field value failed its field's value type check.
    #[error("Expected value of type [{value_type}] for meta field [{field}], got [{value}]")]
    InvalidMetaValue {
        field: MetaField,
        value_type: ValueType,
        value: String,
    },

    /// A URI pattern uses an expression other than `{ID}` or `{+ID}`.
    #[error("Invalid URI template expression '{expression}' at position {position}")]
    InvalidExpression { expression: String, position: usize },

    /// A URI pattern has unbalanced or nested braces.
    #[error("Malformed URI template at position {position}: {message}")]
    MalformedTemplate { position: usize, message: String },

    /// Pattern expansion produced a string that is not a URI.
    #[error("Invalid identifier: '{value}' is not a valid URI")]
    InvalidIdentifier { value: String },
}

impl BeaconError {
    /// Create an invalid meta value error for `field`.
    pub fn invalid_meta_value(field: MetaField, value: impl Into<String>) -> Self {
        Self::InvalidMetaValue {
            field,
            value_type: field.value_type(),
            value: value.into(),
        }
    }

    /// Create a malformed template error.
    #[inline]
    pub fn malformed_template(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            position,
            message: message.into(),
        }
    }

    /// Whether this error reports a format violation in the dump itself.
    #[inline]
    pub fn is_format_violation(&self) -> bool {
        !matches!(self, Self::InvalidIdentifier { .. })
    }

    /// The meta field the error refers to, if any.
    pub fn field(&self) -> Option<MetaField> {
        match self {
            Self::InvalidMetaValue { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type for BEACON core operations.
pub type BeaconResult<T> = Result<T, BeaconError>;
