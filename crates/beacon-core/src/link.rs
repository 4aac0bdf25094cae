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

//! Links and identity construction.
//!
//! A [`Link`] keeps the raw tokens of one body line together with the sealed
//! meta fields of its dump. Identifiers and the relation type are derived on
//! every call by expanding the PREFIX, TARGET and RELATION patterns.
//!
//! # Examples
//!
//! ```rust
//! use beacon_core::{Link, MetaField, MetaFields};
//! use std::sync::Arc;
//!
//! let fields = Arc::new(
//!     MetaFields::builder()
//!         .with(MetaField::Prefix, "http://example.org/{+ID}")
//!         .and_then(|b| b.with(MetaField::Target, "http://viaf.org/viaf/{+ID}"))
//!         .unwrap()
//!         .build(),
//! );
//!
//! let link = Link::new("123", Some("See also".to_string()), "456", fields);
//! assert_eq!(link.source_identifier().unwrap(), "http://example.org/123");
//! assert_eq!(link.target_identifier().unwrap(), "http://viaf.org/viaf/456");
//! assert_eq!(link.annotation(), "See also");
//! ```

use crate::error::BeaconResult;
use crate::meta_field::MetaField;
use crate::meta_fields::MetaFields;
use crate::template::UriPattern;
use crate::uri::Uri;
use std::fmt;
use std::sync::Arc;

/// One link of a dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    source_token: String,
    annotation_token: Option<String>,
    target_token: String,
    meta_fields: Arc<MetaFields>,
}

impl Link {
    pub fn new(
        source_token: impl Into<String>,
        annotation_token: Option<String>,
        target_token: impl Into<String>,
        meta_fields: Arc<MetaFields>,
    ) -> Self {
        Self {
            source_token: source_token.into(),
            annotation_token,
            target_token: target_token.into(),
            meta_fields,
        }
    }

    #[inline]
    pub fn source_token(&self) -> &str {
        &self.source_token
    }

    /// The annotation token as written, if the line had one.
    #[inline]
    pub fn annotation_token(&self) -> Option<&str> {
        self.annotation_token.as_deref()
    }

    #[inline]
    pub fn target_token(&self) -> &str {
        &self.target_token
    }

    #[inline]
    pub fn meta_fields(&self) -> &Arc<MetaFields> {
        &self.meta_fields
    }

    /// The annotation token, or the MESSAGE value when the line had none.
    pub fn annotation(&self) -> &str {
        self.annotation_token
            .as_deref()
            .unwrap_or_else(|| self.meta_fields.value(MetaField::Message))
    }

    /// Expand PREFIX with the source token.
    ///
    /// # Errors
    ///
    /// `BeaconError::InvalidIdentifier` when the expansion is not a URI.
    pub fn source_identifier(&self) -> BeaconResult<Uri> {
        self.expand(MetaField::Prefix, &self.source_token)
    }

    /// Expand TARGET with the target token.
    ///
    /// # Errors
    ///
    /// `BeaconError::InvalidIdentifier` when the expansion is not a URI.
    pub fn target_identifier(&self) -> BeaconResult<Uri> {
        self.expand(MetaField::Target, &self.target_token)
    }

    /// The relation type.
    ///
    /// A RELATION value without expressions is used as is. Otherwise it is
    /// expanded with the annotation token, or with the empty string when the
    /// line had no annotation.
    pub fn relation_type(&self) -> BeaconResult<Uri> {
        let relation = self.meta_fields.value(MetaField::Relation);
        let pattern = UriPattern::parse(relation)?;
        if pattern.is_literal() {
            return Uri::parse(relation);
        }
        Uri::parse(&pattern.expand(self.annotation_token().unwrap_or_default()))
    }

    fn expand(&self, field: MetaField, token: &str) -> BeaconResult<Uri> {
        let pattern = UriPattern::parse(self.meta_fields.value(field))?;
        Uri::parse(&pattern.expand(token))
    }
}

impl fmt::Display for Link {
    /// The raw tokens, pipe separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.annotation_token {
            Some(annotation) => write!(
                f,
                "{}|{}|{}",
                self.source_token, annotation, self.target_token
            ),
            None => write!(f, "{}||{}", self.source_token, self.target_token),
        }
    }
}
