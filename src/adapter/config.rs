/*
 * Copyright 2019-2020 Wren Powell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde::{Deserialize, Serialize};

use crate::session::{PropertySet, PropertyValue};
use crate::Error;

use super::encoding::NameEncoding;

/// The visibility of a file.
///
/// CMIS repositories have no equivalent concept, so requesting a visibility always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Public,
    Private,
}

/// The configuration for creating or updating an object.
///
/// This type implements `Default` to provide a reasonable default configuration. When
/// deserialized, missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    /// The CMIS properties to set on the created object.
    ///
    /// If `cmis:objectTypeId` is missing, it defaults to `cmis:document` for files and
    /// `cmis:folder` for directories. The `cmis:name` property is always derived from the path.
    ///
    /// The default value is an empty set.
    pub properties: PropertySet,

    /// The CMIS properties to set on folders which are created because they are missing from the
    /// path.
    ///
    /// The default value is an empty set.
    pub directory_properties: PropertySet,

    /// The text encoding of the names in the path.
    ///
    /// The default value is `NameEncoding::Utf8`.
    pub encoding: NameEncoding,

    /// Whether missing parent folders are created.
    ///
    /// The default value is `true`.
    pub auto_create_directories: bool,

    /// The visibility of the created object.
    ///
    /// This is not supported, and setting it causes writes to fail.
    ///
    /// The default value is `None`.
    pub visibility: Option<Visibility>,
}

impl Default for WriteConfig {
    fn default() -> Self {
        WriteConfig {
            properties: PropertySet::new(),
            directory_properties: PropertySet::new(),
            encoding: NameEncoding::Utf8,
            auto_create_directories: true,
            visibility: None,
        }
    }
}

impl WriteConfig {
    /// Create a new `WriteConfig` with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CMIS property `id` on the created object.
    pub fn property(mut self, id: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(id, value);
        self
    }

    /// Use the given `properties` for the created object.
    pub fn properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Set the CMIS property `id` on folders created because they are missing.
    pub fn directory_property(
        mut self,
        id: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.directory_properties.set(id, value);
        self
    }

    /// Use the given text `encoding` for names.
    pub fn encoding(mut self, encoding: NameEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether missing parent folders are created.
    pub fn auto_create_directories(mut self, enabled: bool) -> Self {
        self.auto_create_directories = enabled;
        self
    }

    /// Request the given `visibility` for the created object.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Fail if this config requests a feature the repository doesn't support.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: A visibility was requested.
    pub(crate) fn check_supported(&self) -> crate::Result<()> {
        match self.visibility {
            Some(_) => Err(Error::UnsupportedVisibility),
            None => Ok(()),
        }
    }
}

/// The bounds of a page of directory entries.
///
/// The default value requests every entry, starting from the first, in the repository's default
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// The number of entries to skip in each listed directory.
    pub offset: usize,

    /// The maximum number of entries to return from each listed directory, or `None` to let the
    /// repository decide.
    pub limit: Option<usize>,

    /// Whether to ask the repository to sort entries by name.
    pub order_by_name: bool,
}

impl Pagination {
    /// Create a `Pagination` which skips `offset` entries and returns at most `limit` entries.
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Pagination {
            offset,
            limit,
            order_by_name: false,
        }
    }

    /// Set whether to ask the repository to sort entries by name.
    pub fn order_by_name(mut self, enabled: bool) -> Self {
        self.order_by_name = enabled;
        self
    }
}
