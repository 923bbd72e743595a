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

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::session::{names, BaseType, PropertySet, PropertyValue};

use super::path::{join_location, PathPrefix};

/// The type of an entry in a filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// A regular file, which is a CMIS document.
    File,

    /// A directory, which is a CMIS folder.
    Dir,
}

impl FileType {
    /// Return the name of this type as it appears in metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::File => "file",
            FileType::Dir => "dir",
        }
    }
}

/// The CMIS properties which metadata fields are read from.
///
/// This is injected into an adapter when it is opened. Use [`ResultMap::DEFAULT`] unless the
/// repository stores these values under custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultMap {
    /// The property containing the size of the file in bytes.
    pub size: &'static str,

    /// The property containing the MIME type of the file.
    pub mimetype: &'static str,

    /// The property containing the modification time of the file.
    pub timestamp: &'static str,
}

impl ResultMap {
    /// The standard CMIS content stream and modification date properties.
    pub const DEFAULT: ResultMap = ResultMap {
        size: names::CONTENT_STREAM_LENGTH,
        mimetype: names::CONTENT_STREAM_MIME_TYPE,
        timestamp: names::LAST_MODIFICATION_DATE,
    };
}

impl Default for ResultMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Metadata about an object in the repository.
///
/// The derived fields are extracted from the object's CMIS properties according to a
/// [`ResultMap`]. Every CMIS property is also kept in `properties`, flattened to a string.
///
/// This serializes as a flat map in which the derived fields take precedence over properties with
/// the same key. A missing `type` serializes as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// The path of the object relative to the adapter prefix.
    ///
    /// This is built from the name the repository reports, which may differ from the name passed
    /// to the adapter.
    pub path: String,

    /// The type of the object, or `None` if it is neither a file nor a directory.
    pub file_type: Option<FileType>,

    /// The size of the file in bytes.
    pub size: Option<u64>,

    /// The MIME type of the file.
    pub mimetype: Option<String>,

    /// The modification time of the object as a Unix timestamp.
    pub timestamp: Option<i64>,

    /// Every CMIS property of the object, flattened to a string.
    pub properties: BTreeMap<String, String>,
}

impl Metadata {
    /// Return whether this is the metadata of a directory.
    pub fn is_dir(&self) -> bool {
        self.file_type == Some(FileType::Dir)
    }

    /// Return whether this is the metadata of a regular file.
    pub fn is_file(&self) -> bool {
        self.file_type == Some(FileType::File)
    }

    /// Return whether a derived field replaces the property named `key`.
    fn is_derived(&self, key: &str) -> bool {
        match key {
            "path" | "type" => true,
            "size" => self.size.is_some(),
            "mimetype" => self.mimetype.is_some(),
            "timestamp" => self.timestamp.is_some(),
            _ => false,
        }
    }

    /// Return the metadata as a flat map of strings.
    ///
    /// Derived fields take precedence over properties with the same key. A missing `type` is
    /// rendered as `false`, and other missing derived fields are omitted.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.properties.clone();
        map.insert(String::from("path"), self.path.clone());
        map.insert(
            String::from("type"),
            self.file_type
                .map_or("false", FileType::as_str)
                .to_owned(),
        );
        if let Some(size) = self.size {
            map.insert(String::from("size"), size.to_string());
        }
        if let Some(mimetype) = &self.mimetype {
            map.insert(String::from("mimetype"), mimetype.clone());
        }
        if let Some(timestamp) = self.timestamp {
            map.insert(String::from("timestamp"), timestamp.to_string());
        }
        map
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.properties {
            if !self.is_derived(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("path", &self.path)?;
        match self.file_type {
            Some(file_type) => map.serialize_entry("type", file_type.as_str())?,
            None => map.serialize_entry("type", &false)?,
        }
        if let Some(size) = self.size {
            map.serialize_entry("size", &size)?;
        }
        if let Some(mimetype) = &self.mimetype {
            map.serialize_entry("mimetype", mimetype)?;
        }
        if let Some(timestamp) = self.timestamp {
            map.serialize_entry("timestamp", &timestamp)?;
        }
        map.end()
    }
}

/// Flatten the values of a property into a single string.
///
/// Date-times are rendered in the ATOM format and multiple values are joined with `", "`.
pub fn flatten(values: &[PropertyValue]) -> String {
    values
        .iter()
        .map(PropertyValue::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalize the `properties` of an object whose parent folder is at `parent_location`.
pub(crate) fn normalize(
    properties: &PropertySet,
    parent_location: &str,
    prefix: &PathPrefix,
    result_map: &ResultMap,
) -> Metadata {
    let raw = properties
        .iter()
        .map(|(id, values)| (id.to_owned(), flatten(values)))
        .collect::<BTreeMap<_, _>>();

    let file_type = if raw.contains_key(names::PATH) {
        Some(FileType::Dir)
    } else if raw.get(names::BASE_TYPE_ID).map(String::as_str)
        == Some(BaseType::Document.as_str())
    {
        Some(FileType::File)
    } else {
        None
    };

    let name = raw.get(names::NAME).map(String::as_str).unwrap_or_default();
    let path = prefix.remove(&join_location(parent_location, name));

    let size = raw
        .get(result_map.size)
        .and_then(|size| size.parse::<u64>().ok());
    let mimetype = raw.get(result_map.mimetype).cloned();
    let timestamp = raw
        .get(result_map.timestamp)
        .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
        .map(|date| date.timestamp());

    Metadata {
        path,
        file_type,
        size,
        mimetype,
        timestamp,
        properties: raw,
    }
}
