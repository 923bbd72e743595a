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

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// The IDs of the CMIS properties used by this crate.
pub mod names {
    pub const NAME: &str = "cmis:name";
    pub const OBJECT_ID: &str = "cmis:objectId";
    pub const OBJECT_TYPE_ID: &str = "cmis:objectTypeId";
    pub const BASE_TYPE_ID: &str = "cmis:baseTypeId";
    pub const SECONDARY_OBJECT_TYPE_IDS: &str = "cmis:secondaryObjectTypeIds";
    pub const PATH: &str = "cmis:path";
    pub const PARENT_ID: &str = "cmis:parentId";
    pub const CREATION_DATE: &str = "cmis:creationDate";
    pub const LAST_MODIFICATION_DATE: &str = "cmis:lastModificationDate";
    pub const CONTENT_STREAM_LENGTH: &str = "cmis:contentStreamLength";
    pub const CONTENT_STREAM_MIME_TYPE: &str = "cmis:contentStreamMimeType";
    pub const CONTENT_STREAM_FILE_NAME: &str = "cmis:contentStreamFileName";
}

/// The `strftime` format of a date-time property rendered as a string.
///
/// This is the ATOM format, which is RFC 3339 without fractional seconds.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// A single value of a CMIS property.
///
/// When deserialized, values are matched in declaration order, so a string which parses as an RFC
/// 3339 timestamp becomes a `DateTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    DateTime(DateTime<FixedOffset>),
    String(String),
    Id(String),
}

impl PropertyValue {
    /// Return the value as a string slice if it is a string or an ID.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) | PropertyValue::Id(value) => Some(value),
            _ => None,
        }
    }

    /// Return the value as an integer if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the value as a date-time if it is one.
    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            PropertyValue::DateTime(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(value) => write!(f, "{}", value),
            PropertyValue::Integer(value) => write!(f, "{}", value),
            PropertyValue::Decimal(value) => write!(f, "{}", value),
            PropertyValue::DateTime(value) => write!(f, "{}", value.format(DATE_TIME_FORMAT)),
            PropertyValue::String(value) | PropertyValue::Id(value) => f.write_str(value),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Decimal(value)
    }
}

impl From<DateTime<FixedOffset>> for PropertyValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        PropertyValue::DateTime(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(value.into())
    }
}

/// A set of CMIS properties.
///
/// This maps property IDs like `cmis:name` to one or more values. Single-valued properties are
/// stored as a list with one element. Properties are kept in order of their ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet {
    properties: BTreeMap<String, Vec<PropertyValue>>,
}

impl PropertySet {
    /// Create a new empty `PropertySet`.
    pub fn new() -> Self {
        PropertySet {
            properties: BTreeMap::new(),
        }
    }

    /// Return this set with the property `id` set to the single `value`.
    pub fn with(mut self, id: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(id, value);
        self
    }

    /// Set the property `id` to the single `value`, replacing any existing values.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(id.into(), vec![value.into()]);
    }

    /// Set the property `id` to the given list of `values`, replacing any existing values.
    pub fn set_values(&mut self, id: impl Into<String>, values: Vec<PropertyValue>) {
        self.properties.insert(id.into(), values);
    }

    /// Set the property `id` to `value` unless it already has a value.
    pub fn set_default(&mut self, id: &str, value: impl Into<PropertyValue>) {
        if !self.contains(id) {
            self.set(id, value);
        }
    }

    /// Return the values of the property `id`.
    pub fn get(&self, id: &str) -> Option<&[PropertyValue]> {
        self.properties.get(id).map(Vec::as_slice)
    }

    /// Return the first value of the property `id`.
    pub fn first(&self, id: &str) -> Option<&PropertyValue> {
        self.properties.get(id).and_then(|values| values.first())
    }

    /// Return the first value of the property `id` if it is a string or an ID.
    pub fn string(&self, id: &str) -> Option<&str> {
        self.first(id).and_then(PropertyValue::as_str)
    }

    /// Return whether the property `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.properties.contains_key(id)
    }

    /// Remove the property `id` and return its values.
    pub fn remove(&mut self, id: &str) -> Option<Vec<PropertyValue>> {
        self.properties.remove(id)
    }

    /// Copy every property in `other` into this set, replacing properties with the same ID.
    pub fn merge(&mut self, other: &PropertySet) {
        for (id, values) in &other.properties {
            self.properties.insert(id.clone(), values.clone());
        }
    }

    /// Return an iterator over the IDs and values of the properties in this set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.properties.iter(),
        }
    }

    /// Return the number of properties in this set.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Return whether this set is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// An iterator over the properties in a [`PropertySet`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Vec<PropertyValue>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [PropertyValue]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(id, values)| (id.as_str(), values.as_slice()))
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a str, &'a [PropertyValue]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
