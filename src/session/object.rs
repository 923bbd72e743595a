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

use std::fmt;

use serde::{Deserialize, Serialize};

use super::property::{names, PropertySet};

/// The opaque ID of an object in a CMIS repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create an `ObjectId` from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        ObjectId(id.into())
    }

    /// Return the string representation of this ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        ObjectId::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        ObjectId(id)
    }
}

/// The base type of an object in a CMIS repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Document,
    Folder,
    Relationship,
    Policy,
    Item,
    Secondary,
}

impl BaseType {
    /// Return the `cmis:baseTypeId` value of this base type.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Document => "cmis:document",
            BaseType::Folder => "cmis:folder",
            BaseType::Relationship => "cmis:relationship",
            BaseType::Policy => "cmis:policy",
            BaseType::Item => "cmis:item",
            BaseType::Secondary => "cmis:secondary",
        }
    }

    /// Parse a `cmis:baseTypeId` value.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "cmis:document" => Some(BaseType::Document),
            "cmis:folder" => Some(BaseType::Folder),
            "cmis:relationship" => Some(BaseType::Relationship),
            "cmis:policy" => Some(BaseType::Policy),
            "cmis:item" => Some(BaseType::Item),
            "cmis:secondary" => Some(BaseType::Secondary),
            _ => None,
        }
    }
}

/// An object which can be filed in folders and moved between them.
///
/// Only objects which implement this trait can be moved. Use [`CmisObject::as_fileable`] to check
/// whether an object has this capability.
pub trait Fileable {
    /// The ID of this object.
    fn id(&self) -> &ObjectId;

    /// The name of this object.
    fn name(&self) -> Option<&str>;

    /// The ID of the folder this object is currently filed in.
    ///
    /// Documents may be filed in several folders, in which case this is the first one. This returns
    /// `None` for the root folder and for unfiled documents.
    fn parent_id(&self) -> Option<&ObjectId>;
}

/// A document, which is a leaf object that may carry a content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: ObjectId,
    properties: PropertySet,
    parent_ids: Vec<ObjectId>,
}

impl Document {
    /// Create a new `Document` filed in the folders with the given `parent_ids`.
    pub fn new(id: ObjectId, properties: PropertySet, parent_ids: Vec<ObjectId>) -> Self {
        Document {
            id,
            properties,
            parent_ids,
        }
    }

    /// The properties of this document.
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// The IDs of every folder this document is filed in.
    pub fn parent_ids(&self) -> &[ObjectId] {
        &self.parent_ids
    }
}

impl Fileable for Document {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.properties.string(names::NAME)
    }

    fn parent_id(&self) -> Option<&ObjectId> {
        self.parent_ids.first()
    }
}

/// A folder, which is a container for other fileable objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    id: ObjectId,
    properties: PropertySet,
    parent_id: Option<ObjectId>,
}

impl Folder {
    /// Create a new `Folder` which is a child of `parent_id`.
    ///
    /// The root folder has no parent.
    pub fn new(id: ObjectId, properties: PropertySet, parent_id: Option<ObjectId>) -> Self {
        Folder {
            id,
            properties,
            parent_id,
        }
    }

    /// The properties of this folder.
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// The absolute path of this folder in the repository.
    pub fn path(&self) -> Option<&str> {
        self.properties.string(names::PATH)
    }

    /// Return whether this is the root folder of the repository.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Fileable for Folder {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.properties.string(names::NAME)
    }

    fn parent_id(&self) -> Option<&ObjectId> {
        self.parent_id.as_ref()
    }
}

/// An object which is neither a document nor a folder, like a relationship or a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherObject {
    id: ObjectId,
    base_type: BaseType,
    properties: PropertySet,
}

impl OtherObject {
    /// Create a new `OtherObject` of the given `base_type`.
    pub fn new(id: ObjectId, base_type: BaseType, properties: PropertySet) -> Self {
        OtherObject {
            id,
            base_type,
            properties,
        }
    }
}

/// An object in a CMIS repository.
///
/// This is a snapshot of the object at the time it was fetched from the session. It holds no
/// reference to the session, so every change has to go through [`CmisSession`].
///
/// [`CmisSession`]: crate::session::CmisSession
#[derive(Debug, Clone, PartialEq)]
pub enum CmisObject {
    Document(Document),
    Folder(Folder),
    Other(OtherObject),
}

impl CmisObject {
    /// The ID of this object.
    pub fn id(&self) -> &ObjectId {
        match self {
            CmisObject::Document(document) => &document.id,
            CmisObject::Folder(folder) => &folder.id,
            CmisObject::Other(other) => &other.id,
        }
    }

    /// The properties of this object.
    pub fn properties(&self) -> &PropertySet {
        match self {
            CmisObject::Document(document) => &document.properties,
            CmisObject::Folder(folder) => &folder.properties,
            CmisObject::Other(other) => &other.properties,
        }
    }

    /// The value of the `cmis:name` property of this object.
    pub fn name(&self) -> Option<&str> {
        self.properties().string(names::NAME)
    }

    /// The base type of this object.
    pub fn base_type(&self) -> BaseType {
        match self {
            CmisObject::Document(_) => BaseType::Document,
            CmisObject::Folder(_) => BaseType::Folder,
            CmisObject::Other(other) => other.base_type,
        }
    }

    /// Return this object as a [`Fileable`] if it can be filed in folders.
    pub fn as_fileable(&self) -> Option<&dyn Fileable> {
        match self {
            CmisObject::Document(document) => Some(document),
            CmisObject::Folder(folder) => Some(folder),
            CmisObject::Other(_) => None,
        }
    }

    /// Return this object as a `Folder` if it is one.
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            CmisObject::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    /// Convert this object into a `Folder` if it is one.
    pub fn into_folder(self) -> Option<Folder> {
        match self {
            CmisObject::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    /// Return this object as a `Document` if it is one.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            CmisObject::Document(document) => Some(document),
            _ => None,
        }
    }
}

impl From<Document> for CmisObject {
    fn from(document: Document) -> Self {
        CmisObject::Document(document)
    }
}

impl From<Folder> for CmisObject {
    fn from(folder: Folder) -> Self {
        CmisObject::Folder(folder)
    }
}
