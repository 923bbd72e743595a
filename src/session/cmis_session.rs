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

use static_assertions::assert_obj_safe;

use super::content::ContentStream;
use super::error::SessionResult;
use super::object::{CmisObject, Folder, ObjectId};
use super::property::PropertySet;

/// How to handle objects which are filed in a deleted folder tree as well as in other folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnfileObject {
    /// Unfile the objects from the deleted folders but keep them.
    Unfile,

    /// Delete objects which are only filed in the deleted folders and unfile the rest.
    DeleteSingleFiled,

    /// Delete every object in the tree.
    Delete,
}

/// The property to sort children by when listing a folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    /// The ID of the property to sort by.
    pub property: String,

    /// Whether to sort in ascending order.
    pub ascending: bool,
}

impl OrderBy {
    /// Sort in ascending order of the given `property`.
    pub fn ascending(property: impl Into<String>) -> Self {
        OrderBy {
            property: property.into(),
            ascending: true,
        }
    }
}

/// The page of children to request when listing a folder.
///
/// The default value requests every child in the repository's default order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Paging {
    /// The number of children to skip.
    pub skip_count: usize,

    /// The maximum number of children to return, or `None` to let the repository decide.
    pub max_items: Option<usize>,

    /// The order to return children in, or `None` for the repository's default order.
    pub order_by: Option<OrderBy>,
}

/// A page of children of a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenPage {
    /// The children in this page.
    pub objects: Vec<CmisObject>,

    /// The total number of children of the folder, if the repository reports it.
    pub total: Option<u64>,

    /// Whether there are more children after this page.
    pub has_more: bool,
}

/// A row returned by a CMIS query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// The selected properties, keyed by their query name.
    pub properties: PropertySet,
}

/// A session with a CMIS repository.
///
/// A `CmisSession` provides the remote operations which an adapter translates filesystem calls
/// into. Implementations are responsible for the wire protocol, authentication, and any caching or
/// retrying; the adapter built on top of a session does none of those things.
///
/// Every method is a blocking round-trip to the repository. Object snapshots returned from one call
/// are not updated by later calls.
///
/// Errors are reported with [`SessionError`]. In particular, implementations must return
/// `SessionError::ObjectNotFound` when an object or path does not exist so that adapters can tell
/// missing objects apart from other failures.
///
/// [`SessionError`]: crate::session::SessionError
pub trait CmisSession: fmt::Debug + Send {
    /// Return the root folder of the repository.
    fn root_folder(&mut self) -> SessionResult<Folder>;

    /// Return the object with the given `id`.
    fn object(&mut self, id: &ObjectId) -> SessionResult<CmisObject>;

    /// Return the object at the given absolute `path`.
    ///
    /// Paths are made of `cmis:name` values separated by `/`, with `/` being the root folder.
    fn object_by_path(&mut self, path: &str) -> SessionResult<CmisObject>;

    /// Create a new document in the folder `folder_id` and return its ID.
    ///
    /// The `properties` must contain at least `cmis:name` and `cmis:objectTypeId`.
    fn create_document(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
        content: Option<ContentStream>,
    ) -> SessionResult<ObjectId>;

    /// Create a new folder in the folder `folder_id` and return its ID.
    ///
    /// The `properties` must contain at least `cmis:name` and `cmis:objectTypeId`.
    fn create_folder(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
    ) -> SessionResult<ObjectId>;

    /// Return the content stream of the document `id`.
    ///
    /// This returns `Ok(None)` if the document has no content.
    fn content_stream(&mut self, id: &ObjectId) -> SessionResult<Option<ContentStream>>;

    /// Set the content stream of the document `id`.
    ///
    /// If `overwrite` is `false` and the document already has content, this fails. This returns
    /// the ID of the document, which may differ from `id` if the repository created a new version.
    fn set_content_stream(
        &mut self,
        id: &ObjectId,
        content: ContentStream,
        overwrite: bool,
    ) -> SessionResult<ObjectId>;

    /// Update the given `properties` of the object `id`.
    ///
    /// This returns the updated object, or `None` if the repository did not return one.
    fn update_properties(
        &mut self,
        id: &ObjectId,
        properties: &PropertySet,
    ) -> SessionResult<Option<CmisObject>>;

    /// Move the object `id` from the folder `source_folder_id` to the folder `target_folder_id`.
    ///
    /// This returns the moved object.
    fn move_object(
        &mut self,
        id: &ObjectId,
        source_folder_id: &ObjectId,
        target_folder_id: &ObjectId,
    ) -> SessionResult<CmisObject>;

    /// Delete the object `id`.
    fn delete(&mut self, id: &ObjectId, all_versions: bool) -> SessionResult<()>;

    /// Delete the folder `folder_id` and everything in it.
    ///
    /// This returns the IDs of objects which could not be deleted.
    fn delete_tree(
        &mut self,
        folder_id: &ObjectId,
        all_versions: bool,
        unfile: UnfileObject,
        continue_on_failure: bool,
    ) -> SessionResult<Vec<ObjectId>>;

    /// Return a page of the children of the folder `folder_id`.
    fn children(&mut self, folder_id: &ObjectId, paging: &Paging) -> SessionResult<ChildrenPage>;

    /// Execute a CMIS query `statement` and return the matching rows.
    fn query(&mut self, statement: &str, search_all_versions: bool)
        -> SessionResult<Vec<QueryResult>>;
}

assert_obj_safe!(CmisSession);

impl CmisSession for Box<dyn CmisSession> {
    fn root_folder(&mut self) -> SessionResult<Folder> {
        self.as_mut().root_folder()
    }

    fn object(&mut self, id: &ObjectId) -> SessionResult<CmisObject> {
        self.as_mut().object(id)
    }

    fn object_by_path(&mut self, path: &str) -> SessionResult<CmisObject> {
        self.as_mut().object_by_path(path)
    }

    fn create_document(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
        content: Option<ContentStream>,
    ) -> SessionResult<ObjectId> {
        self.as_mut().create_document(properties, folder_id, content)
    }

    fn create_folder(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
    ) -> SessionResult<ObjectId> {
        self.as_mut().create_folder(properties, folder_id)
    }

    fn content_stream(&mut self, id: &ObjectId) -> SessionResult<Option<ContentStream>> {
        self.as_mut().content_stream(id)
    }

    fn set_content_stream(
        &mut self,
        id: &ObjectId,
        content: ContentStream,
        overwrite: bool,
    ) -> SessionResult<ObjectId> {
        self.as_mut().set_content_stream(id, content, overwrite)
    }

    fn update_properties(
        &mut self,
        id: &ObjectId,
        properties: &PropertySet,
    ) -> SessionResult<Option<CmisObject>> {
        self.as_mut().update_properties(id, properties)
    }

    fn move_object(
        &mut self,
        id: &ObjectId,
        source_folder_id: &ObjectId,
        target_folder_id: &ObjectId,
    ) -> SessionResult<CmisObject> {
        self.as_mut()
            .move_object(id, source_folder_id, target_folder_id)
    }

    fn delete(&mut self, id: &ObjectId, all_versions: bool) -> SessionResult<()> {
        self.as_mut().delete(id, all_versions)
    }

    fn delete_tree(
        &mut self,
        folder_id: &ObjectId,
        all_versions: bool,
        unfile: UnfileObject,
        continue_on_failure: bool,
    ) -> SessionResult<Vec<ObjectId>> {
        self.as_mut()
            .delete_tree(folder_id, all_versions, unfile, continue_on_failure)
    }

    fn children(&mut self, folder_id: &ObjectId, paging: &Paging) -> SessionResult<ChildrenPage> {
        self.as_mut().children(folder_id, paging)
    }

    fn query(
        &mut self,
        statement: &str,
        search_all_versions: bool,
    ) -> SessionResult<Vec<QueryResult>> {
        self.as_mut().query(statement, search_all_versions)
    }
}
