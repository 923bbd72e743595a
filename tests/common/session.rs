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

use std::collections::HashMap;

use rstest::*;

use cmis_fs::adapter::{AdapterOptions, CmisAdapter};
use cmis_fs::session::{
    names, BaseType, ChildrenPage, CmisObject, CmisSession, ContentStream, Fileable, Folder,
    MemorySession, ObjectId, OtherObject, Paging, PropertySet, QueryResult, SessionResult,
    UnfileObject,
};

/// A call made to a `RecordingSession`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RootFolder,
    Object(ObjectId),
    ObjectByPath(String),
    CreateDocument { name: String, folder: ObjectId },
    CreateFolder { name: String, folder: ObjectId },
    ContentStream(ObjectId),
    SetContentStream(ObjectId),
    UpdateProperties(ObjectId),
    MoveObject {
        id: ObjectId,
        source: ObjectId,
        target: ObjectId,
    },
    Delete(ObjectId),
    DeleteTree(ObjectId),
    Children(ObjectId),
    Query(String),
}

/// A `MemorySession` which records every call made to it.
///
/// Objects in `others` are returned by path lookups in place of the objects in `inner`.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub inner: MemorySession,
    pub calls: Vec<Call>,
    pub others: HashMap<String, CmisObject>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `location` resolve to a policy, which can't be filed in folders.
    pub fn add_policy(&mut self, location: &str) -> ObjectId {
        let id = ObjectId::new(format!("policy:{}", location));
        let name = location.rsplit('/').next().unwrap_or_default();
        let properties = PropertySet::new()
            .with(names::NAME, name)
            .with(names::BASE_TYPE_ID, BaseType::Policy.as_str());
        let policy = OtherObject::new(id.clone(), BaseType::Policy, properties);
        self.others
            .insert(location.to_owned(), CmisObject::Other(policy));
        id
    }

    /// Forget the calls recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Return the number of recorded calls which match `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Return the `(name, parent)` of every recorded folder creation.
    pub fn created_folders(&self) -> Vec<(String, ObjectId)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::CreateFolder { name, folder } => Some((name.clone(), folder.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn lookups(&self) -> usize {
        self.count(|call| matches!(call, Call::ObjectByPath(_)))
    }

    pub fn creations(&self) -> usize {
        self.count(|call| {
            matches!(
                call,
                Call::CreateFolder { .. } | Call::CreateDocument { .. }
            )
        })
    }

    pub fn moves(&self) -> usize {
        self.count(|call| matches!(call, Call::MoveObject { .. }))
    }

    pub fn updates(&self) -> usize {
        self.count(|call| matches!(call, Call::UpdateProperties(_)))
    }

    /// Return the ID of the object at `path` without recording the lookup.
    pub fn id_of(&mut self, path: &str) -> ObjectId {
        self.inner.object_by_path(path).unwrap().id().clone()
    }

    /// Return the ID of the root folder without recording the lookup.
    pub fn root_id(&mut self) -> ObjectId {
        self.inner.root_folder().unwrap().id().clone()
    }
}

fn name_of(properties: &PropertySet) -> String {
    properties.string(names::NAME).unwrap_or_default().to_owned()
}

impl CmisSession for RecordingSession {
    fn root_folder(&mut self) -> SessionResult<Folder> {
        self.calls.push(Call::RootFolder);
        self.inner.root_folder()
    }

    fn object(&mut self, id: &ObjectId) -> SessionResult<CmisObject> {
        self.calls.push(Call::Object(id.clone()));
        self.inner.object(id)
    }

    fn object_by_path(&mut self, path: &str) -> SessionResult<CmisObject> {
        self.calls.push(Call::ObjectByPath(path.to_owned()));
        match self.others.get(path) {
            Some(object) => Ok(object.clone()),
            None => self.inner.object_by_path(path),
        }
    }

    fn create_document(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
        content: Option<ContentStream>,
    ) -> SessionResult<ObjectId> {
        self.calls.push(Call::CreateDocument {
            name: name_of(properties),
            folder: folder_id.clone(),
        });
        self.inner.create_document(properties, folder_id, content)
    }

    fn create_folder(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
    ) -> SessionResult<ObjectId> {
        self.calls.push(Call::CreateFolder {
            name: name_of(properties),
            folder: folder_id.clone(),
        });
        self.inner.create_folder(properties, folder_id)
    }

    fn content_stream(&mut self, id: &ObjectId) -> SessionResult<Option<ContentStream>> {
        self.calls.push(Call::ContentStream(id.clone()));
        self.inner.content_stream(id)
    }

    fn set_content_stream(
        &mut self,
        id: &ObjectId,
        content: ContentStream,
        overwrite: bool,
    ) -> SessionResult<ObjectId> {
        self.calls.push(Call::SetContentStream(id.clone()));
        self.inner.set_content_stream(id, content, overwrite)
    }

    fn update_properties(
        &mut self,
        id: &ObjectId,
        properties: &PropertySet,
    ) -> SessionResult<Option<CmisObject>> {
        self.calls.push(Call::UpdateProperties(id.clone()));
        self.inner.update_properties(id, properties)
    }

    fn move_object(
        &mut self,
        id: &ObjectId,
        source_folder_id: &ObjectId,
        target_folder_id: &ObjectId,
    ) -> SessionResult<CmisObject> {
        self.calls.push(Call::MoveObject {
            id: id.clone(),
            source: source_folder_id.clone(),
            target: target_folder_id.clone(),
        });
        self.inner
            .move_object(id, source_folder_id, target_folder_id)
    }

    fn delete(&mut self, id: &ObjectId, all_versions: bool) -> SessionResult<()> {
        self.calls.push(Call::Delete(id.clone()));
        self.inner.delete(id, all_versions)
    }

    fn delete_tree(
        &mut self,
        folder_id: &ObjectId,
        all_versions: bool,
        unfile: UnfileObject,
        continue_on_failure: bool,
    ) -> SessionResult<Vec<ObjectId>> {
        self.calls.push(Call::DeleteTree(folder_id.clone()));
        self.inner
            .delete_tree(folder_id, all_versions, unfile, continue_on_failure)
    }

    fn children(&mut self, folder_id: &ObjectId, paging: &Paging) -> SessionResult<ChildrenPage> {
        self.calls.push(Call::Children(folder_id.clone()));
        self.inner.children(folder_id, paging)
    }

    fn query(
        &mut self,
        statement: &str,
        search_all_versions: bool,
    ) -> SessionResult<Vec<QueryResult>> {
        self.calls.push(Call::Query(statement.to_owned()));
        self.inner.query(statement, search_all_versions)
    }
}

/// An adapter over a session which records its calls.
pub type TestAdapter = CmisAdapter<RecordingSession>;

/// Return an adapter rooted at the root folder.
#[fixture]
pub fn adapter() -> TestAdapter {
    AdapterOptions::new().build(RecordingSession::new())
}

/// Return an adapter whose paths are relative to `/TMS/Clients`.
#[fixture]
pub fn prefixed_adapter() -> TestAdapter {
    AdapterOptions::new()
        .prefix("/TMS/Clients")
        .build(RecordingSession::new())
}
