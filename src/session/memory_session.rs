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

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use super::cmis_session::{ChildrenPage, CmisSession, Paging, QueryResult, UnfileObject};
use super::content::ContentStream;
use super::error::{SessionError, SessionResult};
use super::object::{BaseType, CmisObject, Document, Folder, ObjectId};
use super::open_session::OpenSession;
use super::property::{names, PropertySet};
use super::query::Query;

/// The content of a document stored in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredContent {
    data: Vec<u8>,
    mime_type: String,
    file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Document {
        parents: Vec<ObjectId>,
        content: Option<StoredContent>,
    },
    Folder {
        parent: Option<ObjectId>,
        children: Vec<ObjectId>,
    },
}

/// An object stored in a `MemorySession`.
#[derive(Debug, Clone, PartialEq)]
struct Node {
    properties: PropertySet,
    kind: NodeKind,
}

impl Node {
    fn name(&self) -> &str {
        self.properties.string(names::NAME).unwrap_or_default()
    }

    fn parents(&self) -> Vec<ObjectId> {
        match &self.kind {
            NodeKind::Document { parents, .. } => parents.clone(),
            NodeKind::Folder { parent, .. } => parent.iter().cloned().collect(),
        }
    }

    fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }
}

/// The configuration for opening a `MemorySession`.
///
/// Every session opened with this config is a new, empty repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfig {}

impl MemoryConfig {
    /// Create a new `MemoryConfig`.
    pub fn new() -> Self {
        MemoryConfig {}
    }
}

impl OpenSession for MemoryConfig {
    type Session = MemorySession;

    fn open(&self) -> crate::Result<Self::Session> {
        Ok(MemorySession::new())
    }
}

/// A `CmisSession` which stores a repository in memory.
///
/// Unlike other `CmisSession` implementations, the repository behind a `MemorySession` is not
/// persistent and is only accessible to the current process. This session is useful for testing.
///
/// It implements the object model closely enough to exercise an adapter: a folder tree with unique
/// names per folder, documents which may be filed in several folders, content streams, moves,
/// tree deletion, paged children and a small subset of the query language. Versioning is not
/// supported and the `all_versions` arguments are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySession {
    nodes: HashMap<ObjectId, Node>,
    root_id: ObjectId,
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySession {
    /// Create a new `MemorySession` which contains only a root folder.
    pub fn new() -> Self {
        let root_id = new_id();
        let now = Utc::now();
        let properties = PropertySet::new()
            .with(names::NAME, "")
            .with(names::OBJECT_TYPE_ID, BaseType::Folder.as_str())
            .with(names::CREATION_DATE, now)
            .with(names::LAST_MODIFICATION_DATE, now);
        let root = Node {
            properties,
            kind: NodeKind::Folder {
                parent: None,
                children: Vec::new(),
            },
        };

        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), root);
        MemorySession { nodes, root_id }
    }

    /// Return the number of objects in the repository, including the root folder.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return whether the repository contains only the root folder.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn node(&self, id: &ObjectId) -> SessionResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| SessionError::ObjectNotFound(id.to_string()))
    }

    fn node_mut(&mut self, id: &ObjectId) -> SessionResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SessionError::ObjectNotFound(id.to_string()))
    }

    /// Return the children of the folder `id`, failing if it is not a folder.
    fn folder_children(&self, id: &ObjectId) -> SessionResult<&[ObjectId]> {
        match &self.node(id)?.kind {
            NodeKind::Folder { children, .. } => Ok(children),
            NodeKind::Document { .. } => Err(SessionError::InvalidArgument(format!(
                "object {} is not a folder",
                id
            ))),
        }
    }

    fn child_by_name(&self, folder_id: &ObjectId, name: &str) -> Option<&ObjectId> {
        self.folder_children(folder_id)
            .ok()?
            .iter()
            .find(|child| self.nodes.get(*child).map(Node::name) == Some(name))
    }

    /// Return the absolute path of the folder `id`.
    fn folder_path(&self, id: &ObjectId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id.clone());
        while let Some(current_id) = current {
            match self.nodes.get(&current_id) {
                Some(node) => {
                    if current_id != self.root_id {
                        names.push(node.name().to_owned());
                    }
                    current = node.parents().into_iter().next();
                }
                None => break,
            }
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Return whether `folder_id` is `ancestor_id` or one of its descendants.
    fn is_within(&self, folder_id: &ObjectId, ancestor_id: &ObjectId) -> bool {
        let mut current = Some(folder_id.clone());
        while let Some(current_id) = current {
            if &current_id == ancestor_id {
                return true;
            }
            current = self
                .nodes
                .get(&current_id)
                .and_then(|node| node.parents().into_iter().next());
        }
        false
    }

    /// Return a snapshot of the object `id`.
    fn snapshot(&self, id: &ObjectId) -> SessionResult<CmisObject> {
        let node = self.node(id)?;
        let mut properties = node.properties.clone();
        properties.set(names::OBJECT_ID, id.as_str());

        Ok(match &node.kind {
            NodeKind::Document { parents, .. } => {
                properties.set(names::BASE_TYPE_ID, BaseType::Document.as_str());
                CmisObject::Document(Document::new(id.clone(), properties, parents.clone()))
            }
            NodeKind::Folder { parent, .. } => {
                properties.set(names::BASE_TYPE_ID, BaseType::Folder.as_str());
                properties.set(names::PATH, self.folder_path(id));
                if let Some(parent) = parent {
                    properties.set(names::PARENT_ID, parent.as_str());
                }
                CmisObject::Folder(Folder::new(id.clone(), properties, parent.clone()))
            }
        })
    }

    fn resolve_path(&self, path: &str) -> SessionResult<ObjectId> {
        if !path.starts_with('/') {
            return Err(SessionError::InvalidArgument(format!(
                "path must be absolute: {}",
                path
            )));
        }

        let mut current = self.root_id.clone();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            current = self
                .child_by_name(&current, segment)
                .cloned()
                .ok_or_else(|| SessionError::ObjectNotFound(path.to_owned()))?;
        }
        Ok(current)
    }

    fn check_name_available(
        &self,
        folder_id: &ObjectId,
        name: &str,
        except: Option<&ObjectId>,
    ) -> SessionResult<()> {
        match self.child_by_name(folder_id, name) {
            Some(existing) if Some(existing) != except => Err(
                SessionError::NameConstraintViolation(format!(
                    "an object named '{}' already exists in {}",
                    name,
                    self.folder_path(folder_id)
                )),
            ),
            _ => Ok(()),
        }
    }

    /// Validate the `properties` of a new object to be filed in `folder_id`.
    fn check_new_object(&self, properties: &PropertySet, folder_id: &ObjectId) -> SessionResult<()> {
        self.folder_children(folder_id)?;

        let name = properties
            .string(names::NAME)
            .ok_or_else(|| SessionError::InvalidArgument(String::from("cmis:name is required")))?;
        if name.is_empty() || name.contains('/') {
            return Err(SessionError::InvalidArgument(format!(
                "invalid name '{}'",
                name
            )));
        }
        if !properties.contains(names::OBJECT_TYPE_ID) {
            return Err(SessionError::InvalidArgument(String::from(
                "cmis:objectTypeId is required",
            )));
        }

        self.check_name_available(folder_id, name, None)
    }

    fn insert_child(&mut self, folder_id: &ObjectId, id: ObjectId, node: Node) {
        if let Some(Node {
            kind: NodeKind::Folder { children, .. },
            ..
        }) = self.nodes.get_mut(folder_id)
        {
            children.push(id.clone());
        }
        self.nodes.insert(id, node);
    }

    fn unlink_child(&mut self, folder_id: &ObjectId, id: &ObjectId) {
        if let Some(Node {
            kind: NodeKind::Folder { children, .. },
            ..
        }) = self.nodes.get_mut(folder_id)
        {
            children.retain(|child| child != id);
        }
    }

    /// Remove the object `id`, unlinking it from every folder it is filed in.
    fn remove_node(&mut self, id: &ObjectId) {
        if let Some(node) = self.nodes.remove(id) {
            for parent in node.parents() {
                self.unlink_child(&parent, id);
            }
        }
    }

    /// Return the IDs of `folder_id` and every folder below it.
    fn collect_folders(&self, folder_id: &ObjectId) -> Vec<ObjectId> {
        let mut folders = vec![folder_id.clone()];
        let mut index = 0;
        while index < folders.len() {
            if let Ok(children) = self.folder_children(&folders[index]) {
                let subfolders = children
                    .iter()
                    .filter(|child| self.nodes.get(*child).map_or(false, Node::is_folder))
                    .cloned()
                    .collect::<Vec<_>>();
                folders.extend(subfolders);
            }
            index += 1;
        }
        folders
    }
}

fn new_id() -> ObjectId {
    ObjectId::new(Uuid::new_v4().to_string())
}

/// Set the content-related properties of a document to match `content`.
fn apply_content_properties(properties: &mut PropertySet, content: Option<&StoredContent>) {
    match content {
        Some(content) => {
            properties.set(names::CONTENT_STREAM_LENGTH, content.data.len() as i64);
            properties.set(names::CONTENT_STREAM_MIME_TYPE, content.mime_type.as_str());
            match &content.file_name {
                Some(file_name) => properties.set(names::CONTENT_STREAM_FILE_NAME, file_name.as_str()),
                None => {
                    properties.remove(names::CONTENT_STREAM_FILE_NAME);
                }
            }
        }
        None => {
            properties.remove(names::CONTENT_STREAM_LENGTH);
            properties.remove(names::CONTENT_STREAM_MIME_TYPE);
            properties.remove(names::CONTENT_STREAM_FILE_NAME);
        }
    }
}

fn read_content(content: ContentStream) -> SessionResult<StoredContent> {
    let mime_type = content.mime_type().to_owned();
    let file_name = content.file_name().map(str::to_owned);
    let data = content
        .into_bytes()
        .map_err(|error| SessionError::Runtime(anyhow::Error::from(error)))?;
    Ok(StoredContent {
        data,
        mime_type,
        file_name,
    })
}

/// Compare two objects by the flattened value of `property`.
fn compare_by(property: &str, left: &CmisObject, right: &CmisObject) -> Ordering {
    let key = |object: &CmisObject| {
        object
            .properties()
            .first(property)
            .map(|value| value.to_string())
    };
    key(left).cmp(&key(right))
}

impl CmisSession for MemorySession {
    fn root_folder(&mut self) -> SessionResult<Folder> {
        let root_id = self.root_id.clone();
        self.snapshot(&root_id)?
            .into_folder()
            .ok_or_else(|| SessionError::Runtime(anyhow::anyhow!("the root is not a folder")))
    }

    fn object(&mut self, id: &ObjectId) -> SessionResult<CmisObject> {
        self.snapshot(id)
    }

    fn object_by_path(&mut self, path: &str) -> SessionResult<CmisObject> {
        let id = self.resolve_path(path)?;
        self.snapshot(&id)
    }

    fn create_document(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
        content: Option<ContentStream>,
    ) -> SessionResult<ObjectId> {
        self.check_new_object(properties, folder_id)?;
        let content = content.map(read_content).transpose()?;

        let now = Utc::now();
        let mut properties = properties.clone();
        properties.set(names::CREATION_DATE, now);
        properties.set(names::LAST_MODIFICATION_DATE, now);
        apply_content_properties(&mut properties, content.as_ref());

        let id = new_id();
        let node = Node {
            properties,
            kind: NodeKind::Document {
                parents: vec![folder_id.clone()],
                content,
            },
        };
        self.insert_child(folder_id, id.clone(), node);
        Ok(id)
    }

    fn create_folder(
        &mut self,
        properties: &PropertySet,
        folder_id: &ObjectId,
    ) -> SessionResult<ObjectId> {
        self.check_new_object(properties, folder_id)?;

        let now = Utc::now();
        let mut properties = properties.clone();
        properties.set(names::CREATION_DATE, now);
        properties.set(names::LAST_MODIFICATION_DATE, now);

        let id = new_id();
        let node = Node {
            properties,
            kind: NodeKind::Folder {
                parent: Some(folder_id.clone()),
                children: Vec::new(),
            },
        };
        self.insert_child(folder_id, id.clone(), node);
        Ok(id)
    }

    fn content_stream(&mut self, id: &ObjectId) -> SessionResult<Option<ContentStream>> {
        match &self.node(id)?.kind {
            NodeKind::Document { content, .. } => Ok(content.as_ref().map(|content| {
                let stream = ContentStream::from_bytes(content.data.clone())
                    .with_mime_type(content.mime_type.as_str());
                match &content.file_name {
                    Some(file_name) => stream.with_file_name(file_name.as_str()),
                    None => stream,
                }
            })),
            NodeKind::Folder { .. } => Err(SessionError::Constraint(format!(
                "folder {} has no content stream",
                id
            ))),
        }
    }

    fn set_content_stream(
        &mut self,
        id: &ObjectId,
        content: ContentStream,
        overwrite: bool,
    ) -> SessionResult<ObjectId> {
        let stored = read_content(content)?;
        let node = self.node_mut(id)?;
        match &mut node.kind {
            NodeKind::Document { content, .. } => {
                if content.is_some() && !overwrite {
                    return Err(SessionError::Constraint(format!(
                        "document {} already has content",
                        id
                    )));
                }
                *content = Some(stored);
                apply_content_properties(&mut node.properties, content.as_ref());
                node.properties
                    .set(names::LAST_MODIFICATION_DATE, Utc::now());
                Ok(id.clone())
            }
            NodeKind::Folder { .. } => Err(SessionError::Constraint(format!(
                "folder {} can not have a content stream",
                id
            ))),
        }
    }

    fn update_properties(
        &mut self,
        id: &ObjectId,
        properties: &PropertySet,
    ) -> SessionResult<Option<CmisObject>> {
        let node = self.node(id)?;

        for read_only in [names::OBJECT_ID, names::BASE_TYPE_ID, names::PATH] {
            if properties.contains(read_only) {
                return Err(SessionError::Constraint(format!(
                    "{} can not be updated",
                    read_only
                )));
            }
        }

        if let Some(name) = properties.string(names::NAME) {
            if name.is_empty() || name.contains('/') {
                return Err(SessionError::InvalidArgument(format!(
                    "invalid name '{}'",
                    name
                )));
            }
            for parent in node.parents() {
                self.check_name_available(&parent, name, Some(id))?;
            }
        }

        let node = self.node_mut(id)?;
        node.properties.merge(properties);
        node.properties
            .set(names::LAST_MODIFICATION_DATE, Utc::now());

        self.snapshot(id).map(Some)
    }

    fn move_object(
        &mut self,
        id: &ObjectId,
        source_folder_id: &ObjectId,
        target_folder_id: &ObjectId,
    ) -> SessionResult<CmisObject> {
        let node = self.node(id)?;
        let name = node.name().to_owned();
        let is_folder = node.is_folder();

        if !node.parents().contains(source_folder_id) {
            return Err(SessionError::InvalidArgument(format!(
                "object {} is not filed in folder {}",
                id, source_folder_id
            )));
        }
        self.folder_children(target_folder_id)?;
        if is_folder && self.is_within(target_folder_id, id) {
            return Err(SessionError::Constraint(format!(
                "folder {} can not be moved into itself",
                id
            )));
        }
        self.check_name_available(target_folder_id, &name, Some(id))?;

        if source_folder_id != target_folder_id {
            self.unlink_child(source_folder_id, id);
            if let Some(Node {
                kind: NodeKind::Folder { children, .. },
                ..
            }) = self.nodes.get_mut(target_folder_id)
            {
                children.push(id.clone());
            }

            let node = self.node_mut(id)?;
            match &mut node.kind {
                NodeKind::Document { parents, .. } => {
                    for parent in parents.iter_mut() {
                        if parent == source_folder_id {
                            *parent = target_folder_id.clone();
                        }
                    }
                }
                NodeKind::Folder { parent, .. } => *parent = Some(target_folder_id.clone()),
            }
        }

        self.snapshot(id)
    }

    fn delete(&mut self, id: &ObjectId, _all_versions: bool) -> SessionResult<()> {
        if id == &self.root_id {
            return Err(SessionError::Constraint(String::from(
                "the root folder can not be deleted",
            )));
        }
        if let NodeKind::Folder { children, .. } = &self.node(id)?.kind {
            if !children.is_empty() {
                return Err(SessionError::Constraint(format!(
                    "folder {} is not empty",
                    id
                )));
            }
        }

        self.remove_node(id);
        Ok(())
    }

    fn delete_tree(
        &mut self,
        folder_id: &ObjectId,
        _all_versions: bool,
        unfile: UnfileObject,
        _continue_on_failure: bool,
    ) -> SessionResult<Vec<ObjectId>> {
        self.folder_children(folder_id)?;
        if folder_id == &self.root_id {
            return Err(SessionError::Constraint(String::from(
                "the root folder can not be deleted",
            )));
        }

        let folders = self.collect_folders(folder_id);
        let folder_set = folders.iter().cloned().collect::<HashSet<_>>();

        let mut documents = Vec::new();
        for folder in &folders {
            for child in self.folder_children(folder)? {
                if !folder_set.contains(child) && !documents.contains(child) {
                    documents.push(child.clone());
                }
            }
        }

        for document_id in documents {
            let outside_parents = self
                .node(&document_id)?
                .parents()
                .into_iter()
                .filter(|parent| !folder_set.contains(parent))
                .collect::<Vec<_>>();
            let delete = match unfile {
                UnfileObject::Delete => true,
                UnfileObject::DeleteSingleFiled => outside_parents.is_empty(),
                UnfileObject::Unfile => false,
            };

            if delete {
                self.remove_node(&document_id);
            } else if let Some(Node {
                kind: NodeKind::Document { parents, .. },
                ..
            }) = self.nodes.get_mut(&document_id)
            {
                *parents = outside_parents;
            }
        }

        for folder in folders.iter().rev() {
            self.remove_node(folder);
        }

        Ok(Vec::new())
    }

    fn children(&mut self, folder_id: &ObjectId, paging: &Paging) -> SessionResult<ChildrenPage> {
        let mut objects = self
            .folder_children(folder_id)?
            .iter()
            .map(|child| self.snapshot(child))
            .collect::<SessionResult<Vec<_>>>()?;

        if let Some(order_by) = &paging.order_by {
            objects.sort_by(|left, right| {
                let ordering = compare_by(&order_by.property, left, right);
                if order_by.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        let total = objects.len();
        let objects = objects
            .into_iter()
            .skip(paging.skip_count)
            .take(paging.max_items.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();
        let has_more = paging.skip_count + objects.len() < total;

        Ok(ChildrenPage {
            objects,
            total: Some(total as u64),
            has_more,
        })
    }

    fn query(
        &mut self,
        statement: &str,
        _search_all_versions: bool,
    ) -> SessionResult<Vec<QueryResult>> {
        let query = Query::parse(statement)?;

        let mut matches = self
            .nodes
            .iter()
            .filter(|(id, _)| **id != self.root_id)
            .filter(|(_, node)| match query.base_type() {
                BaseType::Folder => node.is_folder(),
                _ => !node.is_folder(),
            })
            .filter(|(_, node)| query.matches_name(node.name()))
            .map(|(id, node)| (node.name().to_owned(), id.clone()))
            .collect::<Vec<_>>();
        matches.sort();

        matches
            .into_iter()
            .map(|(_, id)| {
                self.snapshot(&id).map(|object| QueryResult {
                    properties: object.properties().clone(),
                })
            })
            .collect()
    }
}
