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

use std::io::Read;

use tracing::{debug, trace};

use crate::session::{
    names, BaseType, CmisObject, CmisSession, ContentStream, Fileable, Folder, Paging,
    PropertySet, SessionResult, UnfileObject,
};
use crate::{Error, Result};

use super::config::{Visibility, WriteConfig};
use super::encoding::encode_name;
use super::filesystem::{FileContents, FilesystemAdapter};
use super::metadata::{normalize, Metadata, ResultMap};
use super::path::{join_location, split_location, PathPrefix};
use super::resolver::{create_folder, ensure_directory, lookup};

/// A filesystem adapter backed by a CMIS repository.
///
/// A `CmisAdapter` translates filesystem operations into calls on a [`CmisSession`]. Every path is
/// prefixed with a fixed location in the repository, and results are normalized into
/// [`Metadata`] values.
///
/// The adapter keeps no state besides its configuration; every operation asks the session for the
/// current state of the repository. Operations which take several round-trips, like [`rename`],
/// are not atomic.
///
/// You can open an adapter with [`AdapterOptions`].
///
/// [`CmisSession`]: crate::session::CmisSession
/// [`rename`]: crate::adapter::FilesystemAdapter::rename
/// [`AdapterOptions`]: crate::adapter::AdapterOptions
#[derive(Debug)]
pub struct CmisAdapter<S: CmisSession> {
    pub(super) session: S,
    pub(super) prefix: PathPrefix,
    pub(super) result_map: ResultMap,
}

impl<S: CmisSession> CmisAdapter<S> {
    /// Create a new `CmisAdapter` with the default configuration which wraps `session`.
    pub fn new(session: S) -> Self {
        CmisAdapter {
            session,
            prefix: PathPrefix::default(),
            result_map: ResultMap::DEFAULT,
        }
    }

    /// The prefix which is applied to every path.
    pub fn prefix(&self) -> &PathPrefix {
        &self.prefix
    }

    /// The map of CMIS properties to metadata fields used by this adapter.
    pub fn result_map(&self) -> &ResultMap {
        &self.result_map
    }

    /// Return the location of `path` in the repository.
    ///
    /// # Errors
    /// - `Error::InvalidName`: The `path` refers to a location outside of the prefix.
    pub fn apply_prefix(&self, path: &str) -> Result<String> {
        self.prefix.apply(path)
    }

    /// Return the path of the repository `location` relative to the prefix.
    pub fn remove_prefix(&self, location: &str) -> String {
        self.prefix.remove(location)
    }

    /// Return a reference to the underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Return a mutable reference to the underlying session.
    ///
    /// This can be used to run queries or other operations which the adapter doesn't expose.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Consume this adapter and return the underlying session.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Return the folder at `path`, creating missing folders along the way if configured to.
    ///
    /// # Errors
    /// - `Error::NotFound`: The folder does not exist and auto-creation is disabled.
    /// - `Error::NotDirectory`: A component of the path is not a folder.
    /// - `Error::InvalidName`: A name can not be encoded for the repository.
    pub fn ensure_directory(&mut self, path: &str, config: &WriteConfig) -> Result<Folder> {
        let location = self.prefix.apply(path)?;
        ensure_directory(&mut self.session, &location, config)
    }

    /// Update arbitrary CMIS `properties` of the object at `path` and return its metadata.
    ///
    /// This can be used to set properties which can't be set on creation, like
    /// `cmis:secondaryObjectTypeIds`.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    pub fn update_metadata(&mut self, path: &str, properties: &PropertySet) -> Result<Metadata> {
        let location = self.prefix.apply(path)?;
        let target = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;

        debug!(path = %location, count = properties.len(), "Updating properties");
        let updated = self
            .session
            .update_properties(target.id(), properties)
            .map_err(Error::not_found_at(path))?;
        let object = match updated {
            Some(object) => object,
            None => self.session.object(target.id())?,
        };

        Ok(self.normalize_at(&object, &location))
    }

    /// Normalize the `object` at `location`.
    pub(super) fn normalize_at(&self, object: &CmisObject, location: &str) -> Metadata {
        match split_location(location) {
            Some((parent, _)) => self.normalize_child(object, &parent),
            None => {
                // The repository may give the root folder a name, but its path is always empty.
                let mut metadata = self.normalize_child(object, "/");
                metadata.path = self.prefix.remove(location);
                metadata
            }
        }
    }

    /// Normalize an `object` which is a child of the folder at `parent`.
    pub(super) fn normalize_child(&self, object: &CmisObject, parent: &str) -> Metadata {
        normalize(object.properties(), parent, &self.prefix, &self.result_map)
    }

    /// Create a document at `path` with the given `content`.
    fn create_document(
        &mut self,
        path: &str,
        content: ContentStream,
        config: &WriteConfig,
    ) -> Result<Metadata> {
        config.check_supported()?;

        let location = self.prefix.apply(path)?;
        let (parent, leaf) =
            split_location(&location).ok_or_else(|| Error::InvalidName(path.to_owned()))?;
        let name = encode_name(&leaf, config.encoding)?;

        let folder = ensure_directory(&mut self.session, &parent, config)?;
        let parent = folder.path().map_or(parent, str::to_owned);

        let mut properties = config.properties.clone();
        properties.set(names::NAME, name.as_str());
        properties.set_default(names::OBJECT_TYPE_ID, BaseType::Document.as_str());

        debug!(path = %location, length = ?content.length(), "Creating document");
        let id = self
            .session
            .create_document(&properties, folder.id(), Some(content))
            .map_err(Error::not_found_at(&parent))?;
        let object = self.session.object(&id)?;

        Ok(self.normalize_child(&object, &parent))
    }

    /// Replace the content of the document at `path`.
    fn replace_content(
        &mut self,
        path: &str,
        content: ContentStream,
        config: &WriteConfig,
    ) -> Result<Metadata> {
        config.check_supported()?;

        let location = self.prefix.apply(path)?;
        let object = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;
        if object.as_document().is_none() {
            return Err(Error::NotFile(path.to_owned()));
        }

        debug!(path = %location, length = ?content.length(), "Replacing content");
        let id = self
            .session
            .set_content_stream(object.id(), content, true)
            .map_err(Error::not_found_at(path))?;
        let object = self.session.object(&id)?;

        Ok(self.normalize_at(&object, &location))
    }

    /// Look up the document at `path` and return it along with its content stream.
    fn document_content(&mut self, path: &str) -> Result<(CmisObject, Option<ContentStream>)> {
        let location = self.prefix.apply(path)?;
        let object = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;
        if object.as_document().is_none() {
            return Err(Error::NotFile(path.to_owned()));
        }

        let content = self
            .session
            .content_stream(object.id())
            .map_err(Error::not_found_at(path))?;
        Ok((object, content))
    }

    /// Append the children of the folder at `location` to `entries`.
    fn list_children(
        &mut self,
        location: &str,
        recursive: bool,
        entries: &mut Vec<Metadata>,
    ) -> SessionResult<()> {
        let object = lookup(&mut self.session, location)?;
        let folder = match object {
            CmisObject::Folder(folder) => folder,
            _ => return Ok(()),
        };

        let mut paging = Paging::default();
        loop {
            let page = self.session.children(folder.id(), &paging)?;
            paging.skip_count += page.objects.len();

            for child in &page.objects {
                let metadata = self.normalize_child(child, location);
                let is_dir = metadata.is_dir();
                entries.push(metadata);

                if recursive && is_dir {
                    let child_location = join_location(location, child.name().unwrap_or_default());
                    self.list_children(&child_location, true, entries)?;
                }
            }

            if !page.has_more || page.objects.is_empty() {
                break;
            }
        }

        Ok(())
    }
}

fn read_all(reader: &mut dyn Read) -> Result<ContentStream> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(ContentStream::from_bytes(buffer))
}

impl<S: CmisSession> FilesystemAdapter for CmisAdapter<S> {
    fn write(&mut self, path: &str, contents: &[u8], config: &WriteConfig) -> Result<Metadata> {
        self.create_document(path, ContentStream::from_bytes(contents.to_vec()), config)
    }

    fn write_stream(
        &mut self,
        path: &str,
        reader: &mut dyn Read,
        config: &WriteConfig,
    ) -> Result<Metadata> {
        config.check_supported()?;
        let content = read_all(reader)?;
        self.create_document(path, content, config)
    }

    fn update(&mut self, path: &str, contents: &[u8], config: &WriteConfig) -> Result<Metadata> {
        self.replace_content(path, ContentStream::from_bytes(contents.to_vec()), config)
    }

    fn update_stream(
        &mut self,
        path: &str,
        reader: &mut dyn Read,
        config: &WriteConfig,
    ) -> Result<Metadata> {
        config.check_supported()?;
        let content = read_all(reader)?;
        self.replace_content(path, content, config)
    }

    fn read(&mut self, path: &str) -> Result<Option<FileContents>> {
        let location = self.prefix.apply(path)?;
        let (object, content) = self.document_content(path)?;
        let content = match content {
            Some(content) => content,
            None => {
                trace!(path = %location, "Document has no content");
                return Ok(None);
            }
        };

        Ok(Some(FileContents {
            contents: content.into_bytes()?,
            metadata: self.normalize_at(&object, &location),
        }))
    }

    fn read_stream(&mut self, path: &str) -> Result<Option<ContentStream>> {
        let (_, content) = self.document_content(path)?;
        Ok(content)
    }

    fn rename(&mut self, path: &str, new_path: &str) -> Result<bool> {
        self.rename_object(path, new_path)
    }

    fn copy(&mut self, path: &str, new_path: &str) -> Result<bool> {
        let content = match self.read_stream(path)? {
            Some(content) => content,
            None => return Ok(false),
        };

        let location = self.prefix.apply(new_path)?;
        debug!(path = %location, "Copying document");
        self.create_document(new_path, content, &WriteConfig::default())?;
        Ok(true)
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let location = self.prefix.apply(path)?;
        let object = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;

        debug!(path = %location, "Deleting object");
        self.session
            .delete(object.id(), true)
            .map_err(Error::not_found_at(path))
    }

    fn delete_dir(&mut self, path: &str) -> Result<bool> {
        let location = self.prefix.apply(path)?;
        let folder = match lookup(&mut self.session, &location) {
            Ok(CmisObject::Folder(folder)) => folder,
            Ok(_) => return Ok(false),
            Err(error) if error.is_not_found() => return Ok(false),
            Err(error) => return Err(error.into()),
        };

        debug!(path = %location, "Deleting folder tree");
        let failed = self
            .session
            .delete_tree(folder.id(), true, UnfileObject::Delete, true)?;
        if !failed.is_empty() {
            debug!(path = %location, failed = failed.len(), "Some objects were not deleted");
        }
        Ok(true)
    }

    fn create_dir(&mut self, path: &str, config: &WriteConfig) -> Result<Metadata> {
        config.check_supported()?;

        let location = self.prefix.apply(path)?;
        let (parent, leaf) =
            split_location(&location).ok_or_else(|| Error::InvalidName(path.to_owned()))?;
        let name = encode_name(&leaf, config.encoding)?;

        let parent_folder = ensure_directory(&mut self.session, &parent, config)?;
        let parent = parent_folder.path().map_or(parent, str::to_owned);
        let folder = create_folder(&mut self.session, &parent_folder, &name, &config.properties)?;

        Ok(self.normalize_child(&CmisObject::Folder(folder), &parent))
    }

    fn list_contents(&mut self, directory: &str, recursive: bool) -> Result<Vec<Metadata>> {
        let location = self.prefix.apply(directory)?;
        let mut entries = Vec::new();
        self.list_children(&location, recursive, &mut entries)
            .map_err(Error::not_found_at(directory))?;
        Ok(entries)
    }

    fn has(&mut self, path: &str) -> Result<bool> {
        let location = self.prefix.apply(path)?;
        match lookup(&mut self.session, &location) {
            Ok(_) => Ok(true),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn metadata(&mut self, path: &str) -> Result<Metadata> {
        let location = self.prefix.apply(path)?;
        let object = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;
        Ok(self.normalize_at(&object, &location))
    }

    fn visibility(&mut self, _path: &str) -> Result<Visibility> {
        Err(Error::UnsupportedVisibility)
    }

    fn set_visibility(&mut self, _path: &str, _visibility: Visibility) -> Result<Metadata> {
        Err(Error::UnsupportedVisibility)
    }
}
