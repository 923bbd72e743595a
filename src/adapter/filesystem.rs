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
use std::io::Read;

use static_assertions::assert_obj_safe;

use crate::session::ContentStream;
use crate::Result;

use super::config::{Visibility, WriteConfig};
use super::metadata::Metadata;

/// The contents of a file along with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    /// The bytes of the file.
    pub contents: Vec<u8>,

    /// The metadata of the file.
    pub metadata: Metadata,
}

/// A backend for a generic filesystem.
///
/// A `FilesystemAdapter` provides a uniform set of file operations over some storage backend.
/// Paths are slash-separated and relative to the root of the adapter.
///
/// Operations distinguish between "not possible" and "erroneous". Operations which return `bool`
/// or `Option` report a benign failure that way, while errors are reserved for missing paths,
/// unsupported features and backend failures.
pub trait FilesystemAdapter: fmt::Debug {
    /// Create a file at `path` with the given `contents` and return its metadata.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The `config` requests a visibility.
    /// - `Error::NotFound`: The parent directory does not exist and can not be created.
    fn write(&mut self, path: &str, contents: &[u8], config: &WriteConfig) -> Result<Metadata>;

    /// Create a file at `path` with the contents of `reader` and return its metadata.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The `config` requests a visibility.
    /// - `Error::NotFound`: The parent directory does not exist and can not be created.
    /// - `Error::Io`: Reading from `reader` failed.
    fn write_stream(
        &mut self,
        path: &str,
        reader: &mut dyn Read,
        config: &WriteConfig,
    ) -> Result<Metadata>;

    /// Replace the contents of the file at `path` and return its metadata.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The `config` requests a visibility.
    /// - `Error::NotFound`: There is no file at `path`.
    /// - `Error::NotFile`: The object at `path` is not a file.
    fn update(&mut self, path: &str, contents: &[u8], config: &WriteConfig) -> Result<Metadata>;

    /// Replace the contents of the file at `path` with the contents of `reader`.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The `config` requests a visibility.
    /// - `Error::NotFound`: There is no file at `path`.
    /// - `Error::NotFile`: The object at `path` is not a file.
    /// - `Error::Io`: Reading from `reader` failed.
    fn update_stream(
        &mut self,
        path: &str,
        reader: &mut dyn Read,
        config: &WriteConfig,
    ) -> Result<Metadata>;

    /// Return the contents of the file at `path`.
    ///
    /// This returns `Ok(None)` if the file has no contents.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no file at `path`.
    /// - `Error::NotFile`: The object at `path` is not a file.
    fn read(&mut self, path: &str) -> Result<Option<FileContents>>;

    /// Return a stream of the contents of the file at `path`.
    ///
    /// This returns `Ok(None)` if the file has no contents.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no file at `path`.
    /// - `Error::NotFile`: The object at `path` is not a file.
    fn read_stream(&mut self, path: &str) -> Result<Option<ContentStream>>;

    /// Move the file or directory at `path` to `new_path`.
    ///
    /// If `new_path` is an existing directory, the object is moved into it. This returns `false` if
    /// the object can not be moved to `new_path`, such as when `new_path` is an existing file.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path` or the parent of `new_path` doesn't
    /// exist.
    fn rename(&mut self, path: &str, new_path: &str) -> Result<bool>;

    /// Copy the file at `path` to `new_path`.
    ///
    /// This returns `false` if the file has no contents.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no file at `path`.
    /// - `Error::NotFile`: The object at `path` is not a file.
    fn copy(&mut self, path: &str, new_path: &str) -> Result<bool>;

    /// Delete the file at `path`.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Delete the directory at `path` and everything in it.
    ///
    /// This returns `false` if there is no directory at `path`.
    fn delete_dir(&mut self, path: &str) -> Result<bool>;

    /// Create a directory at `path` and return its metadata.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The `config` requests a visibility.
    /// - `Error::NotFound`: The parent directory does not exist and can not be created.
    fn create_dir(&mut self, path: &str, config: &WriteConfig) -> Result<Metadata>;

    /// Return the metadata of the entries in the directory at `directory`.
    ///
    /// If `recursive` is `true`, the entries of every subdirectory are listed right after the
    /// subdirectory itself. This returns an empty list if `directory` is not a directory.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `directory`.
    fn list_contents(&mut self, directory: &str, recursive: bool) -> Result<Vec<Metadata>>;

    /// Return whether there is an object at `path`.
    fn has(&mut self, path: &str) -> Result<bool>;

    /// Return the metadata of the object at `path`.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    fn metadata(&mut self, path: &str) -> Result<Metadata>;

    /// Return the size of the file at `path` in bytes.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    fn size(&mut self, path: &str) -> Result<Option<u64>> {
        Ok(self.metadata(path)?.size)
    }

    /// Return the MIME type of the file at `path`.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    fn mimetype(&mut self, path: &str) -> Result<Option<String>> {
        Ok(self.metadata(path)?.mimetype)
    }

    /// Return the modification time of the object at `path` as a Unix timestamp.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `path`.
    fn timestamp(&mut self, path: &str) -> Result<Option<i64>> {
        Ok(self.metadata(path)?.timestamp)
    }

    /// Return the visibility of the object at `path`.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The backend has no concept of visibility.
    fn visibility(&mut self, path: &str) -> Result<Visibility>;

    /// Set the visibility of the object at `path`.
    ///
    /// # Errors
    /// - `Error::UnsupportedVisibility`: The backend has no concept of visibility.
    fn set_visibility(&mut self, path: &str, visibility: Visibility) -> Result<Metadata>;
}

assert_obj_safe!(FilesystemAdapter);
