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

use relative_path::{Component, RelativePath, RelativePathBuf};

use crate::Error;

/// Normalize a slash-separated path, ignoring leading and trailing separators.
fn normalize(path: &str) -> RelativePathBuf {
    RelativePath::new(path.trim_matches('/')).normalize()
}

/// Render a normalized path as an absolute repository location.
fn to_location(path: &RelativePath) -> String {
    format!("/{}", path.as_str())
}

/// A fixed prefix which an adapter applies to every path it is given.
///
/// Paths passed to an adapter are relative to this prefix. The prefixed form of a path is called
/// its location, which is always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPrefix {
    prefix: RelativePathBuf,
}

impl Default for PathPrefix {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PathPrefix {
    /// Create a new `PathPrefix` from the given absolute or relative `prefix`.
    pub fn new(prefix: &str) -> Self {
        PathPrefix {
            prefix: normalize(prefix),
        }
    }

    /// Return this prefix as an absolute location.
    pub fn location(&self) -> String {
        to_location(&self.prefix)
    }

    /// Return the location of `path` relative to this prefix.
    ///
    /// # Errors
    /// - `Error::InvalidName`: The `path` refers to a location outside of the prefix.
    pub fn apply(&self, path: &str) -> crate::Result<String> {
        let relative = normalize(path);
        if matches!(relative.components().next(), Some(Component::ParentDir)) {
            return Err(Error::InvalidName(path.to_owned()));
        }
        Ok(to_location(&self.prefix.join(relative).normalize()))
    }

    /// Return the path of `location` relative to this prefix.
    ///
    /// Locations outside of the prefix are returned without a leading separator.
    pub fn remove(&self, location: &str) -> String {
        let path = normalize(location);
        match path.strip_prefix(&self.prefix) {
            Ok(relative) => relative.as_str().to_owned(),
            Err(_) => path.as_str().to_owned(),
        }
    }
}

/// Split a `location` into the location of its parent and its final component.
///
/// This returns `None` for the root location.
pub(crate) fn split_location(location: &str) -> Option<(String, String)> {
    let path = normalize(location);
    let name = path.file_name()?.to_owned();
    let parent = path
        .parent()
        .map(to_location)
        .unwrap_or_else(|| String::from("/"));
    Some((parent, name))
}

/// Return the location of the child `name` of `parent`.
pub(crate) fn join_location(parent: &str, name: &str) -> String {
    to_location(&normalize(parent).join(name.trim_matches('/')))
}

/// Return the names of the folders along `location`, starting from the root.
pub(crate) fn segments(location: &str) -> Vec<String> {
    normalize(location)
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_owned()),
            _ => None,
        })
        .collect()
}
