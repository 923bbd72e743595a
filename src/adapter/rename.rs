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

use tracing::debug;

use crate::session::{names, CmisObject, CmisSession, ObjectId, PropertySet, SessionResult};
use crate::{Error, Result};

use super::encoding::{encode_name, NameEncoding};
use super::path::split_location;
use super::repository::CmisAdapter;
use super::resolver::lookup;

impl<S: CmisSession> CmisAdapter<S> {
    /// Move `object` from its current parent folder into the folder `target`.
    ///
    /// This returns `None` if the object can't be filed in folders or has no parent.
    fn move_into(
        &mut self,
        object: &CmisObject,
        target: &ObjectId,
    ) -> SessionResult<Option<CmisObject>> {
        let fileable = match object.as_fileable() {
            Some(fileable) => fileable,
            None => return Ok(None),
        };
        let source = match fileable.parent_id() {
            Some(parent) => parent.clone(),
            None => return Ok(None),
        };

        debug!(id = %object.id(), source = %source, target = %target, "Moving object");
        let moved = self.session.move_object(object.id(), &source, target)?;
        Ok(Some(moved))
    }

    /// Rename the object at `path` to `new_path`, moving it between folders when necessary.
    ///
    /// If `new_path` is an existing folder, the object is moved into it and keeps its name. If
    /// `new_path` doesn't exist, the object is moved into its parent folder if that is a different
    /// folder, and then renamed to its final component.
    pub(super) fn rename_object(&mut self, path: &str, new_path: &str) -> Result<bool> {
        let location = self.prefix.apply(path)?;
        let new_location = self.prefix.apply(new_path)?;

        let source = lookup(&mut self.session, &location).map_err(Error::not_found_at(path))?;

        match lookup(&mut self.session, &new_location) {
            Ok(target) => {
                if target.id() == source.id() {
                    return Ok(false);
                }
                match (target.as_folder(), source.as_fileable()) {
                    (Some(_), Some(_)) => {
                        let moved = self
                            .move_into(&source, target.id())
                            .map_err(Error::not_found_at(path))?;
                        Ok(moved.is_some())
                    }
                    _ => {
                        debug!(path = %new_location, "Refusing to overwrite existing object");
                        Ok(false)
                    }
                }
            }
            Err(error) if error.is_not_found() => {
                let (source_parent, _) = match split_location(&location) {
                    Some(split) => split,
                    None => return Ok(false),
                };
                let (target_parent, leaf) = split_location(&new_location)
                    .ok_or_else(|| Error::InvalidName(new_path.to_owned()))?;
                let name = encode_name(&leaf, NameEncoding::Utf8)?;

                let mut object = source;
                let mut moved = false;

                if source_parent != target_parent {
                    let parent = lookup(&mut self.session, &target_parent)
                        .map_err(Error::not_found_at(new_path))?;
                    if parent.as_folder().is_none() {
                        return Ok(false);
                    }
                    object = match self
                        .move_into(&object, parent.id())
                        .map_err(Error::not_found_at(path))?
                    {
                        Some(object) => object,
                        None => return Ok(false),
                    };
                    moved = true;
                }

                if moved && object.name() == Some(name.as_str()) {
                    return Ok(true);
                }

                debug!(path = %location, name = %name, "Renaming object");
                let properties = PropertySet::new().with(names::NAME, name);
                let updated = self
                    .session
                    .update_properties(object.id(), &properties)
                    .map_err(Error::not_found_at(path))?;
                Ok(updated.is_some())
            }
            Err(error) => Err(error.into()),
        }
    }
}
