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

use tracing::{debug, trace};

use crate::session::{
    names, BaseType, CmisObject, CmisSession, Fileable, Folder, PropertySet, SessionResult,
};
use crate::Error;

use super::config::WriteConfig;
use super::encoding::encode_name;
use super::path::{join_location, segments};

/// Return the object at the absolute `location`.
///
/// The root location is resolved with `root_folder` instead of a path lookup.
pub(crate) fn lookup<S: CmisSession + ?Sized>(
    session: &mut S,
    location: &str,
) -> SessionResult<CmisObject> {
    trace!(path = %location, "Looking up object");
    if segments(location).is_empty() {
        session.root_folder().map(CmisObject::from)
    } else {
        session.object_by_path(location)
    }
}

/// Create a folder named `name` in `parent` and return it.
///
/// The `name` must already be encoded for the repository. The `cmis:objectTypeId` defaults to
/// `cmis:folder` unless `properties` contains one.
pub(crate) fn create_folder<S: CmisSession + ?Sized>(
    session: &mut S,
    parent: &Folder,
    name: &str,
    properties: &PropertySet,
) -> crate::Result<Folder> {
    let mut properties = properties.clone();
    properties.set(names::NAME, name);
    properties.set_default(names::OBJECT_TYPE_ID, BaseType::Folder.as_str());

    debug!(parent = %parent.id(), name, "Creating folder");
    let id = session.create_folder(&properties, parent.id())?;

    session
        .object(&id)?
        .into_folder()
        .ok_or_else(|| Error::NotDirectory(name.to_owned()))
}

/// Return the folder at `location`, creating missing folders along the way if configured to.
///
/// When `config.auto_create_directories` is `true`, this walks from the root folder, looking up
/// each ancestor in turn and creating the ones which don't exist with
/// `config.directory_properties`. Otherwise, the folder is looked up directly.
///
/// # Errors
/// - `Error::NotFound`: The folder does not exist and auto-creation is disabled.
/// - `Error::NotDirectory`: A component of the path is not a folder.
/// - `Error::InvalidName`: A name can not be encoded for the repository.
/// - `Error::Session`: Some other error occurred in the session.
pub(crate) fn ensure_directory<S: CmisSession + ?Sized>(
    session: &mut S,
    location: &str,
    config: &WriteConfig,
) -> crate::Result<Folder> {
    if !config.auto_create_directories {
        return lookup(session, location)
            .map_err(Error::not_found_at(location))?
            .into_folder()
            .ok_or_else(|| Error::NotDirectory(location.to_owned()));
    }

    let mut folder = session.root_folder()?;
    let mut current = String::from("/");

    for segment in segments(location) {
        let name = encode_name(&segment, config.encoding)?;
        current = join_location(&current, &name);

        folder = match session.object_by_path(&current) {
            Ok(object) => object
                .into_folder()
                .ok_or_else(|| Error::NotDirectory(current.clone()))?,
            Err(error) if error.is_not_found() => {
                create_folder(session, &folder, &name, &config.directory_properties)?
            }
            Err(error) => return Err(error.into()),
        };
    }

    Ok(folder)
}
