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

use crate::session::{CmisSession, OpenSession};

use super::metadata::ResultMap;
use super::path::PathPrefix;
use super::repository::CmisAdapter;

/// Open an adapter.
///
/// This type is a builder used to open adapters. Typically, when using `AdapterOptions`, you'll
/// first call [`new`], then chain method calls to configure the adapter, and then finally call
/// [`open`].
///
/// To open an adapter, you'll need a value which implements [`OpenSession`] to pass to [`open`].
/// You can think of this value as the configuration necessary to connect to the repository. If you
/// already have a session, use [`build`] instead.
///
/// # Examples
/// ```
/// use cmis_fs::adapter::{AdapterOptions, FilesystemAdapter, WriteConfig};
/// use cmis_fs::session::MemoryConfig;
///
/// let mut adapter = AdapterOptions::new()
///     .prefix("/TMS/Clients")
///     .open(&MemoryConfig::new())
///     .unwrap();
///
/// let metadata = adapter
///     .write("44-000001/invoice.txt", b"Data", &WriteConfig::default())
///     .unwrap();
/// assert_eq!(metadata.path, "44-000001/invoice.txt");
/// ```
///
/// [`new`]: crate::adapter::AdapterOptions::new
/// [`open`]: crate::adapter::AdapterOptions::open
/// [`build`]: crate::adapter::AdapterOptions::build
/// [`OpenSession`]: crate::session::OpenSession
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    prefix: PathPrefix,
    result_map: ResultMap,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterOptions {
    /// Create a new `AdapterOptions`.
    pub fn new() -> Self {
        Self {
            prefix: PathPrefix::default(),
            result_map: ResultMap::DEFAULT,
        }
    }

    /// The location in the repository which paths are relative to.
    ///
    /// If this is not specified, the default prefix is the root folder `/`.
    pub fn prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefix = PathPrefix::new(prefix);
        self
    }

    /// The CMIS properties which metadata fields are read from.
    ///
    /// If this is not specified, the default is [`ResultMap::DEFAULT`].
    ///
    /// [`ResultMap::DEFAULT`]: crate::adapter::ResultMap::DEFAULT
    pub fn result_map(&mut self, result_map: ResultMap) -> &mut Self {
        self.result_map = result_map;
        self
    }

    /// Open a session with `config` and return an adapter which wraps it.
    ///
    /// # Errors
    /// - `Error::Session`: The session could not be opened.
    pub fn open<C: OpenSession>(&self, config: &C) -> crate::Result<CmisAdapter<C::Session>> {
        let session = config.open()?;
        Ok(self.build(session))
    }

    /// Return an adapter which wraps the given `session`.
    pub fn build<S: CmisSession>(&self, session: S) -> CmisAdapter<S> {
        debug!(prefix = %self.prefix.location(), "Opening adapter");
        CmisAdapter {
            session,
            prefix: self.prefix.clone(),
            result_map: self.result_map,
        }
    }
}
