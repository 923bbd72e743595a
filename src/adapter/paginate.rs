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

use serde::Serialize;
use tracing::trace;

use crate::session::{names, CmisObject, CmisSession, Fileable, OrderBy, Paging, SessionResult};
use crate::{Error, Result};

use super::config::Pagination;
use super::metadata::Metadata;
use super::path::join_location;
use super::repository::CmisAdapter;
use super::resolver::lookup;

/// A page of directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// The entries in this page.
    pub entries: Vec<Metadata>,

    /// The total number of entries in the listed directory, if the repository reports it.
    ///
    /// This counts the direct children of the listed directory only, even when the listing is
    /// recursive.
    pub total: Option<u64>,
}

impl<S: CmisSession> CmisAdapter<S> {
    /// Return a page of the entries in the directory at `directory`.
    ///
    /// This skips `pagination.offset` entries and returns at most `pagination.limit` entries from
    /// the directory. If `recursive` is `true`, every subdirectory in the page is listed with the
    /// same bounds right after the subdirectory itself.
    ///
    /// If `directory` is not a directory, this returns an empty page with no total.
    ///
    /// # Errors
    /// - `Error::NotFound`: There is no object at `directory`.
    pub fn list_contents_paginated(
        &mut self,
        directory: &str,
        recursive: bool,
        pagination: &Pagination,
    ) -> Result<Page> {
        let location = self.prefix.apply(directory)?;
        let paging = Paging {
            skip_count: pagination.offset,
            max_items: pagination.limit,
            order_by: if pagination.order_by_name {
                Some(OrderBy::ascending(names::NAME))
            } else {
                None
            },
        };

        let mut entries = Vec::new();
        let total = self
            .list_page(&location, recursive, &paging, &mut entries)
            .map_err(Error::not_found_at(directory))?;

        Ok(Page { entries, total })
    }

    /// Append a page of the children of the folder at `location` to `entries`.
    ///
    /// This returns the number of children of the folder.
    fn list_page(
        &mut self,
        location: &str,
        recursive: bool,
        paging: &Paging,
        entries: &mut Vec<Metadata>,
    ) -> SessionResult<Option<u64>> {
        let folder = match lookup(&mut self.session, location)? {
            CmisObject::Folder(folder) => folder,
            _ => return Ok(None),
        };

        trace!(
            path = %location,
            skip = paging.skip_count,
            max = ?paging.max_items,
            "Listing page"
        );
        let page = self.session.children(folder.id(), paging)?;

        for child in &page.objects {
            let metadata = self.normalize_child(child, location);
            let is_dir = metadata.is_dir();
            entries.push(metadata);

            if recursive && is_dir {
                let child_location = join_location(location, child.name().unwrap_or_default());
                self.list_page(&child_location, true, paging, entries)?;
            }
        }

        Ok(page.total)
    }
}
