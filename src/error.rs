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

use std::io;
use std::result;

use thiserror::Error as DeriveError;

use crate::session::SessionError;

/// The error type for operations with an adapter.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// The path does not exist in the repository.
    #[error("File not found at path: {0}")]
    NotFound(String),

    /// Visibility settings were requested, but the repository has no equivalent concept.
    #[error("The CMIS adapter does not support visibility settings.")]
    UnsupportedVisibility,

    /// The path does not point to a folder.
    #[error("The path is not a directory: {0}")]
    NotDirectory(String),

    /// The path does not point to a document.
    #[error("The path is not a regular file: {0}")]
    NotFile(String),

    /// The name can not be represented in the repository's text encoding.
    #[error("The name can not be encoded for the repository: {0}")]
    InvalidName(String),

    /// An error occurred in the CMIS session.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// An I/O error occurred.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Return a function which maps a not-found session error to `Error::NotFound` for `path`.
    ///
    /// Every other session error is wrapped as-is in `Error::Session`.
    pub(crate) fn not_found_at(path: &str) -> impl FnOnce(SessionError) -> Error + '_ {
        move |error| {
            if error.is_not_found() {
                Error::NotFound(path.to_owned())
            } else {
                Error::Session(error)
            }
        }
    }
}

/// The result type for operations with an adapter.
pub type Result<T> = result::Result<T, Error>;
