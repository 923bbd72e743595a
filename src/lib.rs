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

//! `cmis-fs` is a library which exposes CMIS document repositories as a generic filesystem.
//!
//! This crate translates filesystem operations like writing, reading, listing, renaming and
//! deleting files into operations on a CMIS repository such as Alfresco. It takes care of:
//! - Resolving paths to folders and documents
//! - Creating missing parent folders
//! - Telling renames apart from moves between folders
//! - Converting names into the text encoding of the repository
//! - Normalizing CMIS properties into generic file metadata
//!
//! The crate is split into two modules:
//! - `session` provides the `CmisSession` trait, which is the interface to a repository, along
//! with the CMIS object model and `MemorySession`, an in-memory repository.
//! - `adapter` provides `CmisAdapter`, which implements the `FilesystemAdapter` trait on top of a
//! session.
//!
//! The wire protocol is not part of this crate. To talk to a remote repository, implement
//! `CmisSession` for your client.
//!
//! # Examples
//! ```
//! use cmis_fs::adapter::{AdapterOptions, FilesystemAdapter, WriteConfig};
//! use cmis_fs::session::MemoryConfig;
//!
//! fn main() -> cmis_fs::Result<()> {
//!     // Open an adapter over an in-memory repository.
//!     let mut adapter = AdapterOptions::new().open(&MemoryConfig::new())?;
//!
//!     // Write a file. Missing parent folders are created.
//!     adapter.write("Clients/44-000001/invoice.txt", b"Data", &WriteConfig::default())?;
//!
//!     // Read the file back.
//!     let file = adapter.read("Clients/44-000001/invoice.txt")?.unwrap();
//!     assert_eq!(file.contents, b"Data");
//!
//!     // Move the folder somewhere else.
//!     adapter.create_dir("Archive", &WriteConfig::default())?;
//!     assert!(adapter.rename("Clients/44-000001", "Archive")?);
//!     assert!(adapter.has("Archive/44-000001/invoice.txt")?);
//!
//!     Ok(())
//! }
//! ```

pub use error::{Error, Result};

pub mod adapter;
mod error;
pub mod session;
