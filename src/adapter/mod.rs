//! A filesystem adapter for CMIS repositories.
//!
//! This module implements the generic [`FilesystemAdapter`] contract on top of a
//! [`CmisSession`]. Filesystem paths are mapped onto folders and documents in the repository, and
//! CMIS properties are normalized into [`Metadata`] values.
//!
//! The interesting parts are how paths are resolved and how renames are disambiguated:
//! - Writing a file or creating a directory creates missing parent folders unless
//! [`WriteConfig::auto_create_directories`] is disabled.
//! - Renaming onto an existing folder moves the object into it. Renaming onto a path which doesn't
//! exist moves the object into the new parent folder if necessary and then renames it. Renaming onto
//! an existing file does nothing and returns `false`.
//!
//! Names are converted into the Latin-1 repertoire before they are submitted to the repository
//! according to [`NameEncoding`]. Because of this, the path in returned metadata is always built
//! from the name the repository reports.
//!
//! [`FilesystemAdapter`]: crate::adapter::FilesystemAdapter
//! [`CmisSession`]: crate::session::CmisSession
//! [`Metadata`]: crate::adapter::Metadata
//! [`WriteConfig::auto_create_directories`]: crate::adapter::WriteConfig::auto_create_directories
//! [`NameEncoding`]: crate::adapter::NameEncoding

pub use self::config::{Pagination, Visibility, WriteConfig};
pub use self::encoding::{transliterate, NameEncoding};
pub use self::filesystem::{FileContents, FilesystemAdapter};
pub use self::metadata::{flatten, FileType, Metadata, ResultMap};
pub use self::options::AdapterOptions;
pub use self::paginate::Page;
pub use self::path::PathPrefix;
pub use self::repository::CmisAdapter;

mod config;
mod encoding;
mod filesystem;
mod metadata;
mod options;
mod paginate;
mod path;
mod rename;
mod repository;
mod resolver;
