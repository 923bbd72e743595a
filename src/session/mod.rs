//! Sessions with CMIS repositories.
//!
//! This module provides the interface which adapters use to talk to a CMIS repository. A session
//! exposes only the remote operations an adapter needs: path lookups, object creation, moves,
//! deletion, content streams, property updates, paged children and queries. The wire protocol,
//! authentication and caching are the responsibility of the session implementation.
//!
//! All sessions implement the [`CmisSession`] trait. Objects returned by a session are snapshots
//! represented by [`CmisObject`], and objects which can be filed in folders implement
//! [`Fileable`].
//!
//! For each session, there is a corresponding type which provides the necessary configuration to
//! open that session. These config types implement [`OpenSession`]. Typically, you'll use these
//! config types with [`AdapterOptions`] to open adapters.
//!
//! [`MemorySession`] is a complete in-memory implementation of [`CmisSession`], which is useful for
//! testing.
//!
//! [`CmisSession`]: crate::session::CmisSession
//! [`CmisObject`]: crate::session::CmisObject
//! [`Fileable`]: crate::session::Fileable
//! [`OpenSession`]: crate::session::OpenSession
//! [`MemorySession`]: crate::session::MemorySession
//! [`AdapterOptions`]: crate::adapter::AdapterOptions

pub use self::cmis_session::{
    ChildrenPage, CmisSession, OrderBy, Paging, QueryResult, UnfileObject,
};
pub use self::content::{ContentStream, BINARY_MIME_TYPE};
pub use self::error::{SessionError, SessionResult};
pub use self::memory_session::{MemoryConfig, MemorySession};
pub use self::object::{BaseType, CmisObject, Document, Fileable, Folder, ObjectId, OtherObject};
pub use self::open_session::OpenSession;
pub use self::property::{names, Iter, PropertySet, PropertyValue, DATE_TIME_FORMAT};

mod cmis_session;
mod content;
mod error;
mod memory_session;
mod object;
mod open_session;
mod property;
mod query;
